//! Custom [LogPlugin](bevy::log::LogPlugin) functionality.
//!
//! Records logged by other crates are appended to the console output.

use bevy::log::{BoxedLayer, Level};
use bevy::prelude::*;
use std::sync::mpsc;
use std::time::SystemTime;
use tracing::Subscriber;
use tracing_subscriber::field::Visit;
use tracing_subscriber::Layer;

use crate::core::{Console, ConsoleOutputLevel};

/// A function that implements the log reading functionality for the
/// console via [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
///
/// ```ignore
/// App::new().add_plugins(DefaultPlugins.set(LogPlugin {
///     custom_layer: custom_log_layer,
///     ..default()
/// }))
/// ```
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    Some(Box::new(create_custom_log_layer(app)))
}

fn create_custom_log_layer(app: &mut App) -> LogCaptureLayer {
    let (sender, receiver) = mpsc::channel();
    app.add_message::<LogMessage>();
    app.insert_non_send_resource(CapturedLogEvents(receiver));
    app.add_systems(PostUpdate, (transfer_log_events, forward_logs_to_console).chain());

    LogCaptureLayer { sender }
}

/// A [`tracing`] log message event.
#[derive(Message, Debug, Clone)]
pub struct LogMessage {
    /// The message contents.
    pub message: String,

    /// The part of the system that the event occurred in.
    pub target: &'static str,

    /// The level of verbosity of the event.
    pub level: Level,

    /// The name of the Rust module where the event occurred,
    /// or `None` if this could not be determined.
    pub module_path: Option<&'static str>,

    /// The time the log occurred.
    pub time: SystemTime,
}

impl LogMessage {
    /// Whether the record was emitted by this crate.
    pub fn is_own(&self) -> bool {
        self.target.starts_with(env!("CARGO_CRATE_NAME"))
    }
}

/// Console line kind for a log level.
pub fn output_level(level: Level) -> ConsoleOutputLevel {
    match level {
        Level::ERROR => ConsoleOutputLevel::Error,
        Level::WARN => ConsoleOutputLevel::Warn,
        Level::INFO => ConsoleOutputLevel::Info,
        _ => ConsoleOutputLevel::Debug,
    }
}

/// Transfers information from the [`CapturedLogEvents`] resource to [`MessageWriter<LogMessage>`](LogMessage).
fn transfer_log_events(
    receiver: NonSend<CapturedLogEvents>,
    mut log_events: MessageWriter<LogMessage>,
) {
    for msg in receiver.0.try_iter() {
        log_events.write(msg);
    }
}

/// Appends captured records to the console output.
///
/// The console's own records are skipped; they describe console activity
/// that is already visible.
pub fn forward_logs_to_console(
    mut log_events: MessageReader<LogMessage>,
    console: Option<ResMut<Console>>,
) {
    let Some(mut console) = console else {
        log_events.clear();
        return;
    };

    for msg in log_events.read().filter(|msg| !msg.is_own()) {
        console.print(output_level(msg.level), msg.message.clone());
    }
}

/// This struct temporarily stores [`LogMessage`]s before they are
/// written to [`MessageWriter<LogMessage>`] by [`transfer_log_events`].
struct CapturedLogEvents(mpsc::Receiver<LogMessage>);

/// A [`Layer`] that captures log events and saves them to [`CapturedLogEvents`].
struct LogCaptureLayer {
    sender: mpsc::Sender<LogMessage>,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut message = None;
        event.record(&mut LogEventVisitor(&mut message));
        if let Some(message) = message {
            let metadata = event.metadata();
            let _ = self.sender.send(LogMessage {
                message,
                target: metadata.target(),
                level: *metadata.level(),
                module_path: metadata.module_path(),
                time: SystemTime::now(),
            });
        }
    }
}

/// A [`Visit`]or that records log messages that are transferred to [`LogCaptureLayer`].
struct LogEventVisitor<'a>(&'a mut Option<String>);

impl Visit for LogEventVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // Only log out messages
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConsoleConfig;
    use bevy::ecs::message::Messages;

    fn record(target: &'static str, level: Level, message: &str) -> LogMessage {
        LogMessage {
            message: message.to_string(),
            target,
            level,
            module_path: None,
            time: SystemTime::now(),
        }
    }

    #[test]
    fn test_output_level_mapping() {
        assert_eq!(output_level(Level::ERROR), ConsoleOutputLevel::Error);
        assert_eq!(output_level(Level::WARN), ConsoleOutputLevel::Warn);
        assert_eq!(output_level(Level::INFO), ConsoleOutputLevel::Info);
        assert_eq!(output_level(Level::TRACE), ConsoleOutputLevel::Debug);
    }

    #[test]
    fn test_forward_skips_own_records() {
        let mut app = App::new();
        app.add_message::<LogMessage>();
        app.insert_resource(Console::new(ConsoleConfig {
            banner: None,
            ..default()
        }));
        app.add_systems(Update, forward_logs_to_console);

        {
            let mut messages = app.world_mut().resource_mut::<Messages<LogMessage>>();
            messages.write(record("game::spawn", Level::WARN, "wolf stuck"));
            messages.write(record(
                concat!(env!("CARGO_CRATE_NAME"), "::core::registry"),
                Level::DEBUG,
                "registered",
            ));
        }
        app.update();

        let console = app.world().resource::<Console>();
        let lines: Vec<_> = console.output().iter().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].message, "wolf stuck");
        assert_eq!(lines[0].level, ConsoleOutputLevel::Warn);
    }
}
