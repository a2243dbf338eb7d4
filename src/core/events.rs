//! Console events for communication between layers.
//!
//! Events are the primary mechanism for:
//! - Input layer -> Core: typed text, control keys, whole submitted lines
//! - Core -> Renderers: output lines and visibility changes

use bevy::prelude::*;

/// Event submitting a whole line, as if typed and confirmed.
///
/// # Examples
///
/// ```ignore
/// fn run_startup_script(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("time set 12"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw line to execute.
    pub command: String,
}

impl ConsoleInputEvent {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Control actions recognized by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleKey {
    /// Open if closed, close if open.
    Toggle,
    /// Close the console.
    Close,
    /// Recall the previous history entry.
    HistoryUp,
    /// Recall the next history entry or the pending line.
    HistoryDown,
    /// Remove the last character of the typed line.
    Backspace,
    /// Submit and clear the typed line.
    Submit,
    /// Complete the typed line and list suggestions.
    Autocomplete,
}

/// Line-editing event from the input layer.
///
/// Text and keys share one event type so their relative order is kept.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEditEvent {
    /// Literal text to append; control characters are filtered upstream.
    Text(String),
    /// A control key.
    Key(ConsoleKey),
}

/// Event sent for every line appended to the console output.
#[derive(Message, Debug, Clone)]
pub struct ConsoleOutputEvent {
    /// The message text.
    pub message: String,
    /// The log level/type.
    pub level: ConsoleOutputLevel,
}

/// Kind of console output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleOutputLevel {
    /// Debug information (gray).
    Debug,
    /// General information (white).
    #[default]
    Info,
    /// Warning (yellow).
    Warn,
    /// Error (red).
    Error,
    /// Command echo (shows the command that was executed).
    Command,
    /// Command result/response.
    Result,
}

impl ConsoleOutputEvent {
    pub fn new(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// Event sent when the console is opened or closed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleToggleEvent {
    /// Whether the console is now open.
    pub open: bool,
}

/// Plugin that registers all console events.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleEditEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConsoleToggleEvent>();
    }
}
