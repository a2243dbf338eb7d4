//! Stdin/stdout backend for running the alias console without a renderer.
//!
//! Each stdin line is submitted verbatim as a [`ConsoleInputEvent`], so a
//! whitespace-only line still reaches commands with no fixed tokens. Each
//! [`ConsoleOutputEvent`] becomes one stdout line. With colour on, the
//! ` >> ` echo of a submitted command is cyan, callback failures are red,
//! captured warnings yellow and debug records grey. Callback results and
//! `list` output stay in the terminal's own colour.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(Update, (forward_stdin_lines, print_console_output));
    }
}

/// Terminal rendering options.
#[derive(Resource, Debug, Clone, Default)]
pub struct TerminalConfig {
    /// Wrap lines in ANSI colour codes by output level. Off by default.
    pub colored: bool,
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        for line in io::stdin().lock().lines().map_while(Result::ok) {
            if sender.send(line).is_err() {
                break;
            }
        }
    })
}

fn forward_stdin_lines(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else {
        return;
    };
    events.write_batch(rx.try_iter().map(ConsoleInputEvent::new));
}

fn print_console_output(mut events: MessageReader<ConsoleOutputEvent>, config: Res<TerminalConfig>) {
    if events.is_empty() {
        return;
    }

    let mut stdout = io::stdout().lock();
    for event in events.read() {
        if writeln!(stdout, "{}", format_line(&event.message, event.level, config.colored)).is_err() {
            // stdout is gone; nothing left to print to
            events.clear();
            return;
        }
    }
    let _ = stdout.flush();
}

/// SGR colour code for a level, `None` for lines printed uncoloured.
fn level_color(level: ConsoleOutputLevel) -> Option<&'static str> {
    match level {
        ConsoleOutputLevel::Command => Some("36"),
        ConsoleOutputLevel::Error => Some("31"),
        ConsoleOutputLevel::Warn => Some("33"),
        ConsoleOutputLevel::Debug => Some("90"),
        ConsoleOutputLevel::Info | ConsoleOutputLevel::Result => None,
    }
}

/// Render one console output line for the terminal.
///
/// ```
/// use bevy_alias_console::core::ConsoleOutputLevel;
/// use bevy_alias_console::terminal::format_line;
///
/// assert_eq!(format_line(" >> list", ConsoleOutputLevel::Command, true), "\x1b[36m >> list\x1b[0m");
/// assert_eq!(format_line("give sword/shield", ConsoleOutputLevel::Result, true), "give sword/shield");
/// ```
pub fn format_line(message: &str, level: ConsoleOutputLevel, colored: bool) -> String {
    match level_color(level) {
        Some(code) if colored => format!("\x1b[{}m{}\x1b[0m", code, message),
        _ => message.to_string(),
    }
}
