//! An alias-driven command console for Bevy.
//!
//! Commands are chains of token positions, each offering groups of
//! interchangeable aliases (`["teleport", "tp"]`). bevy_alias_console provides:
//!
//! - **CommandSpec**: Commands built from static or live alias groups
//! - **Autocomplete**: Token-by-token completion that narrows the command set
//! - **Legacy commands**: Literal-text commands resolved by longest prefix
//! - **Console**: History, output buffer and line editing in one resource
//!
//! # Features
//!
//! - `capture` (default): forward `tracing` records into the console output
//! - `terminal`: stdin/stdout backend for dedicated servers
//! - `persist`: RON persistence of [`ConsoleConfig`]
//! - `full`: Enable capture + persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_alias_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin)
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: ResMut<Console>) {
//!     console
//!         .register(
//!             CommandSpec::new(|args, _| Ok(format!("teleported to {}", args.arg(0)?)))
//!                 .keyword(["teleport", "tp"])
//!                 .description("Move the player"),
//!         )
//!         .unwrap();
//!
//!     console
//!         .register_legacy_command("noclip", |_, _| Ok("noclip toggled".into()))
//!         .unwrap();
//! }
//! ```

use bevy::prelude::*;

pub mod config;
pub mod core;

pub use config::ConsoleConfig;

// Re-export core types at crate root for convenience
pub use crate::core::{
    AliasGroup, CandidateProvider, CommandArgs, CommandError, CommandOutcome, CommandRegistry,
    CommandResult, CommandSpec, Console, ConsoleEditEvent, ConsoleEventsPlugin, ConsoleInputEvent,
    ConsoleKey, ConsoleOutputEvent, ConsoleOutputLevel, ConsoleToggleEvent, LiveCandidates,
    RegistrationError, StaticCandidates,
};

// Log capture (feature-gated)
#[cfg(feature = "capture")]
pub mod logging;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

#[cfg(feature = "persist")]
pub use persist::{ConfigError, ConfigPath};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalConfig, TerminalPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ConsoleConfig;
    pub use crate::core::{
        AliasGroup, CommandArgs, CommandError, CommandOutcome, CommandResult, CommandSpec, Console,
        ConsoleEditEvent, ConsoleInputEvent, ConsoleKey, ConsoleOutputEvent, ConsoleOutputLevel,
        ConsoleToggleEvent, LiveCandidates, StaticCandidates,
    };
    pub use crate::ConsolePlugin;
}

/// Main console plugin.
///
/// Inserts the [`Console`] resource (built from [`ConsoleConfig`] if one is
/// present) and the systems that feed it events.
///
/// To capture logs from other crates, also install
/// [`logging::custom_log_layer`] through `LogPlugin::custom_layer`.
#[derive(Default)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConsoleConfig>()
            .init_resource::<Console>()
            .add_plugins(crate::core::ConsoleEventsPlugin);

        // 1. process_edit_events: typed text and control keys, in order
        // 2. process_input_events: whole lines submitted programmatically
        // 3. send_pending_outputs: publish new output lines
        app.add_systems(
            Update,
            (process_edit_events, process_input_events, send_pending_outputs).chain(),
        );

        // Persistence (feature-gated)
        #[cfg(feature = "persist")]
        {
            app.init_resource::<persist::ConfigPath>()
                .add_systems(Startup, persist::load_config_on_startup);
        }

        // Terminal backend (feature-gated)
        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// System that applies line-editing events to the console.
fn process_edit_events(
    mut edit_events: MessageReader<ConsoleEditEvent>,
    mut toggle_events: MessageWriter<ConsoleToggleEvent>,
    mut console: ResMut<Console>,
) {
    for event in edit_events.read() {
        match event {
            ConsoleEditEvent::Text(text) => console.on_text(text),
            ConsoleEditEvent::Key(key) => {
                let was_open = console.is_open();
                if let Some(outcome) = console.on_key(*key) {
                    debug!("Console: submitted line -> {:?}", outcome);
                }
                if console.is_open() != was_open {
                    toggle_events.write(ConsoleToggleEvent { open: console.is_open() });
                }
            }
        }
    }
}

/// System that executes whole submitted lines.
fn process_input_events(
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut console: ResMut<Console>,
) {
    for event in input_events.read() {
        console.submit_command(&event.command);
    }
}

/// System that sends output lines appended since the last frame.
fn send_pending_outputs(
    mut console: ResMut<Console>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
) {
    for line in console.take_unsent_output() {
        output_events.write(ConsoleOutputEvent::new(line.level, line.message));
    }
}
