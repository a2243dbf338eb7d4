//! Terminal console example.
//!
//! Demonstrates using bevy_alias_console with stdin/stdout for headless
//! applications like dedicated servers.
//!
//! Run with: `cargo run --example terminal --features terminal`
//!
//! Commands:
//! - `list` - List available commands
//! - `status` - Show server status
//! - `kick <player>` / `k <player>` - Kick a connected player
//! - `join <name>` - Connect a player
//! - `say <message>` - Broadcast a message

use bevy::prelude::*;
use bevy_alias_console::{CandidateProvider, CommandError, CommandSpec, Console, LiveCandidates};

fn main() {
    println!("=== Terminal Console Example ===");
    println!("Type commands and press Enter.");
    println!();

    // Ensure output is flushed before starting the app
    use std::io::Write;
    let _ = std::io::stdout().flush();

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(bevy_alias_console::ConsolePlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut console: ResMut<Console>) {
    let players = LiveCandidates::new();

    let joined = players.clone();
    let kicked = players.clone();
    let commands = [
        CommandSpec::new(|_, registry| Ok(format!("{} commands registered", registry.len())))
            .keyword(["status", "st"])
            .description("Show server status"),
        CommandSpec::new(move |args, _| {
            let name = args.arg(0)?;
            joined.push(name);
            Ok(format!("{} joined", name))
        })
        .keyword(["join"])
        .description("Connect a player"),
        CommandSpec::new(move |args, _| {
            let name = &args[1];
            kicked.replace(
                kicked
                    .alias_groups()
                    .into_iter()
                    .filter(|group| !group.contains(name)),
            );
            Ok(format!("{} was kicked", name))
        })
        .keyword(["kick", "k"])
        .token(players)
        .description("Kick a connected player"),
        CommandSpec::new(|args, _| match args.join_from(0, " ") {
            message if message.is_empty() => Err(CommandError::OutOfRange),
            message => Ok(format!("[SERVER] {}", message)),
        })
        .keyword(["say"])
        .description("Broadcast a message"),
    ];

    for command in commands {
        if let Err(e) = console.register(command) {
            error!("Failed to register command: {}", e);
        }
    }
}
