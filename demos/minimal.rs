//! Minimal headless console example.
//!
//! Demonstrates driving bevy_alias_console programmatically without any UI.
//! Useful for testing or custom UI implementations.
//!
//! Run with: `cargo run --example minimal`

use bevy::prelude::*;
use bevy_alias_console::prelude::*;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(ConsolePlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, send_test_input.run_if(run_once))
        .add_systems(PostUpdate, (process_outputs, print_typed_line).chain())
        .run();
}

fn setup(mut console: ResMut<Console>) {
    let result = console.register(
        CommandSpec::new(|args, _| {
            let name = args.get(1).unwrap_or("World");
            Ok(format!("Hello, {}!", name))
        })
        .keyword(["greet", "hello"])
        .keyword([["alice"], ["bob"]])
        .fixed_tokens(1)
        .description("Greet someone"),
    );
    if let Err(e) = result {
        error!("Failed to register greet: {}", e);
    }

    let result = console.register_legacy_command("time set", |args, _| {
        let hour: u32 = args.parse(0)?;
        if hour > 23 {
            return Err(CommandError::OutOfRange);
        }
        Ok(format!("Time is now {}:00", hour))
    });
    if let Err(e) = result {
        error!("Failed to register time set: {}", e);
    }

    println!("Console initialized. Registered: greet, time set");
}

/// Send some test input programmatically.
fn send_test_input(
    mut lines: MessageWriter<ConsoleInputEvent>,
    mut edits: MessageWriter<ConsoleEditEvent>,
) {
    println!("\n--- Sending test input ---");

    lines.write(ConsoleInputEvent::new("greet bob"));
    lines.write(ConsoleInputEvent::new("time set 12"));
    lines.write(ConsoleInputEvent::new("time set 30"));
    lines.write(ConsoleInputEvent::new("list"));

    // Type "gr a", complete it, then leave it on the prompt
    edits.write(ConsoleEditEvent::Text("gr a".into()));
    edits.write(ConsoleEditEvent::Key(ConsoleKey::Autocomplete));
}

/// Process and print console output events.
fn process_outputs(mut events: MessageReader<ConsoleOutputEvent>) {
    for event in events.read() {
        let prefix = match event.level {
            ConsoleOutputLevel::Debug => "[DEBUG]",
            ConsoleOutputLevel::Info => "[INFO]",
            ConsoleOutputLevel::Warn => "[WARN]",
            ConsoleOutputLevel::Error => "[ERROR]",
            ConsoleOutputLevel::Command => "[$]",
            ConsoleOutputLevel::Result => "[>]",
        };
        println!("{} {}", prefix, event.message);
    }
}

fn print_typed_line(console: Res<Console>, mut last: Local<String>) {
    let line = console.prompt_line();
    if *last != line {
        println!("{}", line);
        *last = line;
    }
}
