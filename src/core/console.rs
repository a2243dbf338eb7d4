//! The console orchestrator.
//!
//! [`Console`] owns the command registry, history, output buffer and typed
//! line, and turns key/text events into edits, completions and executions.

use std::panic::{catch_unwind, AssertUnwindSafe};

use bevy::prelude::*;

use crate::config::ConsoleConfig;

use super::{
    complete, tokenize, CandidateProvider, CommandArgs, CommandCallback, CommandError,
    CommandHistory, CommandId, CommandRegistry, CommandResult, CommandSpec, CompletionOptions,
    ConsoleKey, ConsoleOutputLevel, LegacyCommandId, OutputBuffer, OutputLine, RegistrationError,
    Resolved, TokenSuggestions,
};

/// Output line for [`CommandError::OutOfRange`].
pub const OUT_OF_RANGE_MESSAGE: &str = "error: argument out of range";
/// Output line for [`CommandError::InvalidArgument`].
pub const INVALID_ARGUMENT_MESSAGE: &str = "error: invalid argument";
/// Output line for a callback that panicked.
pub const PANIC_MESSAGE: &str = "error: command panicked";

/// Result of submitting a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The line was empty; nothing ran.
    Empty,
    /// A command ran and returned this text.
    Output(String),
    /// A command ran and failed; this is the error line shown.
    Error(String),
    /// No command matched the line.
    NotFound,
}

/// Interactive console state.
///
/// Commands are registered once during startup. Every entry point runs to
/// completion; providers are evaluated inline on each completion and
/// resolution.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::{Console, ConsoleConfig};
/// use bevy_alias_console::core::{CommandOutcome, CommandSpec, ConsoleKey};
///
/// let mut console = Console::new(ConsoleConfig::default());
/// console
///     .register(CommandSpec::new(|_, _| Ok("healed".into())).keyword(["heal", "h"]))
///     .unwrap();
///
/// console.on_text("he");
/// console.on_key(ConsoleKey::Autocomplete);
/// assert_eq!(console.typed_line(), "heal ");
///
/// let outcome = console.on_key(ConsoleKey::Submit);
/// assert_eq!(outcome, Some(CommandOutcome::Output("healed".into())));
/// assert_eq!(console.typed_line(), "");
/// ```
#[derive(Resource)]
pub struct Console {
    registry: CommandRegistry,
    history: CommandHistory,
    output: OutputBuffer,
    typed: String,
    open: bool,
    config: ConsoleConfig,
    suggestions: Vec<TokenSuggestions>,
}

impl FromWorld for Console {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<ConsoleConfig>().cloned().unwrap_or_default();
        Self::new(config)
    }
}

impl Console {
    /// Create a console with the built-in commands registered.
    pub fn new(config: ConsoleConfig) -> Self {
        let mut output = OutputBuffer::new();
        if let Some(banner) = &config.banner {
            output.push(ConsoleOutputLevel::Info, banner.clone());
        }

        let mut console = Self {
            registry: CommandRegistry::new(),
            history: CommandHistory::new(),
            output,
            typed: String::new(),
            open: false,
            config,
            suggestions: Vec::new(),
        };
        console.register_builtin_commands();
        console
    }

    fn register_builtin_commands(&mut self) {
        let list = CommandSpec::new(|_args, registry| Ok(registry.describe().join("\n")))
            .keyword(["list"])
            .description("List registered commands");

        if let Err(e) = self.registry.register(list) {
            error!("Console: failed to register 'list': {}", e);
        }
    }

    /// Register an alias-group command.
    pub fn register(&mut self, spec: CommandSpec) -> Result<CommandId, RegistrationError> {
        self.registry.register(spec)
    }

    /// Register an alias-group command from its raw parts.
    pub fn register_command<F>(
        &mut self,
        generators: Vec<Box<dyn CandidateProvider>>,
        num_fixed_tokens: usize,
        callback: F,
    ) -> Result<CommandId, RegistrationError>
    where
        F: Fn(&CommandArgs, &CommandRegistry) -> CommandResult + Send + Sync + 'static,
    {
        let callback: CommandCallback = Box::new(callback);
        self.registry
            .register(CommandSpec::from_parts(generators, num_fixed_tokens, callback))
    }

    /// Register a command by its full literal text.
    pub fn register_legacy_command<F>(
        &mut self,
        literal: &str,
        callback: F,
    ) -> Result<LegacyCommandId, RegistrationError>
    where
        F: Fn(&CommandArgs, &CommandRegistry) -> CommandResult + Send + Sync + 'static,
    {
        self.registry.register_legacy(literal, Box::new(callback))
    }

    /// Record, echo, resolve and execute a line.
    ///
    /// Alias-group commands are tried before legacy literals. Callback
    /// failures and panics become error lines; the console keeps running.
    /// Only an empty line is skipped: whitespace-only lines are echoed and
    /// resolved like any other.
    pub fn submit_command(&mut self, line: &str) -> CommandOutcome {
        self.history.submit(line);
        if line.is_empty() {
            return CommandOutcome::Empty;
        }

        self.output.push(
            ConsoleOutputLevel::Command,
            format!("{}{}", self.config.echo_prefix, line),
        );

        let tokens = tokenize(line);
        let Some(resolved) = self.registry.resolve(&tokens, line) else {
            debug!("Console: no command matches '{}'", line);
            self.output
                .push(ConsoleOutputLevel::Error, self.config.not_found_message.clone());
            return CommandOutcome::NotFound;
        };

        let registry = &self.registry;
        let result = match resolved {
            Resolved::Alias(id) => registry.get(id).map(|cmd| {
                let args = CommandArgs::new(line, tokens.clone(), cmd.num_fixed_tokens());
                run_guarded(line, || cmd.execute(&args, registry))
            }),
            Resolved::Legacy(id) => registry.get_legacy(id).map(|cmd| {
                let fixed = cmd.literal.split_whitespace().count();
                let args = CommandArgs::new(line, tokens.clone(), fixed);
                run_guarded(line, || cmd.execute(&args, registry))
            }),
        };

        match result {
            Some(Ok(text)) => {
                self.push_result(&text);
                CommandOutcome::Output(text)
            }
            Some(Err(message)) => {
                self.output.push(ConsoleOutputLevel::Error, message.clone());
                CommandOutcome::Error(message)
            }
            None => {
                self.output
                    .push(ConsoleOutputLevel::Error, self.config.not_found_message.clone());
                CommandOutcome::NotFound
            }
        }
    }

    /// Handle a control key. Returns the outcome when a line was submitted.
    pub fn on_key(&mut self, key: ConsoleKey) -> Option<CommandOutcome> {
        match key {
            ConsoleKey::Toggle => {
                self.set_open(!self.open);
            }
            ConsoleKey::Close => {
                self.set_open(false);
            }
            ConsoleKey::HistoryUp => {
                if let Some(line) = self.history.recall_older(&self.typed) {
                    self.typed = line.to_string();
                }
            }
            ConsoleKey::HistoryDown => {
                if let Some(line) = self.history.recall_newer() {
                    self.typed = line.to_string();
                }
            }
            ConsoleKey::Backspace => {
                self.typed.pop();
            }
            ConsoleKey::Submit => {
                let line = std::mem::take(&mut self.typed);
                return Some(self.submit_command(&line));
            }
            ConsoleKey::Autocomplete => {
                self.autocomplete();
            }
        }
        None
    }

    /// Append literal text to the typed line.
    pub fn on_text(&mut self, text: &str) {
        self.typed.push_str(text);
    }

    /// Complete the typed line in place and keep its suggestions.
    pub fn autocomplete(&mut self) -> &[TokenSuggestions] {
        let completion = complete(&self.registry, &self.typed, CompletionOptions::default());
        if let Some(line) = completion.line {
            self.typed = line;
        }

        for listing in &completion.suggestions {
            debug!("Console: suggestions for token {}:", listing.position);
            for entry in &listing.entries {
                debug!("  {}", entry.aliases.join("  "));
            }
        }

        self.suggestions = completion.suggestions;
        &self.suggestions
    }

    /// Set visibility. Returns whether it changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The line being edited.
    #[inline]
    pub fn typed_line(&self) -> &str {
        &self.typed
    }

    /// The typed line with the configured prompt, ready to draw.
    pub fn prompt_line(&self) -> String {
        format!("{}{}", self.config.prompt, self.typed)
    }

    /// Up to `visible_lines` output lines, newest first.
    pub fn visible_output(&self) -> impl Iterator<Item = &OutputLine> {
        self.output.newest(self.config.visible_lines)
    }

    /// Output lines appended since the previous call, oldest first.
    pub fn take_unsent_output(&mut self) -> Vec<OutputLine> {
        self.output.take_unsent()
    }

    /// Append a line to the output, e.g. a forwarded log record.
    pub fn print(&mut self, level: ConsoleOutputLevel, message: impl Into<String>) {
        self.output.push(level, message);
    }

    /// Suggestions from the most recent completion.
    #[inline]
    pub fn suggestions(&self) -> &[TokenSuggestions] {
        &self.suggestions
    }

    #[inline]
    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    #[inline]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    #[inline]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    #[inline]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Replace the configuration, e.g. after loading it from disk.
    pub fn set_config(&mut self, config: ConsoleConfig) {
        self.config = config;
    }

    fn push_result(&mut self, text: &str) {
        if text.is_empty() {
            self.output.push(ConsoleOutputLevel::Result, "");
            return;
        }
        for line in text.lines() {
            self.output.push(ConsoleOutputLevel::Result, line);
        }
    }
}

/// Run a callback, mapping every failure to the line shown to the user.
fn run_guarded(line: &str, callback: impl FnOnce() -> CommandResult) -> Result<String, String> {
    match catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(CommandError::OutOfRange)) => Err(OUT_OF_RANGE_MESSAGE.to_string()),
        Ok(Err(CommandError::InvalidArgument)) => Err(INVALID_ARGUMENT_MESSAGE.to_string()),
        Ok(Err(CommandError::Failed(msg))) => {
            warn!("Console: '{}' failed: {}", line, msg);
            Err(format!("error: {}", msg))
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            error!("Console: '{}' panicked: {}", line, panic_msg);
            Err(PANIC_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StaticCandidates;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn quiet() -> Console {
        Console::new(ConsoleConfig {
            banner: None,
            ..default()
        })
    }

    fn reply(text: &'static str) -> CommandSpec {
        CommandSpec::new(move |_, _| Ok(text.to_string()))
    }

    fn newest(console: &Console, count: usize) -> Vec<String> {
        console.output().newest(count).map(|l| l.message.clone()).collect()
    }

    #[test]
    fn test_heal_kill_scenario() {
        let mut console = quiet();
        console.register(reply("healed").keyword(["heal"]).fixed_tokens(1)).unwrap();
        console.register(reply("killed").keyword(["kill"]).fixed_tokens(1)).unwrap();

        assert_eq!(console.submit_command("heal"), CommandOutcome::Output("healed".into()));
        assert_eq!(newest(&console, 2), vec!["healed", " >> heal"]);

        assert_eq!(console.submit_command("xyz"), CommandOutcome::NotFound);
        assert_eq!(newest(&console, 2), vec![" -- Command not found -- ", " >> xyz"]);
    }

    #[test]
    fn test_first_registered_command_fires() {
        let mut console = quiet();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        console
            .register(CommandSpec::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(String::new())
            })
            .keyword(["go", "walk"]))
            .unwrap();
        let counter = second.clone();
        console
            .register(CommandSpec::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(String::new())
            })
            .keyword(["run", "go"]))
            .unwrap();

        console.submit_command("go");
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_legacy_longest_prefix_fires() {
        let mut console = quiet();
        console.register_legacy_command("tele", |_, _| Ok("tele".into())).unwrap();
        console
            .register_legacy_command("teleport", |args, _| Ok(format!("to {}", args.join_from(0, " "))))
            .unwrap();

        assert_eq!(
            console.submit_command("teleport town"),
            CommandOutcome::Output("to town".into())
        );
        assert_eq!(console.submit_command("tele x"), CommandOutcome::Output("tele".into()));
    }

    #[test]
    fn test_register_command_raw_parts() {
        let mut console = quiet();
        let generators: Vec<Box<dyn CandidateProvider>> = vec![
            Box::new(StaticCandidates::keyword(["add", "a"])),
            Box::new(StaticCandidates::new([["gold"], ["xp"]])),
        ];
        console
            .register_command(generators, 2, |args, _| Ok(format!("{} {}", &args[1], args.arg(0)?)))
            .unwrap();

        assert_eq!(console.submit_command("a xp 50"), CommandOutcome::Output("xp 50".into()));
        assert_eq!(
            console.submit_command("a xp"),
            CommandOutcome::Error(OUT_OF_RANGE_MESSAGE.into())
        );
    }

    #[test]
    fn test_register_rejects_bad_fixed_count() {
        let mut console = quiet();
        let result = console.register_command(Vec::new(), 1, |_, _| Ok(String::new()));
        assert!(matches!(result, Err(RegistrationError::TooManyFixedTokens { .. })));
    }

    #[test]
    fn test_callback_errors_map_to_generic_lines() {
        let mut console = quiet();
        console
            .register(CommandSpec::new(|args, _| args.parse::<u8>(0).map(|v| v.to_string()))
                .keyword(["level"])
                .keyword(["n"])
                .fixed_tokens(1))
            .unwrap();
        console
            .register(CommandSpec::new(|_, _| Err(CommandError::Failed("no target".into())))
                .keyword(["kill"]))
            .unwrap();

        assert_eq!(console.submit_command("level 300"), CommandOutcome::Error(INVALID_ARGUMENT_MESSAGE.into()));
        assert_eq!(console.submit_command("level"), CommandOutcome::Error(OUT_OF_RANGE_MESSAGE.into()));
        assert_eq!(console.submit_command("kill"), CommandOutcome::Error("error: no target".into()));
        assert_eq!(console.submit_command("level 7"), CommandOutcome::Output("7".into()));
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let mut console = quiet();
        console
            .register(CommandSpec::new(|_, _| panic!("boom")).keyword(["crash"]))
            .unwrap();

        assert_eq!(console.submit_command("crash"), CommandOutcome::Error(PANIC_MESSAGE.into()));
        assert_eq!(console.submit_command("list"), CommandOutcome::Output("list - List registered commands\ncrash".into()));
    }

    #[test]
    fn test_multi_line_and_empty_results() {
        let mut console = quiet();
        console.register(reply("a\nb").keyword(["two"])).unwrap();
        console.register(reply("").keyword(["none"])).unwrap();

        console.submit_command("two");
        assert_eq!(newest(&console, 3), vec!["b", "a", " >> two"]);

        console.submit_command("none");
        assert_eq!(newest(&console, 2), vec!["", " >> none"]);
    }

    #[test]
    fn test_empty_submission() {
        let mut console = quiet();
        assert_eq!(console.submit_command(""), CommandOutcome::Empty);
        assert!(console.output().is_empty());
        assert!(console.history().is_empty());
    }

    #[test]
    fn test_whitespace_submission_is_echoed_and_resolved() {
        let mut console = quiet();

        assert_eq!(console.submit_command("   "), CommandOutcome::NotFound);
        assert_eq!(newest(&console, 2), vec![" -- Command not found -- ", " >>    "]);
        assert!(console.history().is_empty());

        assert_eq!(console.submit_command("\t"), CommandOutcome::NotFound);
        assert_eq!(newest(&console, 2), vec![" -- Command not found -- ", " >> \t"]);
        assert_eq!(console.history().len(), 1);
    }

    #[test]
    fn test_catch_all_fires_on_whitespace() {
        let mut console = quiet();
        console
            .register(reply("catch-all").keyword(["anything"]).fixed_tokens(0))
            .unwrap();

        assert_eq!(console.submit_command("  "), CommandOutcome::Output("catch-all".into()));
        assert_eq!(console.submit_command(""), CommandOutcome::Empty);
    }

    #[test]
    fn test_history_dedup_through_submit() {
        let mut console = quiet();
        console.submit_command("heal");
        console.submit_command("heal");
        console.submit_command("  ");
        assert_eq!(console.history().len(), 1);
    }

    #[test]
    fn test_history_keys_restore_draft() {
        let mut console = quiet();
        console.submit_command("one");
        console.submit_command("two");

        console.on_text("draft");
        console.on_key(ConsoleKey::HistoryUp);
        assert_eq!(console.typed_line(), "two");
        console.on_key(ConsoleKey::HistoryUp);
        assert_eq!(console.typed_line(), "one");
        console.on_key(ConsoleKey::HistoryUp);
        assert_eq!(console.typed_line(), "one");
        console.on_key(ConsoleKey::HistoryDown);
        console.on_key(ConsoleKey::HistoryDown);
        assert_eq!(console.typed_line(), "draft");
    }

    #[test]
    fn test_editing_keys() {
        let mut console = quiet();
        console.on_text("heak");
        console.on_key(ConsoleKey::Backspace);
        console.on_text("l");
        assert_eq!(console.typed_line(), "heal");
        assert_eq!(console.prompt_line(), "> heal");

        console.on_key(ConsoleKey::Backspace);
        console.on_key(ConsoleKey::Backspace);
        console.on_key(ConsoleKey::Backspace);
        console.on_key(ConsoleKey::Backspace);
        console.on_key(ConsoleKey::Backspace);
        assert_eq!(console.typed_line(), "");
    }

    #[test]
    fn test_visibility_keys() {
        let mut console = quiet();
        assert!(!console.is_open());
        console.on_key(ConsoleKey::Toggle);
        assert!(console.is_open());
        console.on_key(ConsoleKey::Close);
        assert!(!console.is_open());
        console.on_key(ConsoleKey::Close);
        assert!(!console.is_open());
    }

    #[test]
    fn test_autocomplete_key_rewrites_and_lists() {
        let mut console = quiet();
        console.register(reply("x").keyword(["teleport", "tp"])).unwrap();
        console.register(reply("x").keyword(["telescope"])).unwrap();

        console.on_text("te");
        console.on_key(ConsoleKey::Autocomplete);
        assert_eq!(console.typed_line(), "tele");

        let listed: Vec<_> = console.suggestions()[0]
            .entries
            .iter()
            .map(|s| s.aliases[0].as_str())
            .collect();
        assert_eq!(listed, vec!["teleport", "telescope"]);
    }

    #[test]
    fn test_visible_output_window() {
        let mut console = Console::new(ConsoleConfig {
            visible_lines: 3,
            ..default()
        });
        for _ in 0..4 {
            console.submit_command("nope");
        }
        assert_eq!(console.output().len(), 9);
        assert_eq!(console.visible_output().count(), 3);
    }

    #[test]
    fn test_banner_is_first_line() {
        let console = Console::new(ConsoleConfig::default());
        let lines = newest(&console, 10);
        assert_eq!(lines, vec![" ----------- Console -----------"]);
    }

    #[test]
    fn test_builtin_list() {
        let mut console = quiet();
        console
            .register(reply("x")
                .keyword(["give", "g"])
                .keyword([["sword"], ["shield"]])
                .keyword(["n"])
                .fixed_tokens(2))
            .unwrap();
        console.register_legacy_command("noclip", |_, _| Ok(String::new())).unwrap();

        console.submit_command("list");
        assert_eq!(newest(&console, 3), vec!["noclip", "give sword/shield", "list - List registered commands"]);
    }
}
