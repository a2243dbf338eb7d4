//! Command registry with two resolver strategies.
//!
//! Alias-group commands are resolved structurally, token by token, in
//! registration order. Legacy commands are registered by their full literal
//! text and resolved by the longest word-bounded prefix of the typed line.
//! [`CommandRegistry::resolve`] tries the former first.

use bevy::prelude::*;

use super::command::{CommandArgs, CommandCallback, CommandResult, CommandSpec};
use super::trie::Trie;

/// Index of an alias-group command, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandId(pub usize);

/// Index of a legacy command, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegacyCommandId(pub usize);

/// Registration rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// More fixed tokens than token positions.
    TooManyFixedTokens { fixed: usize, positions: usize },
    /// A legacy command with empty literal text.
    EmptyLiteral,
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::TooManyFixedTokens { fixed, positions } => write!(
                f,
                "{} fixed tokens requested but only {} token positions defined",
                fixed, positions
            ),
            RegistrationError::EmptyLiteral => write!(f, "legacy command text is empty"),
        }
    }
}

impl std::error::Error for RegistrationError {}

/// A command registered by its literal text.
pub struct LegacyCommand {
    /// The full literal text, e.g. `"teleport"` or `"set time"`.
    pub literal: Box<str>,
    callback: CommandCallback,
}

impl LegacyCommand {
    /// Run the callback.
    pub fn execute(&self, args: &CommandArgs, registry: &CommandRegistry) -> CommandResult {
        (self.callback)(args, registry)
    }
}

impl std::fmt::Debug for LegacyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyCommand")
            .field("literal", &self.literal)
            .finish_non_exhaustive()
    }
}

/// The command a line resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Matched structurally against an alias-group command.
    Alias(CommandId),
    /// Matched by literal prefix against a legacy command.
    Legacy(LegacyCommandId),
}

/// Insertion-ordered store of every console command.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::{CommandRegistry, CommandSpec, Resolved};
///
/// let mut registry = CommandRegistry::new();
/// let heal = registry
///     .register(CommandSpec::new(|_, _| Ok("healed".into())).keyword(["heal", "h"]))
///     .unwrap();
///
/// assert_eq!(registry.resolve_exact(&["h"]), Some(heal));
/// assert_eq!(registry.resolve(&["heal"], "heal"), Some(Resolved::Alias(heal)));
/// assert_eq!(registry.resolve_exact(&["kill"]), None);
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    legacy: Vec<LegacyCommand>,
    /// Literal text -> index into `legacy`.
    literals: Trie<usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alias-group command.
    ///
    /// Fails when the command has more fixed tokens than positions.
    pub fn register(&mut self, spec: CommandSpec) -> Result<CommandId, RegistrationError> {
        let fixed = spec.num_fixed_tokens();
        let positions = spec.num_positions();
        if fixed > positions {
            return Err(RegistrationError::TooManyFixedTokens { fixed, positions });
        }

        let id = CommandId(self.commands.len());
        debug!("Console: registered command #{} ({} positions, {} fixed)", id.0, positions, fixed);
        self.commands.push(spec);
        Ok(id)
    }

    /// Register a command by its literal text.
    ///
    /// Re-registering a literal replaces the earlier callback.
    pub fn register_legacy(
        &mut self,
        literal: &str,
        callback: CommandCallback,
    ) -> Result<LegacyCommandId, RegistrationError> {
        if literal.is_empty() {
            return Err(RegistrationError::EmptyLiteral);
        }

        if let Some(&index) = self.literals.get(literal) {
            bevy::log::warn!("Console: Overwriting existing legacy command '{}'", literal);
            self.legacy[index].callback = callback;
            return Ok(LegacyCommandId(index));
        }

        let index = self.legacy.len();
        self.legacy.push(LegacyCommand {
            literal: literal.into(),
            callback,
        });
        self.literals.insert(literal, index);
        debug!("Console: registered legacy command '{}'", literal);
        Ok(LegacyCommandId(index))
    }

    /// First command whose fixed tokens all match `tokens` exactly.
    ///
    /// Providers are evaluated fresh on every call.
    pub fn resolve_exact(&self, tokens: &[&str]) -> Option<CommandId> {
        self.commands
            .iter()
            .position(|cmd| cmd.matches_fixed(tokens))
            .map(CommandId)
    }

    /// Legacy command with the longest literal prefixing `line` on a word boundary.
    pub fn resolve_legacy(&self, line: &str) -> Option<LegacyCommandId> {
        self.literals
            .longest_word_prefix(line)
            .map(|(_, &index)| LegacyCommandId(index))
    }

    /// Resolve a submitted line, alias-group commands first.
    pub fn resolve(&self, tokens: &[&str], line: &str) -> Option<Resolved> {
        self.resolve_exact(tokens)
            .map(Resolved::Alias)
            .or_else(|| self.resolve_legacy(line).map(Resolved::Legacy))
    }

    /// Get an alias-group command.
    pub fn get(&self, id: CommandId) -> Option<&CommandSpec> {
        self.commands.get(id.0)
    }

    /// Get a legacy command.
    pub fn get_legacy(&self, id: LegacyCommandId) -> Option<&LegacyCommand> {
        self.legacy.get(id.0)
    }

    /// Alias-group commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = (CommandId, &CommandSpec)> {
        self.commands.iter().enumerate().map(|(i, cmd)| (CommandId(i), cmd))
    }

    /// Legacy commands in registration order.
    pub fn legacy_commands(&self) -> impl Iterator<Item = &LegacyCommand> {
        self.legacy.iter()
    }

    /// Number of registered commands of either kind.
    pub fn len(&self) -> usize {
        self.commands.len() + self.legacy.len()
    }

    /// Whether no command of either kind is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.legacy.is_empty()
    }

    /// One line per command: the canonical aliases of each fixed position,
    /// then ` - ` and the description when the command has one.
    ///
    /// Positions are joined by spaces, groups within a position by `/`.
    /// Legacy literals follow the alias-group commands.
    pub fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .commands
            .iter()
            .map(|cmd| {
                let usage = (0..cmd.num_fixed_tokens())
                    .map(|position| {
                        cmd.alias_groups(position)
                            .unwrap_or_default()
                            .iter()
                            .filter_map(|g| g.canonical())
                            .collect::<Vec<_>>()
                            .join("/")
                    })
                    .collect::<Vec<_>>()
                    .join(" ");

                match cmd.get_description() {
                    "" => usage,
                    desc => format!("{} - {}", usage, desc),
                }
            })
            .collect();

        lines.extend(self.legacy.iter().map(|cmd| cmd.literal.to_string()));
        lines
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands)
            .field("legacy", &self.legacy)
            .finish()
    }
}
