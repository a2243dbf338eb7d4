//! Core console types.
//!
//! This module provides the fundamental building blocks:
//! - [`Console`] - The console state: registry, history, output, typed line
//! - [`CommandSpec`] - Commands built from positional alias groups
//! - [`CommandRegistry`] - Insertion-ordered store with exact and legacy resolution
//! - [`complete`] - Token-by-token autocompletion
//! - [`Trie`] - Longest-prefix lookup for legacy commands
//! - [`tokenize`] - Whitespace tokenizer
//! - Events for communication between layers

mod autocomplete;
mod candidates;
mod command;
mod console;
mod history;
mod matcher;
mod output;
mod registry;
mod tokenizer;
mod trie;
pub mod events;

pub use autocomplete::{complete, CompletedToken, Completion, CompletionOptions, Suggestion, TokenSuggestions};
pub use candidates::{AliasGroup, CandidateProvider, LiveCandidates, StaticCandidates};
pub use command::{CommandArgs, CommandCallback, CommandError, CommandResult, CommandSpec, IntoKeyword};
pub use console::{
    CommandOutcome, Console, INVALID_ARGUMENT_MESSAGE, OUT_OF_RANGE_MESSAGE, PANIC_MESSAGE,
};
pub use events::{
    ConsoleEditEvent, ConsoleEventsPlugin, ConsoleInputEvent, ConsoleKey, ConsoleOutputEvent,
    ConsoleOutputLevel, ConsoleToggleEvent,
};
pub use history::CommandHistory;
pub use matcher::{common_prefix_len, score, MatchBucket, MatchRank};
pub use output::{OutputBuffer, OutputLine};
pub use registry::{CommandId, CommandRegistry, LegacyCommand, LegacyCommandId, RegistrationError, Resolved};
pub use tokenizer::{ends_with_whitespace, tokenize};
pub use trie::Trie;
