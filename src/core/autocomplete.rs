//! Token-by-token autocompletion over alias-group commands.
//!
//! Every registered command starts alive. Each token position narrows the
//! set: a command survives only if one of its alias groups at that position
//! contains the token, and starts-with matches shadow contains matches. The
//! surviving candidates' common prefix replaces the typed token.

use bevy::prelude::*;

use super::candidates::AliasGroup;
use super::command::CommandSpec;
use super::matcher::{common_prefix_len, score, MatchBucket, MatchRank};
use super::registry::{CommandId, CommandRegistry};
use super::tokenizer::{ends_with_whitespace, tokenize};

/// What a completion request should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Only consider the fixed token positions of each command.
    pub limit_to_fixed: bool,
    /// Collect ranked suggestions for every token position.
    pub suggestions: bool,
    /// Reassemble the rewritten line.
    pub rewrite: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            limit_to_fixed: false,
            suggestions: true,
            rewrite: true,
        }
    }
}

/// One token after completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedToken {
    /// The token text, rewritten to the common prefix when one was found.
    pub text: String,
    /// The token is a whole candidate and cannot be extended further.
    pub locked: bool,
}

/// One alias group offered for a token position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The command owning the group.
    pub command: CommandId,
    /// Index of the group within the command's provider output.
    pub group: usize,
    /// Rank of the group's best alias.
    pub rank: MatchRank,
    /// The best alias, in its original case.
    pub candidate: String,
    /// Every alias of the group.
    pub aliases: Vec<String>,
    /// Description of the owning command, empty if it has none.
    pub description: &'static str,
}

impl Suggestion {
    #[inline]
    pub fn bucket(&self) -> MatchBucket {
        self.rank.bucket()
    }
}

/// Ranked suggestions for one token position.
///
/// Starts-with groups come first, then contains groups, each ordered by rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSuggestions {
    pub position: usize,
    pub entries: Vec<Suggestion>,
}

/// Result of a completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Tokens after completion, in input order.
    pub tokens: Vec<CompletedToken>,
    /// The reassembled line, when a rewrite was requested.
    pub line: Option<String>,
    /// Per-position suggestions, when requested.
    pub suggestions: Vec<TokenSuggestions>,
    /// Commands still alive after the last token.
    pub alive: Vec<CommandId>,
}

/// Best-ranked alias of one group.
struct GroupMatch {
    command: usize,
    group: usize,
    rank: MatchRank,
    candidate: String,
}

/// Complete `input` against every command in `registry`.
///
/// Never fails: unmatched tokens are kept as typed, and once no command is
/// alive the remaining tokens pass through unchanged.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::{complete, CommandRegistry, CommandSpec, CompletionOptions};
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register(CommandSpec::new(|_, _| Ok(String::new())).keyword(["teleport", "tp"]))
///     .unwrap();
///
/// let completion = complete(&registry, "tele", CompletionOptions::default());
/// assert_eq!(completion.line.as_deref(), Some("teleport "));
/// assert!(completion.tokens[0].locked);
/// ```
pub fn complete(registry: &CommandRegistry, input: &str, options: CompletionOptions) -> Completion {
    let typed = tokenize(input);
    if typed.is_empty() {
        return Completion {
            line: options.rewrite.then(|| input.to_string()),
            ..default()
        };
    }

    let mut tokens: Vec<CompletedToken> = typed
        .iter()
        .map(|t| CompletedToken {
            text: t.to_string(),
            locked: false,
        })
        .collect();

    let commands: Vec<_> = registry.commands().map(|(_, cmd)| cmd).collect();
    let mut alive = vec![true; commands.len()];
    let mut suggestions = Vec::new();

    for (position, token) in typed.iter().enumerate() {
        let query = token.to_lowercase();
        let mut starts_with = Vec::new();
        let mut contains = Vec::new();
        let mut groups_by_command: Vec<Vec<AliasGroup>> = vec![Vec::new(); commands.len()];

        for (index, cmd) in commands.iter().enumerate() {
            if !alive[index] {
                continue;
            }
            // Dead unless a match at this position revives it below.
            alive[index] = false;

            let end = if options.limit_to_fixed {
                cmd.num_fixed_tokens()
            } else {
                cmd.num_positions()
            };
            if position >= end {
                continue;
            }
            let Some(groups) = cmd.alias_groups(position) else {
                continue;
            };

            for (group_index, group) in groups.iter().enumerate() {
                if let Some(found) = best_match(&query, index, group_index, group) {
                    match found.rank.bucket() {
                        MatchBucket::StartsWith => starts_with.push(found),
                        MatchBucket::Contains => contains.push(found),
                    }
                }
            }
            groups_by_command[index] = groups;
        }

        let selected = if !starts_with.is_empty() {
            &starts_with
        } else {
            &contains
        };

        if let Some(reference) = selected.first() {
            let mut common = reference.candidate.chars().count();
            let mut longest = common;
            for found in selected {
                alive[found.command] = true;
                common = common.min(common_prefix_len(&reference.candidate, &found.candidate));
                longest = longest.max(found.candidate.chars().count());
            }

            if common != 0 {
                tokens[position] = CompletedToken {
                    text: reference.candidate.chars().take(common).collect(),
                    locked: common == longest,
                };
            }
        }

        if options.suggestions {
            let listed = rank_suggestions(position, starts_with, contains, &groups_by_command, &commands);
            debug!("Console: {} suggestions for token {}", listed.entries.len(), position);
            suggestions.push(listed);
        }
    }

    let line = options
        .rewrite
        .then(|| reassemble(&tokens, ends_with_whitespace(input)));

    Completion {
        tokens,
        line,
        suggestions,
        alive: alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| CommandId(index))
            .collect(),
    }
}

/// Best-ranked alias of `group` for `query`, or `None` if no alias contains it.
fn best_match(query: &str, command: usize, group: usize, aliases: &AliasGroup) -> Option<GroupMatch> {
    aliases
        .aliases()
        .iter()
        .filter_map(|candidate| score(query, &candidate.to_lowercase()).map(|rank| (rank, candidate)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(rank, candidate)| GroupMatch {
            command,
            group,
            rank,
            candidate: candidate.clone(),
        })
}

fn rank_suggestions(
    position: usize,
    mut starts_with: Vec<GroupMatch>,
    mut contains: Vec<GroupMatch>,
    groups_by_command: &[Vec<AliasGroup>],
    commands: &[&CommandSpec],
) -> TokenSuggestions {
    starts_with.sort_by_key(|m| m.rank);
    contains.sort_by_key(|m| m.rank);

    let entries = starts_with
        .into_iter()
        .chain(contains)
        .map(|m| Suggestion {
            command: CommandId(m.command),
            group: m.group,
            rank: m.rank,
            aliases: groups_by_command[m.command]
                .get(m.group)
                .map(|g| g.aliases().to_vec())
                .unwrap_or_default(),
            candidate: m.candidate,
            description: commands[m.command].get_description(),
        })
        .collect();

    TokenSuggestions { position, entries }
}

/// Join tokens with single spaces.
///
/// A trailing space is kept when the input had one, and added after a
/// locked final token so the next token can be typed right away.
fn reassemble(tokens: &[CompletedToken], trailing_whitespace: bool) -> String {
    let mut line = String::new();
    for (i, token) in tokens.iter().enumerate() {
        line.push_str(&token.text);
        let last = i + 1 == tokens.len();
        if !last || trailing_whitespace || token.locked {
            line.push(' ');
        }
    }
    line
}
