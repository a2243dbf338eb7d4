//! Alias-group commands and their callbacks.
//!
//! A command is a chain of candidate providers, one per token position. The
//! first `num_fixed_tokens` positions must match an alias exactly; anything
//! after that is passed to the callback untouched.

use super::candidates::{AliasGroup, CandidateProvider, StaticCandidates};
use super::registry::CommandRegistry;

/// Failure reported by a command callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A required argument is missing or a value is outside its range.
    OutOfRange,
    /// An argument could not be interpreted.
    InvalidArgument,
    /// Any other failure, with a message for the user.
    Failed(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::OutOfRange => write!(f, "argument out of range"),
            CommandError::InvalidArgument => write!(f, "invalid argument"),
            CommandError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

/// What a callback returns: the result line(s) or a failure.
pub type CommandResult = Result<String, CommandError>;

/// Type alias for command callbacks.
///
/// Callbacks receive:
/// - `args`: every token of the submitted line, fixed tokens included
/// - `registry`: read access to the registry the command was found in
pub type CommandCallback = Box<dyn Fn(&CommandArgs, &CommandRegistry) -> CommandResult + Send + Sync>;

/// Tokens passed to a command callback.
#[derive(Debug, Clone)]
pub struct CommandArgs<'a> {
    /// The raw submitted line.
    raw: &'a str,
    /// All tokens, including the fixed ones.
    tokens: Vec<&'a str>,
    /// How many leading tokens are fixed.
    fixed: usize,
}

impl<'a> CommandArgs<'a> {
    pub fn new(raw: &'a str, tokens: Vec<&'a str>, fixed: usize) -> Self {
        Self { raw, tokens, fixed }
    }

    /// Get the raw submitted line.
    #[inline]
    pub fn raw(&self) -> &str {
        self.raw
    }

    /// All tokens, fixed tokens first.
    #[inline]
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Number of tokens, fixed ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get a token by absolute position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// The free-form arguments following the fixed tokens.
    pub fn free(&self) -> &[&'a str] {
        self.tokens.get(self.fixed..).unwrap_or(&[])
    }

    /// Get a free-form argument, failing with [`CommandError::OutOfRange`]
    /// when it is missing.
    pub fn arg(&self, index: usize) -> Result<&'a str, CommandError> {
        self.free().get(index).copied().ok_or(CommandError::OutOfRange)
    }

    /// Parse a free-form argument.
    ///
    /// Missing arguments fail with [`CommandError::OutOfRange`], unparsable
    /// ones with [`CommandError::InvalidArgument`].
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Result<T, CommandError> {
        self.arg(index)?.parse().map_err(|_| CommandError::InvalidArgument)
    }

    /// Parse a free-form argument with a default used only when it is absent.
    pub fn parse_or<T: std::str::FromStr>(&self, index: usize, default: T) -> Result<T, CommandError> {
        match self.free().get(index) {
            Some(s) => s.parse().map_err(|_| CommandError::InvalidArgument),
            None => Ok(default),
        }
    }

    /// Join the free-form arguments starting at `start`.
    pub fn join_from(&self, start: usize, separator: &str) -> String {
        self.free().get(start..).unwrap_or(&[]).join(separator)
    }
}

impl std::ops::Index<usize> for CommandArgs<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.tokens[index]
    }
}

/// A command built from positional alias groups.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::CommandSpec;
///
/// let give = CommandSpec::new(|args, _registry| {
///     let count: u32 = args.parse_or(0, 1)?;
///     Ok(format!("gave {} x{}", &args[1], count))
/// })
/// .keyword(["give", "g"])
/// .keyword([["sword", "blade"], ["shield", "buckler"]])
/// .description("Give an item");
///
/// assert_eq!(give.num_fixed_tokens(), 2);
/// ```
pub struct CommandSpec {
    generators: Vec<Box<dyn CandidateProvider>>,
    num_fixed_tokens: Option<usize>,
    description: &'static str,
    callback: CommandCallback,
}

impl CommandSpec {
    /// Create a command with no token positions yet.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&CommandArgs, &CommandRegistry) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            generators: Vec::new(),
            num_fixed_tokens: None,
            description: "",
            callback: Box::new(callback),
        }
    }

    /// Create a command from already-boxed parts.
    pub fn from_parts(
        generators: Vec<Box<dyn CandidateProvider>>,
        num_fixed_tokens: usize,
        callback: CommandCallback,
    ) -> Self {
        Self {
            generators,
            num_fixed_tokens: Some(num_fixed_tokens),
            description: "",
            callback,
        }
    }

    /// Append a token position backed by `provider`.
    pub fn token(mut self, provider: impl CandidateProvider + 'static) -> Self {
        self.generators.push(Box::new(provider));
        self
    }

    /// Append a token position with static alias groups.
    ///
    /// For groups with differing alias counts, see [`CommandSpec::groups`].
    pub fn keyword<I, G>(self, groups: I) -> Self
    where
        I: IntoKeyword<G>,
    {
        self.token(groups.into_keyword())
    }

    /// Append a token position with several groups of any size.
    ///
    /// ```
    /// use bevy_alias_console::core::CommandSpec;
    ///
    /// let give = CommandSpec::new(|_, _| Ok(String::new()))
    ///     .keyword(["give", "g"])
    ///     .groups([&["sword", "blade"], &["shield"]]);
    ///
    /// assert!(give.matches_fixed(&["g", "blade"]));
    /// ```
    pub fn groups<const N: usize>(self, groups: [&[&str]; N]) -> Self {
        self.token(StaticCandidates::new(groups.map(|aliases| AliasGroup::new(aliases.iter().copied()))))
    }

    /// Set how many leading positions must match exactly.
    ///
    /// Defaults to every position.
    pub fn fixed_tokens(mut self, count: usize) -> Self {
        self.num_fixed_tokens = Some(count);
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    /// Number of positions that must match exactly.
    #[inline]
    pub fn num_fixed_tokens(&self) -> usize {
        self.num_fixed_tokens.unwrap_or(self.generators.len())
    }

    /// Number of token positions with candidates.
    #[inline]
    pub fn num_positions(&self) -> usize {
        self.generators.len()
    }

    #[inline]
    pub fn get_description(&self) -> &'static str {
        self.description
    }

    /// Evaluate the provider at `position`.
    pub fn alias_groups(&self, position: usize) -> Option<Vec<AliasGroup>> {
        self.generators.get(position).map(|g| g.alias_groups())
    }

    /// Whether `tokens` satisfies every fixed position.
    pub fn matches_fixed(&self, tokens: &[&str]) -> bool {
        let fixed = self.num_fixed_tokens();
        if tokens.len() < fixed {
            return false;
        }
        self.generators
            .iter()
            .zip(tokens)
            .take(fixed)
            .all(|(generator, token)| generator.alias_groups().iter().any(|g| g.contains(token)))
    }

    /// Run the callback.
    pub fn execute(&self, args: &CommandArgs, registry: &CommandRegistry) -> CommandResult {
        (self.callback)(args, registry)
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("positions", &self.generators.len())
            .field("num_fixed_tokens", &self.num_fixed_tokens())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Conversion used by [`CommandSpec::keyword`].
///
/// Accepts a single group (`["add", "a"]`) or several groups
/// (`[["sword", "blade"], ["shield"]]`).
pub trait IntoKeyword<G> {
    fn into_keyword(self) -> StaticCandidates;
}

impl<const N: usize> IntoKeyword<AliasGroup> for [&str; N] {
    fn into_keyword(self) -> StaticCandidates {
        StaticCandidates::keyword(self)
    }
}

impl<const N: usize, const M: usize> IntoKeyword<[AliasGroup; M]> for [[&str; M]; N] {
    fn into_keyword(self) -> StaticCandidates {
        StaticCandidates::new(self)
    }
}

impl<const N: usize> IntoKeyword<[&[&str]; N]> for [&[&str]; N] {
    fn into_keyword(self) -> StaticCandidates {
        StaticCandidates::new(self.map(|aliases| AliasGroup::new(aliases.iter().copied())))
    }
}

impl IntoKeyword<Vec<Vec<&str>>> for Vec<Vec<&str>> {
    fn into_keyword(self) -> StaticCandidates {
        StaticCandidates::new(self.into_iter().map(AliasGroup::new))
    }
}

impl IntoKeyword<Vec<AliasGroup>> for Vec<AliasGroup> {
    fn into_keyword(self) -> StaticCandidates {
        StaticCandidates::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LiveCandidates;

    fn noop() -> CommandSpec {
        CommandSpec::new(|_, _| Ok(String::new()))
    }

    #[test]
    fn test_command_args_free() {
        let args = CommandArgs::new("give sword 3", vec!["give", "sword", "3"], 2);
        assert_eq!(args.len(), 3);
        assert_eq!(args.free(), &["3"]);
        assert_eq!(args.arg(0), Ok("3"));
        assert_eq!(args.arg(1), Err(CommandError::OutOfRange));
        assert_eq!(&args[0], "give");
    }

    #[test]
    fn test_command_args_parse() {
        let args = CommandArgs::new("set 42 x", vec!["set", "42", "x"], 1);
        assert_eq!(args.parse::<i32>(0), Ok(42));
        assert_eq!(args.parse::<i32>(1), Err(CommandError::InvalidArgument));
        assert_eq!(args.parse::<i32>(2), Err(CommandError::OutOfRange));
        assert_eq!(args.parse_or::<i32>(5, 7), Ok(7));
        assert_eq!(args.join_from(0, " "), "42 x");
    }

    #[test]
    fn test_fixed_tokens_default_to_all_positions() {
        let cmd = noop().keyword(["spawn"]).keyword(["wolf"]);
        assert_eq!(cmd.num_fixed_tokens(), 2);
        assert_eq!(cmd.fixed_tokens(1).num_fixed_tokens(), 1);
    }

    #[test]
    fn test_matches_fixed() {
        let cmd = noop()
            .keyword(["add", "a"])
            .groups([&["sword", "blade"], &["shield"]])
            .fixed_tokens(2);

        assert!(cmd.matches_fixed(&["add", "sword"]));
        assert!(cmd.matches_fixed(&["a", "shield", "extra"]));
        assert!(!cmd.matches_fixed(&["add"]));
        assert!(!cmd.matches_fixed(&["Add", "sword"]));
        assert!(!cmd.matches_fixed(&["add", "axe"]));
    }

    #[test]
    fn test_uneven_groups() {
        let slices = noop().keyword([&["sword", "blade"][..], &["shield"]]);
        let nested = noop().keyword(vec![vec!["sword", "blade"], vec!["shield"]]);

        for cmd in [slices, nested] {
            let groups = cmd.alias_groups(0).unwrap();
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[1].aliases(), &["shield".to_string()]);
            assert!(cmd.matches_fixed(&["blade"]));
        }
    }

    #[test]
    fn test_zero_fixed_tokens_matches_anything() {
        let cmd = noop().keyword(["say"]).fixed_tokens(0);
        assert!(cmd.matches_fixed(&[]));
        assert!(cmd.matches_fixed(&["whatever"]));
    }

    #[test]
    fn test_live_position_is_reevaluated() {
        let targets = LiveCandidates::new();
        let cmd = noop().keyword(["kill"]).token(targets.clone());

        assert!(!cmd.matches_fixed(&["kill", "wolf"]));
        targets.push("wolf");
        assert!(cmd.matches_fixed(&["kill", "wolf"]));
    }
}
