//! Whitespace tokenizer for console input.
//!
//! No quoting, no escapes: a token is a maximal run of non-whitespace
//! characters. Both command resolution and autocompletion see the same tokens.

/// Split a raw input line into whitespace-delimited tokens.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::tokenize;
///
/// assert_eq!(tokenize("give  sword 3"), vec!["give", "sword", "3"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

/// Whether the line ends in a whitespace character.
///
/// The autocomplete engine keeps a trailing separator when the user has
/// already started the next token.
#[inline]
pub fn ends_with_whitespace(input: &str) -> bool {
    input.chars().next_back().is_some_and(char::is_whitespace)
}
