//! Substring ranking for autocomplete.
//!
//! A query token is ranked against a candidate alias by where it occurs in
//! the candidate and by how much of the candidate is left over.

/// Rank of one query against one candidate. Lower is better.
///
/// Ordered lexicographically: an earlier occurrence wins, then the candidate
/// closest in length to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchRank {
    /// Byte offset of the query inside the lowercased candidate.
    pub pos: usize,
    /// Candidate length minus query length, in bytes.
    pub diff: isize,
}

impl MatchRank {
    /// The bucket this rank falls into.
    #[inline]
    pub fn bucket(&self) -> MatchBucket {
        if self.pos == 0 {
            MatchBucket::StartsWith
        } else {
            MatchBucket::Contains
        }
    }
}

/// How a query relates to a candidate it was found in.
///
/// `StartsWith` sorts before `Contains`, matching narrowing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchBucket {
    /// The candidate begins with the query.
    StartsWith,
    /// The query occurs later inside the candidate.
    Contains,
}

/// Rank a lowercased query against a lowercased candidate.
///
/// Returns `None` when the query does not occur in the candidate.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::{score, MatchBucket};
///
/// let rank = score("tele", "teleport").unwrap();
/// assert_eq!((rank.pos, rank.diff), (0, 4));
/// assert_eq!(rank.bucket(), MatchBucket::StartsWith);
///
/// assert_eq!(score("port", "teleport").unwrap().bucket(), MatchBucket::Contains);
/// assert!(score("xyz", "teleport").is_none());
/// ```
pub fn score(query: &str, candidate: &str) -> Option<MatchRank> {
    let pos = candidate.find(query)?;
    // A found query is never longer than its candidate, so diff is
    // non-negative whenever a rank exists.
    let diff = candidate.len() as isize - query.len() as isize;
    Some(MatchRank { pos, diff })
}

/// Length in chars of the case-insensitive common prefix of two strings.
///
/// Chars are compared one by one through their lowercase forms, so the
/// count always indexes the original text, even where lowercasing expands
/// a char (`'İ'` lowercases to two chars).
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y || x.to_lowercase().eq(y.to_lowercase()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let rank = score("heal", "heal").unwrap();
        assert_eq!(rank, MatchRank { pos: 0, diff: 0 });
    }

    #[test]
    fn test_earlier_position_wins() {
        let early = score("ab", "abcdef").unwrap();
        let late = score("ab", "xab").unwrap();
        assert!(early < late);
    }

    #[test]
    fn test_shorter_candidate_breaks_ties() {
        let short = score("tp", "tpa").unwrap();
        let long = score("tp", "tpaaaa").unwrap();
        assert!(short < long);
    }

    #[test]
    fn test_query_longer_than_candidate() {
        assert!(score("teleport", "tp").is_none());
    }

    #[test]
    fn test_bucket() {
        assert_eq!(score("ab", "abcd").unwrap().bucket(), MatchBucket::StartsWith);
        assert_eq!(score("ab", "xaby").unwrap().bucket(), MatchBucket::Contains);
        assert!(MatchBucket::StartsWith < MatchBucket::Contains);
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("teleport", "telescope"), 4);
        assert_eq!(common_prefix_len("abc", "xyz"), 0);
        assert_eq!(common_prefix_len("abc", "abc"), 3);
        assert_eq!(common_prefix_len("", "abc"), 0);
    }

    #[test]
    fn test_common_prefix_len_ignores_case() {
        assert_eq!(common_prefix_len("SpawnWolf", "spawnwitch"), 6);
        assert_eq!(common_prefix_len("İab", "İac"), 2);
        assert_eq!(common_prefix_len("İab", "iab"), 0);
    }
}
