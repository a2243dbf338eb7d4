//! Alias groups and the providers that produce them.
//!
//! Every token position of a command is backed by a [`CandidateProvider`].
//! Providers are asked for their groups on every resolution and every
//! completion request, so live providers always reflect current state.

use std::sync::{Arc, RwLock};

/// Interchangeable spellings of one value at one token position.
///
/// The first alias is the canonical display form. An empty group is legal
/// and never matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasGroup(Vec<String>);

impl AliasGroup {
    /// Create a group from its aliases, canonical form first.
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(aliases.into_iter().map(Into::into).collect())
    }

    /// The canonical display form, if the group has any alias.
    #[inline]
    pub fn canonical(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// All aliases in declaration order.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.0
    }

    /// Case-sensitive membership test.
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|alias| alias == token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for AliasGroup {
    fn from(alias: &str) -> Self {
        Self(vec![alias.to_string()])
    }
}

impl<const N: usize> From<[&str; N]> for AliasGroup {
    fn from(aliases: [&str; N]) -> Self {
        Self::new(aliases)
    }
}

impl From<Vec<String>> for AliasGroup {
    fn from(aliases: Vec<String>) -> Self {
        Self(aliases)
    }
}

/// Produces the alias groups accepted at one token position.
///
/// Implementations must be cheap enough to run on every keystroke: the
/// console calls them synchronously during completion and resolution.
pub trait CandidateProvider: Send + Sync {
    /// The groups currently accepted at this position.
    fn alias_groups(&self) -> Vec<AliasGroup>;
}

/// A fixed list of alias groups.
#[derive(Debug, Clone, Default)]
pub struct StaticCandidates {
    groups: Vec<AliasGroup>,
}

impl StaticCandidates {
    pub fn new<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<AliasGroup>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// A single group, e.g. a keyword with its abbreviations.
    pub fn keyword(group: impl Into<AliasGroup>) -> Self {
        Self {
            groups: vec![group.into()],
        }
    }
}

impl CandidateProvider for StaticCandidates {
    fn alias_groups(&self) -> Vec<AliasGroup> {
        self.groups.clone()
    }
}

/// A shared, externally updated list of alias groups.
///
/// Clones share the same storage: keep one clone in the command and update
/// another from wherever the live objects are enumerated.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::{CandidateProvider, LiveCandidates};
///
/// let npcs = LiveCandidates::new();
/// let provider = npcs.clone();
///
/// npcs.push(["guard_01", "guard"]);
/// assert_eq!(provider.alias_groups().len(), 1);
///
/// npcs.clear();
/// assert!(provider.alias_groups().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LiveCandidates {
    source: Arc<RwLock<Vec<AliasGroup>>>,
}

impl LiveCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole candidate list.
    pub fn replace<I, G>(&self, groups: I)
    where
        I: IntoIterator<Item = G>,
        G: Into<AliasGroup>,
    {
        let groups = groups.into_iter().map(Into::into).collect();
        match self.source.write() {
            Ok(mut guard) => *guard = groups,
            Err(poisoned) => *poisoned.into_inner() = groups,
        }
    }

    /// Append one group.
    pub fn push(&self, group: impl Into<AliasGroup>) {
        let group = group.into();
        match self.source.write() {
            Ok(mut guard) => guard.push(group),
            Err(poisoned) => poisoned.into_inner().push(group),
        }
    }

    /// Remove every group.
    pub fn clear(&self) {
        self.replace(std::iter::empty::<AliasGroup>());
    }
}

impl CandidateProvider for LiveCandidates {
    fn alias_groups(&self) -> Vec<AliasGroup> {
        match self.source.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_group_canonical() {
        let group = AliasGroup::from(["teleport", "tp"]);
        assert_eq!(group.canonical(), Some("teleport"));
        assert_eq!(group.len(), 2);
        assert!(AliasGroup::default().canonical().is_none());
    }

    #[test]
    fn test_alias_group_contains_is_case_sensitive() {
        let group = AliasGroup::from(["add", "a"]);
        assert!(group.contains("a"));
        assert!(!group.contains("ADD"));
    }

    #[test]
    fn test_static_candidates() {
        let provider = StaticCandidates::new([["sword", "blade"], ["shield", "buckler"]]);
        let groups = provider.alias_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].canonical(), Some("shield"));
    }

    #[test]
    fn test_live_candidates_shared_between_clones() {
        let live = LiveCandidates::new();
        let provider: Box<dyn CandidateProvider> = Box::new(live.clone());
        assert!(provider.alias_groups().is_empty());

        live.replace([["bandit_3"], ["wolf_7"]]);
        assert_eq!(provider.alias_groups().len(), 2);

        live.push("troll");
        assert_eq!(provider.alias_groups()[2].canonical(), Some("troll"));
    }
}
