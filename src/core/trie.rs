//! Byte trie keyed by literal command text.
//!
//! Backs the legacy resolver: a typed line is walked once, and the deepest
//! key ending on a word boundary wins.

use std::collections::HashMap;

/// A trie (prefix tree) over the bytes of its keys.
///
/// # Complexity
///
/// - `insert`, `get`: O(k) where k = key length
/// - `longest_word_prefix`: O(n) where n = line length
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("tele", 0);
/// trie.insert("teleport", 1);
///
/// assert_eq!(trie.longest_word_prefix("teleport town"), Some(("teleport", &1)));
/// assert_eq!(trie.longest_word_prefix("tele town"), Some(("tele", &0)));
/// assert_eq!(trie.longest_word_prefix("teleporter"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Trie<V> {
    root: TrieNode<V>,
    len: usize,
}

#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: HashMap<u8, TrieNode<V>>,
    value: Option<V>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a key-value pair.
    ///
    /// Returns the previous value if the key already existed.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;

        for &byte in key.as_bytes() {
            node = node.children.entry(byte).or_default();
        }

        let old = node.value.replace(value);
        if old.is_none() {
            self.len += 1;
        }

        old
    }

    /// Get a reference to the value for the given key.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;

        for &byte in key.as_bytes() {
            node = node.children.get(&byte)?;
        }

        node.value.as_ref()
    }

    /// Find the longest key that prefixes `line` on a word boundary.
    ///
    /// A key of length `k` qualifies when `line` starts with it and the byte
    /// at `k` is either past the end of `line` or a space.
    pub fn longest_word_prefix<'l>(&self, line: &'l str) -> Option<(&'l str, &V)> {
        let bytes = line.as_bytes();
        let mut node = &self.root;
        let mut best = None;

        for depth in 0..=bytes.len() {
            let on_boundary = bytes.get(depth).is_none_or(|&b| b == b' ');
            if on_boundary {
                if let Some(value) = &node.value {
                    best = Some((depth, value));
                }
            }

            match bytes.get(depth).and_then(|b| node.children.get(b)) {
                Some(child) => node = child,
                None => break,
            }
        }

        // Boundaries fall on a space or the end of the line, both char boundaries.
        best.map(|(depth, value)| (&line[..depth], value))
    }
}
