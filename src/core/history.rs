//! Submitted-line history with cursor-based recall.

/// Append-only log of submitted lines.
///
/// While browsing, `cursor` counts steps back from the newest entry
/// (`Some(0)` is the newest). `None` means the live line is shown. The line
/// being edited when browsing starts is kept as the pending line and handed
/// back when the cursor returns to the live position.
///
/// # Examples
///
/// ```
/// use bevy_alias_console::core::CommandHistory;
///
/// let mut history = CommandHistory::new();
/// history.submit("heal");
/// history.submit("kill wolf");
///
/// assert_eq!(history.recall_older("dra"), Some("kill wolf"));
/// assert_eq!(history.recall_older("ignored"), Some("heal"));
/// assert_eq!(history.recall_newer(), Some("kill wolf"));
/// assert_eq!(history.recall_newer(), Some("dra"));
/// assert_eq!(history.recall_newer(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
    pending: String,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and leave browsing mode.
    ///
    /// Blank lines and repeats of the newest entry are not recorded.
    /// Returns whether the line was appended.
    pub fn submit(&mut self, line: &str) -> bool {
        self.cursor = None;
        self.pending.clear();

        let blank = line.chars().all(|c| c == ' ');
        let repeat = self.entries.last().is_some_and(|last| last == line);
        if blank || repeat {
            return false;
        }

        self.entries.push(line.to_string());
        true
    }

    /// Step one entry toward the oldest.
    ///
    /// `current` is saved as the pending line when browsing starts. Returns
    /// `None` when already at the oldest entry or the history is empty.
    pub fn recall_older(&mut self, current: &str) -> Option<&str> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.entries.len() {
            return None;
        }

        if self.cursor.is_none() {
            self.pending = current.to_string();
        }
        self.cursor = Some(next);
        self.entry_at(next)
    }

    /// Step one entry toward the live line.
    ///
    /// Returns the pending line on reaching the live position, or `None`
    /// when not browsing.
    pub fn recall_newer(&mut self) -> Option<&str> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some(self.pending.as_str())
            }
            c => {
                self.cursor = Some(c - 1);
                self.entry_at(c - 1)
            }
        }
    }

    /// Whether a history entry is currently shown.
    #[inline]
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Steps back from the newest entry, if browsing.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_at(&self, steps_back: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(steps_back + 1)?;
        self.entries.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_dedups_consecutive() {
        let mut history = CommandHistory::new();
        assert!(history.submit("heal"));
        assert!(!history.submit("heal"));
        assert!(history.submit("kill"));
        assert!(history.submit("heal"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_submit_skips_blank() {
        let mut history = CommandHistory::new();
        assert!(!history.submit(""));
        assert!(!history.submit("    "));
        assert!(history.is_empty());
    }

    #[test]
    fn test_round_trip_restores_draft() {
        let mut history = CommandHistory::new();
        history.submit("one");
        history.submit("two");
        history.submit("three");

        assert_eq!(history.recall_older("draft"), Some("three"));
        assert_eq!(history.recall_older("three"), Some("two"));
        assert_eq!(history.recall_older("two"), Some("one"));
        assert_eq!(history.recall_newer(), Some("two"));
        assert_eq!(history.recall_newer(), Some("three"));
        assert_eq!(history.recall_newer(), Some("draft"));
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_recall_older_stops_at_oldest() {
        let mut history = CommandHistory::new();
        history.submit("only");

        assert_eq!(history.recall_older(""), Some("only"));
        assert_eq!(history.recall_older("only"), None);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_recall_on_empty_history() {
        let mut history = CommandHistory::new();
        assert_eq!(history.recall_older("draft"), None);
        assert_eq!(history.recall_newer(), None);
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_pending_captured_only_when_browsing_starts() {
        let mut history = CommandHistory::new();
        history.submit("a");
        history.submit("b");

        history.recall_older("draft");
        history.recall_older("edited while browsing");
        history.recall_newer();
        assert_eq!(history.recall_newer(), Some("draft"));
    }

    #[test]
    fn test_submit_resets_browsing_even_when_not_recorded() {
        let mut history = CommandHistory::new();
        history.submit("a");
        history.recall_older("draft");

        assert!(!history.submit("a"));
        assert!(!history.is_browsing());
        // The old draft is gone.
        assert_eq!(history.recall_older("new"), Some("a"));
        assert_eq!(history.recall_newer(), Some("new"));
    }
}
