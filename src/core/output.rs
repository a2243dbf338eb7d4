//! Console output buffer.

use std::collections::VecDeque;

use super::events::ConsoleOutputLevel;

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub message: String,
    pub level: ConsoleOutputLevel,
}

impl OutputLine {
    pub fn new(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// Newest-first output history.
///
/// Storage is unbounded; renderers window it with [`OutputBuffer::newest`].
/// Lines appended since the last [`OutputBuffer::take_unsent`] are tracked
/// so they can be forwarded to other backends.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    lines: VecDeque<OutputLine>,
    unsent: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line as the newest entry.
    pub fn push(&mut self, level: ConsoleOutputLevel, message: impl Into<String>) {
        self.lines.push_front(OutputLine::new(level, message));
        self.unsent += 1;
    }

    /// Up to `count` lines, newest first.
    pub fn newest(&self, count: usize) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter().take(count)
    }

    /// Every line, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter()
    }

    /// Lines appended since the previous call, oldest first.
    pub fn take_unsent(&mut self) -> Vec<OutputLine> {
        let count = std::mem::take(&mut self.unsent);
        self.lines.iter().take(count).rev().cloned().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_window() {
        let mut output = OutputBuffer::new();
        for i in 0..5 {
            output.push(ConsoleOutputLevel::Info, format!("line {}", i));
        }

        let window: Vec<_> = output.newest(2).map(|l| l.message.as_str()).collect();
        assert_eq!(window, vec!["line 4", "line 3"]);
        assert_eq!(output.newest(100).count(), 5);
    }

    #[test]
    fn test_take_unsent_oldest_first() {
        let mut output = OutputBuffer::new();
        output.push(ConsoleOutputLevel::Command, "a");
        output.push(ConsoleOutputLevel::Result, "b");

        let sent: Vec<_> = output.take_unsent().into_iter().map(|l| l.message).collect();
        assert_eq!(sent, vec!["a", "b"]);
        assert!(output.take_unsent().is_empty());

        output.push(ConsoleOutputLevel::Error, "c");
        assert_eq!(output.take_unsent()[0].level, ConsoleOutputLevel::Error);
        assert_eq!(output.len(), 3);
    }
}
