use crate::games::types::HistoryEntry;
use std::collections::VecDeque;

/// Default number of results kept for the recent win rate
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 100;

/// Bounded FIFO of the most recent results
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    entries: VecDeque<HistoryEntry>,
    max_len: usize,
}

impl HistoryWindow {
    /// `max_len` of zero is treated as one
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            entries: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Append, evicting the oldest entry once over capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_len {
            self.entries.pop_front();
        }
    }

    /// Share of wins in the window, 0 when empty
    pub fn recent_win_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let wins = self.entries.iter().filter(|entry| entry.is_win).count();
        wins as f64 / self.entries.len() as f64
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_LENGTH)
    }
}
