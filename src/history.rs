// Bounded cache of the user's recent uploads.

use crate::api::HistoryEntry;

/// The server keeps the last 5 uploads; the cache never holds more.
pub const HISTORY_LIMIT: usize = 5;

/// Holds the most recent upload history as served. Refreshed wholesale after
/// any operation that creates a dataset; there is no incremental merging.
/// Ordering is the server's (newest first) and is never re-sorted client
/// side.
#[derive(Debug, Default)]
pub struct HistoryCache {
    entries: Vec<HistoryEntry>,
}

impl HistoryCache {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the cache with a fresh server response, capped to the bound.
    pub fn replace(&mut self, mut entries: Vec<HistoryEntry>) {
        entries.truncate(HISTORY_LIMIT);
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
