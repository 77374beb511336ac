//! In-memory history store.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use tripcalc_types::{HISTORY_LIMIT, HistoryEntry, HistoryError, HistoryStore};

/// Process-local bounded history; contents are lost on restart.
pub struct InMemoryHistory {
    entries: Mutex<VecDeque<HistoryEntry>>,
    limit: usize,
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(limit + 1)),
            limit,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<HistoryEntry>>, HistoryError> {
        self.entries
            .lock()
            .map_err(|e| HistoryError::Storage(e.to_string()))
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.lock()?;
        entries.push_front(entry);
        entries.truncate(self.limit);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.lock()?.iter().cloned().collect())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcalc_types::HistoryKind;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(HistoryKind::Exchange, format!("entry {n}"), format!("result {n}"))
    }

    #[tokio::test]
    async fn test_most_recent_first() {
        let history = InMemoryHistory::new();
        history.append(entry(1)).await.unwrap();
        history.append(entry(2)).await.unwrap();

        let all = history.load_all().await.unwrap();
        assert_eq!(all[0].title, "entry 2");
        assert_eq!(all[1].title, "entry 1");
    }

    #[tokio::test]
    async fn test_bounded_to_limit() {
        let history = InMemoryHistory::new();
        for n in 1..=12 {
            history.append(entry(n)).await.unwrap();
        }

        let all = history.load_all().await.unwrap();
        assert_eq!(all.len(), HISTORY_LIMIT);
        assert_eq!(all.first().unwrap().title, "entry 12");
        assert_eq!(all.last().unwrap().title, "entry 3");
        assert!(!all.iter().any(|e| e.title == "entry 1" || e.title == "entry 2"));
    }

    #[tokio::test]
    async fn test_clear() {
        let history = InMemoryHistory::new();
        history.append(entry(1)).await.unwrap();
        history.clear().await.unwrap();
        assert!(history.load_all().await.unwrap().is_empty());
    }
}
