//! History store port trait.
//!
//! Adapters (in-memory, SQLite) implement this bounded log.

use crate::domain::HistoryEntry;
use crate::error::HistoryError;

/// Append-bounded log of recent calculation summaries.
///
/// Implementations keep at most [`HISTORY_LIMIT`](crate::HISTORY_LIMIT)
/// entries, evicting the oldest first.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Records an entry, evicting the oldest ones beyond the limit.
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// Returns all retained entries, most recent first.
    async fn load_all(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Removes every entry.
    async fn clear(&self) -> Result<(), HistoryError>;
}
