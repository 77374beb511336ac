//! Calculation history entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of entries a history store retains. Older entries are evicted first.
pub const HISTORY_LIMIT: usize = 10;

/// Which calculator produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Exchange,
    Customs,
    Tip,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Exchange => "exchange",
            HistoryKind::Customs => "customs",
            HistoryKind::Tip => "tip",
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exchange" => Ok(HistoryKind::Exchange),
            "customs" => Ok(HistoryKind::Customs),
            "tip" => Ok(HistoryKind::Tip),
            _ => Err(format!("Invalid history kind: {}", s)),
        }
    }
}

/// A one-line summary of a finished calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    #[schema(example = "USD → KRW")]
    pub title: String,
    #[schema(example = "100 USD = 144800 KRW")]
    pub result_summary: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(kind: HistoryKind, title: impl Into<String>, result_summary: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            result_summary: result_summary.into(),
            timestamp: Utc::now(),
        }
    }
}
