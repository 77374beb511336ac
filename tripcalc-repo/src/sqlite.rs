//! SQLite history store adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use tripcalc_types::{HISTORY_LIMIT, HistoryEntry, HistoryError, HistoryKind, HistoryStore};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite History
// ─────────────────────────────────────────────────────────────────────────────

/// Bounded history persisted in a SQLite database.
pub struct SqliteHistory {
    pool: SqlitePool,
    limit: usize,
}

impl SqliteHistory {
    /// Opens (or creates) the database and applies the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let ddl = include_str!("../migrations/0001_create_history.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self {
            pool,
            limit: HISTORY_LIMIT,
        })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> HistoryError {
    HistoryError::Storage(e.to_string())
}

fn row_to_entry(row: &SqliteRow) -> Result<HistoryEntry, HistoryError> {
    let kind: String = row.try_get("kind").map_err(db_err)?;
    let recorded_at: String = row.try_get("recorded_at").map_err(db_err)?;

    Ok(HistoryEntry {
        kind: kind.parse::<HistoryKind>().map_err(HistoryError::Corrupt)?,
        title: row.try_get("title").map_err(db_err)?,
        result_summary: row.try_get("result_summary").map_err(db_err)?,
        timestamp: DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|e| HistoryError::Corrupt(e.to_string()))?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO calc_history (kind, title, result_summary, recorded_at) VALUES (?, ?, ?, ?)",
        )
        .bind(entry.kind.as_str())
        .bind(&entry.title)
        .bind(&entry.result_summary)
        .bind(entry.timestamp.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            "DELETE FROM calc_history WHERE id NOT IN \
             (SELECT id FROM calc_history ORDER BY id DESC LIMIT ?)",
        )
        .bind(self.limit as i64)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)
    }

    async fn load_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let rows = sqlx::query(
            "SELECT kind, title, result_summary, recorded_at FROM calc_history \
             ORDER BY id DESC LIMIT ?",
        )
        .bind(self.limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        sqlx::query("DELETE FROM calc_history")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
