//! Append-only SQLite log of evaluation results and upload metadata.
//!
//! All operations are synchronous (rusqlite is blocking). The log keeps
//! everything ever written; there is no retention policy.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreResult;

/// One logged scalar result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub tool: String,
    pub parameter: String,
    pub value: f64,
    /// RFC 3339 UTC
    pub timestamp: String,
}

/// Metadata for one accepted upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: i64,
    pub filename: String,
    pub filetype: String,
    pub timestamp: String,
}

pub struct ResultLog {
    conn: Connection,
}

impl ResultLog {
    /// Create or open the log database at `db_path`.
    pub fn open(db_path: &Path) -> StoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        let log = Self::with_connection(conn)?;
        info!("Opened result log at {:?}", db_path);
        Ok(log)
    }

    /// In-memory log, used by tests and the CLI's throwaway mode.
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tool TEXT NOT NULL,
                parameter TEXT NOT NULL,
                value REAL NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS uploads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                filetype TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_results_tool ON results(tool)",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Append one result row. Returns the row id.
    pub fn append_result(&self, tool: &str, parameter: &str, value: f64) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO results (tool, parameter, value, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![tool, parameter, value, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Append one upload metadata row. Returns the row id.
    pub fn append_upload(&self, filename: &str, filetype: &str) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO uploads (filename, filetype, timestamp)
             VALUES (?1, ?2, ?3)",
            params![filename, filetype, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All results, newest first, optionally filtered by tool.
    pub fn list_results(&self, tool: Option<&str>) -> StoreResult<Vec<ResultRecord>> {
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(ResultRecord {
                id: row.get(0)?,
                tool: row.get(1)?,
                parameter: row.get(2)?,
                value: row.get(3)?,
                timestamp: row.get(4)?,
            })
        };
        let records = match tool {
            Some(tool) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, tool, parameter, value, timestamp
                     FROM results WHERE tool = ?1 ORDER BY id DESC",
                )?;
                let rows = stmt.query_map(params![tool], map_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, tool, parameter, value, timestamp
                     FROM results ORDER BY id DESC",
                )?;
                let rows = stmt.query_map([], map_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(records)
    }

    /// All uploads, newest first.
    pub fn list_uploads(&self) -> StoreResult<Vec<UploadRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, filename, filetype, timestamp
             FROM uploads ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UploadRecord {
                id: row.get(0)?,
                filename: row.get(1)?,
                filetype: row.get(2)?,
                timestamp: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
