mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{types::Type, Connection, OptionalExtension, Row};

use crate::models::*;

const MEMO_COLUMNS: &str = "id, username, contents, created_at, modified_at";

/// Shared handle to the memo store.
///
/// Cloning is cheap; all clones share one connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at: {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::info!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "memo-api")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("memo.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Memo operations
    // ============================================================

    pub fn get_all_memos(&self) -> Result<Vec<Memo>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!("SELECT {MEMO_COLUMNS} FROM memo ORDER BY id"))?;

        let memos = stmt
            .query_map([], memo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(memos)
    }

    pub fn get_memo(&self, id: i64) -> Result<Option<Memo>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        find_memo(&conn, id)
    }

    pub fn create_memo(&self, input: MemoRequest) -> Result<Memo> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO memo (username, contents, created_at, modified_at) VALUES (?, ?, ?, ?)",
            (
                &input.username,
                &input.contents,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, "Created memo");

        Ok(Memo {
            id,
            username: input.username,
            contents: input.contents,
            created_at: now,
            modified_at: now,
        })
    }

    /// Overwrite author and contents of an existing memo.
    ///
    /// Returns `None` when no memo has the given id. The lookup and the write
    /// happen under one lock, so a concurrent delete cannot slip in between.
    pub fn update_memo(&self, id: i64, input: MemoRequest) -> Result<Option<Memo>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(existing) = find_memo(&conn, id)? else {
            return Ok(None);
        };

        let now = Utc::now();
        let rows = conn.execute(
            "UPDATE memo SET username = ?, contents = ?, modified_at = ? WHERE id = ?",
            (&input.username, &input.contents, now.to_rfc3339(), id),
        )?;
        if rows == 0 {
            return Ok(None);
        }

        tracing::debug!(id, "Updated memo");

        Ok(Some(Memo {
            id,
            username: input.username,
            contents: input.contents,
            created_at: existing.created_at,
            modified_at: now,
        }))
    }

    /// Remove a memo, returning its id, or `None` when it does not exist.
    pub fn delete_memo(&self, id: i64) -> Result<Option<i64>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM memo WHERE id = ?", [id])?;
        if rows == 0 {
            return Ok(None);
        }

        tracing::debug!(id, "Deleted memo");
        Ok(Some(id))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn find_memo(conn: &Connection, id: i64) -> Result<Option<Memo>> {
    let memo = conn
        .query_row(
            &format!("SELECT {MEMO_COLUMNS} FROM memo WHERE id = ?"),
            [id],
            memo_from_row,
        )
        .optional()?;
    Ok(memo)
}

fn memo_from_row(row: &Row<'_>) -> rusqlite::Result<Memo> {
    Ok(Memo {
        id: row.get(0)?,
        username: row.get(1)?,
        contents: row.get(2)?,
        created_at: parse_datetime(row, 3)?,
        modified_at: parse_datetime(row, 4)?,
    })
}

/// Read an RFC 3339 text column. Unparseable values fail the row.
fn parse_datetime(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            tracing::warn!("Invalid timestamp {:?} in column {}", raw, idx);
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
}
