//! Local persistence for the planning board.
//!
//! Everything lives in one `SQLite` file under the data directory:
//!
//! ```text
//! <data-dir>/proplan.sqlite
//!   jobs        (id, seq, data)   # active jobs, JSON per row
//!   dispatches  (id, seq, data)   # dispatch log, JSON per row
//!   materials   (id, seq, data)   # material inventory, JSON per row
//!   meta        (key, value)      # bookkeeping, e.g. whether seed data went in
//! ```
//!
//! `seq` keeps insertion order. Every [`Change`] from the board is committed
//! on its own, write-through; the last write wins.

mod dispatches;
mod jobs;
mod materials;
mod seed;

use std::{fs, io, path::PathBuf};

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::board::{Board, Change};

pub use seed::demo_board;

/// File name of the database inside the data directory.
pub const DB_FILE: &str = "proplan.sqlite";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS jobs (
        id   TEXT PRIMARY KEY,
        seq  INTEGER NOT NULL,
        data TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS dispatches (
        id   TEXT PRIMARY KEY,
        seq  INTEGER NOT NULL,
        data TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS materials (
        id   TEXT PRIMARY KEY,
        seq  INTEGER NOT NULL,
        data TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS meta (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: Uuid },

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// `SQLite`-backed storage for the board.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database in `dir`.
    ///
    /// The directory and schema are created if they don't exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let conn = Connection::open(dir.join(DB_FILE))?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %dir.join(DB_FILE).display(), "opened storage");
        Ok(Self { conn })
    }

    /// Loads the last-saved board.
    pub fn load_board(&self) -> Result<Board> {
        Ok(Board {
            jobs: self.load_jobs()?,
            dispatches: self.load_dispatches()?,
            materials: self.load_materials()?,
        })
    }

    /// Persists one change from the board.
    ///
    /// Archiving a job removes it and logs its dispatch in one transaction.
    pub fn commit(&self, change: &Change) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        match change {
            Change::JobCreated(job) => jobs::insert(&tx, job)?,
            Change::JobUpdated { job, .. } => jobs::update(&tx, job)?,
            Change::JobArchived { job_id, record } => {
                // A job created straight into completion was never stored.
                jobs::delete_if_present(&tx, *job_id)?;
                dispatches::insert(&tx, record)?;
            }
            Change::JobDeleted(id) => jobs::delete(&tx, *id)?,
            Change::DispatchLogged(record) => dispatches::insert(&tx, record)?,
            Change::DispatchEdited(record) => dispatches::update(&tx, record)?,
            Change::DispatchDeleted(id) => dispatches::delete(&tx, *id)?,
            Change::MaterialAdded(material) => materials::insert(&tx, material)?,
            Change::MaterialRemoved(id) => materials::delete(&tx, *id)?,
        }
        tx.commit()?;
        tracing::info!(change = change_name(change), "committed");
        Ok(())
    }

    fn meta(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn change_name(change: &Change) -> &'static str {
    match change {
        Change::JobCreated(_) => "job created",
        Change::JobUpdated { .. } => "job updated",
        Change::JobArchived { .. } => "job archived",
        Change::JobDeleted(_) => "job deleted",
        Change::DispatchLogged(_) => "dispatch logged",
        Change::DispatchEdited(_) => "dispatch edited",
        Change::DispatchDeleted(_) => "dispatch deleted",
        Change::MaterialAdded(_) => "material added",
        Change::MaterialRemoved(_) => "material removed",
    }
}

// ── Row helpers shared by the per-table modules ──

/// One of the record tables.
#[derive(Debug, Clone, Copy)]
enum Table {
    Jobs,
    Dispatches,
    Materials,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Dispatches => "dispatches",
            Self::Materials => "materials",
        }
    }

    /// What a row is called in error messages.
    fn kind(self) -> &'static str {
        match self {
            Self::Jobs => "job",
            Self::Dispatches => "dispatch record",
            Self::Materials => "material",
        }
    }
}

fn insert_row<T: Serialize>(conn: &Connection, table: Table, id: Uuid, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    let sql = format!(
        "INSERT INTO {t} (id, seq, data)
         VALUES (?1, (SELECT COALESCE(MAX(seq), 0) + 1 FROM {t}), ?2)",
        t = table.name()
    );
    match conn.execute(&sql, params![id.to_string(), json]) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(StorageError::AlreadyExists {
                kind: table.kind(),
                id,
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn update_row<T: Serialize>(conn: &Connection, table: Table, id: Uuid, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    let sql = format!("UPDATE {} SET data = ?1 WHERE id = ?2", table.name());
    let rows = conn.execute(&sql, params![json, id.to_string()])?;
    if rows == 0 {
        return Err(StorageError::NotFound {
            kind: table.kind(),
            id,
        });
    }
    Ok(())
}

/// Deletes a row, returning whether it existed.
fn delete_row(conn: &Connection, table: Table, id: Uuid) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", table.name());
    let rows = conn.execute(&sql, [id.to_string()])?;
    Ok(rows > 0)
}

fn load_rows<T: DeserializeOwned>(conn: &Connection, table: Table) -> Result<Vec<T>> {
    let sql = format!("SELECT id, data FROM {} ORDER BY seq", table.name());
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut values = Vec::new();
    for row in rows {
        let (id, data) = row?;
        let value = serde_json::from_str(&data)
            .map_err(|e| StorageError::Corrupt(format!("{} {id}: {e}", table.kind())))?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use tempfile::TempDir;

    use crate::board::SaveMode;
    use crate::model::{DispatchRecord, Job, JobStatus};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path().join("data")).unwrap();
        (dir, storage)
    }

    #[test]
    fn fresh_storage_loads_empty_board() {
        let (_dir, storage) = test_storage();
        assert_eq!(storage.load_board().unwrap(), Board::default());
    }

    #[test]
    fn reopening_keeps_state() {
        let dir = TempDir::new().unwrap();
        let record = DispatchRecord::logged("Batch 201", "Tesla", 420, date(2023, 10, 27));
        {
            let storage = Storage::open(dir.path()).unwrap();
            storage
                .commit(&Change::DispatchLogged(record.clone()))
                .unwrap();
        }
        let storage = Storage::open(dir.path()).unwrap();
        assert_eq!(storage.load_board().unwrap().dispatches, vec![record]);
    }

    #[test]
    fn archive_moves_job_to_dispatch_log() {
        let (_dir, storage) = test_storage();
        let today = date(2023, 10, 30);
        let mut job = Job::new("Batch 203", "Rivian", today);
        job.po_quantity = Some(380);

        let (board, change) = Board::default()
            .save_job(job.clone(), SaveMode::Create, today)
            .unwrap();
        storage.commit(&change).unwrap();

        let mut done = job.clone();
        done.status = JobStatus::Completed;
        let (board, change) = board.save_job(done, SaveMode::Update, today).unwrap();
        storage.commit(&change).unwrap();

        assert_eq!(storage.load_board().unwrap(), board);
        assert!(board.jobs.is_empty());
        assert_eq!(board.dispatches[0].quantity, 380);
    }

    #[test]
    fn archive_of_never_stored_job_still_logs_dispatch() {
        let (_dir, storage) = test_storage();
        let today = date(2023, 10, 30);
        let mut job = Job::new("Batch 200", "SpaceX", today);
        job.status = JobStatus::Completed;

        let (board, change) = Board::default()
            .save_job(job, SaveMode::Create, today)
            .unwrap();
        storage.commit(&change).unwrap();

        assert_eq!(storage.load_board().unwrap(), board);
    }

    #[test]
    fn corrupt_row_is_reported() {
        let (_dir, storage) = test_storage();
        storage
            .conn
            .execute(
                "INSERT INTO jobs (id, seq, data) VALUES ('x', 1, '{not json')",
                [],
            )
            .unwrap();
        let err = storage.load_board().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn meta_round_trips() {
        let (_dir, storage) = test_storage();
        assert_eq!(storage.meta("seeded").unwrap(), None);
        Storage::set_meta(&storage.conn, "seeded", "2023-10-30").unwrap();
        Storage::set_meta(&storage.conn, "seeded", "2023-10-31").unwrap();
        assert_eq!(
            storage.meta("seeded").unwrap().as_deref(),
            Some("2023-10-31")
        );
    }
}
