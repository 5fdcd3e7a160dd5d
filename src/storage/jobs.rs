//! Job storage: the active set.

use rusqlite::Connection;
use uuid::Uuid;

use crate::model::Job;

use super::{Result, Storage, StorageError, Table, delete_row, insert_row, load_rows, update_row};

impl Storage {
    /// Loads all active jobs in the order they were created.
    pub fn load_jobs(&self) -> Result<Vec<Job>> {
        load_rows(&self.conn, Table::Jobs)
    }
}

pub(super) fn insert(conn: &Connection, job: &Job) -> Result<()> {
    insert_row(conn, Table::Jobs, job.id, job)
}

pub(super) fn update(conn: &Connection, job: &Job) -> Result<()> {
    update_row(conn, Table::Jobs, job.id, job)
}

pub(super) fn delete(conn: &Connection, id: Uuid) -> Result<()> {
    if !delete_row(conn, Table::Jobs, id)? {
        return Err(StorageError::NotFound {
            kind: Table::Jobs.kind(),
            id,
        });
    }
    Ok(())
}

pub(super) fn delete_if_present(conn: &Connection, id: Uuid) -> Result<()> {
    delete_row(conn, Table::Jobs, id)?;
    Ok(())
}
