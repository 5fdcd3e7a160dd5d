//! Dispatch storage: the shipment log.

use rusqlite::Connection;
use uuid::Uuid;

use crate::model::DispatchRecord;

use super::{Result, Storage, StorageError, Table, delete_row, insert_row, load_rows, update_row};

impl Storage {
    /// Loads the dispatch log in the order records were logged.
    pub fn load_dispatches(&self) -> Result<Vec<DispatchRecord>> {
        load_rows(&self.conn, Table::Dispatches)
    }
}

pub(super) fn insert(conn: &Connection, record: &DispatchRecord) -> Result<()> {
    insert_row(conn, Table::Dispatches, record.id, record)
}

pub(super) fn update(conn: &Connection, record: &DispatchRecord) -> Result<()> {
    update_row(conn, Table::Dispatches, record.id, record)
}

pub(super) fn delete(conn: &Connection, id: Uuid) -> Result<()> {
    if !delete_row(conn, Table::Dispatches, id)? {
        return Err(StorageError::NotFound {
            kind: Table::Dispatches.kind(),
            id,
        });
    }
    Ok(())
}
