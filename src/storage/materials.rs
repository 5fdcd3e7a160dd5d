//! Material storage: the inventory list.

use rusqlite::Connection;
use uuid::Uuid;

use crate::model::Material;

use super::{Result, Storage, StorageError, Table, delete_row, insert_row, load_rows};

impl Storage {
    pub fn load_materials(&self) -> Result<Vec<Material>> {
        load_rows(&self.conn, Table::Materials)
    }
}

pub(super) fn insert(conn: &Connection, material: &Material) -> Result<()> {
    insert_row(conn, Table::Materials, material.id, material)
}

pub(super) fn delete(conn: &Connection, id: Uuid) -> Result<()> {
    if !delete_row(conn, Table::Materials, id)? {
        return Err(StorageError::NotFound {
            kind: Table::Materials.kind(),
            id,
        });
    }
    Ok(())
}
