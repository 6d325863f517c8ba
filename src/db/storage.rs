use rusqlite::Connection;

use crate::db::queries;
use crate::services::store::Storage;

/// Storage entries kept in the `storage` table of a SQLite database.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Storage for SqliteStorage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        queries::get_storage_entry(&self.conn, key)
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        queries::set_storage_entry(&self.conn, key, value)
    }
}
