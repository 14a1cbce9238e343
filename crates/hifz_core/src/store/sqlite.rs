//! SQLite-backed storage slot.
//!
//! One row of `storage_slots` holds the full serialized database, mirroring
//! a key/value browser storage slot.

use super::codec::{decode_or_empty, encode_database, ensure_overwritable};
use super::{DatabaseStore, StoreResult, DEFAULT_SLOT_KEY};
use crate::model::database::Database;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
    slot_key: String,
}

impl<'conn> SqliteStore<'conn> {
    /// Uses the default slot key on a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_slot_key(conn, DEFAULT_SLOT_KEY)
    }

    pub fn with_slot_key(conn: &'conn Connection, slot_key: impl Into<String>) -> Self {
        Self {
            conn,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        self.slot_key.as_str()
    }

    fn read_slot(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [self.slot_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()
    }
}

impl DatabaseStore for SqliteStore<'_> {
    fn load(&self) -> Database {
        match self.read_slot() {
            Ok(raw) => decode_or_empty(raw.as_deref(), "sqlite"),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback backend=sqlite reason=read_error error={err}"
                );
                Database::default()
            }
        }
    }

    fn save(&self, db: &Database) -> StoreResult<()> {
        let current = self.read_slot()?;
        ensure_overwritable(current.as_deref(), "sqlite")?;
        self.replace(db)
    }

    fn replace(&self, db: &Database) -> StoreResult<()> {
        let encoded = encode_database(db)?;
        self.conn.execute(
            "INSERT INTO storage_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.slot_key.as_str(), encoded],
        )?;
        debug!(
            "event=store_save module=store status=ok backend=sqlite students={} evaluations={} bytes={}",
            db.students.len(),
            db.evaluations.len(),
            encoded.len()
        );
        Ok(())
    }
}
