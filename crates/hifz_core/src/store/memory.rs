use super::codec::{decode_or_empty, encode_database, ensure_overwritable};
use super::{DatabaseStore, StoreResult};
use crate::model::database::Database;
use std::cell::RefCell;

/// In-process storage slot holding the serialized blob.
///
/// Keeps the raw text rather than a `Database` value so the decode path is
/// the same one the SQLite slot uses; tests can seed corrupt content.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose slot already contains `raw`.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    /// Current slot content, `None` when never written.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl DatabaseStore for MemoryStore {
    fn load(&self) -> Database {
        decode_or_empty(self.slot.borrow().as_deref(), "memory")
    }

    fn save(&self, db: &Database) -> StoreResult<()> {
        ensure_overwritable(self.slot.borrow().as_deref(), "memory")?;
        self.replace(db)
    }

    fn replace(&self, db: &Database) -> StoreResult<()> {
        let encoded = encode_database(db)?;
        self.slot.replace(Some(encoded));
        Ok(())
    }
}
