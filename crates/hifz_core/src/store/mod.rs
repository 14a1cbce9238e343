//! Persistence adapter: the whole database in one storage slot.
//!
//! # Responsibility
//! - Define the `DatabaseStore` seam used by repositories and services.
//! - Provide an in-memory fake and a SQLite-backed production slot.
//!
//! # Invariants
//! - `load` never fails: missing, unparseable or wrongly shaped content
//!   yields the empty `Database`.
//! - `save` overwrites the slot in a single write, except when the slot holds
//!   well-shaped content whose records do not decode; that content is kept
//!   and `save` fails with `StoreError::UnreadableSlot`.
//! - `replace` overwrites unconditionally (whole-database import).

pub mod codec;
mod memory;
mod sqlite;

use crate::db::DbError;
use crate::model::database::Database;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage key used when no other slot is configured.
pub const DEFAULT_SLOT_KEY: &str = "MADRASSA_MANAGEMENT_DB";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while writing the storage slot.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Slot records do not decode; overwriting would discard them.
    UnreadableSlot(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize database: {err}"),
            Self::UnreadableSlot(err) => write!(
                f,
                "storage slot holds records that cannot be decoded; refusing to overwrite: {err}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) | Self::UnreadableSlot(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Single-slot persistence for the aggregate root.
pub trait DatabaseStore {
    /// Reads the slot, substituting the empty database for anything unusable.
    fn load(&self) -> Database;
    /// Serializes `db` and replaces the slot content, unless the current
    /// content has undecodable records.
    fn save(&self, db: &Database) -> StoreResult<()>;
    /// Serializes `db` and replaces the slot content whatever it holds.
    fn replace(&self, db: &Database) -> StoreResult<()>;
}
