//! # Storage Layer
//!
//! Each application persists one collection to one file. The [`DataStore`] trait
//! is the seam between a manager and that file, so managers can be exercised
//! without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: production storage. The whole collection is written
//!   as a pretty-printed JSON array, one object per record, overwriting the file.
//! - [`memory::InMemoryStore`]: keeps the last saved snapshot in memory; used by
//!   the unit tests.
//!
//! ## Load Semantics
//!
//! `load` distinguishes three outcomes:
//! - `Ok(None)`: nothing has been stored yet (missing file).
//! - `Ok(Some(records))`: every record parsed and passed validation.
//! - `Err(_)`: unreadable, malformed, or containing an invalid record. Stores never
//!   return a partial collection.

use crate::error::PersistenceError;

pub mod fs;
pub mod memory;

pub trait DataStore<T> {
    /// Read the full collection.
    fn load(&self) -> Result<Option<Vec<T>>, PersistenceError>;

    /// Replace the stored collection with `records`.
    fn save(&mut self, records: &[T]) -> Result<(), PersistenceError>;

    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}
