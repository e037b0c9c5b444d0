//! Validated record types.
//!
//! Every entity is built through a constructor that runs all of its field
//! validators, and deserialization goes through the same constructor, so a
//! hand-edited data file cannot put an invalid record in memory. Each entity
//! also carries an in-memory [`uuid::Uuid`] that is never written to disk;
//! managers use it to tell two records apart even when their fields are equal.

pub mod book;
pub mod student;
pub mod transaction;

pub use book::Book;
pub use student::{Grade, Student};
pub use transaction::Transaction;
