//! # Recordz Architecture
//!
//! Recordz is a small record-keeping library with three applications: student
//! grades, a bookstore inventory, and a budget of dated transactions. It is a
//! library that happens to have a CLI client, not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Managers (students.rs, inventory.rs, budget.rs)            │
//! │  - Own one ordered collection each                          │
//! │  - Enforce uniqueness, resolve selectors, decide on saves   │
//! │  - Return `Result<CmdResult<T>>`                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Entities (model/) and validators (validation.rs)           │
//! │  - Records can only be built through validated constructors │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Managers and everything below them take plain Rust arguments and return
//! plain Rust types. They never print and never exit; user-facing text travels
//! back as [`commands::CmdMessage`] values. Storage failures on load are turned
//! into an empty collection plus an error message rather than an `Err`, so a
//! damaged file never stops the user from working.
//!
//! ## Selecting Records
//!
//! Users point at a record either by its 1-based position in the listing or by
//! a search term ([`commands::Selector`]). A term has to match exactly one
//! record for update and delete; otherwise the candidates are reported.
//!
//! ## Module Overview
//!
//! - [`students`], [`inventory`], [`budget`]: the three managers
//! - [`model`]: `Student`, `Book`, `Transaction`
//! - [`validation`]: shared field validators and `ValidationError`
//! - [`commands`]: `CmdResult`, messages, selectors, load/save helpers
//! - [`store`]: storage abstraction and implementations
//! - [`config`]: configuration management
//! - [`init`]: data directory resolution and manager construction
//! - [`logging`]: `tracing` subscriber setup for clients
//! - [`error`]: error types
//! - `cli`: argument parsing and rendering for the binary (not part of the lib API)

pub mod budget;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod inventory;
pub mod logging;
pub mod model;
pub mod store;
pub mod students;
pub mod validation;
