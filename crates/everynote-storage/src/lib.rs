//! EveryNote Storage Layer
//!
//! SQLite-backed persistence for notes, categories and the local key-value
//! settings used by the session provider. Schema creation is additive only.

mod database;
mod error;
mod migrations;
mod timestamp;

pub use database::Database;
pub use error::StorageError;
pub use timestamp::{format_timestamp, now_timestamp, parse_timestamp};

pub type Result<T> = std::result::Result<T, StorageError>;
