//! Storage layer
//!
//! SQLite schema management and the error taxonomy shared by all store
//! operations.

pub mod error;
pub mod schema;

pub use error::{ErrorKind, StoreError, StoreResult};
pub use schema::{get_schema_version, init_schema, needs_init, SCHEMA_VERSION};
