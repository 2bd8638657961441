//! SQLite storage for price observations.

pub mod pool;

pub use pool::{create_pool, ensure_schema, DatabaseError, MEMORY_PATH};
