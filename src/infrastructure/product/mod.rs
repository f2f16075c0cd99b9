//! Product catalog infrastructure
//!
//! Implementations of the catalog lookup boundary: an in-memory catalog with
//! an optional TOML seed, and a read-only PostgreSQL lookup.

mod memory;
mod postgres;

pub use memory::InMemoryProductCatalog;
pub use postgres::PostgresProductCatalog;
