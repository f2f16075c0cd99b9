//! Product domain
//!
//! Boundary types for the external catalog: the product entity, validated
//! product references, and the read-only lookup trait.

mod catalog;
mod entity;

pub use catalog::ProductCatalog;
pub use entity::{Product, ProductId, ProductValidationError, MAX_PRODUCT_ID_LENGTH};
