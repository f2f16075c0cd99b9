//! Product catalog lookup boundary

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Product, ProductId};
use crate::domain::DomainError;

/// Read-only lookup boundary onto the catalog system.
///
/// This service stores product references, never product data; everything it
/// knows about a product comes through this trait at read time.
#[async_trait]
pub trait ProductCatalog: Send + Sync + Debug {
    /// Look up a single product by reference
    async fn get(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Look up a batch of products.
    ///
    /// Results preserve the order of `ids`; references the catalog does not
    /// know are skipped rather than reported as errors.
    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let mut products = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(product) = self.get(id).await? {
                products.push(product);
            }
        }
        Ok(products)
    }
}
