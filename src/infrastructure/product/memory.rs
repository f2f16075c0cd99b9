//! In-memory product catalog

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::product::{Product, ProductCatalog, ProductId};
use crate::domain::DomainError;

/// Seed file shape: a `[[products]]` table per catalog entry
#[derive(Debug, Deserialize)]
struct CatalogSeed {
    #[serde(default)]
    products: Vec<Product>,
}

/// In-memory implementation of ProductCatalog.
///
/// Seeded once at construction and read-only afterwards, so lookups need no
/// locking. Used in tests and `storage.backend = "memory"` deployments.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: HashMap<String, Product>,
}

impl InMemoryProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a list of products
    pub fn with_products(products: Vec<Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.id().as_str().to_string(), p))
            .collect();

        Self { products }
    }

    /// Load a catalog from a TOML seed file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read catalog seed '{}': {}",
                path.display(),
                e
            ))
        })?;

        let seed: CatalogSeed = toml::from_str(&content).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to parse catalog seed '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            count = seed.products.len(),
            path = %path.display(),
            "Loaded product catalog seed"
        );

        Ok(Self::with_products(seed.products))
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn get(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.get(id.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product::new(ProductId::new(id).unwrap(), name, price, "test product")
    }

    #[tokio::test]
    async fn test_get() {
        let catalog = InMemoryProductCatalog::with_products(vec![
            product("p1", "Backpack", 7999),
            product("p2", "Lantern", 2499),
        ]);

        let found = catalog
            .get(&ProductId::new("p1").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().name(), "Backpack");

        let missing = catalog
            .get(&ProductId::new("p9").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_many_order_and_skips() {
        let catalog = InMemoryProductCatalog::with_products(vec![
            product("p1", "Backpack", 7999),
            product("p2", "Lantern", 2499),
        ]);

        let ids = vec![
            ProductId::new("p2").unwrap(),
            ProductId::new("gone").unwrap(),
            ProductId::new("p1").unwrap(),
        ];

        let resolved = catalog.get_many(&ids).await.unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name(), "Lantern");
        assert_eq!(resolved[1].name(), "Backpack");
    }

    #[test]
    fn test_seed_parsing() {
        let seed: CatalogSeed = toml::from_str(
            r#"
            [[products]]
            id = "sku-backpack-01"
            name = "Trail Backpack"
            price = 7999
            description = "35L hiking backpack"
            image_url = "https://cdn.example.com/backpack.jpg"

            [[products]]
            id = "sku-mug-01"
            name = "Camp Mug"
            price = 1250
            description = "Enamel mug"
            "#,
        )
        .unwrap();

        assert_eq!(seed.products.len(), 2);
        assert_eq!(seed.products[0].name(), "Trail Backpack");
        assert!(seed.products[1].image_url().is_none());

        let catalog = InMemoryProductCatalog::with_products(seed.products);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_seed_rejects_invalid_reference() {
        let result: Result<CatalogSeed, _> = toml::from_str(
            r#"
            [[products]]
            id = "has space"
            name = "Broken"
            price = 1
            description = "bad id"
            "#,
        );

        assert!(result.is_err());
    }
}
