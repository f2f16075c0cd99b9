//! PostgreSQL product catalog

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::domain::product::{Product, ProductCatalog, ProductId};
use crate::domain::DomainError;

/// Read-only lookup against the `products` table.
///
/// The table belongs to the catalog system; this service never writes it and
/// never creates it.
#[derive(Debug, Clone)]
pub struct PostgresProductCatalog {
    pool: PgPool,
}

impl PostgresProductCatalog {
    /// Create a new catalog backed by the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for PostgresProductCatalog {
    async fn get(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, price, description, image_url FROM products WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up product: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_product(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let refs: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();

        let rows = sqlx::query(
            "SELECT id, name, price, description, image_url FROM products WHERE id = ANY($1)",
        )
        .bind(&refs)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up products: {}", e)))?;

        let mut by_id = HashMap::with_capacity(rows.len());
        for row in rows {
            let product = row_to_product(&row)?;
            by_id.insert(product.id().as_str().to_string(), product);
        }

        // Re-impose input order; the database returns rows in its own order
        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id.as_str()))
            .collect())
    }
}

fn row_to_product(row: &sqlx::postgres::PgRow) -> Result<Product, DomainError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let price: i64 = row.get("price");
    let description: String = row.get("description");
    let image_url: Option<String> = row.get("image_url");

    let product_id = ProductId::new(id).map_err(|e| {
        DomainError::storage(format!("Invalid product reference in database: {}", e))
    })?;

    let mut product = Product::new(product_id, name, price, description);
    if let Some(url) = image_url {
        product = product.with_image_url(url);
    }

    Ok(product)
}
