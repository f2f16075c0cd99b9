//! Product entity and related types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum product reference length
pub const MAX_PRODUCT_ID_LENGTH: usize = 64;

/// Validation errors for product references
#[derive(Debug, Error, PartialEq)]
pub enum ProductValidationError {
    #[error("Product reference cannot be empty")]
    EmptyId,

    #[error("Product reference cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Product reference cannot contain whitespace")]
    IdContainsWhitespace,
}

/// Product identifier - opaque catalog reference, max 64 characters, no whitespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ProductId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ProductValidationError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ProductValidationError::EmptyId);
        }
        if id.len() > MAX_PRODUCT_ID_LENGTH {
            return Err(ProductValidationError::IdTooLong(MAX_PRODUCT_ID_LENGTH));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ProductValidationError::IdContainsWhitespace);
        }

        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product entity as exposed by the catalog system.
///
/// This service only ever reads products: the wishlist resolver dereferences
/// stored `ProductId`s through the catalog boundary and hands the results back
/// to the storefront unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Catalog reference for this product
    id: ProductId,

    /// Display name
    name: String,

    /// Price in minor currency units (cents)
    price: i64,

    /// Product description
    description: String,

    /// Image URL, when the catalog has one
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl Product {
    /// Create a new Product with required fields
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            image_url: None,
        }
    }

    /// Builder-style method to set the image URL
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    // Getters

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_valid() {
        let id = ProductId::new("sku-backpack-01").unwrap();
        assert_eq!(id.as_str(), "sku-backpack-01");
    }

    #[test]
    fn test_product_id_empty() {
        assert_eq!(ProductId::new(""), Err(ProductValidationError::EmptyId));
    }

    #[test]
    fn test_product_id_too_long() {
        let long_id = "a".repeat(65);
        assert_eq!(
            ProductId::new(long_id),
            Err(ProductValidationError::IdTooLong(MAX_PRODUCT_ID_LENGTH))
        );
    }

    #[test]
    fn test_product_id_whitespace() {
        assert_eq!(
            ProductId::new("sku 01"),
            Err(ProductValidationError::IdContainsWhitespace)
        );
    }

    #[test]
    fn test_product_id_serde_rejects_invalid() {
        let result: Result<ProductId, _> = serde_json::from_str("\"has space\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_product_creation() {
        let id = ProductId::new("sku-backpack-01").unwrap();
        let product = Product::new(id, "Trail Backpack", 7999, "35L hiking backpack")
            .with_image_url("https://cdn.example.com/backpack.jpg");

        assert_eq!(product.id().as_str(), "sku-backpack-01");
        assert_eq!(product.name(), "Trail Backpack");
        assert_eq!(product.price(), 7999);
        assert_eq!(product.description(), "35L hiking backpack");
        assert_eq!(
            product.image_url(),
            Some("https://cdn.example.com/backpack.jpg")
        );
    }

    #[test]
    fn test_product_serialization_omits_missing_image() {
        let id = ProductId::new("sku-1").unwrap();
        let product = Product::new(id, "Mug", 1250, "Ceramic mug");

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["price"], 1250);
    }
}
