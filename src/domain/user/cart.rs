//! Cart line records

use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// One entry in a user's cart: a product reference plus a quantity.
///
/// `metadata` carries whatever line options the storefront attaches (size,
/// color, a cached price). It is stored and returned verbatim; this service
/// never interprets it. The cart is replaced wholesale, so no merging or
/// deduplication happens on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    product_id: ProductId,
    quantity: u32,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    metadata: serde_json::Value,
}

impl CartItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }
}
