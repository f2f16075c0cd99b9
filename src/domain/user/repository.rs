//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::cart::CartItem;
use super::entity::{User, UserId};
use crate::domain::product::ProductId;
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Wishlist mutations are expressed as single repository operations so that
/// implementations can make them atomic (a guarded UPDATE in SQL, a single
/// write-lock section in memory) instead of read-modify-write cycles.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their email (for login)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Replace a user's cart wholesale
    async fn replace_cart(&self, id: &UserId, items: &[CartItem]) -> Result<(), DomainError>;

    /// Add a product reference to a user's wishlist set.
    ///
    /// Returns `false` without error when the reference is already present or
    /// no user record matches the id.
    async fn wishlist_add(&self, id: &UserId, product_id: &ProductId)
        -> Result<bool, DomainError>;

    /// Remove a product reference from a user's wishlist set.
    ///
    /// Returns `false` without error when the reference is absent or no user
    /// record matches the id.
    async fn wishlist_remove(
        &self,
        id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
