//! Wishlist service

use std::sync::Arc;

use crate::domain::product::{Product, ProductCatalog, ProductId};
use crate::domain::user::{UserId, UserRepository};
use crate::domain::DomainError;

/// Wishlist state manager.
///
/// Stores product references against the user record and resolves them through
/// the catalog boundary at read time. Mutations are identity-matched updates:
/// adding a reference that is already present, or mutating a user record that
/// does not exist, is a silent no-op.
#[derive(Debug)]
pub struct WishlistService<R: UserRepository, C: ProductCatalog> {
    repository: Arc<R>,
    catalog: Arc<C>,
}

impl<R: UserRepository, C: ProductCatalog> WishlistService<R, C> {
    /// Create a new wishlist service
    pub fn new(repository: Arc<R>, catalog: Arc<C>) -> Self {
        Self { repository, catalog }
    }

    /// Add a product reference to the wishlist set
    pub async fn add(&self, id: &UserId, product_id: ProductId) -> Result<(), DomainError> {
        self.repository.wishlist_add(id, &product_id).await?;
        Ok(())
    }

    /// Remove a product reference from the wishlist set
    pub async fn remove(&self, id: &UserId, product_id: ProductId) -> Result<(), DomainError> {
        self.repository.wishlist_remove(id, &product_id).await?;
        Ok(())
    }

    /// Resolve the stored references into products.
    ///
    /// References the catalog no longer knows are dropped from the result;
    /// order follows storage order.
    pub async fn resolved(&self, id: &UserId) -> Result<Vec<Product>, DomainError> {
        let user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        self.catalog.get_many(user.wishlist()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::infrastructure::product::InMemoryProductCatalog;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn product(id: &str, name: &str) -> Product {
        Product::new(ProductId::new(id).unwrap(), name, 1999, "test product")
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    async fn setup() -> (
        WishlistService<InMemoryUserRepository, InMemoryProductCatalog>,
        UserId,
    ) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let catalog = Arc::new(InMemoryProductCatalog::with_products(vec![
            product("p1", "Backpack"),
            product("p2", "Lantern"),
        ]));

        let user = User::new(
            UserId::generate(),
            "Alice",
            "alice@example.com",
            "hashed_password",
        );
        let id = user.id().clone();
        repository.create(user).await.unwrap();

        (WishlistService::new(repository, catalog), id)
    }

    #[tokio::test]
    async fn test_add_and_resolve() {
        let (service, id) = setup().await;

        service.add(&id, pid("p2")).await.unwrap();
        service.add(&id, pid("p1")).await.unwrap();

        let resolved = service.resolved(&id).await.unwrap();
        assert_eq!(resolved.len(), 2);
        // Storage order, not catalog order
        assert_eq!(resolved[0].name(), "Lantern");
        assert_eq!(resolved[1].name(), "Backpack");
    }

    #[tokio::test]
    async fn test_add_twice_is_noop() {
        let (service, id) = setup().await;

        service.add(&id, pid("p1")).await.unwrap();
        service.add(&id, pid("p1")).await.unwrap();

        let resolved = service.resolved(&id).await.unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let (service, id) = setup().await;

        service.add(&id, pid("p1")).await.unwrap();
        service.remove(&id, pid("p1")).await.unwrap();
        // Removing an absent reference is a no-op, not an error
        service.remove(&id, pid("p1")).await.unwrap();

        let resolved = service.resolved(&id).await.unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_mutations_on_unknown_user_are_silent() {
        let (service, _) = setup().await;
        let ghost = UserId::generate();

        service.add(&ghost, pid("p1")).await.unwrap();
        service.remove(&ghost, pid("p1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_dangling_references_are_dropped() {
        let (service, id) = setup().await;

        service.add(&id, pid("p1")).await.unwrap();
        service.add(&id, pid("discontinued")).await.unwrap();

        let resolved = service.resolved(&id).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id().as_str(), "p1");
    }

    #[tokio::test]
    async fn test_resolved_missing_user() {
        let (service, _) = setup().await;

        let result = service.resolved(&UserId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
