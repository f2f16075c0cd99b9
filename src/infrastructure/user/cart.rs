//! Cart service

use std::sync::Arc;

use crate::domain::user::{CartItem, UserId, UserRepository};
use crate::domain::DomainError;

/// Cart state manager.
///
/// The storefront always submits the complete cart, so saves are wholesale
/// replacements and concurrent saves resolve last-writer-wins, never a merge.
#[derive(Debug)]
pub struct CartService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> CartService<R> {
    /// Create a new cart service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Replace the stored cart with the submitted one
    pub async fn replace_cart(
        &self,
        id: &UserId,
        items: Vec<CartItem>,
    ) -> Result<(), DomainError> {
        match self.repository.replace_cart(id, &items).await {
            Err(DomainError::NotFound { .. }) => Err(DomainError::not_found("User not found")),
            other => other,
        }
    }

    /// Read the stored cart
    pub async fn get_cart(&self, id: &UserId) -> Result<Vec<CartItem>, DomainError> {
        let user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        Ok(user.cart_items().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductId;
    use crate::domain::user::User;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use serde_json::json;

    fn line(id: &str, quantity: u32) -> CartItem {
        CartItem::new(ProductId::new(id).unwrap(), quantity)
    }

    async fn seed_user(repository: &InMemoryUserRepository) -> UserId {
        let user = User::new(
            UserId::generate(),
            "Alice",
            "alice@example.com",
            "hashed_password",
        );
        let id = user.id().clone();
        repository.create(user).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_replace_and_get() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = CartService::new(repository.clone());
        let id = seed_user(&repository).await;

        let items = vec![
            line("sku-1", 2),
            CartItem::new(ProductId::new("sku-2").unwrap(), 1).with_metadata(json!({"size": "M"})),
        ];
        service.replace_cart(&id, items).await.unwrap();

        let cart = service.get_cart(&id).await.unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].product_id().as_str(), "sku-1");
        assert_eq!(cart[1].metadata()["size"], "M");
    }

    #[tokio::test]
    async fn test_replacement_is_wholesale() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = CartService::new(repository.clone());
        let id = seed_user(&repository).await;

        service
            .replace_cart(&id, vec![line("sku-1", 2), line("sku-2", 1)])
            .await
            .unwrap();
        service.replace_cart(&id, vec![line("sku-3", 5)]).await.unwrap();

        let cart = service.get_cart(&id).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].product_id().as_str(), "sku-3");
    }

    #[tokio::test]
    async fn test_missing_user() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = CartService::new(repository);
        let ghost = UserId::generate();

        let save = service.replace_cart(&ghost, vec![line("sku-1", 1)]).await;
        match save {
            Err(DomainError::NotFound { message }) => assert_eq!(message, "User not found"),
            other => panic!("expected not-found, got {:?}", other),
        }

        let read = service.get_cart(&ghost).await;
        assert!(matches!(read, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_saves_leave_one_cart() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = Arc::new(CartService::new(repository.clone()));
        let id = seed_user(&repository).await;

        let first = vec![line("sku-1", 1), line("sku-2", 2)];
        let second = vec![line("sku-3", 3)];

        let a = {
            let service = service.clone();
            let id = id.clone();
            let items = first.clone();
            tokio::spawn(async move { service.replace_cart(&id, items).await })
        };
        let b = {
            let service = service.clone();
            let id = id.clone();
            let items = second.clone();
            tokio::spawn(async move { service.replace_cart(&id, items).await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        // Last writer wins: the stored cart is exactly one of the submissions
        let cart = service.get_cart(&id).await.unwrap();
        let ids: Vec<&str> = cart.iter().map(|i| i.product_id().as_str()).collect();

        assert!(
            ids == vec!["sku-1", "sku-2"] || ids == vec!["sku-3"],
            "stored cart must match a single submission, got {:?}",
            ids
        );
    }
}
