//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::product::ProductId;
use crate::domain::user::{CartItem, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Backing maps for the in-memory repository.
///
/// The user table and the email index live in one struct behind one lock so
/// a single acquisition covers both; no operation holds a guard across an
/// await.
#[derive(Debug, Default)]
struct Store {
    users: HashMap<String, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, String>,
}

/// In-memory implementation of UserRepository
///
/// Email lookups go through a dedicated index. The user entity exposes no
/// email mutator, so the index never needs rebuilding after `update`.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut store = Store::default();

        for user in users {
            let id = user.id().as_str().to_string();
            store.email_index.insert(user.email().to_string(), id.clone());
            store.users.insert(id, user);
        }

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(id.as_str()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .email_index
            .get(email)
            .and_then(|user_id| store.users.get(user_id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        let id = user.id().as_str().to_string();
        let email = user.email().to_string();

        if store.users.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        if store.email_index.contains_key(&email) {
            return Err(DomainError::conflict("Email has already been registered"));
        }

        store.email_index.insert(email, id.clone());
        store.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut store = self.store.write().await;
        let id = user.id().as_str().to_string();

        if !store.users.contains_key(&id) {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        store.users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn replace_cart(&self, id: &UserId, items: &[CartItem]) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        match store.users.get_mut(id.as_str()) {
            Some(user) => {
                user.replace_cart(items.to_vec());
                Ok(())
            }
            None => Err(DomainError::not_found(format!("User '{}' not found", id))),
        }
    }

    async fn wishlist_add(
        &self,
        id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;

        Ok(store
            .users
            .get_mut(id.as_str())
            .map(|user| user.wishlist_add(product_id.clone()))
            .unwrap_or(false))
    }

    async fn wishlist_remove(
        &self,
        id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;

        Ok(store
            .users
            .get_mut(id.as_str())
            .map(|user| user.wishlist_remove(product_id))
            .unwrap_or(false))
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.len())
    }
}
