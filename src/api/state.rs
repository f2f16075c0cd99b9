//! Application state for shared services

use std::sync::Arc;

use crate::domain::product::{Product, ProductCatalog, ProductId};
use crate::domain::user::{CartItem, User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtService;
use crate::infrastructure::user::{
    CartService, PasswordHasher, RegisterRequest, UpdateProfileRequest, UserService,
    WishlistService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub cart_service: Arc<dyn CartServiceTrait>,
    pub wishlist_service: Arc<dyn WishlistServiceTrait>,
    pub jwt_service: Arc<dyn JwtServiceTrait>,
    /// Secure attribute for session cookies, from `auth.cookie_secure`
    pub cookie_secure: bool,
}

/// Trait for account and profile operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError>;
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError>;
    async fn get_profile(&self, id: &UserId) -> Result<User, DomainError>;
    async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError>;
    async fn update_photo(&self, id: &UserId, photo: String) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for cart operations
#[async_trait::async_trait]
pub trait CartServiceTrait: Send + Sync {
    async fn replace_cart(&self, id: &UserId, items: Vec<CartItem>) -> Result<(), DomainError>;
    async fn get_cart(&self, id: &UserId) -> Result<Vec<CartItem>, DomainError>;
}

/// Trait for wishlist operations
#[async_trait::async_trait]
pub trait WishlistServiceTrait: Send + Sync {
    async fn add(&self, id: &UserId, product_id: ProductId) -> Result<(), DomainError>;
    async fn remove(&self, id: &UserId, product_id: ProductId) -> Result<(), DomainError>;
    async fn resolved(&self, id: &UserId) -> Result<Vec<Product>, DomainError>;
}

/// Trait for issuing and verifying session tokens
pub trait JwtServiceTrait: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<String, DomainError>;
    fn verify(&self, token: &str) -> Option<UserId>;
    fn expiration_hours(&self) -> u64;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, email, password).await
    }

    async fn get_profile(&self, id: &UserId) -> Result<User, DomainError> {
        UserService::get_profile(self, id).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        UserService::update_profile(self, id, request).await
    }

    async fn update_photo(&self, id: &UserId, photo: String) -> Result<User, DomainError> {
        UserService::update_photo(self, id, photo).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> CartServiceTrait for CartService<R> {
    async fn replace_cart(&self, id: &UserId, items: Vec<CartItem>) -> Result<(), DomainError> {
        CartService::replace_cart(self, id, items).await
    }

    async fn get_cart(&self, id: &UserId) -> Result<Vec<CartItem>, DomainError> {
        CartService::get_cart(self, id).await
    }
}

#[async_trait::async_trait]
impl<R, C> WishlistServiceTrait for WishlistService<R, C>
where
    R: UserRepository + 'static,
    C: ProductCatalog + 'static,
{
    async fn add(&self, id: &UserId, product_id: ProductId) -> Result<(), DomainError> {
        WishlistService::add(self, id, product_id).await
    }

    async fn remove(&self, id: &UserId, product_id: ProductId) -> Result<(), DomainError> {
        WishlistService::remove(self, id, product_id).await
    }

    async fn resolved(&self, id: &UserId) -> Result<Vec<Product>, DomainError> {
        WishlistService::resolved(self, id).await
    }
}

impl JwtServiceTrait for JwtService {
    fn issue(&self, user_id: &UserId) -> Result<String, DomainError> {
        JwtService::issue(self, user_id)
    }

    fn verify(&self, token: &str) -> Option<UserId> {
        JwtService::verify(self, token)
    }

    fn expiration_hours(&self) -> u64 {
        JwtService::expiration_hours(self)
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        cart_service: Arc<dyn CartServiceTrait>,
        wishlist_service: Arc<dyn WishlistServiceTrait>,
        jwt_service: Arc<dyn JwtServiceTrait>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            user_service,
            cart_service,
            wishlist_service,
            jwt_service,
            cookie_secure,
        }
    }
}
