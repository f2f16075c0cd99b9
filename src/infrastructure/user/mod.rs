//! User infrastructure module
//!
//! Implementations behind the user domain: password hashing with Argon2, the
//! in-memory and PostgreSQL repositories, and the account, cart and wishlist
//! services.

mod cart;
mod password;
mod postgres_repository;
mod repository;
mod service;
mod wishlist;

pub use cart::CartService;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{RegisterRequest, UpdateProfileRequest, UserService};
pub use wishlist::WishlistService;
