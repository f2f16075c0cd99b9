//! Domain layer - Core business logic and entities

pub mod error;
pub mod product;
pub mod user;

pub use error::DomainError;
pub use product::{Product, ProductCatalog, ProductId, ProductValidationError};
pub use user::{
    validate_email, validate_name, validate_password, validate_user_id, CartItem, Role, User,
    UserId, UserRepository, UserValidationError,
};
