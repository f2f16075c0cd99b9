//! User domain
//!
//! This module provides domain types and traits for storefront accounts,
//! including the user entity, cart items, validation, and repository traits.

mod cart;
mod entity;
mod repository;
mod validation;

pub use cart::CartItem;
pub use entity::{Role, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_name, validate_password, validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
