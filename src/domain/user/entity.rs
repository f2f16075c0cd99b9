//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::validation::{validate_user_id, UserValidationError};
use crate::domain::product::ProductId;

/// User identifier - opaque, assigned at creation, immutable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular storefront customer
    #[default]
    Standard,
    /// Administrator with access to the admin surface
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User entity - identity record plus the per-user mutable collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Display name
    name: String,
    /// Login email - unique, immutable after creation
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Role of the account
    role: Role,
    /// Contact phone number
    phone: Option<String>,
    /// Shipping address
    address: Option<String>,
    /// Profile photo reference
    photo: Option<String>,
    /// Cart lines, replaced wholesale by cart saves
    cart_items: Vec<CartItem>,
    /// Wishlist product references - set semantics, no duplicates
    wishlist: Vec<ProductId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty cart and wishlist
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::Standard,
            phone: None,
            address: None,
            photo: None,
            cart_items: Vec::new(),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a user from stored fields, bypassing defaults
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: UserId,
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        phone: Option<String>,
        address: Option<String>,
        photo: Option<String>,
        cart_items: Vec<CartItem>,
        wishlist: Vec<ProductId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            role,
            phone,
            address,
            photo,
            cart_items,
            wishlist,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
        self.touch();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
        self.touch();
    }

    /// Overwrite the profile photo reference unconditionally
    pub fn set_photo(&mut self, photo: impl Into<String>) {
        self.photo = Some(photo.into());
        self.touch();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.touch();
    }

    /// Replace the cart contents wholesale - no merge with prior lines
    pub fn replace_cart(&mut self, items: Vec<CartItem>) {
        self.cart_items = items;
        self.touch();
    }

    /// Add a product reference to the wishlist; returns false when already present
    pub fn wishlist_add(&mut self, product_id: ProductId) -> bool {
        if self.wishlist.contains(&product_id) {
            return false;
        }
        self.wishlist.push(product_id);
        self.touch();
        true
    }

    /// Remove a product reference from the wishlist; returns false when absent
    pub fn wishlist_remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|p| p != product_id);
        let removed = self.wishlist.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
