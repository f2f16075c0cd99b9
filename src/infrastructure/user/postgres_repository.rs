//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::product::ProductId;
use crate::domain::user::{CartItem, Role, User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
///
/// Wishlist mutations are guarded single-statement UPDATEs, so set semantics
/// hold under concurrent requests without a transaction.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it doesn't exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role VARCHAR(16) NOT NULL DEFAULT 'standard',
                phone TEXT,
                address TEXT,
                photo TEXT,
                cart_items JSONB NOT NULL DEFAULT '[]'::jsonb,
                wishlist TEXT[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, role, phone, address, photo,
                   cart_items, wishlist, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, role, phone, address, photo,
                   cart_items, wishlist, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let cart_items = cart_to_json(user.cart_items())?;
        let wishlist: Vec<String> = user
            .wishlist()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, phone, address,
                               photo, cart_items, wishlist, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(role_to_str(user.role()))
        .bind(user.phone())
        .bind(user.address())
        .bind(user.photo())
        .bind(cart_items)
        .bind(&wishlist)
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                if msg.contains("email") {
                    DomainError::conflict("Email has already been registered")
                } else {
                    DomainError::conflict(format!(
                        "User with ID '{}' already exists",
                        user.id().as_str()
                    ))
                }
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let cart_items = cart_to_json(user.cart_items())?;
        let wishlist: Vec<String> = user
            .wishlist()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect();

        // Email is immutable on the entity and stays out of the SET list
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, password_hash = $3, role = $4, phone = $5, address = $6,
                photo = $7, cart_items = $8, wishlist = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.password_hash())
        .bind(role_to_str(user.role()))
        .bind(user.phone())
        .bind(user.address())
        .bind(user.photo())
        .bind(cart_items)
        .bind(&wishlist)
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id().as_str()
            )));
        }

        Ok(user.clone())
    }

    async fn replace_cart(&self, id: &UserId, items: &[CartItem]) -> Result<(), DomainError> {
        let cart_items = cart_to_json(items)?;

        let result = sqlx::query(
            "UPDATE users SET cart_items = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(cart_items)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to replace cart: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                id.as_str()
            )));
        }

        Ok(())
    }

    async fn wishlist_add(
        &self,
        id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET wishlist = array_append(wishlist, $2), updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(wishlist))
            "#,
        )
        .bind(id.as_str())
        .bind(product_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to add to wishlist: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn wishlist_remove(
        &self,
        id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET wishlist = array_remove(wishlist, $2), updated_at = NOW()
            WHERE id = $1 AND $2 = ANY(wishlist)
            "#,
        )
        .bind(id.as_str())
        .bind(product_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to remove from wishlist: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, role, phone, address, photo,
                   cart_items, wishlist, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut users = Vec::with_capacity(rows.len());

        for row in rows {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let email: String = row.get("email");
    let password_hash: String = row.get("password_hash");
    let role: String = row.get("role");
    let phone: Option<String> = row.get("phone");
    let address: Option<String> = row.get("address");
    let photo: Option<String> = row.get("photo");
    let cart_items: serde_json::Value = row.get("cart_items");
    let wishlist: Vec<String> = row.get("wishlist");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let user_id = UserId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    let cart_items: Vec<CartItem> = serde_json::from_value(cart_items)
        .map_err(|e| DomainError::storage(format!("Invalid cart data in database: {}", e)))?;

    Ok(User::from_storage(
        user_id,
        name,
        email,
        password_hash,
        str_to_role(&role),
        phone,
        address,
        photo,
        cart_items,
        parse_wishlist(wishlist)?,
        created_at,
        updated_at,
    ))
}

fn cart_to_json(items: &[CartItem]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(items)
        .map_err(|e| DomainError::storage(format!("Failed to serialize cart: {}", e)))
}

fn parse_wishlist(refs: Vec<String>) -> Result<Vec<ProductId>, DomainError> {
    refs.into_iter()
        .map(|r| {
            ProductId::new(r).map_err(|e| {
                DomainError::storage(format!("Invalid product reference in database: {}", e))
            })
        })
        .collect()
}

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::Standard => "standard",
        Role::Admin => "admin",
    }
}

fn str_to_role(s: &str) -> Role {
    match s {
        "admin" => Role::Admin,
        _ => Role::Standard,
    }
}
