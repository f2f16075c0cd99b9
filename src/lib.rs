//! Storefront Identity Service
//!
//! Account, session, cart, and wishlist backend for a storefront with
//! support for:
//! - Credential registration and login with Argon2 password hashing
//! - Cookie-carried JWT sessions with a bearer-token fallback
//! - Wholesale cart replacement and idempotent wishlists
//! - In-memory or PostgreSQL persistence selected at startup

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::StorageBackend;
use domain::{ProductCatalog, Role, User, UserId, UserRepository};
use infrastructure::{
    auth::{JwtConfig, JwtService},
    product::{InMemoryProductCatalog, PostgresProductCatalog},
    user::{
        Argon2Hasher, CartService, InMemoryUserRepository, PasswordHasher,
        PostgresUserRepository, UserService, WishlistService,
    },
};
use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt_service = create_jwt_service(config);

    info!("Storage backend: {:?}", config.storage.backend);

    match config.storage.backend {
        StorageBackend::Memory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            let catalog = Arc::new(create_memory_catalog(config)?);

            assemble_state(repository, catalog, jwt_service, config).await
        }
        StorageBackend::Postgres => {
            let database_url = config
                .storage
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Postgres backend selected but no database URL configured. \
                        Set storage.database_url or the DATABASE_URL environment variable."
                    )
                })?;

            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let repository = Arc::new(PostgresUserRepository::new(pool.clone()));
            repository.ensure_table().await?;
            let catalog = Arc::new(PostgresProductCatalog::new(pool));

            assemble_state(repository, catalog, jwt_service, config).await
        }
    }
}

/// Wire the services over a chosen repository and catalog pair
async fn assemble_state<R, C>(
    repository: Arc<R>,
    catalog: Arc<C>,
    jwt_service: Arc<JwtService>,
    config: &AppConfig,
) -> anyhow::Result<AppState>
where
    R: UserRepository + 'static,
    C: ProductCatalog + 'static,
{
    let hasher = Arc::new(Argon2Hasher::new());

    create_initial_admin_user(repository.as_ref(), hasher.as_ref()).await?;

    let user_service = Arc::new(UserService::new(repository.clone(), hasher));
    let cart_service = Arc::new(CartService::new(repository.clone()));
    let wishlist_service = Arc::new(WishlistService::new(repository, catalog));

    Ok(AppState::new(
        user_service,
        cart_service,
        wishlist_service,
        jwt_service,
        config.auth.cookie_secure,
    ))
}

/// Build the product catalog for the in-memory backend, seeding it from a
/// TOML file when one is configured
fn create_memory_catalog(config: &AppConfig) -> anyhow::Result<InMemoryProductCatalog> {
    match &config.catalog.seed_path {
        Some(path) => {
            let catalog = InMemoryProductCatalog::from_toml_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load catalog seed from {}: {}", path, e))?;
            info!("Loaded {} products from {}", catalog.len(), path);
            Ok(catalog)
        }
        None => Ok(InMemoryProductCatalog::new()),
    }
}

/// Create the JWT service from the configured secret (config, env var, or random)
fn create_jwt_service(config: &AppConfig) -> Arc<JwtService> {
    let jwt_secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "No auth.jwt_secret or JWT_SECRET configured. Generating random secret. \
                Sessions will NOT survive restarts. \
                Set the JWT_SECRET environment variable for persistent sessions."
            );
            generate_random_secret()
        });

    Arc::new(JwtService::new(JwtConfig::new(
        jwt_secret,
        u64::from(config.auth.jwt_expiration_hours),
    )))
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Generate a random password for the initial admin user
fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Create an initial admin user if no users exist
async fn create_initial_admin_user<R, H>(repository: &R, hasher: &H) -> anyhow::Result<()>
where
    R: UserRepository,
    H: PasswordHasher,
{
    // Check if any users exist
    if repository.count().await? > 0 {
        return Ok(());
    }

    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@storefront.local".to_string());

    // Use ADMIN_DEFAULT_PASSWORD env var if set, otherwise generate random password
    let (password, is_default) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_random_password(), false),
    };

    let password_hash = hasher.hash(&password)?;
    let mut admin = User::new(UserId::generate(), "Admin", email.clone(), password_hash);
    admin.set_role(Role::Admin);

    repository.create(admin).await?;

    info!("===========================================");
    info!("Initial admin user created!");
    info!("Email: {}", email);

    if is_default {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}
