//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, CatalogConfig, CorsConfig, LogFormat, LoggingConfig, ServerConfig,
    StorageBackend, StorageConfig,
};
