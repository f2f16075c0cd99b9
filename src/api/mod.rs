//! HTTP API layer
//!
//! Resource routers under `/api`, health probes at the root, and the
//! session/extractor machinery the protected routes share.

pub mod admin;
pub mod cart;
pub mod health;
pub mod middleware;
pub mod router;
pub mod session;
pub mod state;
pub mod types;
pub mod users;
pub mod wishlist;

pub use middleware::{RequireAdmin, RequireUser};
pub use router::{create_router, create_router_with_state};
pub use state::AppState;
