//! Authentication infrastructure module
//!
//! Session token issuing and verification.

mod jwt;

pub use jwt::{Claims, JwtConfig, JwtService, DEFAULT_EXPIRATION_HOURS};
