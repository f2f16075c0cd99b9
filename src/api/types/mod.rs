//! Request/response types shared across endpoint modules

pub mod error;
pub mod json;
pub mod response;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use response::MessageResponse;
