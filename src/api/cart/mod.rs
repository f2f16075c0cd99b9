//! Cart endpoints

use axum::{extract::State, routing::patch, Router};
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse};
use crate::domain::user::CartItem;

/// Create the cart router
pub fn create_cart_router() -> Router<AppState> {
    Router::new().route("/", patch(save_cart).get(get_cart))
}

/// Cart save request body
#[derive(Debug, Deserialize)]
pub struct SaveCartBody {
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
}

/// Replace the stored cart with the submitted lines
///
/// PATCH /api/cart
///
/// Wholesale replacement: no merging with previous contents, an empty list
/// clears the cart.
pub async fn save_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<SaveCartBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .cart_service
        .replace_cart(user.id(), body.cart_items)
        .await?;

    Ok(Json(MessageResponse::new("Cart Saved")))
}

/// Fetch the stored cart lines
///
/// GET /api/cart
pub async fn get_cart(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let items = state.cart_service.get_cart(user.id()).await?;

    Ok(Json(items))
}
