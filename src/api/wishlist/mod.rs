//! Wishlist endpoints

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Router,
};
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse};
use crate::domain::product::{Product, ProductId};

/// Create the wishlist router
pub fn create_wishlist_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wishlist).post(add_to_wishlist))
        .route("/{product_id}", put(remove_from_wishlist))
}

/// Wishlist add request body
#[derive(Debug, Deserialize)]
pub struct AddToWishlistBody {
    pub product_id: ProductId,
}

/// Add a product reference to the wishlist
///
/// POST /api/wishlist
///
/// Adding a reference that is already present is a no-op with the same
/// response.
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<AddToWishlistBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.wishlist_service.add(user.id(), body.product_id).await?;

    Ok(Json(MessageResponse::new("Product added to wishlist")))
}

/// Remove a product reference from the wishlist
///
/// PUT /api/wishlist/{product_id}
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<ProductId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .wishlist_service
        .remove(user.id(), product_id)
        .await?;

    Ok(Json(MessageResponse::new("Product removed from wishlist")))
}

/// Fetch the wishlist resolved against the catalog
///
/// GET /api/wishlist
///
/// References the catalog no longer knows are silently dropped from the
/// result.
pub async fn get_wishlist(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.wishlist_service.resolved(user.id()).await?;

    Ok(Json(products))
}
