//! Admin endpoints
//!
//! Catalog and order administration live in other services; this surface
//! only exposes the account listing.

use axum::{extract::State, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{Role, User};

/// Create the admin router
pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// Per-account summary row for the admin listing
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserSummary {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            created_at: user.created_at(),
        }
    }
}

/// List all accounts
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.user_service.list().await?;
    let summaries = users.iter().map(UserSummary::from_user).collect();

    Ok(Json(summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_summary_carries_no_credential_material() {
        let user = User::new(UserId::generate(), "Alice", "a@x.com", "argon2-hash");
        let summary = UserSummary::from_user(&user);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(json.contains(r#""role":"standard""#));
        assert!(!json.contains("argon2-hash"));
    }
}
