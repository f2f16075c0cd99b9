//! Admin authorization middleware
//!
//! Authentication is delegated to [`RequireUser`]; on top of that the
//! account must hold the admin role. An unauthenticated request fails with
//! 401 before the role is ever considered; an authenticated non-admin gets
//! 403.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

use super::user_auth::RequireUser;

/// Extractor that requires an authenticated admin account
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            debug!(user_id = %user.id(), "Admin access denied");
            return Err(ApiError::forbidden("Admin access required"));
        }

        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::user::{Role, User, UserId};

    #[test]
    fn test_role_gates_admin_access() {
        let mut user = User::new(UserId::generate(), "Ops", "ops@x.com", "hash");
        assert!(!user.is_admin());

        user.set_role(Role::Admin);
        assert!(user.is_admin());
    }
}
