//! Session authentication middleware
//!
//! Browser clients carry the token in the session cookie; non-browser clients
//! may send `Authorization: Bearer <token>` instead. The cookie wins when both
//! are present.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::api::session;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;
use crate::domain::DomainError;

/// Extractor that admits only requests carrying a valid session token
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Not authorized, please login"))?;

        let user_id = state
            .jwt_service
            .verify(&token)
            .ok_or_else(|| ApiError::unauthorized("Not authorized, please login"))?;

        debug!(user_id = %user_id, "Session token verified");

        let user = match state.user_service.get_profile(&user_id).await {
            Ok(user) => user,
            // Token for a deleted account: authentication fails, not lookup
            Err(DomainError::NotFound { .. }) => {
                return Err(ApiError::unauthorized("Not authorized, please login"));
            }
            Err(other) => return Err(other.into()),
        };

        Ok(RequireUser(user))
    }
}

/// Pull the session token from the cookie, falling back to a bearer header
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(token) = session::token_from_jar(&jar) {
        return Some(token.to_string());
    }

    bearer_token(headers)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}
