//! Account and profile endpoints
//!
//! Register and login attach the session cookie; logout detaches it. Profile
//! reads and updates sit behind [`RequireUser`].

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::RequireUser;
use crate::api::session;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse};
use crate::domain::user::{Role, User};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_auth_attempt;
use crate::infrastructure::user::{RegisterRequest, UpdateProfileRequest};

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/login-status", get(login_status))
        .route("/me", get(get_profile).patch(update_profile))
        .route("/me/photo", patch(update_photo))
}

/// Registration request body.
///
/// Fields default to empty strings so that missing fields reach validation
/// instead of failing JSON deserialization with a different error shape.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile update request body
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Photo update request body
#[derive(Debug, Deserialize)]
pub struct UpdatePhotoBody {
    pub photo: String,
}

/// Registration response: account essentials plus the token itself
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

/// Profile fields returned by the update endpoints
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub address: Option<String>,
}

impl ProfileResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            phone: user.phone().map(String::from),
            photo: user.photo().map(String::from),
            address: user.address().map(String::from),
        }
    }
}

/// Register a new account
///
/// POST /api/users/register
///
/// Returns 201 with a fresh session token, also attached as a cookie.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, CookieJar, Json<RegisterResponse>), ApiError> {
    let request = RegisterRequest {
        name: body.name,
        email: body.email,
        password: body.password,
    };

    let user = match state.user_service.register(request).await {
        Ok(user) => user,
        Err(err) => {
            record_auth_attempt("register", false);
            return Err(err.into());
        }
    };

    let token = state.jwt_service.issue(user.id())?;
    record_auth_attempt("register", true);
    info!(user_id = %user.id(), "Account registered");

    let jar = jar.add(session::session_cookie(
        token.clone(),
        state.jwt_service.expiration_hours(),
        state.cookie_secure,
    ));

    let response = RegisterResponse {
        id: user.id().to_string(),
        name: user.name().to_string(),
        email: user.email().to_string(),
        role: user.role(),
        token,
    };

    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// Login with email and password
///
/// POST /api/users/login
///
/// Returns the full profile and attaches the session cookie. Every failure
/// mode reads as 400 at this endpoint.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<User>), ApiError> {
    let user = match state
        .user_service
        .authenticate(&body.email, &body.password)
        .await
    {
        Ok(user) => user,
        Err(err) => {
            record_auth_attempt("login", false);
            return Err(login_error(err));
        }
    };

    let token = state.jwt_service.issue(user.id())?;
    record_auth_attempt("login", true);
    info!(user_id = %user.id(), "User logged in");

    let jar = jar.add(session::session_cookie(
        token,
        state.jwt_service.expiration_hours(),
        state.cookie_secure,
    ));

    Ok((jar, Json(user)))
}

/// Collapse the login failure taxonomy to a single status
fn login_error(err: DomainError) -> ApiError {
    match err {
        DomainError::Validation { message }
        | DomainError::NotFound { message }
        | DomainError::Auth { message } => ApiError::bad_request(message),
        other => other.into(),
    }
}

/// Detach the session cookie
///
/// GET /api/users/logout
///
/// Only the carrier is cleared; an already-issued token stays valid until
/// its own expiry.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(session::expired_session_cookie(state.cookie_secure));

    (jar, Json(MessageResponse::new("Successfully Logged Out")))
}

/// Report whether the request carries a valid session cookie
///
/// GET /api/users/login-status
///
/// Always 200: `true` or `false`, never an error status.
pub async fn login_status(State(state): State<AppState>, jar: CookieJar) -> Json<bool> {
    let logged_in = session::token_from_jar(&jar)
        .and_then(|token| state.jwt_service.verify(token))
        .is_some();

    Json(logged_in)
}

/// Fetch the authenticated user's profile
///
/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<User>, ApiError> {
    // A record deleted between gate and handler reads as a client error
    // here, not a missing resource
    let profile = match state.user_service.get_profile(user.id()).await {
        Ok(profile) => profile,
        Err(DomainError::NotFound { message }) => return Err(ApiError::bad_request(message)),
        Err(other) => return Err(other.into()),
    };

    Ok(Json(profile))
}

/// Update profile fields
///
/// PATCH /api/users/me
///
/// Absent and empty fields keep their stored values.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let request = UpdateProfileRequest {
        name: body.name,
        phone: body.phone,
        address: body.address,
    };

    let updated = state
        .user_service
        .update_profile(user.id(), request)
        .await?;

    Ok(Json(ProfileResponse::from_user(&updated)))
}

/// Overwrite the profile photo
///
/// PATCH /api/users/me/photo
pub async fn update_photo(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<UpdatePhotoBody>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let updated = state
        .user_service
        .update_photo(user.id(), body.photo)
        .await?;

    Ok(Json(ProfileResponse::from_user(&updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_register_response_serialization() {
        let response = RegisterResponse {
            id: "u-1".to_string(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            role: Role::Standard,
            token: "jwt".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["role"], "standard");
        assert_eq!(json["token"], "jwt");
    }

    #[test]
    fn test_profile_response_from_user() {
        let mut user = User::new(UserId::generate(), "Alice", "a@x.com", "hash");
        user.set_phone("+1 555 0100");

        let response = ProfileResponse::from_user(&user);

        assert_eq!(response.name, "Alice");
        assert_eq!(response.phone.as_deref(), Some("+1 555 0100"));
        assert!(response.address.is_none());
    }

    #[test]
    fn test_login_error_collapses_to_bad_request() {
        use axum::http::StatusCode;

        let cases = [
            DomainError::validation("Please add email and password"),
            DomainError::not_found("User not found, please signup"),
            DomainError::auth("Invalid email or password"),
        ];

        for err in cases {
            assert_eq!(login_error(err).status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_login_error_keeps_internal_errors_opaque() {
        use axum::http::StatusCode;

        let err = login_error(DomainError::storage("pool timed out"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response.error.message, "Internal server error");
    }

    #[test]
    fn test_register_body_defaults_missing_fields() {
        let body: RegisterBody = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();

        assert_eq!(body.email, "a@x.com");
        assert!(body.name.is_empty());
        assert!(body.password.is_empty());
    }
}
