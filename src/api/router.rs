//! API router assembly
//!
//! Wires resource routers, health probes, and the middleware stack into a
//! single service. Cross-cutting layers apply to everything including the
//! probes; session extraction happens per-handler through the extractors.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::CorsConfig;

use super::{
    admin::create_admin_router,
    cart::create_cart_router,
    health::{health_check, live_check, ready_check},
    middleware::{
        logging_middleware, metrics_middleware, security_headers_middleware, MAX_BODY_SIZE,
    },
    state::AppState,
    users::create_users_router,
    wishlist::create_wishlist_router,
};

/// Create a minimal router with just the liveness probes.
///
/// Useful for smoke tests and for serving before state is ready.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/live", get(live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full application router with all routes and middleware
pub fn create_router_with_state(state: AppState, cors: &CorsConfig) -> Router {
    let api = Router::new()
        .nest("/users", create_users_router())
        .nest("/cart", create_cart_router())
        .nest("/wishlist", create_wishlist_router())
        .nest("/admin", create_admin_router());

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/live", get(live_check))
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(cors))
}

/// Build the CORS layer from configured origins.
///
/// Credentials are allowed because the session rides in a cookie, which
/// rules out wildcard origins; unparseable entries are skipped with a
/// warning rather than failing startup.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_live_endpoint() {
        let app = create_router();

        let response = app
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        let config = CorsConfig {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "not a header value\u{0}".to_string(),
            ],
        };

        // Only verifies construction does not panic on bad input.
        let _layer = build_cors_layer(&config);
    }
}
