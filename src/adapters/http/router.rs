//! Top-level router: mounts every resource and the cross-cutting layers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::domain::payment::WebhookVerifier;

use super::assignment::assignment_routes;
use super::envelope::{ok, Envelope};
use super::middleware::{auth_middleware, AuthState};
use super::payment::{payment_routes, webhook_routes};
use super::reservation::reservation_routes;
use super::state::AppState;

/// Transport settings for [`app_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Allowed browser origins. Empty disables CORS; `["*"]` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full HTTP surface.
///
/// Bearer-authenticated resources:
/// - `/reservations/...`
/// - `/partners/assignments/...`
/// - `/payments/create-intent`, `/payments/confirm`
///
/// Unauthenticated:
/// - `/health`
/// - `/payments/webhook` (signature-checked instead)
pub fn app_router(
    state: AppState,
    auth: AuthState,
    verifier: Arc<WebhookVerifier>,
    options: RouterOptions,
) -> Router {
    let authenticated = Router::new()
        .nest("/reservations", reservation_routes())
        .nest("/partners", assignment_routes())
        .nest("/payments", payment_routes())
        .route_layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .merge(authenticated)
        .merge(webhook_routes(verifier))
        .fallback(not_found)
        .layer(build_cors_layer(&options.cors_origins))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Response {
    ok(
        "Service healthy",
        Health {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure("Route not found", None)),
    )
        .into_response()
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("processor-signature"),
        ])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return cors;
    }
    if origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!(origin = %origin, "Invalid CORS origin; skipping");
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}
