//! HTTP routes for payment endpoints.

use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use crate::adapters::http::middleware::webhook_signature_middleware;
use crate::adapters::http::state::AppState;
use crate::domain::payment::WebhookVerifier;

use super::handlers::{confirm_payment, create_intent, payment_webhook};

/// Client payment routes, mounted at `/payments`. Require a bearer token.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-intent", post(create_intent))
        .route("/confirm", post(confirm_payment))
}

/// Processor callback route at `/payments/webhook`, merged at the root.
///
/// Carries no bearer token; the signature middleware authenticates it.
pub fn webhook_routes(verifier: Arc<WebhookVerifier>) -> Router<AppState> {
    Router::new()
        .route("/payments/webhook", post(payment_webhook))
        .route_layer(middleware::from_fn_with_state(
            verifier,
            webhook_signature_middleware,
        ))
}
