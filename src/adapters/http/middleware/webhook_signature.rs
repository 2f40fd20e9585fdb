//! Signature check for processor callbacks.
//!
//! The webhook route carries no bearer credential; instead every request
//! must carry a `Processor-Signature` header that verifies against the raw
//! body. The body is buffered, verified, then handed on unchanged.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::envelope::Envelope;
use crate::domain::payment::{WebhookError, WebhookVerifier};

pub const SIGNATURE_HEADER: &str = "Processor-Signature";

/// Upper bound on a buffered callback body.
const MAX_WEBHOOK_BODY: usize = 64 * 1024;

pub async fn webhook_signature_middleware(
    State(verifier): State<Arc<WebhookVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let signature = match parts
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) => value.to_string(),
        None => return reject(WebhookError::MissingSignature),
    };

    let bytes = match axum::body::to_bytes(body, MAX_WEBHOOK_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => return reject(WebhookError::ParseError(e.to_string())),
    };

    if let Err(e) = verifier.verify(&bytes, &signature) {
        return reject(e);
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn reject(error: WebhookError) -> Response {
    let status = if error.is_authentication_failure() {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::BAD_REQUEST
    };
    tracing::warn!(error = %error, "Rejected processor callback");
    (status, Json(Envelope::failure(error.to_string(), None))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::post, Router};
    use chrono::Utc;
    use tower::ServiceExt;

    const SECRET: &str = "whsec_test_secret";

    async fn echo(body: String) -> String {
        body
    }

    fn app() -> Router {
        let verifier = Arc::new(WebhookVerifier::new(SECRET));
        Router::new()
            .route("/webhook", post(echo))
            .layer(middleware::from_fn_with_state(
                verifier,
                webhook_signature_middleware,
            ))
    }

    async fn send(signature: Option<String>, payload: &str) -> Response {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/webhook");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        app()
            .oneshot(builder.body(Body::from(payload.to_string())).unwrap())
            .await
            .unwrap()
    }

    fn sign(secret: &str, payload: &str) -> String {
        WebhookVerifier::new(secret)
            .sign(Utc::now().timestamp(), payload.as_bytes())
            .unwrap()
    }

    #[tokio::test]
    async fn signed_body_passes_through_intact() {
        let payload = r#"{"type":"payment_intent.succeeded"}"#;

        let response = send(Some(sign(SECRET, payload)), payload).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], payload.as_bytes());
    }

    #[tokio::test]
    async fn missing_or_wrong_signature_is_401() {
        let payload = "{}";

        assert_eq!(send(None, payload).await.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            send(Some(sign("whsec_other", payload)), payload).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn tampered_body_is_401() {
        let signature = sign(SECRET, r#"{"amount":1}"#);

        let response = send(Some(signature), r#"{"amount":1000}"#).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbled_header_is_400() {
        let response = send(Some("t=abc,v1=00".to_string()), "{}").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
