//! HTTP handlers for payment endpoints.

use axum::{body::Bytes, extract::State, response::Response};

use crate::adapters::http::envelope::{created, ok, parse_id, ApiError, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::payment::{
    ConfirmPaymentCommand, CreatePaymentIntentCommand, HandlePaymentWebhookCommand,
};
use crate::domain::foundation::ReservationId;
use crate::domain::payment::ProcessorEvent;
use crate::domain::WorkflowError;

use super::dto::{
    ConfirmRequest, ConfirmResponse, CreateIntentRequest, CreateIntentResponse, WebhookAck,
};

/// POST /payments/create-intent
pub async fn create_intent(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<CreateIntentRequest>,
) -> Result<Response, ApiError> {
    let cmd = CreatePaymentIntentCommand {
        caller: user,
        reservation_id: parse_id::<ReservationId>("reservation_id", &req.reservation_id)?,
        amount: req.amount,
    };

    let result = state.create_intent_handler().handle(cmd).await?;
    Ok(created(
        "Payment intent created",
        CreateIntentResponse {
            client_secret: result.client_secret,
            intent_id: result.intent_id,
            payment: result.payment.into(),
        },
    ))
}

/// POST /payments/confirm
pub async fn confirm_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<ConfirmRequest>,
) -> Result<Response, ApiError> {
    let cmd = ConfirmPaymentCommand {
        caller: user,
        intent_id: req.intent_id,
        simulate_success: req.simulate_success,
    };

    let result = state.confirm_payment_handler().handle(cmd).await?;
    Ok(ok(
        "Payment confirmed",
        ConfirmResponse {
            payment: result.payment.into(),
            intent_status: result.intent_status,
            reservation_promoted: result.reservation_promoted,
        },
    ))
}

/// POST /payments/webhook
///
/// Reached only through the signature middleware, so `body` is authentic.
pub async fn payment_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let event: ProcessorEvent = serde_json::from_slice(&body)
        .map_err(|e| WorkflowError::validation("body", format!("Invalid event payload: {}", e)))?;

    let cmd = HandlePaymentWebhookCommand {
        intent_id: event.intent_id().map(str::to_string),
        event_id: event.id,
        event_type: event.event_type,
    };

    let outcome = state.webhook_handler().handle(cmd).await?;
    Ok(ok(
        "Webhook processed",
        WebhookAck {
            received: true,
            outcome: outcome.as_str(),
        },
    ))
}
