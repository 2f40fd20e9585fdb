//! Payment handlers.
//!
//! Two channels report processor outcomes: the client's confirmation call
//! and the processor's signed callback. Both end in the same settlement.

mod confirm_payment;
mod create_payment_intent;
mod handle_payment_webhook;
mod settlement;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};
