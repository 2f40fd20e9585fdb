//! HTTP adapter for payment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConfirmRequest, ConfirmResponse, CreateIntentRequest, CreateIntentResponse, PaymentResponse,
    WebhookAck,
};
pub use routes::{payment_routes, webhook_routes};
