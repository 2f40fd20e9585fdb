//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{IntentStatus, Payment, PaymentStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIntentRequest {
    pub reservation_id: String,
    /// Major units, e.g. `49.95`.
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmRequest {
    pub intent_id: String,
    #[serde(default = "default_simulate_success")]
    pub simulate_success: bool,
}

fn default_simulate_success() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub reservation_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub intent_id: String,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id.to_string(),
            reservation_id: p.reservation_id.to_string(),
            amount_minor: p.amount_minor,
            currency: p.currency,
            intent_id: p.intent_id,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateIntentResponse {
    pub client_secret: String,
    pub intent_id: String,
    pub payment: PaymentResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmResponse {
    pub payment: PaymentResponse,
    pub intent_status: IntentStatus,
    pub reservation_promoted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    pub outcome: &'static str,
}
