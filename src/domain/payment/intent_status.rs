//! Processor-side status of a payment intent.

use serde::{Deserialize, Serialize};

use super::PaymentStatus;

/// Status reported by the payment processor for an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    Succeeded,
    PaymentFailed,
    Refunded,
}

impl IntentStatus {
    /// The payment status this processor outcome implies.
    pub fn payment_status(&self) -> PaymentStatus {
        match self {
            IntentStatus::RequiresPaymentMethod => PaymentStatus::Pending,
            IntentStatus::Succeeded => PaymentStatus::Paid,
            IntentStatus::PaymentFailed => PaymentStatus::Failed,
            IntentStatus::Refunded => PaymentStatus::Refunded,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::RequiresPaymentMethod => "requires_payment_method",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::PaymentFailed => "payment_failed",
            IntentStatus::Refunded => "refunded",
        }
    }
}
