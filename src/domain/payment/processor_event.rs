//! Processor callback payloads.
//!
//! Only the fields the workflow reads are captured; the rest of the
//! processor's event schema is ignored.

use serde::{Deserialize, Serialize};

use super::PaymentStatus;

/// Processor webhook event (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessorEvent {
    /// Delivery identifier, used to drop redeliveries.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub data: ProcessorEventData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProcessorEventData {
    #[serde(default)]
    pub object: ProcessorObject,
}

/// The intent the event is about.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProcessorObject {
    #[serde(default)]
    pub id: Option<String>,
}

impl ProcessorEvent {
    /// Intent identifier, if present and non-blank.
    pub fn intent_id(&self) -> Option<&str> {
        self.data
            .object
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// Processor event types the workflow acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorEventType {
    IntentSucceeded,
    IntentPaymentFailed,
    IntentCanceled,
    ChargeRefunded,
}

impl ProcessorEventType {
    /// Parses a known event type; anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "payment_intent.succeeded" => Some(Self::IntentSucceeded),
            "payment_intent.payment_failed" => Some(Self::IntentPaymentFailed),
            "payment_intent.canceled" => Some(Self::IntentCanceled),
            "charge.refunded" => Some(Self::ChargeRefunded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntentSucceeded => "payment_intent.succeeded",
            Self::IntentPaymentFailed => "payment_intent.payment_failed",
            Self::IntentCanceled => "payment_intent.canceled",
            Self::ChargeRefunded => "charge.refunded",
        }
    }

    /// Payment status this event drives the payment to.
    pub fn target_status(&self) -> PaymentStatus {
        match self {
            Self::IntentSucceeded => PaymentStatus::Paid,
            Self::IntentPaymentFailed | Self::IntentCanceled => PaymentStatus::Failed,
            Self::ChargeRefunded => PaymentStatus::Refunded,
        }
    }
}
