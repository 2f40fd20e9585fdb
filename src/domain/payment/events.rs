//! Payment domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, PaymentId, ReservationId, Timestamp};

use super::PaymentStatus;

/// Channel through which a payment outcome arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSource {
    /// Client-driven confirmation call.
    Confirmation,
    /// Processor callback.
    Webhook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentEvent {
    Created {
        event_id: EventId,
        payment_id: PaymentId,
        reservation_id: ReservationId,
        amount_minor: i64,
        currency: String,
        occurred_at: Timestamp,
    },

    StatusChanged {
        event_id: EventId,
        payment_id: PaymentId,
        reservation_id: ReservationId,
        from: PaymentStatus,
        to: PaymentStatus,
        source: OutcomeSource,
        occurred_at: Timestamp,
    },
}

crate::domain_event_enum!(
    PaymentEvent,
    aggregate_type = "Payment",
    aggregate_id = payment_id,
    {
        Created => "payment.created.v1",
        StatusChanged => "payment.status_changed.v1",
    }
);
