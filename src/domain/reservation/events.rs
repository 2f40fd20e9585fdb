//! Reservation domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    EventId, PartnerId, PaymentId, ReservationId, ServiceId, Timestamp, UserId,
};

use super::ReservationStatus;

/// What moved a reservation to a new status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusChangeCause {
    /// Admin or assigned partner set the status directly.
    Manual,
    PartnerAccepted,
    PaymentSucceeded,
}

/// Events emitted over a reservation's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReservationEvent {
    Created {
        event_id: EventId,
        reservation_id: ReservationId,
        client_id: UserId,
        service_id: ServiceId,
        occurred_at: Timestamp,
    },

    StatusChanged {
        event_id: EventId,
        reservation_id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
        cause: StatusChangeCause,
        occurred_at: Timestamp,
    },

    PartnerAssigned {
        event_id: EventId,
        reservation_id: ReservationId,
        partner_id: PartnerId,
        occurred_at: Timestamp,
    },

    PaymentLinked {
        event_id: EventId,
        reservation_id: ReservationId,
        payment_id: PaymentId,
        occurred_at: Timestamp,
    },
}

impl ReservationEvent {
    pub fn status_changed(
        reservation_id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
        cause: StatusChangeCause,
    ) -> Self {
        ReservationEvent::StatusChanged {
            event_id: EventId::new(),
            reservation_id,
            from,
            to,
            cause,
            occurred_at: Timestamp::now(),
        }
    }
}

crate::domain_event_enum!(
    ReservationEvent,
    aggregate_type = "Reservation",
    aggregate_id = reservation_id,
    {
        Created => "reservation.created.v1",
        StatusChanged => "reservation.status_changed.v1",
        PartnerAssigned => "reservation.partner_assigned.v1",
        PaymentLinked => "reservation.payment_linked.v1",
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn status_change_envelope_names_both_ends() {
        let id = ReservationId::new();
        let event = ReservationEvent::status_changed(
            id,
            ReservationStatus::New,
            ReservationStatus::Confirmed,
            StatusChangeCause::PaymentSucceeded,
        );

        let envelope = event.to_envelope();

        assert_eq!(event.aggregate_id(), id.to_string());
        assert_eq!(envelope.event_type, "reservation.status_changed.v1");
        assert_eq!(envelope.payload["from"], "new");
        assert_eq!(envelope.payload["to"], "confirmed");
        assert_eq!(envelope.payload["cause"], "payment_succeeded");
    }
}
