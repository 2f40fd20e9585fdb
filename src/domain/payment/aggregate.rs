//! Payment record.
//!
//! A payment belongs to one reservation and tracks one processor intent.
//! A failed payment is never revived; the reservation gets a fresh record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    PaymentId, ReservationId, StateMachine, Timestamp, ValidationError,
};

use super::PaymentStatus;

/// Upper bound on a single payment, in major units.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Converts a major-unit amount (e.g. `49.95`) to integer minor units.
///
/// # Errors
///
/// Rejects non-finite, zero, negative and oversized amounts.
pub fn to_minor_units(amount: f64) -> Result<i64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::invalid_format(
            "amount",
            "must be a finite number",
        ));
    }
    let minor = (amount * 100.0).round();
    if minor < 1.0 || amount > MAX_AMOUNT {
        return Err(ValidationError::out_of_range(
            "amount",
            1,
            (MAX_AMOUNT * 100.0) as i64,
            minor as i64,
        ));
    }
    Ok(minor as i64)
}

/// Result of applying a processor outcome to a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Changed { from: PaymentStatus },
    /// Payment already had that status; nothing was written.
    Unchanged,
}

/// A payment for one reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub reservation_id: ReservationId,
    pub amount_minor: i64,
    pub currency: String,
    /// Processor intent this payment tracks.
    pub intent_id: String,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Opens a pending payment for a freshly created intent.
    pub fn open(
        reservation_id: ReservationId,
        amount_minor: i64,
        currency: impl Into<String>,
        intent_id: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: PaymentId::new(),
            reservation_id,
            amount_minor,
            currency: currency.into(),
            intent_id: intent_id.into(),
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the reservation may open a new payment in place of this one.
    pub fn is_replaceable(&self) -> bool {
        self.status == PaymentStatus::Failed
    }

    /// Moves to `target`. Applying the current status again is a no-op.
    pub fn apply_status(&mut self, target: PaymentStatus) -> Result<StatusChange, ValidationError> {
        if self.status == target {
            return Ok(StatusChange::Unchanged);
        }
        let from = self.status;
        self.status = self.status.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(StatusChange::Changed { from })
    }
}
