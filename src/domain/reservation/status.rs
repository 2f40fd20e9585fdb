//! Reservation status state machine.
//!
//! The lifecycle is deliberately permissive: operators and partners may move
//! a live reservation to any status, including back to an earlier one.
//! `Cancelled` is the only terminal state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Created by the client, nothing confirmed yet.
    #[serde(rename = "new")]
    New,

    /// A partner accepted or a payment went through.
    #[serde(rename = "confirmed")]
    Confirmed,

    /// Work has started on site.
    #[serde(rename = "in-progress")]
    InProgress,

    #[serde(rename = "completed")]
    Completed,

    /// Terminal. Nothing moves a cancelled reservation.
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::New,
        ReservationStatus::Confirmed,
        ReservationStatus::InProgress,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::New => "new",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::InProgress => "in-progress",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a partner may still be assigned in this status.
    pub fn accepts_assignment(&self) -> bool {
        !matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "status",
                    format!(
                        "'{}' is not one of new, confirmed, in-progress, completed, cancelled",
                        s
                    ),
                )
            })
    }
}

impl StateMachine for ReservationStatus {
    fn can_transition_to(&self, _target: &Self) -> bool {
        *self != ReservationStatus::Cancelled
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ReservationStatus::Cancelled => vec![],
            _ => ReservationStatus::ALL.to_vec(),
        }
    }
}
