//! Payment status state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Intent created, no outcome yet.
    Pending,
    Paid,
    /// Terminal. A new payment record replaces a failed one.
    Failed,
    /// Terminal. Only the processor callback refunds.
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Paid) | (Pending, Failed) | (Paid, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Paid, Failed],
            Paid => vec![Refunded],
            Failed | Refunded => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_resolves_either_way() {
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Paid));
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Failed));
        assert!(!PaymentStatus::Pending.can_transition_to(&PaymentStatus::Refunded));
    }

    #[test]
    fn only_paid_can_be_refunded() {
        assert!(PaymentStatus::Paid.can_transition_to(&PaymentStatus::Refunded));
        assert!(!PaymentStatus::Paid.can_transition_to(&PaymentStatus::Failed));
    }

    #[test]
    fn failed_and_refunded_are_terminal() {
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Refunded.is_terminal());
        assert!(!PaymentStatus::Paid.is_terminal());
    }
}
