//! Partner assignment negotiation status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a partner stands on an assignment offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Offer made by the operator, awaiting the partner.
    Sent,
    Accepted,
    Declined,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Sent => "sent",
            AssignmentStatus::Accepted => "accepted",
            AssignmentStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for AssignmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AssignmentStatus::*;
        matches!((self, target), (Sent, Accepted) | (Sent, Declined))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AssignmentStatus::*;
        match self {
            Sent => vec![Accepted, Declined],
            Accepted | Declined => vec![],
        }
    }
}
