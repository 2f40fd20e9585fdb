//! Partner assignment negotiation.
//!
//! An operator offers a reservation to a partner; the partner accepts or
//! declines. The answer is mirrored onto the reservation.

mod aggregate;
mod events;
mod status;

pub use aggregate::{AssignmentResponse, PartnerAssignment};
pub use events::AssignmentEvent;
pub use status::AssignmentStatus;
