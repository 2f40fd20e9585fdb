//! Reservation aggregate and lifecycle.

mod aggregate;
mod events;
mod status;

pub use aggregate::{CurrentAssignment, Reservation, ReservationDetails};
pub use events::{ReservationEvent, StatusChangeCause};
pub use status::ReservationStatus;
