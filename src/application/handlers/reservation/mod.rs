//! Reservation handlers.
//!
//! ## Commands
//! - Creating a reservation (client)
//! - Changing status (admin or assigned partner)
//! - Assigning a partner (admin)
//!
//! ## Queries
//! - Get one reservation
//! - List the caller's reservations

mod assign_partner;
mod create_reservation;
mod get_reservation;
mod list_my_reservations;
mod update_reservation_status;

// Commands
pub use assign_partner::{AssignPartnerCommand, AssignPartnerHandler, AssignPartnerResult};
pub use create_reservation::{
    CreateReservationCommand, CreateReservationHandler, CreateReservationResult,
};
pub use update_reservation_status::{
    UpdateReservationStatusCommand, UpdateReservationStatusHandler,
};

// Queries
pub use get_reservation::{GetReservationHandler, GetReservationQuery};
pub use list_my_reservations::{ListMyReservationsHandler, ListMyReservationsQuery};
