//! Assignment handlers.

mod list_partner_assignments;
mod respond_to_assignment;

pub use list_partner_assignments::{ListPartnerAssignmentsHandler, ListPartnerAssignmentsQuery};
pub use respond_to_assignment::{
    RespondToAssignmentCommand, RespondToAssignmentHandler, RespondToAssignmentResult,
};
