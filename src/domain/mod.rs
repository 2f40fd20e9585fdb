//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `reservation` - Reservation aggregate and lifecycle rules
//! - `assignment` - Partner assignment negotiation
//! - `payment` - Payment lifecycle and processor callbacks
//! - `catalog` / `partner` - Read models of external records

pub mod assignment;
pub mod catalog;
pub mod foundation;
pub mod partner;
pub mod payment;
pub mod reservation;

mod workflow_error;

pub use workflow_error::{Resource, WorkflowError};
