//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the small traits
//! (state machines, ownership, references) the workflow aggregates build on.

mod auth;
mod errors;
mod events;
mod ids;
mod ownership;
mod reference;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, SerializableDomainEvent};
pub use ids::{AssignmentId, CategoryId, PartnerId, PaymentId, ReservationId, ServiceId, UserId};
pub use ownership::OwnedByUser;
pub use reference::{Identified, Reference};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
