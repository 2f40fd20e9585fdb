//! In-memory adapters.
//!
//! Thread-safe `RwLock<HashMap>` implementations of the persistence and
//! directory ports. They back the binary (no database is wired) and the
//! handler tests.

mod assignment_repository;
mod catalog;
mod partner_directory;
mod payment_repository;
mod reservation_repository;
mod webhook_event_log;

pub use assignment_repository::InMemoryAssignmentRepository;
pub use catalog::InMemoryCatalog;
pub use partner_directory::InMemoryPartnerDirectory;
pub use payment_repository::InMemoryPaymentRepository;
pub use reservation_repository::InMemoryReservationRepository;
pub use webhook_event_log::InMemoryWebhookEventLog;

use std::sync::PoisonError;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Converts a lock poison error to a storage error.
fn poison_err<T>(_: PoisonError<T>) -> DomainError {
    DomainError::new(ErrorCode::StorageError, "lock poisoned")
}
