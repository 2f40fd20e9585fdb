//! Reservation repository port.
//!
//! Writes are versioned: `update` succeeds only if the stored version is
//! exactly one behind the incoming one, so two writers that loaded the same
//! version cannot both win.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReservationId, UserId};
use crate::domain::reservation::Reservation;

/// Repository port for Reservation aggregate persistence.
///
/// Implementations store references in their unresolved form
/// (see [`Reservation::detached`]).
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation.
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Replace a stored reservation.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if it was never saved
    /// - `ConcurrentModification` if the stored version is not
    ///   `reservation.version - 1`
    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// All reservations owned by `client_id`, newest first.
    async fn list_by_client(&self, client_id: &UserId) -> Result<Vec<Reservation>, DomainError>;
}
