//! In-memory reservation storage with version checks.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::poison_err;
use crate::domain::foundation::{DomainError, ErrorCode, ReservationId, UserId};
use crate::domain::reservation::Reservation;
use crate::ports::ReservationRepository;

#[derive(Debug, Default)]
pub struct InMemoryReservationRepository {
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.write().map_err(poison_err)?;
        if reservations.contains_key(&reservation.id) {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Reservation {} already exists", reservation.id),
            ));
        }
        reservations.insert(reservation.id, reservation.detached());
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.write().map_err(poison_err)?;
        let Some(stored) = reservations.get_mut(&reservation.id) else {
            return Err(
                DomainError::new(ErrorCode::ReservationNotFound, "Reservation not found")
                    .with_detail("id", reservation.id.to_string()),
            );
        };

        if stored.version + 1 != reservation.version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Reservation {} was modified concurrently (stored version {}, write based on {})",
                    reservation.id,
                    stored.version,
                    reservation.version.saturating_sub(1)
                ),
            ));
        }

        *stored = reservation.detached();
        Ok(())
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let reservations = self.reservations.read().map_err(poison_err)?;
        Ok(reservations.get(id).cloned())
    }

    async fn list_by_client(&self, client_id: &UserId) -> Result<Vec<Reservation>, DomainError> {
        let mut owned: Vec<Reservation> = {
            let reservations = self.reservations.read().map_err(poison_err)?;
            reservations
                .values()
                .filter(|r| &r.client_id == client_id)
                .cloned()
                .collect()
        };
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
