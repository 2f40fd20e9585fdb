//! Partner assignment repository port.

use async_trait::async_trait;

use crate::domain::assignment::PartnerAssignment;
use crate::domain::foundation::{AssignmentId, DomainError, PartnerId, ReservationId};

/// Persistence for partner assignment records.
///
/// At most one record exists per (reservation, partner) pair; callers look
/// it up with [`find_for`](AssignmentRepository::find_for) before issuing.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Insert or replace by assignment id.
    async fn save(&self, assignment: &PartnerAssignment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AssignmentId)
        -> Result<Option<PartnerAssignment>, DomainError>;

    /// The record for this reservation/partner pair, if one was ever issued.
    async fn find_for(
        &self,
        reservation_id: &ReservationId,
        partner_id: &PartnerId,
    ) -> Result<Option<PartnerAssignment>, DomainError>;

    /// Every record ever issued to `partner_id`, newest first.
    async fn list_by_partner(
        &self,
        partner_id: &PartnerId,
    ) -> Result<Vec<PartnerAssignment>, DomainError>;
}
