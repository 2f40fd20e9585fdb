//! In-memory partner assignment storage.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::poison_err;
use crate::domain::assignment::PartnerAssignment;
use crate::domain::foundation::{AssignmentId, DomainError, PartnerId, ReservationId};
use crate::ports::AssignmentRepository;

#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<HashMap<AssignmentId, PartnerAssignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn save(&self, assignment: &PartnerAssignment) -> Result<(), DomainError> {
        let mut assignments = self.assignments.write().map_err(poison_err)?;
        assignments.insert(assignment.id, assignment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<PartnerAssignment>, DomainError> {
        let assignments = self.assignments.read().map_err(poison_err)?;
        Ok(assignments.get(id).cloned())
    }

    async fn find_for(
        &self,
        reservation_id: &ReservationId,
        partner_id: &PartnerId,
    ) -> Result<Option<PartnerAssignment>, DomainError> {
        let assignments = self.assignments.read().map_err(poison_err)?;
        Ok(assignments
            .values()
            .find(|a| &a.reservation_id == reservation_id && &a.partner_id == partner_id)
            .cloned())
    }

    async fn list_by_partner(
        &self,
        partner_id: &PartnerId,
    ) -> Result<Vec<PartnerAssignment>, DomainError> {
        let mut listed: Vec<PartnerAssignment> = {
            let assignments = self.assignments.read().map_err(poison_err)?;
            assignments
                .values()
                .filter(|a| &a.partner_id == partner_id)
                .cloned()
                .collect()
        };
        listed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_by_pair() {
        let repo = InMemoryAssignmentRepository::new();
        let reservation = ReservationId::new();
        let partner = PartnerId::new();
        let assignment = PartnerAssignment::issue(reservation, partner);
        repo.save(&assignment).await.unwrap();

        let found = repo.find_for(&reservation, &partner).await.unwrap();
        let other = repo.find_for(&reservation, &PartnerId::new()).await.unwrap();

        assert_eq!(found, Some(assignment));
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn save_replaces_same_id() {
        let repo = InMemoryAssignmentRepository::new();
        let partner = PartnerId::new();
        let mut assignment = PartnerAssignment::issue(ReservationId::new(), partner);
        repo.save(&assignment).await.unwrap();

        assignment.reissue();
        repo.save(&assignment).await.unwrap();

        assert_eq!(repo.list_by_partner(&partner).await.unwrap().len(), 1);
    }
}
