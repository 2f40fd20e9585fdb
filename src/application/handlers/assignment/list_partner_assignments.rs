//! ListPartnerAssignmentsHandler - offers made to the calling partner.

use std::sync::Arc;

use crate::domain::assignment::PartnerAssignment;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::WorkflowError;
use crate::ports::{AssignmentRepository, PartnerDirectory};

#[derive(Debug, Clone)]
pub struct ListPartnerAssignmentsQuery {
    pub caller: AuthenticatedUser,
}

pub struct ListPartnerAssignmentsHandler {
    assignments: Arc<dyn AssignmentRepository>,
    partners: Arc<dyn PartnerDirectory>,
}

impl ListPartnerAssignmentsHandler {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        partners: Arc<dyn PartnerDirectory>,
    ) -> Self {
        Self {
            assignments,
            partners,
        }
    }

    #[tracing::instrument(skip(self, query), fields(caller = %query.caller.id))]
    pub async fn handle(
        &self,
        query: ListPartnerAssignmentsQuery,
    ) -> Result<Vec<PartnerAssignment>, WorkflowError> {
        let partner = self
            .partners
            .find_by_user(&query.caller.id)
            .await?
            .ok_or_else(|| WorkflowError::forbidden("Caller is not a registered partner"))?;

        Ok(self.assignments.list_by_partner(&partner.id).await?)
    }
}
