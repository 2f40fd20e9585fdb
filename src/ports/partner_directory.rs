//! Partner directory port.
//!
//! Partners are onboarded and verified outside this service. The workflow
//! needs to find them by id (assignment) and by the user identity behind
//! them (authorization).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PartnerId, UserId};
use crate::domain::partner::Partner;

#[async_trait]
pub trait PartnerDirectory: Send + Sync {
    async fn find_by_id(&self, id: &PartnerId) -> Result<Option<Partner>, DomainError>;

    /// The partner record backed by `user_id`, if the user is a partner.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Partner>, DomainError>;
}
