//! Catalog port.
//!
//! Category and service CRUD lives elsewhere; reservation creation only
//! needs to resolve a service id.

use async_trait::async_trait;

use crate::domain::catalog::ServiceSummary;
use crate::domain::foundation::{CategoryId, DomainError, ServiceId};

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn find_service(&self, id: &ServiceId) -> Result<Option<ServiceSummary>, DomainError>;

    async fn category_exists(&self, id: &CategoryId) -> Result<bool, DomainError>;
}
