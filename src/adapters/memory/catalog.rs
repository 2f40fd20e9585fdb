//! In-memory catalog read model.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use super::poison_err;
use crate::domain::catalog::ServiceSummary;
use crate::domain::foundation::{CategoryId, DomainError, ServiceId};
use crate::ports::Catalog;

/// Catalog seeded at startup.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    services: RwLock<HashMap<ServiceId, ServiceSummary>>,
    categories: RwLock<HashSet<CategoryId>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service, registering its category as well.
    pub fn with_service(self, service: ServiceSummary) -> Result<Self, DomainError> {
        self.categories
            .write()
            .map_err(poison_err)?
            .insert(service.category_id);
        self.services
            .write()
            .map_err(poison_err)?
            .insert(service.id, service);
        Ok(self)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn find_service(&self, id: &ServiceId) -> Result<Option<ServiceSummary>, DomainError> {
        let services = self.services.read().map_err(poison_err)?;
        Ok(services.get(id).cloned())
    }

    async fn category_exists(&self, id: &CategoryId) -> Result<bool, DomainError> {
        let categories = self.categories.read().map_err(poison_err)?;
        Ok(categories.contains(id))
    }
}
