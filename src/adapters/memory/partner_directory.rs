//! In-memory partner directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::poison_err;
use crate::domain::foundation::{DomainError, PartnerId, UserId};
use crate::domain::partner::Partner;
use crate::ports::PartnerDirectory;

#[derive(Debug, Default)]
pub struct InMemoryPartnerDirectory {
    partners: RwLock<HashMap<PartnerId, Partner>>,
}

impl InMemoryPartnerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a partner.
    pub fn register(&self, partner: Partner) -> Result<(), DomainError> {
        self.partners
            .write()
            .map_err(poison_err)?
            .insert(partner.id, partner);
        Ok(())
    }
}

#[async_trait]
impl PartnerDirectory for InMemoryPartnerDirectory {
    async fn find_by_id(&self, id: &PartnerId) -> Result<Option<Partner>, DomainError> {
        let partners = self.partners.read().map_err(poison_err)?;
        Ok(partners.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Partner>, DomainError> {
        let partners = self.partners.read().map_err(poison_err)?;
        Ok(partners.values().find(|p| p.is_user(user_id)).cloned())
    }
}
