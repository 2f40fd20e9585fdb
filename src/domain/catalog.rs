//! Catalog read model.
//!
//! The service/category catalog is maintained elsewhere; reservations only
//! need to know that a service exists and how to label it.

use serde::{Deserialize, Serialize};

use super::foundation::{CategoryId, Identified, ServiceId};

/// A bookable service as seen by the reservation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: ServiceId,
    pub category_id: CategoryId,
    pub name: String,
}

impl ServiceSummary {
    pub fn new(id: ServiceId, category_id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            category_id,
            name: name.into(),
        }
    }
}

impl Identified for ServiceSummary {
    type Id = ServiceId;

    fn id(&self) -> ServiceId {
        self.id
    }
}
