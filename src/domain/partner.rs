//! Partner (verified tradesperson) record.

use serde::{Deserialize, Serialize};

use super::foundation::{Identified, PartnerId, UserId};

/// A service provider that can be assigned to reservations.
///
/// Each partner is backed by exactly one user identity; authorization
/// checks dereference `user_id` to compare against the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub user_id: UserId,
    pub display_name: String,
    /// Trade tag such as "plumbing" or "electrical".
    pub service_type: String,
    pub verified: bool,
}

impl Partner {
    pub fn new(
        id: PartnerId,
        user_id: UserId,
        display_name: impl Into<String>,
        service_type: impl Into<String>,
        verified: bool,
    ) -> Self {
        Self {
            id,
            user_id,
            display_name: display_name.into(),
            service_type: service_type.into(),
            verified,
        }
    }

    /// True if `user_id` is the identity behind this partner.
    pub fn is_user(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

impl Identified for Partner {
    type Id = PartnerId;

    fn id(&self) -> PartnerId {
        self.id
    }
}
