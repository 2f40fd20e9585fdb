//! Ownership trait for user-owned resources.
//!
//! A reservation belongs to the client who created it; payment operations
//! use the same rule through the reservation they are tied to.
//!
//! ```ignore
//! reservation.check_ownership(&caller.id)?;  // Err(Forbidden) if not owner
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Returns `true` if `user_id` matches `owner_id()`.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning a `Forbidden` error if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(
                DomainError::new(ErrorCode::Forbidden, "User does not own this resource")
                    .with_detail("user_id", user_id.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Toolbox {
        owner: UserId,
    }

    impl OwnedByUser for Toolbox {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    #[test]
    fn owner_passes_check() {
        let owner = UserId::new("client-1").unwrap();
        let toolbox = Toolbox {
            owner: owner.clone(),
        };
        assert!(toolbox.check_ownership(&owner).is_ok());
    }

    #[test]
    fn stranger_is_forbidden() {
        let toolbox = Toolbox {
            owner: UserId::new("client-1").unwrap(),
        };
        let err = toolbox
            .check_ownership(&UserId::new("client-2").unwrap())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("user_id"), Some(&"client-2".to_string()));
    }
}
