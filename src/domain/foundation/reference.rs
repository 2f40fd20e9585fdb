//! References to other aggregates that may or may not be loaded.
//!
//! A reservation points at its service and its assigned partner. Freshly read
//! from storage those pointers are bare identifiers; once a handler has looked
//! the record up the pointer carries the record itself. Callers go through
//! [`Reference::id`] or [`Reference::resolve`] and never care which form they
//! hold.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Records that expose their own identifier.
pub trait Identified {
    type Id: Copy + PartialEq;

    fn id(&self) -> Self::Id;
}

/// Either an identifier or the record it identifies.
///
/// Serializes as the bare id when unresolved and as the full record when
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<I, T> {
    Unresolved(I),
    Resolved(T),
}

impl<I, T> Reference<I, T>
where
    I: Copy + PartialEq,
    T: Identified<Id = I> + Clone,
{
    /// Identifier of the referenced record, whichever form is held.
    pub fn id(&self) -> I {
        match self {
            Reference::Unresolved(id) => *id,
            Reference::Resolved(record) => record.id(),
        }
    }

    /// The loaded record, if this reference has been resolved.
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Unresolved(_) => None,
            Reference::Resolved(record) => Some(record),
        }
    }

    /// True if this reference points at `id`.
    pub fn points_to(&self, id: I) -> bool {
        self.id() == id
    }

    /// Returns the record, loading it through `load` only when not already held.
    ///
    /// `Ok(None)` means the identifier no longer resolves.
    pub async fn resolve<F, Fut, E>(&self, load: F) -> Result<Option<T>, E>
    where
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        match self {
            Reference::Resolved(record) => Ok(Some(record.clone())),
            Reference::Unresolved(id) => load(*id).await,
        }
    }

    /// Drops any loaded record, keeping only the identifier.
    pub fn to_unresolved(&self) -> Self {
        Reference::Unresolved(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ladder {
        id: Uuid,
        rungs: u32,
    }

    impl Identified for Ladder {
        type Id = Uuid;

        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn ladder() -> Ladder {
        Ladder {
            id: Uuid::new_v4(),
            rungs: 12,
        }
    }

    #[test]
    fn id_is_the_same_in_both_forms() {
        let record = ladder();
        let resolved: Reference<Uuid, Ladder> = Reference::Resolved(record.clone());
        let unresolved: Reference<Uuid, Ladder> = Reference::Unresolved(record.id);

        assert_eq!(resolved.id(), unresolved.id());
        assert!(unresolved.points_to(record.id));
    }

    #[tokio::test]
    async fn resolve_skips_loader_when_already_resolved() {
        let record = ladder();
        let reference: Reference<Uuid, Ladder> = Reference::Resolved(record.clone());

        let loaded = reference
            .resolve(|_| async { Err::<Option<Ladder>, &str>("loader must not run") })
            .await;

        assert_eq!(loaded, Ok(Some(record)));
    }

    #[tokio::test]
    async fn resolve_loads_unresolved_reference() {
        let record = ladder();
        let reference: Reference<Uuid, Ladder> = Reference::Unresolved(record.id);
        let source = record.clone();

        let loaded: Result<Option<Ladder>, ()> = reference
            .resolve(|id| async move { Ok((id == source.id).then_some(source)) })
            .await;

        assert_eq!(loaded.unwrap(), Some(record));
    }

    #[test]
    fn unresolved_serializes_as_bare_id_and_resolved_as_object() {
        let record = ladder();
        let unresolved: Reference<Uuid, Ladder> = Reference::Unresolved(record.id);
        let resolved: Reference<Uuid, Ladder> = Reference::Resolved(record.clone());

        let bare = serde_json::to_value(&unresolved).unwrap();
        let full = serde_json::to_value(&resolved).unwrap();

        assert_eq!(bare, serde_json::json!(record.id.to_string()));
        assert_eq!(full["rungs"], 12);

        let back: Reference<Uuid, Ladder> = serde_json::from_value(full).unwrap();
        assert_eq!(back.resolved(), Some(&record));
    }
}
