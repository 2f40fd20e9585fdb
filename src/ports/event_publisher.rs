//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers publish after their writes succeed. Publishing is an audit
//! trail: a failed publish is logged by the caller and never undoes a write.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish in order. Adapters without batching publish one by one.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
