//! WebhookEventRepository port - processed processor callbacks.
//!
//! The processor may deliver the same event more than once (timeouts,
//! retries after a 5xx). Recording each processed event id lets the webhook
//! handler acknowledge a redelivery without touching the payment again.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};

/// Record of a processed webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEventRecord {
    /// Processor event id.
    pub event_id: String,
    pub event_type: String,
    pub intent_id: String,
    pub processed_at: Timestamp,
    /// "applied", "unchanged" or "ignored".
    pub outcome: String,
}

impl WebhookEventRecord {
    pub fn new(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        intent_id: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            intent_id: intent_id.into(),
            processed_at: Timestamp::now(),
            outcome: outcome.into(),
        }
    }
}

/// Result of attempting to save a webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// First time seeing this event.
    Inserted,
    /// Another delivery already recorded it.
    AlreadyExists,
}

/// Port for storing and retrieving processed webhook events.
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError>;

    /// Insert unless a record with the same event id exists.
    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError>;
}
