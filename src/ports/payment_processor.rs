//! Payment processor port.
//!
//! Abstracts the external processor that holds payment intents. The workflow
//! only creates intents and asks for an outcome; card handling never passes
//! through this service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::IntentStatus;

/// A processor-side payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret the client uses to complete payment with the processor.
    pub client_secret: String,
    pub amount_minor: i64,
    pub currency: String,
    pub status: IntentStatus,
}

/// Port for the external payment processor.
///
/// Each call is atomic with respect to the intent it touches.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an intent for `amount_minor` in `currency`.
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProcessorError>;

    /// Ask the processor to settle `intent_id`.
    ///
    /// `succeed` selects the simulated outcome.
    async fn confirm(&self, intent_id: &str, succeed: bool)
        -> Result<PaymentIntent, ProcessorError>;
}

/// Errors from payment processor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorError {
    pub code: ProcessorErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorErrorCode {
    /// Processor does not know the intent.
    IntentNotFound,
    InvalidRequest,
    /// Processor unreachable or failed internally.
    Unavailable,
}

impl ProcessorError {
    pub fn new(code: ProcessorErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn intent_not_found(intent_id: &str) -> Self {
        Self::new(
            ProcessorErrorCode::IntentNotFound,
            format!("intent {} not found", intent_id),
        )
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::InvalidRequest, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::Unavailable, message)
    }
}

impl std::fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProcessorError {}

impl From<ProcessorError> for DomainError {
    fn from(err: ProcessorError) -> Self {
        match err.code {
            ProcessorErrorCode::IntentNotFound => {
                DomainError::new(ErrorCode::PaymentNotFound, err.message)
            }
            ProcessorErrorCode::InvalidRequest => DomainError::validation("amount", err.message),
            ProcessorErrorCode::Unavailable => {
                DomainError::new(ErrorCode::PaymentProcessorError, err.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_processor_error() {
        let err: DomainError = ProcessorError::unavailable("timeout").into();
        assert_eq!(err.code, ErrorCode::PaymentProcessorError);
    }

    #[test]
    fn unknown_intent_maps_to_not_found() {
        let err: DomainError = ProcessorError::intent_not_found("pi_x").into();
        assert_eq!(err.code, ErrorCode::PaymentNotFound);
    }

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PaymentProcessor) {}
}
