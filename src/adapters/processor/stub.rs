//! Stub payment processor.
//!
//! Holds intents in memory, keyed by intent id. Outcomes are chosen by the
//! caller through `confirm(.., succeed)`. Once an intent has settled it keeps
//! its outcome; confirming it again returns the settled intent unchanged.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::payment::IntentStatus;
use crate::ports::{PaymentIntent, PaymentProcessor, ProcessorError};

/// In-memory payment processor.
///
/// ```ignore
/// let processor = StubPaymentProcessor::new();
/// let intent = processor.create_intent(4995, "eur").await?;
/// let settled = processor.confirm(&intent.id, true).await?;
/// assert_eq!(settled.status, IntentStatus::Succeeded);
/// ```
#[derive(Default)]
pub struct StubPaymentProcessor {
    state: Mutex<StubState>,
}

#[derive(Default)]
struct StubState {
    intents: HashMap<String, PaymentIntent>,
    /// Error to return on the next call.
    next_error: Option<ProcessorError>,
}

fn poison_err<T>(_: PoisonError<T>) -> ProcessorError {
    ProcessorError::unavailable("processor state lock poisoned")
}

impl StubPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: ProcessorError) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_error = Some(error);
    }

    /// Current processor-side view of an intent.
    pub fn intent(&self, intent_id: &str) -> Option<PaymentIntent> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .intents
            .get(intent_id)
            .cloned()
    }
}

#[async_trait]
impl PaymentProcessor for StubPaymentProcessor {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProcessorError> {
        let mut state = self.state.lock().map_err(poison_err)?;
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        if amount_minor <= 0 {
            return Err(ProcessorError::invalid_request(
                "amount must be a positive number of minor units",
            ));
        }

        let id = format!("pi_{}", Uuid::new_v4().simple());
        let intent = PaymentIntent {
            client_secret: format!("{}_secret_{}", id, Uuid::new_v4().simple()),
            id: id.clone(),
            amount_minor,
            currency: currency.to_lowercase(),
            status: IntentStatus::RequiresPaymentMethod,
        };
        state.intents.insert(id, intent.clone());
        Ok(intent)
    }

    async fn confirm(
        &self,
        intent_id: &str,
        succeed: bool,
    ) -> Result<PaymentIntent, ProcessorError> {
        let mut state = self.state.lock().map_err(poison_err)?;
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        let intent = state
            .intents
            .get_mut(intent_id)
            .ok_or_else(|| ProcessorError::intent_not_found(intent_id))?;

        if intent.status == IntentStatus::RequiresPaymentMethod {
            intent.status = if succeed {
                IntentStatus::Succeeded
            } else {
                IntentStatus::PaymentFailed
            };
        }
        Ok(intent.clone())
    }
}
