//! Payment coordination.
//!
//! Payments move `pending -> paid | failed` and `paid -> refunded`. A payment
//! reaching `paid` may promote its reservation from `new` to `confirmed`.

mod aggregate;
mod events;
mod intent_status;
mod processor_event;
mod status;
mod webhook_errors;
mod webhook_verifier;

pub use aggregate::{to_minor_units, Payment, StatusChange, MAX_AMOUNT};
pub use events::{OutcomeSource, PaymentEvent};
pub use intent_status::IntentStatus;
pub use processor_event::{ProcessorEvent, ProcessorEventType};
pub use status::PaymentStatus;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, WebhookVerifier, DEFAULT_TOLERANCE_SECS};
