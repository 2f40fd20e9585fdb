//! Payment processor adapters.
//!
//! - `StubPaymentProcessor` - in-process stand-in for the external processor

mod stub;

pub use stub::StubPaymentProcessor;
