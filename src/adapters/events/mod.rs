//! Event bus adapters.
//!
//! - `InMemoryEventBus` - in-process bus that records and logs events

mod in_memory;

pub use in_memory::InMemoryEventBus;
