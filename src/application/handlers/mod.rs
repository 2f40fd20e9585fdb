//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! mutation of a reservation or its satellites runs under that
//! reservation's lock.

pub mod assignment;
pub mod payment;
pub mod reservation;

mod support;

#[cfg(test)]
mod testing;
