//! HomeFix - home-repair workflow coordinator.
//!
//! Clients book repair reservations, operators offer them to verified
//! partners, partners accept or decline, and payments confirmed through the
//! processor move a booking forward.
//!
//! Layout follows ports and adapters: `domain` holds the aggregates and
//! their rules, `ports` the traits the application needs, `application` the
//! command and query handlers, and `adapters` the HTTP surface plus
//! in-memory implementations of every port.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
