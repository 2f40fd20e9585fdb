//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the workflow and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `ReservationRepository` - versioned reservation storage
//! - `AssignmentRepository` - partner assignment records
//! - `PaymentRepository` - payment records, keyed also by intent id
//! - `WebhookEventRepository` - processed processor callbacks
//!
//! ## External collaborators
//!
//! - `SessionValidator` - bearer credential to caller identity
//! - `Catalog` - service lookup
//! - `PartnerDirectory` - partner lookup by id or user
//! - `PaymentProcessor` - payment intents
//! - `EventPublisher` - domain event audit trail

mod assignment_repository;
mod catalog;
mod event_publisher;
mod partner_directory;
mod payment_processor;
mod payment_repository;
mod reservation_repository;
mod session_validator;
mod webhook_event_repository;

pub use assignment_repository::AssignmentRepository;
pub use catalog::Catalog;
pub use event_publisher::EventPublisher;
pub use partner_directory::PartnerDirectory;
pub use payment_processor::{PaymentIntent, PaymentProcessor, ProcessorError, ProcessorErrorCode};
pub use payment_repository::PaymentRepository;
pub use reservation_repository::ReservationRepository;
pub use session_validator::SessionValidator;
pub use webhook_event_repository::{SaveResult, WebhookEventRecord, WebhookEventRepository};
