//! Workflow error taxonomy.
//!
//! Every reservation, assignment and payment operation fails with one of
//! these. The HTTP layer maps them onto status codes:
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Conflict | 400 |
//! | Unauthorized | 401 |
//! | Forbidden | 403 |
//! | NotFound | 404 |
//! | Unexpected | 500 |

use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Kind of record a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Reservation,
    Assignment,
    Payment,
    Partner,
    Service,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Reservation => "reservation",
            Resource::Assignment => "assignment",
            Resource::Payment => "payment",
            Resource::Partner => "partner",
            Resource::Service => "service",
        }
    }

    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Resource::Reservation => ErrorCode::ReservationNotFound,
            Resource::Assignment => ErrorCode::AssignmentNotFound,
            Resource::Payment => ErrorCode::PaymentNotFound,
            Resource::Partner => ErrorCode::PartnerNotFound,
            Resource::Service => ErrorCode::ServiceNotFound,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by workflow operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Input failed a field-level rule.
    Validation { field: String, message: String },

    /// Referenced record does not exist.
    NotFound { resource: Resource, id: String },

    /// Caller is authenticated but not allowed to act on this record.
    Forbidden(String),

    /// Operation would break a lifecycle rule.
    Conflict(String),

    /// No valid caller identity.
    Unauthorized,

    /// Collaborator or storage failure. The message is for logs only.
    Unexpected(String),
}

impl WorkflowError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WorkflowError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: Resource, id: impl ToString) -> Self {
        WorkflowError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        WorkflowError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        WorkflowError::Conflict(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        WorkflowError::Unexpected(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::Validation { .. } => ErrorCode::ValidationFailed,
            WorkflowError::NotFound { resource, .. } => resource.not_found_code(),
            WorkflowError::Forbidden(_) => ErrorCode::Forbidden,
            WorkflowError::Conflict(_) => ErrorCode::InvalidStateTransition,
            WorkflowError::Unauthorized => ErrorCode::Unauthorized,
            WorkflowError::Unexpected(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a caller-facing message.
    ///
    /// `Unexpected` never exposes its internal detail.
    pub fn message(&self) -> String {
        match self {
            WorkflowError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            WorkflowError::NotFound { resource, id } => {
                format!("{} not found: {}", capitalize(resource.as_str()), id)
            }
            WorkflowError::Forbidden(msg) => msg.clone(),
            WorkflowError::Conflict(msg) => msg.clone(),
            WorkflowError::Unauthorized => "Authentication required".to_string(),
            WorkflowError::Unexpected(_) => "An unexpected error occurred".to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::Unexpected(detail) => write!(f, "Unexpected error: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for WorkflowError {}

impl From<ValidationError> for WorkflowError {
    fn from(err: ValidationError) -> Self {
        WorkflowError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for WorkflowError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => WorkflowError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ReservationNotFound => not_found_from(Resource::Reservation, &err),
            ErrorCode::AssignmentNotFound => not_found_from(Resource::Assignment, &err),
            ErrorCode::PaymentNotFound => not_found_from(Resource::Payment, &err),
            ErrorCode::PartnerNotFound => not_found_from(Resource::Partner, &err),
            ErrorCode::ServiceNotFound => not_found_from(Resource::Service, &err),
            ErrorCode::InvalidStateTransition
            | ErrorCode::ReservationCancelled
            | ErrorCode::ConcurrentModification => WorkflowError::Conflict(err.message),
            ErrorCode::Unauthorized => WorkflowError::Unauthorized,
            ErrorCode::Forbidden => WorkflowError::Forbidden(err.message),
            ErrorCode::PaymentProcessorError
            | ErrorCode::StorageError
            | ErrorCode::InternalError => WorkflowError::Unexpected(err.to_string()),
        }
    }
}

fn not_found_from(resource: Resource, err: &DomainError) -> WorkflowError {
    WorkflowError::NotFound {
        resource,
        id: err
            .details
            .get("id")
            .cloned()
            .unwrap_or_else(|| err.message.clone()),
    }
}

impl From<WorkflowError> for DomainError {
    fn from(err: WorkflowError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
