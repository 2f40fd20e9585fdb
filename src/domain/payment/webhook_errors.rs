//! Errors raised while authenticating processor callbacks.

use thiserror::Error;

/// Errors that occur during webhook signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature header absent.
    #[error("Missing signature header")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed longer ago than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Malformed signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Signing secret could not key the MAC.
    #[error("Invalid signing secret")]
    InvalidSecret,
}

impl WebhookError {
    /// True for failures that mean the sender could not prove who it is.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_message() {
        let err = WebhookError::ParseError("missing timestamp".to_string());
        assert_eq!(err.to_string(), "Parse error: missing timestamp");
    }

    #[test]
    fn signature_failures_are_authentication_failures() {
        assert!(WebhookError::InvalidSignature.is_authentication_failure());
        assert!(WebhookError::MissingSignature.is_authentication_failure());
        assert!(!WebhookError::InvalidTimestamp.is_authentication_failure());
        assert!(!WebhookError::InvalidSecret.is_authentication_failure());
    }
}
