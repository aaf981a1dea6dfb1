//! # Client Error Types
//!
//! Error types for configuration, HTTP, and submission operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Invalid (form errors)  │ │
//! │  │  InvalidUrl     │  │  Status         │  │  Core (wizard, rider)   │ │
//! │  │  ConfigLoad...  │  │  NotFound       │  │  SubmissionInFlight     │ │
//! │  │  ConfigSave...  │  │  Json           │  │  NoPendingPayment       │ │
//! │  │                 │  │                 │  │  NotSignedIn            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Network and API failures are always surfaced to the caller; nothing in
//! this crate retries on its own. [`ClientError::is_retryable`] tells the
//! front end whether offering "try again" makes sense.

use courier_core::{CoreError, StepValidation, WizardError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything a client operation can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// HTTP request failed before a response arrived (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered 2xx but the body was not what we expected.
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// The parcel form has invalid fields.
    #[error("Form has {} invalid field(s): {0}", .0.len())]
    Invalid(StepValidation),

    /// Any other domain rule (wizard transition, rider application, ...).
    #[error(transparent)]
    Core(CoreError),

    /// A submission for this form is already running.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// No payment choice is outstanding for this parcel.
    #[error("No pending payment for parcel {0}")]
    NoPendingPayment(String),

    /// The operation needs a signed-in user.
    #[error("Sign in required")]
    NotSignedIn,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidForm(errors) => ClientError::Invalid(errors),
            other => ClientError::Core(other),
        }
    }
}

impl From<WizardError> for ClientError {
    fn from(err: WizardError) -> Self {
        ClientError::Core(CoreError::Wizard(err))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if repeating the same request may succeed.
    ///
    /// ## Retryable Errors
    /// - Connection failures and timeouts
    /// - 5xx responses and 429 Too Many Requests
    ///
    /// ## Non-Retryable Errors
    /// - Configuration errors
    /// - Validation and wizard errors
    /// - 4xx responses other than 429
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ClientError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// Returns true for form and domain rule failures the user can fix.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ClientError::Invalid(_) | ClientError::Core(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::ValidationError;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::Status {
            status: 503,
            message: "unavailable".into()
        }
        .is_retryable());
        assert!(ClientError::Status {
            status: 429,
            message: "slow down".into()
        }
        .is_retryable());

        assert!(!ClientError::Status {
            status: 400,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!ClientError::SubmissionInFlight.is_retryable());
        assert!(!ClientError::InvalidConfig("x".into()).is_retryable());
    }

    #[test]
    fn test_core_conversion_splits_form_errors() {
        let err: ClientError = CoreError::InvalidForm(StepValidation::new()).into();
        assert!(matches!(err, ClientError::Invalid(_)));

        let err: ClientError = CoreError::Validation(ValidationError::Required {
            field: "weight".into(),
        })
        .into();
        assert!(matches!(err, ClientError::Core(_)));
        assert!(err.is_validation_error());

        let err: ClientError = WizardError::AlreadySubmitted.into();
        assert!(matches!(
            err,
            ClientError::Core(CoreError::Wizard(WizardError::AlreadySubmitted))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Status {
            status: 500,
            message: "database down".into(),
        };
        assert_eq!(err.to_string(), "API returned 500: database down");
        assert!(ClientError::InvalidUrl("nope".into()).is_config_error());
    }
}
