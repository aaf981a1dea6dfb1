//! # CLI Error Type
//!
//! Unified error type for `courier` commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<(), AppError>                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Form invalid?   ─── ClientError::Invalid ──────┐                       │
//! │  API down?       ─── ClientError::Http/Status ──┤                       │
//! │  Bad config?     ─── ClientError::InvalidUrl ───┼──► AppError ──► exit  │
//! │  Domain rule?    ─── CoreError::Wizard ─────────┘         code + stderr │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────────────► exit 0    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as `{"code": "...", "message": "..."}`.

use std::process::ExitCode;

use courier_client::ClientError;
use courier_core::{CoreError, ValidationError, WizardError};
use serde::Serialize;

/// Error returned from CLI commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Not found: parcel 665f1c"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, each with its own process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Record not found (404)
    NotFound,

    /// Could not reach the API (connect, timeout)
    NetworkError,

    /// The API answered with an error status
    ApiError,

    /// Configuration file or environment is invalid
    ConfigError,

    /// A submission is already running or awaiting a payment choice
    Busy,

    /// The command needs `--user`
    NotSignedIn,

    /// The user cancelled at a prompt
    Cancelled,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::NetworkError => 4,
            ErrorCode::ApiError => 5,
            ErrorCode::ConfigError => 6,
            ErrorCode::Busy => 7,
            ErrorCode::NotSignedIn => 8,
            ErrorCode::Cancelled => 130,
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn cancelled() -> Self {
        AppError::new(ErrorCode::Cancelled, "Cancelled")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_code())
    }
}

/// Converts client errors to CLI errors.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::Invalid(_) => AppError::validation(message),
            ClientError::Core(core) => AppError::from(core),
            ClientError::NotFound(_) => AppError::new(ErrorCode::NotFound, message),
            ClientError::Http(ref e) => {
                tracing::error!(error = ?e, "HTTP request failed");
                AppError::new(ErrorCode::NetworkError, message)
            }
            ClientError::Status { .. } | ClientError::UnexpectedResponse(_) | ClientError::Json(_) => {
                AppError::new(ErrorCode::ApiError, message)
            }
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_) => AppError::new(ErrorCode::ConfigError, message),
            ClientError::SubmissionInFlight | ClientError::NoPendingPayment(_) => {
                AppError::new(ErrorCode::Busy, message)
            }
            ClientError::NotSignedIn => AppError::new(
                ErrorCode::NotSignedIn,
                "Sign in required: pass --user <email>",
            ),
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Wizard(WizardError::AlreadySubmitted) => {
                AppError::new(ErrorCode::Busy, "Parcel already submitted")
            }
            other => AppError::validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Prompt and output failures.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            return AppError::cancelled();
        }
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON error: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type alias for CLI commands.
pub type AppResult<T> = Result<T, AppError>;
