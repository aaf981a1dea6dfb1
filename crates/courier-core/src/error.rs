//! # Error Types
//!
//! Domain-specific error types for courier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  courier-core errors (this file)                                       │
//! │  ├── ValidationError  - One field failed one rule                      │
//! │  ├── WizardError      - A step transition was refused                  │
//! │  └── CoreError        - Everything a core operation can return         │
//! │                                                                         │
//! │  courier-client errors (separate crate)                                │
//! │  └── ClientError      - Network, API status, config, in-flight guard   │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the terminal user sees + exit code        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → AppError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures are values, not panics: a form step collects every
//! `ValidationError` for its fields into a [`FormErrors`] map and hands the
//! whole map back so the UI can render all messages at once.

use thiserror::Error;

use crate::rider::RiderField;
use crate::validation::{Field, FormErrors};

// =============================================================================
// Validation Error
// =============================================================================

/// A single field failed a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is outside the accepted range. Bounds are pre-rendered so that
    /// decimal limits ("0.1 kg") read naturally.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (phone, email, decimal text, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A date that must be today or later lies in the past.
    #[error("{field} cannot be in the past")]
    DateInPast { field: String },

    /// Two fields disagree with each other.
    #[error("{field} is inconsistent: {reason}")]
    Inconsistent { field: String, reason: String },
}

// =============================================================================
// Wizard Error
// =============================================================================

/// Reasons the send-parcel wizard refuses a transition or an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The current step has invalid or missing fields.
    #[error("step {step} has {} invalid field(s): {errors}", .errors.len())]
    StepInvalid { step: u8, errors: FormErrors<Field> },

    /// `next` was called on the review step; the only way forward is submitting.
    #[error("step {0} is the last form step; submit the parcel to continue")]
    SubmitRequired(u8),

    /// The parcel was already submitted; the wizard is read-only until reset.
    #[error("parcel already submitted; start over to send another")]
    AlreadySubmitted,

    /// Step indicators only allow moving back to visited steps.
    #[error("cannot jump to step {requested} from step {current}")]
    StepLocked { requested: u8, current: u8 },

    /// Completion is only possible from the receiver step.
    #[error("cannot complete submission from step {0}")]
    NotReadyToComplete(u8),
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by courier-core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A single-field rule failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A whole form failed validation (all errors attached).
    #[error("Form has {} invalid field(s): {0}", .0.len())]
    InvalidForm(FormErrors<Field>),

    /// A rider application failed validation.
    #[error("Rider application has {} invalid field(s): {0}", .0.len())]
    InvalidRiderApplication(FormErrors<RiderField>),

    /// The wizard refused a transition.
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    /// A district name is not in the coverage catalog.
    #[error("District not served: {0}")]
    UnknownDistrict(String),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
