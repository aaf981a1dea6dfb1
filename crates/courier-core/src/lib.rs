//! # courier-core: Pure Business Logic for Courier
//!
//! Everything the send-parcel flow decides without talking to the outside
//! world: prices, zones, validation, wizard transitions, and the payload
//! that is finally sent to the parcel API.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Courier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front ends (web / `courier` CLI)                │   │
//! │  │    Parcel ──► Sender ──► Receiver ──► Submit ──► Confirmation   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            courier-client (config, REST API, orchestrator)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ courier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   zones   │  │ validation│  │  wizard   │  │   │
//! │  │   │  quote    │  │ near/far  │  │ per step  │  │ 1→2→3→4   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  weight   │  │ coverage  │  │   rider   │  │   │
//! │  │   │  poisha   │  │  grams    │  │64 district│  │application│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK READS IN LOGIC                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ParcelDraft, ParcelRequest, PaymentStatus, ...)
//! - [`money`] - Money type in integer poisha
//! - [`weight`] - Weight in integer grams
//! - [`coverage`] - District and region catalog
//! - [`zones`] - Near/far tariff zone classifier
//! - [`pricing`] - Price calculator
//! - [`validation`] - Field rules and the step validator
//! - [`wizard`] - Send-parcel state machine and finalization
//! - [`tracking`] - Tracking ID generation
//! - [`rider`] - Rider application validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: "today" and "now" are parameters, never read from the clock
//! 2. **Integer Money**: amounts are poisha (i64), weights are grams (u32)
//! 3. **Explicit Errors**: validation returns every failing field at once
//!
//! ## Example Usage
//!
//! ```rust
//! use courier_core::money::Money;
//! use courier_core::pricing::compute_price;
//! use courier_core::types::ParcelType;
//! use courier_core::weight::Weight;
//!
//! let price = compute_price(
//!     Some(ParcelType::NonDocument),
//!     Weight::parse_kg("1.5"),
//!     Some("Sylhet"),
//!     true,
//! );
//! assert_eq!(price, Money::from_taka(300));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coverage;
pub mod error;
pub mod money;
pub mod pricing;
pub mod rider;
pub mod tracking;
pub mod types;
pub mod validation;
pub mod weight;
pub mod wizard;
pub mod zones;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, WizardError};
pub use money::Money;
pub use pricing::{compute_price, PriceBreakdown};
pub use tracking::TrackingId;
pub use types::*;
pub use validation::{validate_all, validate_step, Field, FormErrors, StepValidation};
pub use weight::Weight;
pub use wizard::{StepTransition, Wizard, WizardStep};
pub use zones::{is_near_zone, DeliveryZone};
