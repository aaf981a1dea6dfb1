//! # courier-client: Async I/O Layer for Courier
//!
//! Connects the pure wizard in `courier-core` to the parcel REST API.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Client Architecture                              │
//! │                                                                         │
//! │   front end (CLI / web)                                                 │
//! │        │ edit / next / previous              submit / resolve           │
//! │        ▼                                            │                   │
//! │  ┌────────────────┐                        ┌────────▼──────────────┐    │
//! │  │ WizardSession  │◄───────────────────────│ SubmissionOrchestrator│    │
//! │  │                │  finalize / complete   │                       │    │
//! │  │ Mutex<Wizard>  │                        │ AuthContext (stamp)   │    │
//! │  │ in-flight flag │                        │ ClientConfig (route)  │    │
//! │  └────────────────┘                        └────────┬──────────────┘    │
//! │                                                     │                   │
//! │                                            ┌────────▼──────────────┐    │
//! │  ┌────────────────┐                        │ dyn ParcelApi         │    │
//! │  │ Dashboard      │───────────────────────►│  HttpParcelApi        │    │
//! │  └────────────────┘                        │  (reqwest + rustls)   │    │
//! │                                            └───────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - `ParcelApi` trait and its HTTP implementation
//! - [`auth`] - Shared signed-in user state
//! - [`config`] - TOML + environment configuration
//! - [`dashboard`] - Parcel and payment history lookups
//! - [`error`] - Client error types
//! - [`orchestrator`] - Submission and payment-choice flow
//! - [`session`] - One form instance with its submission guard

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod orchestrator;
pub mod session;

pub use api::{HttpParcelApi, ParcelApi};
pub use auth::{AuthContext, AuthSession};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, ParcelSummary};
pub use error::{ClientError, ClientResult};
pub use orchestrator::{
    PaymentChoice, PaymentHandoff, PaymentResolution, PendingPayment, ResolveFailure,
    SubmissionOrchestrator, SubmissionOutcome,
};
pub use session::WizardSession;
