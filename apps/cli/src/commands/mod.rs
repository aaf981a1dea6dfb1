//! # CLI Commands
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared Context)
//! ├── quote.rs     ◄─── Offline price quote
//! ├── coverage.rs  ◄─── Served regions and districts
//! ├── send.rs      ◄─── Interactive send-parcel wizard
//! ├── parcels.rs   ◄─── My parcels (dashboard)
//! ├── payments.rs  ◄─── Payment history (dashboard)
//! ├── rider.rs     ◄─── Rider application
//! └── config.rs    ◄─── Show / write client.toml
//! ```
//!
//! Each command takes only what it needs: offline commands take nothing but
//! their arguments and a writer; network commands take a [`Context`].

pub mod config;
pub mod coverage;
pub mod parcels;
pub mod payments;
pub mod quote;
pub mod rider;
pub mod send;

use std::sync::Arc;

use courier_client::{
    AuthContext, ClientConfig, Dashboard, HttpParcelApi, ParcelApi, SubmissionOrchestrator,
};
use courier_core::UserIdentity;
use tracing::debug;

use crate::error::AppResult;

/// Configuration, identity and API handle shared by network commands.
#[derive(Clone)]
pub struct Context {
    pub config: ClientConfig,
    pub auth: AuthContext,
    pub api: Arc<dyn ParcelApi>,
}

impl Context {
    /// Builds the HTTP-backed context.
    ///
    /// `user` signs in with that email; otherwise the session is anonymous.
    pub fn connect(config: ClientConfig, user: Option<UserIdentity>) -> AppResult<Self> {
        let auth = match user {
            Some(identity) => AuthContext::signed_in(identity, None),
            None => AuthContext::anonymous(),
        };
        let api = HttpParcelApi::new(&config, auth.clone())?;
        debug!(base_url = %config.base_url(), signed_in = auth.is_signed_in(), "API client ready");
        Ok(Self::with_api(config, auth, Arc::new(api)))
    }

    pub fn with_api(config: ClientConfig, auth: AuthContext, api: Arc<dyn ParcelApi>) -> Self {
        Self { config, auth, api }
    }

    pub fn orchestrator(&self) -> SubmissionOrchestrator {
        SubmissionOrchestrator::new(self.api.clone(), self.auth.clone(), self.config.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.api.clone(), self.auth.clone())
    }
}

/// Identity for `--user`. The lowercased email doubles as uid.
pub fn identity(email: &str, name: Option<&str>) -> UserIdentity {
    UserIdentity {
        uid: email.trim().to_lowercase(),
        email: email.trim().to_string(),
        display_name: name.map(str::to_string),
    }
}
