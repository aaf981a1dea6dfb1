//! # Authentication Context
//!
//! Holds whoever is signed in, as reported by the external identity
//! provider. One `AuthContext` is created at the application root and
//! cloned into every component that needs it; clones share state.
//!
//! ```text
//!   identity provider ──sign_in──► AuthContext ──submitter()──► ParcelRequest.createdBy
//!                                      │
//!                                      └──access_token()──► Authorization: Bearer ...
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use courier_core::{Submitter, UserIdentity};
use tracing::info;

/// A signed-in user plus the provider's bearer token, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub identity: UserIdentity,
    pub access_token: Option<String>,
}

/// Shared, swappable authentication state.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl AuthContext {
    /// A context with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context with a user already signed in.
    pub fn signed_in(identity: UserIdentity, access_token: Option<String>) -> Self {
        let ctx = Self::default();
        ctx.sign_in(identity, access_token);
        ctx
    }

    pub fn sign_in(&self, identity: UserIdentity, access_token: Option<String>) {
        info!(uid = %identity.uid, "User signed in");
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(AuthSession {
            identity,
            access_token,
        });
    }

    pub fn sign_out(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.read(|s| s.map(|s| s.identity.clone()))
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(|s| s.and_then(|s| s.access_token.clone()))
    }

    pub fn is_signed_in(&self) -> bool {
        self.read(|s| s.is_some())
    }

    /// Stamp for a submission: the current user, or `anonymous`.
    pub fn submitter(&self) -> Submitter {
        self.read(|s| Submitter::from(s.map(|s| &s.identity)))
    }

    fn read<R>(&self, f: impl FnOnce(Option<&AuthSession>) -> R) -> R {
        let guard = self.session.read().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserIdentity {
        UserIdentity {
            uid: "uid-42".to_string(),
            email: "nadia@example.com".to_string(),
            display_name: Some("Nadia".to_string()),
        }
    }

    #[test]
    fn test_anonymous_submitter() {
        let ctx = AuthContext::anonymous();
        assert!(!ctx.is_signed_in());
        assert_eq!(ctx.submitter(), Submitter::anonymous());
        assert_eq!(ctx.access_token(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = AuthContext::anonymous();
        let handle = ctx.clone();
        handle.sign_in(user(), Some("tok".to_string()));

        assert_eq!(ctx.current_user(), Some(user()));
        assert_eq!(ctx.access_token().as_deref(), Some("tok"));
        assert_eq!(ctx.submitter().email, "nadia@example.com");

        ctx.sign_out();
        assert!(!handle.is_signed_in());
    }
}
