//! # Submission Orchestrator
//!
//! Sends a finished form to the parcel API and drives the payment branch.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         submit(session)                                 │
//! │                                                                         │
//! │  finalize draft (validate all, price, tracking id, submitter stamp)     │
//! │            │                                                            │
//! │            ▼                                                            │
//! │     POST /parcels  (exactly once)                                       │
//! │            │                                                            │
//! │   ┌────────┴─────────────────┐                                          │
//! │   ▼ cash                     ▼ card / mobile banking                    │
//! │  Confirmed(record)          AwaitingPaymentChoice(pending)              │
//! │  wizard → step 4                  │                                     │
//! │                                   ▼ resolve(pending, choice)            │
//! │              ┌────────────────────┼──────────────────────┐              │
//! │              ▼ PayNow             ▼ PayOnPickup          ▼ Abandon      │
//! │        Handoff(checkout)   PATCH …/payment         DELETE /parcels/:id  │
//! │        wizard → step 4     wizard → step 4         wizard stays step 3  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There are no automatic retries. A failed create leaves the wizard on
//! step 3 with the draft intact; a failed resolution hands the pending
//! payment back so the user can choose again.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use courier_core::rider::RiderApplication;
use courier_core::{
    Money, ParcelRecord, PaymentMethod, PaymentStatus, PaymentUpdate, TrackingId,
};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::api::ParcelApi;
use crate::auth::AuthContext;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::WizardSession;

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a successful `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Cash booking stored; the wizard shows the confirmation.
    Confirmed(ParcelRecord),
    /// Online booking stored; the user must choose how to pay.
    AwaitingPaymentChoice(PendingPayment),
}

/// A stored online-payment parcel waiting for the user's payment choice.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayment {
    record: ParcelRecord,
}

impl PendingPayment {
    pub fn parcel_id(&self) -> &str {
        &self.record.id
    }

    pub fn amount(&self) -> Money {
        self.record.parcel.cost()
    }

    pub fn tracking_id(&self) -> &TrackingId {
        &self.record.parcel.tracking_id
    }

    /// The online method picked in the form.
    pub fn method(&self) -> PaymentMethod {
        self.record.parcel.payment_method
    }

    pub fn record(&self) -> &ParcelRecord {
        &self.record
    }
}

/// What the user picked in the payment dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentChoice {
    /// Go to the external payment page now.
    PayNow,
    /// Pay cash when the rider picks the parcel up.
    PayOnPickup,
    /// Cancel the booking.
    Abandon,
}

impl PaymentChoice {
    pub const ALL: [PaymentChoice; 3] = [
        PaymentChoice::PayNow,
        PaymentChoice::PayOnPickup,
        PaymentChoice::Abandon,
    ];
}

impl std::fmt::Display for PaymentChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentChoice::PayNow => "Pay now",
            PaymentChoice::PayOnPickup => "Pay cash on pickup",
            PaymentChoice::Abandon => "Cancel this booking",
        })
    }
}

/// Everything the external payment page needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentHandoff {
    pub parcel_id: String,
    pub amount: Money,
    pub tracking_id: TrackingId,
    /// Route of the payment page, e.g. `/dashboard/payment/665f1c`.
    pub checkout_path: String,
}

/// Result of a successful `resolve`.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentResolution {
    /// Continue on the payment page; the wizard shows the confirmation.
    Handoff(PaymentHandoff),
    /// Switched to cash at pickup; the wizard shows the updated record.
    PayOnPickup(ParcelRecord),
    /// Booking deleted; the wizard is back on step 3 with the draft intact.
    Abandoned,
}

/// A failed `resolve`. Carries the pending payment for another attempt.
#[derive(Debug, Error)]
#[error("payment choice for parcel {} failed: {error}", .pending.parcel_id())]
pub struct ResolveFailure {
    pub pending: PendingPayment,
    #[source]
    pub error: ClientError,
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Coordinates the wizard, the parcel API and the payment branch.
#[derive(Clone)]
pub struct SubmissionOrchestrator {
    api: Arc<dyn ParcelApi>,
    auth: AuthContext,
    config: ClientConfig,
}

impl std::fmt::Debug for SubmissionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionOrchestrator")
            .field("auth", &self.auth)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SubmissionOrchestrator {
    pub fn new(api: Arc<dyn ParcelApi>, auth: AuthContext, config: ClientConfig) -> Self {
        Self { api, auth, config }
    }

    pub fn api(&self) -> &Arc<dyn ParcelApi> {
        &self.api
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Submits the form using the local date and the current time.
    pub async fn submit(&self, session: &WizardSession) -> ClientResult<SubmissionOutcome> {
        self.submit_at(session, Local::now().date_naive(), Utc::now())
            .await
    }

    /// Submits the form as of `today` / `now`.
    ///
    /// ## Errors
    /// - [`ClientError::SubmissionInFlight`] if this session is already submitting
    ///   or has an unresolved payment choice
    /// - [`ClientError::Invalid`] if any form field fails validation
    /// - any API error from the create call; the wizard stays on step 3
    #[instrument(skip_all)]
    pub async fn submit_at(
        &self,
        session: &WizardSession,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> ClientResult<SubmissionOutcome> {
        let _guard = session.begin_submission()?;

        let request = session.with_wizard(|w| w.finalize(today, now, self.auth.submitter()))?;
        info!(
            tracking_id = %request.tracking_id,
            method = %request.payment_method,
            cost = %request.cost(),
            "Submitting parcel"
        );

        let id = self.api.create_parcel(&request).await.map_err(|e| {
            error!(error = %e, tracking_id = %request.tracking_id, "Parcel create failed");
            e
        })?;
        info!(parcel_id = %id, tracking_id = %request.tracking_id, "Parcel created");

        let record = ParcelRecord {
            id,
            parcel: request,
        };

        if record.parcel.payment_method.is_online() {
            session.set_awaiting_choice(Some(record.id.clone()));
            return Ok(SubmissionOutcome::AwaitingPaymentChoice(PendingPayment {
                record,
            }));
        }

        session.complete(record.clone())?;
        Ok(SubmissionOutcome::Confirmed(record))
    }

    /// Applies the user's payment choice for a pending online booking.
    #[instrument(skip_all, fields(parcel_id = %pending.parcel_id(), choice = ?choice))]
    pub async fn resolve(
        &self,
        session: &WizardSession,
        pending: PendingPayment,
        choice: PaymentChoice,
    ) -> Result<PaymentResolution, ResolveFailure> {
        if session.awaiting_choice().as_deref() != Some(pending.parcel_id()) {
            let error = ClientError::NoPendingPayment(pending.parcel_id().to_string());
            return Err(ResolveFailure { pending, error });
        }
        let _guard = match session.begin_resolution() {
            Ok(guard) => guard,
            Err(error) => return Err(ResolveFailure { pending, error }),
        };

        match choice {
            PaymentChoice::PayNow => {
                let handoff = PaymentHandoff {
                    parcel_id: pending.parcel_id().to_string(),
                    amount: pending.amount(),
                    tracking_id: pending.tracking_id().clone(),
                    checkout_path: self.config.checkout_path_for(pending.parcel_id()),
                };
                self.finish(session, pending.record.clone(), &pending)?;
                info!(checkout = %handoff.checkout_path, "Handing off to payment page");
                Ok(PaymentResolution::Handoff(handoff))
            }
            PaymentChoice::PayOnPickup => {
                let update = PaymentUpdate::pay_on_pickup();
                if let Err(error) = self.api.update_payment(pending.parcel_id(), &update).await {
                    error!(error = %error, "Switching to pay-on-pickup failed");
                    return Err(ResolveFailure { pending, error });
                }
                let mut record = pending.record.clone();
                record.parcel.payment_method = PaymentMethod::Cash;
                record.parcel.payment_status = PaymentStatus::PayOnPickup;
                self.finish(session, record.clone(), &pending)?;
                info!("Parcel switched to pay on pickup");
                Ok(PaymentResolution::PayOnPickup(record))
            }
            PaymentChoice::Abandon => {
                warn!("Payment abandoned, deleting created parcel");
                if let Err(error) = self.api.delete_parcel(pending.parcel_id()).await {
                    error!(error = %error, "Deleting abandoned parcel failed");
                    return Err(ResolveFailure { pending, error });
                }
                session.set_awaiting_choice(None);
                Ok(PaymentResolution::Abandoned)
            }
        }
    }

    fn finish(
        &self,
        session: &WizardSession,
        record: ParcelRecord,
        pending: &PendingPayment,
    ) -> Result<(), ResolveFailure> {
        session.set_awaiting_choice(None);
        session.complete(record).map_err(|error| {
            session.set_awaiting_choice(Some(pending.parcel_id().to_string()));
            ResolveFailure {
                pending: pending.clone(),
                error,
            }
        })
    }

    // =========================================================================
    // Rider Applications
    // =========================================================================

    /// Validates and submits a rider application. Returns the stored id.
    #[instrument(skip_all)]
    pub async fn submit_rider_application(
        &self,
        application: RiderApplication,
    ) -> ClientResult<String> {
        let submission = application.into_submission(Utc::now())?;
        let id = self.api.submit_rider_application(&submission).await?;
        info!(application_id = %id, "Rider application submitted");
        Ok(id)
    }
}
