//! Submission flow tests against a recording in-memory parcel API.

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use courier_client::{
    AuthContext, ClientConfig, ClientError, ClientResult, Dashboard, ParcelApi, PaymentChoice,
    PaymentResolution, SubmissionOrchestrator, SubmissionOutcome, WizardSession,
};
use courier_core::rider::{RiderApplication, RiderSubmission};
use courier_core::{
    ParcelRecord, ParcelRequest, ParcelStatus, PaymentMethod, PaymentRecord, PaymentStatus,
    PaymentUpdate, WizardStep,
};
use tokio::sync::Notify;

// =============================================================================
// RECORDING API
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(ParcelRequest),
    UpdatePayment(String, PaymentUpdate),
    Delete(String),
    ListParcels(String),
    RiderApplication(RiderSubmission),
}

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    fail_create: bool,
    fail_delete: bool,
    /// When set, `create_parcel` waits here before answering.
    hold_create: Option<Arc<Notify>>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable() -> ClientError {
        ClientError::Status {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl ParcelApi for RecordingApi {
    async fn create_parcel(&self, parcel: &ParcelRequest) -> ClientResult<String> {
        self.record(Call::Create(parcel.clone()));
        if let Some(gate) = &self.hold_create {
            gate.notified().await;
        }
        if self.fail_create {
            return Err(Self::unavailable());
        }
        Ok("665f1c".to_string())
    }

    async fn update_payment(&self, parcel_id: &str, update: &PaymentUpdate) -> ClientResult<()> {
        self.record(Call::UpdatePayment(parcel_id.to_string(), *update));
        Ok(())
    }

    async fn delete_parcel(&self, parcel_id: &str) -> ClientResult<()> {
        self.record(Call::Delete(parcel_id.to_string()));
        if self.fail_delete {
            return Err(Self::unavailable());
        }
        Ok(())
    }

    async fn list_parcels(&self, email: &str) -> ClientResult<Vec<ParcelRecord>> {
        self.record(Call::ListParcels(email.to_string()));
        let mut older = common::record("older");
        older.parcel.created_at = older.parcel.created_at - chrono::Duration::days(3);
        Ok(vec![older, common::record("newer")])
    }

    async fn get_parcel(&self, parcel_id: &str) -> ClientResult<ParcelRecord> {
        Err(ClientError::NotFound(format!("parcel {}", parcel_id)))
    }

    async fn payment_history(&self, _email: &str) -> ClientResult<Vec<PaymentRecord>> {
        Ok(Vec::new())
    }

    async fn submit_rider_application(&self, application: &RiderSubmission) -> ClientResult<String> {
        self.record(Call::RiderApplication(application.clone()));
        Ok("rider-1".to_string())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn orchestrator(api: &Arc<RecordingApi>, auth: AuthContext) -> SubmissionOrchestrator {
    SubmissionOrchestrator::new(api.clone(), auth, ClientConfig::default())
}

/// A session with a complete draft, advanced to step 3.
fn session_at_step3(method: Option<PaymentMethod>) -> WizardSession {
    let session = WizardSession::with_draft(common::complete_draft(method));
    session.next(common::today()).unwrap();
    session.next(common::today()).unwrap();
    assert_eq!(session.step(), WizardStep::ReceiverInfo);
    session
}

async fn submit(orch: &SubmissionOrchestrator, session: &WizardSession) -> ClientResult<SubmissionOutcome> {
    orch.submit_at(session, common::today(), common::now()).await
}

// =============================================================================
// CASH
// =============================================================================

#[tokio::test]
async fn test_cash_submit_creates_once_and_confirms() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::signed_in(common::user(), None));
    let session = session_at_step3(Some(PaymentMethod::Cash));

    let outcome = submit(&orch, &session).await.unwrap();
    let record = match outcome {
        SubmissionOutcome::Confirmed(record) => record,
        other => panic!("expected confirmation, got {other:?}"),
    };

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let Call::Create(sent) = &calls[0] else {
        panic!("expected create, got {:?}", calls[0]);
    };
    assert_eq!(sent.status, ParcelStatus::Pending);
    assert_eq!(sent.payment_status, PaymentStatus::PendingCash);
    assert_eq!(sent.cost().taka(), 130);
    assert_eq!(sent.created_by.email, "nadia@example.com");
    assert!(sent.tracking_id.as_str().starts_with("TRK-"));

    assert_eq!(record.id, "665f1c");
    assert_eq!(session.step(), WizardStep::Confirmation);
    assert_eq!(session.confirmation(), Some(record));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_missing_method_submits_as_cash_for_anonymous_user() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(None);

    let outcome = submit(&orch, &session).await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Confirmed(_)));

    let calls = api.calls();
    let Call::Create(sent) = &calls[0] else {
        panic!("expected create");
    };
    assert_eq!(sent.payment_method, PaymentMethod::Cash);
    assert!(sent.created_by.is_anonymous());
}

#[tokio::test]
async fn test_create_failure_keeps_step3_and_draft() {
    let api = Arc::new(RecordingApi {
        fail_create: true,
        ..Default::default()
    });
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::Cash));
    let draft_before = session.draft();

    let err = submit(&orch, &session).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(session.step(), WizardStep::ReceiverInfo);
    assert_eq!(session.draft(), draft_before);
    assert!(!session.is_busy());

    // No automatic retry
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_without_calls() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::Cash));
    session.edit(|d| d.receiver.phone = "12345".to_string()).unwrap();

    let err = submit(&orch, &session).await.unwrap_err();
    match err {
        ClientError::Invalid(errors) => {
            assert!(errors.contains(courier_core::Field::ReceiverPhone));
        }
        other => panic!("expected form errors, got {other:?}"),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_submit_from_step1_is_refused() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = WizardSession::with_draft(common::complete_draft(None));

    let err = submit(&orch, &session).await.unwrap_err();
    assert!(matches!(err, ClientError::Core(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_concurrent_submit_is_refused() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(RecordingApi {
        hold_create: Some(gate.clone()),
        ..Default::default()
    });
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = Arc::new(session_at_step3(Some(PaymentMethod::Cash)));

    let first = {
        let orch = orch.clone();
        let session = session.clone();
        tokio::spawn(async move { submit(&orch, &session).await })
    };

    // Wait until the first create is in flight
    while api.calls().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(session.is_busy());
    let second = submit(&orch, &session).await;
    assert!(matches!(second, Err(ClientError::SubmissionInFlight)));
    assert!(matches!(
        session.previous(),
        Err(ClientError::SubmissionInFlight)
    ));

    gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Confirmed(_)));
    assert_eq!(api.calls().len(), 1);
}

// =============================================================================
// ONLINE PAYMENT
// =============================================================================

#[tokio::test]
async fn test_card_then_abandon_deletes_created_parcel() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::Card));
    let draft_before = session.draft();

    let pending = match submit(&orch, &session).await.unwrap() {
        SubmissionOutcome::AwaitingPaymentChoice(pending) => pending,
        other => panic!("expected payment choice, got {other:?}"),
    };
    assert_eq!(pending.parcel_id(), "665f1c");
    assert_eq!(pending.method(), PaymentMethod::Card);
    assert!(session.is_busy());

    let resolution = orch
        .resolve(&session, pending, PaymentChoice::Abandon)
        .await
        .unwrap();
    assert_eq!(resolution, PaymentResolution::Abandoned);

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::Create(p) if p.payment_status == PaymentStatus::Pending));
    assert_eq!(calls[1], Call::Delete("665f1c".to_string()));

    assert_eq!(session.step(), WizardStep::ReceiverInfo);
    assert_eq!(session.draft(), draft_before);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_mobile_banking_pay_now_hands_off() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::MobileBanking));

    let SubmissionOutcome::AwaitingPaymentChoice(pending) = submit(&orch, &session).await.unwrap()
    else {
        panic!("expected payment choice");
    };
    let tracking_id = pending.tracking_id().clone();

    let resolution = orch
        .resolve(&session, pending, PaymentChoice::PayNow)
        .await
        .unwrap();
    let PaymentResolution::Handoff(handoff) = resolution else {
        panic!("expected handoff");
    };
    assert_eq!(handoff.checkout_path, "/dashboard/payment/665f1c");
    assert_eq!(handoff.amount.taka(), 130);
    assert_eq!(handoff.tracking_id, tracking_id);

    assert_eq!(api.calls().len(), 1);
    assert_eq!(session.step(), WizardStep::Confirmation);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_pay_on_pickup_patches_once() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::Card));

    let SubmissionOutcome::AwaitingPaymentChoice(pending) = submit(&orch, &session).await.unwrap()
    else {
        panic!("expected payment choice");
    };
    let resolution = orch
        .resolve(&session, pending, PaymentChoice::PayOnPickup)
        .await
        .unwrap();

    let PaymentResolution::PayOnPickup(record) = resolution else {
        panic!("expected pay on pickup");
    };
    assert_eq!(record.parcel.payment_method, PaymentMethod::Cash);
    assert_eq!(record.parcel.payment_status, PaymentStatus::PayOnPickup);

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        Call::UpdatePayment("665f1c".to_string(), PaymentUpdate::pay_on_pickup())
    );
    assert_eq!(session.confirmation(), Some(record));
}

#[tokio::test]
async fn test_failed_abandon_returns_pending_for_retry() {
    let api = Arc::new(RecordingApi {
        fail_delete: true,
        ..Default::default()
    });
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::Card));

    let SubmissionOutcome::AwaitingPaymentChoice(pending) = submit(&orch, &session).await.unwrap()
    else {
        panic!("expected payment choice");
    };
    let failure = orch
        .resolve(&session, pending, PaymentChoice::Abandon)
        .await
        .unwrap_err();
    assert!(failure.error.is_retryable());
    assert_eq!(failure.pending.parcel_id(), "665f1c");

    // Still waiting for a choice; a new submission is refused
    assert_eq!(session.awaiting_choice().as_deref(), Some("665f1c"));
    assert!(matches!(
        submit(&orch, &session).await,
        Err(ClientError::SubmissionInFlight)
    ));

    // Choosing again works
    let resolution = orch
        .resolve(&session, failure.pending, PaymentChoice::PayNow)
        .await
        .unwrap();
    assert!(matches!(resolution, PaymentResolution::Handoff(_)));
}

#[tokio::test]
async fn test_resolve_twice_is_refused() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());
    let session = session_at_step3(Some(PaymentMethod::Card));

    let SubmissionOutcome::AwaitingPaymentChoice(pending) = submit(&orch, &session).await.unwrap()
    else {
        panic!("expected payment choice");
    };
    orch.resolve(&session, pending.clone(), PaymentChoice::Abandon)
        .await
        .unwrap();

    let failure = orch
        .resolve(&session, pending, PaymentChoice::Abandon)
        .await
        .unwrap_err();
    assert!(matches!(failure.error, ClientError::NoPendingPayment(_)));
    assert_eq!(api.calls().len(), 2);
}

// =============================================================================
// RIDERS AND DASHBOARD
// =============================================================================

fn rider_application() -> RiderApplication {
    RiderApplication {
        name: "Jamal Hossain".to_string(),
        email: "jamal@example.com".to_string(),
        phone: "01912345678".to_string(),
        age: 27,
        region: "Chattogram".to_string(),
        district: "Cumilla".to_string(),
        national_id: "1234567890".to_string(),
        bike_brand: "Bajaj".to_string(),
        bike_registration: "CUMILLA-LA-12-3456".to_string(),
        note: None,
    }
}

#[tokio::test]
async fn test_rider_application_is_validated_before_post() {
    let api = Arc::new(RecordingApi::default());
    let orch = orchestrator(&api, AuthContext::anonymous());

    let mut bad = rider_application();
    bad.age = 16;
    let err = orch.submit_rider_application(bad).await.unwrap_err();
    assert!(err.is_validation_error());
    assert!(api.calls().is_empty());

    let id = orch
        .submit_rider_application(rider_application())
        .await
        .unwrap();
    assert_eq!(id, "rider-1");
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_dashboard_requires_sign_in_and_sorts_newest_first() {
    let api = Arc::new(RecordingApi::default());
    let auth = AuthContext::anonymous();
    let dashboard = Dashboard::new(api.clone(), auth.clone());

    assert!(matches!(
        dashboard.my_parcels().await,
        Err(ClientError::NotSignedIn)
    ));

    auth.sign_in(common::user(), None);
    let parcels = dashboard.my_parcels().await.unwrap();
    assert_eq!(parcels[0].id, "newer");
    assert_eq!(parcels[1].id, "older");
    assert_eq!(
        api.calls(),
        vec![Call::ListParcels("nadia@example.com".to_string())]
    );
}
