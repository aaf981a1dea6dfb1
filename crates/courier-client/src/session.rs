//! # Wizard Session
//!
//! One live send-parcel form: the [`Wizard`] plus the submission guard.
//!
//! ## Thread Safety
//! The wizard sits behind a `Mutex` that is only held for short synchronous
//! sections and never across an `.await`. Submission state lives outside
//! the mutex:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State                                        │
//! │                                                                         │
//! │  in_flight: AtomicBool        set while a create/patch/delete runs     │
//! │             └── SubmissionGuard clears it on drop (also on error)      │
//! │                                                                         │
//! │  awaiting_choice: Option<id>  set after an online-payment create until │
//! │                               the user picks pay-now/pickup/abandon    │
//! │                                                                         │
//! │  Either one set ⇒ submit and navigation fail with SubmissionInFlight   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use courier_core::{
    ParcelDraft, ParcelRecord, PriceBreakdown, StepTransition, Wizard, WizardStep,
};

use crate::error::{ClientError, ClientResult};

/// A send-parcel form instance.
#[derive(Debug, Default)]
pub struct WizardSession {
    wizard: Mutex<Wizard>,
    in_flight: AtomicBool,
    awaiting_choice: Mutex<Option<String>>,
}

impl WizardSession {
    /// A fresh form at step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form at step 1 with pre-filled fields.
    pub fn with_draft(draft: ParcelDraft) -> Self {
        WizardSession {
            wizard: Mutex::new(Wizard::with_draft(draft)),
            ..Self::default()
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Executes a function with read access to the wizard.
    pub fn with_wizard<R>(&self, f: impl FnOnce(&Wizard) -> R) -> R {
        f(&self.lock())
    }

    pub fn step(&self) -> WizardStep {
        self.with_wizard(Wizard::step)
    }

    pub fn draft(&self) -> ParcelDraft {
        self.with_wizard(|w| w.draft().clone())
    }

    pub fn price_preview(&self) -> PriceBreakdown {
        self.with_wizard(Wizard::price_preview)
    }

    pub fn confirmation(&self) -> Option<ParcelRecord> {
        self.with_wizard(|w| w.confirmation().cloned())
    }

    /// True while a request runs or a payment choice is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) || self.awaiting_choice().is_some()
    }

    /// Id of the created parcel whose payment choice is outstanding.
    pub fn awaiting_choice(&self) -> Option<String> {
        self.awaiting_choice
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Navigation & Editing
    // =========================================================================

    /// Mutates the draft.
    pub fn edit<R>(&self, f: impl FnOnce(&mut ParcelDraft) -> R) -> ClientResult<R> {
        self.ensure_idle()?;
        Ok(self.lock().edit(f)?)
    }

    pub fn next(&self, today: NaiveDate) -> ClientResult<StepTransition> {
        self.ensure_idle()?;
        Ok(self.lock().next(today)?)
    }

    pub fn previous(&self) -> ClientResult<WizardStep> {
        self.ensure_idle()?;
        Ok(self.lock().previous()?)
    }

    pub fn go_to(&self, step: WizardStep) -> ClientResult<()> {
        self.ensure_idle()?;
        Ok(self.lock().go_to(step)?)
    }

    /// Clears the form. Refused while a submission is running.
    pub fn start_over(&self) -> ClientResult<()> {
        self.ensure_idle()?;
        self.lock().start_over();
        Ok(())
    }

    // =========================================================================
    // Submission Support (orchestrator only)
    // =========================================================================

    /// Claims the session for a new submission.
    pub(crate) fn begin_submission(&self) -> ClientResult<SubmissionGuard<'_>> {
        if self.awaiting_choice().is_some() {
            return Err(ClientError::SubmissionInFlight);
        }
        self.acquire()
    }

    /// Claims the session to resolve an outstanding payment choice.
    pub(crate) fn begin_resolution(&self) -> ClientResult<SubmissionGuard<'_>> {
        self.acquire()
    }

    pub(crate) fn set_awaiting_choice(&self, parcel_id: Option<String>) {
        *self
            .awaiting_choice
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = parcel_id;
    }

    /// Moves the wizard to the confirmation step.
    pub(crate) fn complete(&self, record: ParcelRecord) -> ClientResult<()> {
        Ok(self.lock().complete(record)?)
    }

    fn acquire(&self) -> ClientResult<SubmissionGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::SubmissionInFlight)?;
        Ok(SubmissionGuard {
            flag: &self.in_flight,
        })
    }

    fn ensure_idle(&self) -> ClientResult<()> {
        if self.is_busy() {
            return Err(ClientError::SubmissionInFlight);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Wizard> {
        self.wizard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
pub(crate) struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::types::ParcelType;

    #[test]
    fn test_guard_is_exclusive_and_released_on_drop() {
        let session = WizardSession::new();
        let guard = session.begin_submission().unwrap();
        assert!(session.is_busy());
        assert!(matches!(
            session.begin_submission(),
            Err(ClientError::SubmissionInFlight)
        ));
        drop(guard);
        assert!(!session.is_busy());
        assert!(session.begin_submission().is_ok());
    }

    #[test]
    fn test_navigation_refused_while_busy() {
        let session = WizardSession::new();
        let _guard = session.begin_submission().unwrap();
        assert!(matches!(
            session.edit(|d| d.parcel_name = "x".into()),
            Err(ClientError::SubmissionInFlight)
        ));
        assert!(matches!(session.previous(), Err(ClientError::SubmissionInFlight)));
    }

    #[test]
    fn test_awaiting_choice_blocks_new_submission() {
        let session = WizardSession::new();
        session.set_awaiting_choice(Some("p-1".to_string()));
        assert!(matches!(
            session.begin_submission(),
            Err(ClientError::SubmissionInFlight)
        ));
        // Resolution is still possible
        assert!(session.begin_resolution().is_ok());

        session.set_awaiting_choice(None);
        assert!(session.begin_submission().is_ok());
    }

    #[test]
    fn test_edit_and_preview() {
        let session = WizardSession::new();
        session
            .edit(|d| {
                d.parcel_type = Some(ParcelType::Document);
                d.weight = "2".to_string();
                d.receiver.district = "Dhaka".to_string();
            })
            .unwrap();
        assert_eq!(session.price_preview().total.taka(), 130);
        assert_eq!(session.step(), WizardStep::ParcelInfo);
    }
}
