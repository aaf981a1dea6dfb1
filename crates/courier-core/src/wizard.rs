//! # Wizard Controller
//!
//! State machine behind the multi-step send-parcel form.
//!
//! ## States
//! ```text
//! ┌──────────────┐  next   ┌──────────────┐  next   ┌──────────────┐
//! │ 1 ParcelInfo │ ──────► │ 2 SenderInfo │ ──────► │3 ReceiverInfo│
//! │              │ ◄────── │              │ ◄────── │              │
//! └──────────────┘ previous└──────────────┘ previous└──────┬───────┘
//!        ▲                                                 │ complete(record)
//!        │                                                 ▼ (submission only)
//!        │            start_over               ┌──────────────────────┐
//!        └──────────────────────────────────── │ 4 Confirmation       │
//!                                              │ (read-only, terminal)│
//!                                              └──────────────────────┘
//! ```
//!
//! `next` gates every forward move on the step validator. Step 4 is never
//! reachable through navigation: only a successful submission calls
//! [`Wizard::complete`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, WizardError};
use crate::pricing::{quote_draft, PriceBreakdown};
use crate::tracking::TrackingId;
use crate::types::{
    Contact, ContactDraft, ParcelDraft, ParcelRecord, ParcelRequest, ParcelStatus, PaymentStatus,
    Submitter,
};
use crate::validation::{
    validate_all, validate_chosen, validate_district, validate_pickup_date, validate_step,
    validate_weight, Field,
};
use crate::zones::zone_for;

// =============================================================================
// Steps
// =============================================================================

/// A wizard step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    ParcelInfo,
    SenderInfo,
    ReceiverInfo,
    Confirmation,
}

impl WizardStep {
    /// The steps that carry form fields.
    pub const FORM_STEPS: [WizardStep; 3] = [
        WizardStep::ParcelInfo,
        WizardStep::SenderInfo,
        WizardStep::ReceiverInfo,
    ];

    /// 1-based step number as shown in the step indicator.
    pub const fn number(&self) -> u8 {
        match self {
            WizardStep::ParcelInfo => 1,
            WizardStep::SenderInfo => 2,
            WizardStep::ReceiverInfo => 3,
            WizardStep::Confirmation => 4,
        }
    }

    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::ParcelInfo),
            2 => Some(WizardStep::SenderInfo),
            3 => Some(WizardStep::ReceiverInfo),
            4 => Some(WizardStep::Confirmation),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::ParcelInfo => "Parcel information",
            WizardStep::SenderInfo => "Sender information",
            WizardStep::ReceiverInfo => "Receiver information",
            WizardStep::Confirmation => "Confirmation",
        }
    }

    fn following(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn preceding(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.title())
    }
}

/// Result of a successful `next`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTransition {
    pub from: WizardStep,
    pub to: WizardStep,
    /// Informational message for the user, e.g. the delivery charge tier.
    pub notice: Option<String>,
}

// =============================================================================
// Wizard
// =============================================================================

/// One instance of the send-parcel form.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    draft: ParcelDraft,
    confirmation: Option<ParcelRecord>,
}

impl Wizard {
    /// A wizard at step 1 with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// A wizard at step 1 with a pre-filled draft.
    pub fn with_draft(draft: ParcelDraft) -> Self {
        Wizard {
            draft,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ParcelDraft {
        &self.draft
    }

    /// The submitted record, once at step 4.
    pub fn confirmation(&self) -> Option<&ParcelRecord> {
        self.confirmation.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.step == WizardStep::Confirmation
    }

    /// Mutates the draft. Refused once the parcel is submitted.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut ParcelDraft) -> R) -> Result<R, WizardError> {
        self.ensure_editable()?;
        Ok(f(&mut self.draft))
    }

    /// Live price for the current draft.
    pub fn price_preview(&self) -> PriceBreakdown {
        quote_draft(&self.draft)
    }

    /// Validates the current step and advances by one.
    ///
    /// ## Errors
    /// - [`WizardError::StepInvalid`] with every failing field; the step is unchanged
    /// - [`WizardError::SubmitRequired`] at step 3
    /// - [`WizardError::AlreadySubmitted`] at step 4
    pub fn next(&mut self, today: NaiveDate) -> Result<StepTransition, WizardError> {
        self.ensure_editable()?;
        if self.step == WizardStep::ReceiverInfo {
            return Err(WizardError::SubmitRequired(self.step.number()));
        }

        let errors = validate_step(self.step, &self.draft, today);
        if !errors.is_valid() {
            return Err(WizardError::StepInvalid {
                step: self.step.number(),
                errors,
            });
        }

        let from = self.step;
        let to = from
            .following()
            .ok_or(WizardError::SubmitRequired(from.number()))?;
        self.step = to;

        let notice = if from == WizardStep::SenderInfo {
            self.zone_notice()
        } else {
            None
        };

        Ok(StepTransition { from, to, notice })
    }

    /// Moves back one step. A no-op at step 1.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        if let Some(prev) = self.step.preceding() {
            self.step = prev;
        }
        Ok(self.step)
    }

    /// Jumps to an already visited step via the step indicator.
    pub fn go_to(&mut self, requested: WizardStep) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if requested > self.step || requested == WizardStep::Confirmation {
            return Err(WizardError::StepLocked {
                requested: requested.number(),
                current: self.step.number(),
            });
        }
        self.step = requested;
        Ok(())
    }

    /// Builds the request body for the current draft.
    ///
    /// Runs the full validation, prices the draft with the same calculator
    /// as the live preview, and stamps tracking ID, timestamp and submitter.
    /// Only allowed from step 3.
    pub fn finalize(
        &self,
        today: NaiveDate,
        now: DateTime<Utc>,
        submitter: Submitter,
    ) -> CoreResult<ParcelRequest> {
        self.ensure_editable()?;
        if self.step != WizardStep::ReceiverInfo {
            return Err(WizardError::NotReadyToComplete(self.step.number()).into());
        }
        finalize_draft(&self.draft, today, now, submitter)
    }

    /// Moves to step 4 holding the submitted record. Only from step 3.
    pub fn complete(&mut self, record: ParcelRecord) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if self.step != WizardStep::ReceiverInfo {
            return Err(WizardError::NotReadyToComplete(self.step.number()));
        }
        self.step = WizardStep::Confirmation;
        self.confirmation = Some(record);
        Ok(())
    }

    /// Back to step 1 with a cleared draft.
    pub fn start_over(&mut self) {
        *self = Self::default();
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.is_submitted() {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    fn zone_notice(&self) -> Option<String> {
        let district = self.draft.receiver_district()?;
        let zone = zone_for(Some(district))?;
        Some(format!(
            "Delivery to {} is {}: {} delivery charge",
            district,
            zone,
            zone.charge()
        ))
    }
}

// =============================================================================
// Finalization
// =============================================================================

/// Turns a complete draft into the API request.
///
/// Every field is re-checked here so that a draft edited outside the wizard
/// can never produce a request with missing values.
pub fn finalize_draft(
    draft: &ParcelDraft,
    today: NaiveDate,
    now: DateTime<Utc>,
    submitter: Submitter,
) -> CoreResult<ParcelRequest> {
    let errors = validate_all(draft, today);
    if !errors.is_valid() {
        return Err(CoreError::InvalidForm(errors));
    }

    let parcel_type = validate_chosen(Field::ParcelType.label(), draft.parcel_type)?;
    let weight = validate_weight(&draft.weight)?;
    let pickup_date = validate_pickup_date(draft.pickup_date, today)?;
    let time_slot = validate_chosen(Field::TimeSlot.label(), draft.time_slot)?;
    let payment_method = draft.resolved_payment_method();
    let cost = quote_draft(draft).total;

    Ok(ParcelRequest {
        parcel_type,
        parcel_name: draft.parcel_name.trim().to_string(),
        weight,
        sender: finalize_contact(&draft.sender, Field::SenderDistrict)?,
        receiver: finalize_contact(&draft.receiver, Field::ReceiverDistrict)?,
        pickup_date,
        time_slot,
        insurance: draft.insurance,
        payment_method,
        payment_status: PaymentStatus::initial_for(payment_method),
        status: ParcelStatus::Pending,
        cost_poisha: cost.poisha(),
        tracking_id: TrackingId::generate(now),
        created_at: now,
        created_by: submitter,
    })
}

fn finalize_contact(contact: &ContactDraft, district_field: Field) -> CoreResult<Contact> {
    let district = validate_district(district_field.label(), &contact.district)?;
    let instructions = contact.instructions.trim();
    Ok(Contact {
        name: contact.name.trim().to_string(),
        phone: contact.phone.trim().to_string(),
        email: contact.email.trim().to_string(),
        address: contact.address.trim().to_string(),
        region: district.region,
        district: district.name.to_string(),
        location: contact.location.trim().to_string(),
        instructions: (!instructions.is_empty()).then(|| instructions.to_string()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
