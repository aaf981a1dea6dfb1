//! # Send Command
//!
//! Interactive send-parcel wizard in the terminal.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Step 1: Parcel information   type, name, weight ── live price         │
//! │          │ next (validated)                                             │
//! │          ▼                                                              │
//! │  Step 2: Sender information   contact, pickup date, time slot          │
//! │          │ next (validated) ── zone notice                              │
//! │          ▼                                                              │
//! │  Step 3: Receiver information contact, insurance, payment method       │
//! │          │ review ── submit / edit / back / cancel                      │
//! │          ▼                                                              │
//! │  cash ─────────────────────────────────────────► Step 4: Confirmation  │
//! │  card / mobile banking ── pay now / on pickup ─► Step 4: Confirmation  │
//! │                       └── cancel booking ──────► Step 3 (form kept)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::io::{BufRead, Write};

use chrono::{NaiveDate, Utc};
use courier_client::{
    ClientError, PaymentChoice, PaymentResolution, PendingPayment, SubmissionOrchestrator,
    SubmissionOutcome, WizardSession,
};
use courier_core::{
    ContactDraft, CoreError, ParcelRecord, StepValidation, TimeSlot, WizardError, WizardStep,
};
use tracing::{debug, warn};

use super::Context;
use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;

/// Runs the wizard until the parcel is confirmed or the user cancels.
pub async fn run<R: BufRead, W: Write>(
    ctx: &Context,
    prompt: &mut Prompter<R, W>,
    today: NaiveDate,
) -> AppResult<ParcelRecord> {
    let session = WizardSession::new();
    let orchestrator = ctx.orchestrator();

    loop {
        let step = session.step();
        debug!(step = step.number(), "Wizard step");
        if step != WizardStep::Confirmation {
            writeln!(prompt.out(), "\n== {} ==", step)?;
        }

        match step {
            WizardStep::ParcelInfo => {
                parcel_info(prompt, &session)?;
                advance(prompt, &session, today)?;
            }
            WizardStep::SenderInfo => {
                sender_info(prompt, &session)?;
                advance(prompt, &session, today)?;
            }
            WizardStep::ReceiverInfo => {
                receiver_info(prompt, &session)?;
                review(ctx, &orchestrator, prompt, &session, today).await?;
            }
            WizardStep::Confirmation => {
                let record = session
                    .confirmation()
                    .ok_or_else(|| AppError::internal("confirmation step without a record"))?;
                print_confirmation(prompt.out(), &record)?;
                return Ok(record);
            }
        }
    }
}

// =============================================================================
// Steps
// =============================================================================

fn parcel_info<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
) -> AppResult<()> {
    let draft = session.draft();
    let parcel_type = prompt.parsed("Parcel type (document / non-document)", draft.parcel_type)?;
    let name = prompt.text("Parcel name", &draft.parcel_name)?;
    let weight = prompt.text("Weight in kg (0.1 - 50)", &draft.weight)?;
    session.edit(|d| {
        d.parcel_type = Some(parcel_type);
        d.parcel_name = name;
        d.weight = weight;
    })?;
    writeln!(prompt.out(), "Price so far: {}", session.price_preview().total)?;
    Ok(())
}

fn sender_info<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
) -> AppResult<()> {
    let draft = session.draft();
    let sender = contact(prompt, &draft.sender, "Pickup location")?;
    let pickup_date: NaiveDate = prompt.parsed("Pickup date (YYYY-MM-DD)", draft.pickup_date)?;
    let slots = TimeSlot::ALL
        .iter()
        .map(TimeSlot::window)
        .collect::<Vec<_>>()
        .join(", ");
    let time_slot = prompt.parsed(&format!("Time slot ({})", slots), draft.time_slot)?;
    session.edit(|d| {
        d.sender = sender;
        d.pickup_date = Some(pickup_date);
        d.time_slot = Some(time_slot);
    })?;
    Ok(())
}

fn receiver_info<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
) -> AppResult<()> {
    let draft = session.draft();
    let receiver = contact(prompt, &draft.receiver, "Delivery location")?;
    session.edit(|d| d.receiver = receiver)?;

    let preview = session.price_preview();
    if let Some(zone) = preview.zone {
        writeln!(prompt.out(), "Delivery charge: {} ({})", zone.charge(), zone)?;
    }

    let insurance = prompt.confirm("Add insurance (৳50.00)?", draft.insurance)?;
    let method = prompt.parsed(
        "Payment method (cash / card / mobile banking)",
        Some(draft.resolved_payment_method()),
    )?;
    session.edit(|d| {
        d.insurance = insurance;
        d.payment_method = Some(method);
    })?;
    Ok(())
}

fn contact<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    current: &ContactDraft,
    location_label: &str,
) -> std::io::Result<ContactDraft> {
    Ok(ContactDraft {
        name: prompt.text("Name", &current.name)?,
        phone: prompt.text("Phone (01XXXXXXXXX)", &current.phone)?,
        email: prompt.text("Email", &current.email)?,
        address: prompt.text("Address", &current.address)?,
        district: prompt.text("District", &current.district)?,
        location: prompt.text(location_label, &current.location)?,
        instructions: prompt.text("Instructions (optional)", &current.instructions)?,
    })
}

/// Validates the current step and moves forward, or prints the errors.
fn advance<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
    today: NaiveDate,
) -> AppResult<()> {
    match session.next(today) {
        Ok(transition) => {
            if let Some(notice) = transition.notice {
                writeln!(prompt.out(), "{}", notice)?;
            }
            Ok(())
        }
        Err(ClientError::Core(CoreError::Wizard(WizardError::StepInvalid { errors, .. }))) => {
            print_errors(prompt.out(), &errors)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Review & Submission
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewAction {
    Submit,
    EditReceiver,
    Back,
    Cancel,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewAction::Submit => "Submit",
            ReviewAction::EditReceiver => "Edit receiver information",
            ReviewAction::Back => "Back to sender information",
            ReviewAction::Cancel => "Cancel",
        })
    }
}

const REVIEW_ACTIONS: [ReviewAction; 4] = [
    ReviewAction::Submit,
    ReviewAction::EditReceiver,
    ReviewAction::Back,
    ReviewAction::Cancel,
];

async fn review<R: BufRead, W: Write>(
    ctx: &Context,
    orchestrator: &SubmissionOrchestrator,
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
    today: NaiveDate,
) -> AppResult<()> {
    let preview = session.price_preview();
    writeln!(prompt.out(), "\nTotal: {}", preview.total)?;

    match prompt.choose("Review", &REVIEW_ACTIONS)? {
        ReviewAction::Submit => submit(ctx, orchestrator, prompt, session, today).await,
        ReviewAction::EditReceiver => Ok(()),
        ReviewAction::Back => {
            session.previous()?;
            Ok(())
        }
        ReviewAction::Cancel => Err(AppError::cancelled()),
    }
}

async fn submit<R: BufRead, W: Write>(
    ctx: &Context,
    orchestrator: &SubmissionOrchestrator,
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
    today: NaiveDate,
) -> AppResult<()> {
    loop {
        match orchestrator.submit_at(session, today, Utc::now()).await {
            Ok(SubmissionOutcome::Confirmed(_)) => return Ok(()),
            Ok(SubmissionOutcome::AwaitingPaymentChoice(pending)) => {
                return choose_payment(ctx, orchestrator, prompt, session, pending).await;
            }
            Err(ClientError::Invalid(errors)) => {
                print_errors(prompt.out(), &errors)?;
                if let Some(step) = errors.fields().next().map(|f| f.step()) {
                    session.go_to(step)?;
                }
                return Ok(());
            }
            Err(e) => {
                writeln!(prompt.out(), "Could not submit: {}", e)?;
                if !prompt.confirm("Try again?", e.is_retryable())? {
                    // Still on receiver information with the form intact
                    return Ok(());
                }
            }
        }
    }
}

async fn choose_payment<R: BufRead, W: Write>(
    ctx: &Context,
    orchestrator: &SubmissionOrchestrator,
    prompt: &mut Prompter<R, W>,
    session: &WizardSession,
    mut pending: PendingPayment,
) -> AppResult<()> {
    loop {
        writeln!(
            prompt.out(),
            "\nParcel {} saved. {} due by {}.",
            pending.tracking_id(),
            pending.amount(),
            pending.method()
        )?;
        let choice = match prompt.choose("How would you like to pay?", &PaymentChoice::ALL) {
            Ok(choice) => choice,
            Err(e) => {
                withdraw(orchestrator, session, pending).await;
                return Err(e.into());
            }
        };

        match orchestrator.resolve(session, pending, choice).await {
            Ok(PaymentResolution::Handoff(handoff)) => {
                writeln!(
                    prompt.out(),
                    "Continue payment of {} at {}{}",
                    handoff.amount,
                    ctx.config.base_url().trim_end_matches('/'),
                    handoff.checkout_path
                )?;
                return Ok(());
            }
            Ok(PaymentResolution::PayOnPickup(_)) => {
                writeln!(prompt.out(), "Pay the rider in cash at pickup.")?;
                return Ok(());
            }
            Ok(PaymentResolution::Abandoned) => {
                writeln!(prompt.out(), "Booking cancelled. Your form is unchanged.")?;
                return Ok(());
            }
            Err(failure) => {
                writeln!(prompt.out(), "Could not apply choice: {}", failure.error)?;
                if failure.error.is_retryable() {
                    pending = failure.pending;
                    continue;
                }
                if choice != PaymentChoice::Abandon {
                    withdraw(orchestrator, session, failure.pending).await;
                }
                return Err(failure.error.into());
            }
        }
    }
}

/// Deletes a saved booking the user walked away from before choosing how to pay.
async fn withdraw(
    orchestrator: &SubmissionOrchestrator,
    session: &WizardSession,
    pending: PendingPayment,
) {
    let parcel_id = pending.parcel_id().to_string();
    match orchestrator
        .resolve(session, pending, PaymentChoice::Abandon)
        .await
    {
        Ok(_) => debug!(%parcel_id, "Unpaid booking withdrawn"),
        Err(failure) => warn!(
            %parcel_id,
            error = %failure.error,
            "Could not withdraw unpaid booking"
        ),
    }
}

// =============================================================================
// Output
// =============================================================================

fn print_errors(out: &mut impl Write, errors: &StepValidation) -> std::io::Result<()> {
    for (_, error) in errors.iter() {
        writeln!(out, "  ✗ {}", error)?;
    }
    Ok(())
}

fn print_confirmation(out: &mut impl Write, record: &ParcelRecord) -> std::io::Result<()> {
    let parcel = &record.parcel;
    writeln!(out, "\n== {} ==", WizardStep::Confirmation)?;
    writeln!(out, "Tracking ID:    {}", parcel.tracking_id)?;
    writeln!(out, "Parcel:         {} ({}, {})", parcel.parcel_name, parcel.parcel_type, parcel.weight)?;
    writeln!(out, "From:           {}, {}", parcel.sender.name, parcel.sender.district)?;
    writeln!(out, "To:             {}, {}", parcel.receiver.name, parcel.receiver.district)?;
    writeln!(out, "Pickup:         {} {}", parcel.pickup_date, parcel.time_slot)?;
    writeln!(out, "Cost:           {}", parcel.cost())?;
    writeln!(out, "Payment:        {} ({})", parcel.payment_method, parcel.payment_status)?;
    writeln!(out, "Status:         {}", parcel.status)
}
