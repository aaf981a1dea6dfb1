//! # Validation Module
//!
//! Field rules and the per-step validator for the send-parcel form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Field rules (validate_name, validate_phone, ...)                      │
//! │  └── One value, one ValidationError                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Step validator (validate_step)                                        │
//! │  ├── Runs every rule for the fields of one wizard step                 │
//! │  └── Collects ALL failures into FormErrors<Field>                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Submission (validate_all)                                             │
//! │  └── Steps 1-3 merged; must be empty before finalizing                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators never panic. Empty input is reported as `Required`; text is
//! trimmed before every length or pattern check.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use ts_rs::TS;

use crate::coverage::{find_district, District};
use crate::error::ValidationError;
use crate::types::{ContactDraft, ParcelDraft};
use crate::weight::{Weight, MAX_WEIGHT_GRAMS, MIN_WEIGHT_GRAMS};
use crate::wizard::WizardStep;

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum length of a person's name.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum length of a street address.
pub const MIN_ADDRESS_LEN: usize = 10;

/// Local mobile numbers: `01`, an operator digit 3-9, then 8 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[3-9]\d{8}$").expect("valid phone regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

// =============================================================================
// Fields
// =============================================================================

/// Every input of the send-parcel form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // Step 1
    ParcelType,
    ParcelName,
    Weight,
    // Step 2
    SenderName,
    SenderPhone,
    SenderEmail,
    SenderAddress,
    SenderDistrict,
    PickupLocation,
    PickupDate,
    TimeSlot,
    // Step 3
    ReceiverName,
    ReceiverPhone,
    ReceiverEmail,
    ReceiverAddress,
    ReceiverDistrict,
    DeliveryLocation,
}

impl Field {
    /// Human label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::ParcelType => "parcel type",
            Field::ParcelName => "parcel name",
            Field::Weight => "weight",
            Field::SenderName => "sender name",
            Field::SenderPhone => "sender phone",
            Field::SenderEmail => "sender email",
            Field::SenderAddress => "sender address",
            Field::SenderDistrict => "sender district",
            Field::PickupLocation => "pickup location",
            Field::PickupDate => "pickup date",
            Field::TimeSlot => "time slot",
            Field::ReceiverName => "receiver name",
            Field::ReceiverPhone => "receiver phone",
            Field::ReceiverEmail => "receiver email",
            Field::ReceiverAddress => "receiver address",
            Field::ReceiverDistrict => "receiver district",
            Field::DeliveryLocation => "delivery location",
        }
    }

    /// The wizard step that owns this field.
    pub fn step(&self) -> WizardStep {
        match self {
            Field::ParcelType | Field::ParcelName | Field::Weight => WizardStep::ParcelInfo,
            Field::SenderName
            | Field::SenderPhone
            | Field::SenderEmail
            | Field::SenderAddress
            | Field::SenderDistrict
            | Field::PickupLocation
            | Field::PickupDate
            | Field::TimeSlot => WizardStep::SenderInfo,
            Field::ReceiverName
            | Field::ReceiverPhone
            | Field::ReceiverEmail
            | Field::ReceiverAddress
            | Field::ReceiverDistrict
            | Field::DeliveryLocation => WizardStep::ReceiverInfo,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// All failed fields of a form, at most one error per field.
///
/// Generic over the field enum so the parcel form and the rider application
/// share one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors<F: Ord> {
    errors: BTreeMap<F, ValidationError>,
}

/// Outcome of validating the parcel form (or one step of it).
pub type StepValidation = FormErrors<Field>;

impl<F: Ord> Default for FormErrors<F> {
    fn default() -> Self {
        FormErrors {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FormErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. The first error reported for a field wins.
    pub fn insert(&mut self, field: F, error: ValidationError) {
        self.errors.entry(field).or_insert(error);
    }

    /// Records the error of a failed rule; a passing rule is ignored.
    pub fn check<T>(&mut self, field: F, result: ValidationResult<T>) {
        if let Err(error) = result {
            self.insert(field, error);
        }
    }

    pub fn get(&self, field: F) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when no field failed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    /// Folds another set of errors into this one.
    pub fn merge(&mut self, other: FormErrors<F>) {
        for (field, error) in other.errors {
            self.insert(field, error);
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }

    /// `Ok(())` when valid, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<F: Ord> fmt::Display for FormErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.values().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

// =============================================================================
// Field Rules
// =============================================================================

/// Validates that a text field is present after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a required text field with a minimum length in characters.
///
/// ```rust
/// use courier_core::validation::validate_min_len;
///
/// assert!(validate_min_len("sender name", "Rahim", 3).is_ok());
/// assert!(validate_min_len("sender name", "Al", 3).is_err());
/// assert!(validate_min_len("sender name", "   ", 3).is_err());
/// ```
pub fn validate_min_len(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    validate_required(field, value)?;
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }
    Ok(())
}

/// Validates an 11-digit local mobile number (`01[3-9]XXXXXXXX`).
///
/// ```rust
/// use courier_core::validation::validate_phone;
///
/// assert!(validate_phone("phone", "01712345678").is_ok());
/// assert!(validate_phone("phone", "01212345678").is_err());
/// assert!(validate_phone("phone", "+8801712345678").is_err());
/// ```
pub fn validate_phone(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;
    if !PHONE_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected an 11-digit mobile number like 01XXXXXXXXX".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected an address like name@example.com".to_string(),
        });
    }
    Ok(())
}

/// Validates the weight text and returns the parsed weight.
///
/// ## Rules
/// - Must not be empty
/// - Must be a plain decimal in kilograms, at most 3 decimal places
/// - Must lie within 0.1–50 kg
pub fn validate_weight(value: &str) -> ValidationResult<Weight> {
    validate_required(Field::Weight.label(), value)?;
    let weight = Weight::parse_kg(value).ok_or_else(|| ValidationError::InvalidFormat {
        field: Field::Weight.label().to_string(),
        reason: "expected kilograms as a decimal number, e.g. 1.5".to_string(),
    })?;
    if !weight.is_within_limits() {
        return Err(ValidationError::OutOfRange {
            field: Field::Weight.label().to_string(),
            min: Weight::from_grams(MIN_WEIGHT_GRAMS).to_string(),
            max: Weight::from_grams(MAX_WEIGHT_GRAMS).to_string(),
        });
    }
    Ok(weight)
}

/// Validates that a district is selected and served.
pub fn validate_district(field: &str, value: &str) -> ValidationResult<&'static District> {
    validate_required(field, value)?;
    find_district(value).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a served district", value.trim()),
    })
}

/// Validates that a pickup date is chosen and not before `today`.
pub fn validate_pickup_date(date: Option<NaiveDate>, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let date = date.ok_or_else(|| ValidationError::Required {
        field: Field::PickupDate.label().to_string(),
    })?;
    if date < today {
        return Err(ValidationError::DateInPast {
            field: Field::PickupDate.label().to_string(),
        });
    }
    Ok(date)
}

/// Validates that an optional choice (parcel type, time slot) was made.
pub fn validate_chosen<T: Copy>(field: &str, value: Option<T>) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

// =============================================================================
// Step Validator
// =============================================================================

/// Validates the fields owned by one wizard step.
///
/// Returns every failure at once. The confirmation step owns no fields and
/// always validates clean.
///
/// ```rust
/// use chrono::NaiveDate;
/// use courier_core::types::ParcelDraft;
/// use courier_core::validation::{validate_step, Field};
/// use courier_core::wizard::WizardStep;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let errors = validate_step(WizardStep::ParcelInfo, &ParcelDraft::default(), today);
/// assert_eq!(errors.len(), 3);
/// assert!(errors.contains(Field::Weight));
/// ```
pub fn validate_step(step: WizardStep, draft: &ParcelDraft, today: NaiveDate) -> StepValidation {
    let mut errors = StepValidation::new();
    match step {
        WizardStep::ParcelInfo => {
            errors.check(
                Field::ParcelType,
                validate_chosen(Field::ParcelType.label(), draft.parcel_type),
            );
            errors.check(
                Field::ParcelName,
                validate_min_len(Field::ParcelName.label(), &draft.parcel_name, MIN_NAME_LEN),
            );
            errors.check(Field::Weight, validate_weight(&draft.weight));
        }
        WizardStep::SenderInfo => {
            check_contact(
                &mut errors,
                &draft.sender,
                [
                    Field::SenderName,
                    Field::SenderPhone,
                    Field::SenderEmail,
                    Field::SenderAddress,
                    Field::SenderDistrict,
                    Field::PickupLocation,
                ],
            );
            errors.check(
                Field::PickupDate,
                validate_pickup_date(draft.pickup_date, today),
            );
            errors.check(
                Field::TimeSlot,
                validate_chosen(Field::TimeSlot.label(), draft.time_slot),
            );
        }
        WizardStep::ReceiverInfo => {
            check_contact(
                &mut errors,
                &draft.receiver,
                [
                    Field::ReceiverName,
                    Field::ReceiverPhone,
                    Field::ReceiverEmail,
                    Field::ReceiverAddress,
                    Field::ReceiverDistrict,
                    Field::DeliveryLocation,
                ],
            );
        }
        WizardStep::Confirmation => {}
    }
    errors
}

/// Validates steps 1–3 together, as done right before submission.
pub fn validate_all(draft: &ParcelDraft, today: NaiveDate) -> StepValidation {
    let mut errors = StepValidation::new();
    for step in WizardStep::FORM_STEPS {
        errors.merge(validate_step(step, draft, today));
    }
    errors
}

/// `[name, phone, email, address, district, location]`
fn check_contact(errors: &mut StepValidation, contact: &ContactDraft, fields: [Field; 6]) {
    let [name, phone, email, address, district, location] = fields;
    errors.check(name, validate_min_len(name.label(), &contact.name, MIN_NAME_LEN));
    errors.check(phone, validate_phone(phone.label(), &contact.phone));
    errors.check(email, validate_email(email.label(), &contact.email));
    errors.check(
        address,
        validate_min_len(address.label(), &contact.address, MIN_ADDRESS_LEN),
    );
    errors.check(district, validate_district(district.label(), &contact.district));
    errors.check(location, validate_required(location.label(), &contact.location));
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParcelType, TimeSlot};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn contact(district: &str, location: &str) -> ContactDraft {
        ContactDraft {
            name: "Rahim Uddin".to_string(),
            phone: "01712345678".to_string(),
            email: "rahim@example.com".to_string(),
            address: "House 12, Road 5, Dhanmondi".to_string(),
            district: district.to_string(),
            location: location.to_string(),
            instructions: String::new(),
        }
    }

    fn complete_draft() -> ParcelDraft {
        ParcelDraft {
            parcel_type: Some(ParcelType::Document),
            parcel_name: "Contract papers".to_string(),
            weight: "2".to_string(),
            sender: contact("Dhaka", "Dhanmondi"),
            receiver: contact("Sylhet", "Zindabazar"),
            pickup_date: Some(today()),
            time_slot: Some(TimeSlot::Morning),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("phone", "01312345678").is_ok());
        assert!(validate_phone("phone", " 01912345678 ").is_ok());
        assert!(validate_phone("phone", "0171234567").is_err());
        assert!(validate_phone("phone", "017123456789").is_err());
        assert!(matches!(
            validate_phone("phone", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "a@b.co").is_ok());
        assert!(validate_email("email", "no-at-sign.com").is_err());
        assert!(validate_email("email", "a@b").is_err());
        assert!(validate_email("email", "a b@c.com").is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert_eq!(validate_weight("0.1"), Ok(Weight::from_grams(100)));
        assert_eq!(validate_weight("50"), Ok(Weight::from_grams(50_000)));
        assert!(matches!(
            validate_weight("0.05"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_weight("50.001"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_weight("heavy"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_weight(" "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_min_len_counts_characters() {
        // Three Bengali characters, nine bytes
        assert!(validate_min_len("name", "রহি", 3).is_ok());
        assert!(validate_min_len("address", "Short st", MIN_ADDRESS_LEN).is_err());
    }

    #[test]
    fn test_validate_pickup_date() {
        let yesterday = today().pred_opt().unwrap();
        assert_eq!(validate_pickup_date(Some(today()), today()), Ok(today()));
        assert!(matches!(
            validate_pickup_date(Some(yesterday), today()),
            Err(ValidationError::DateInPast { .. })
        ));
        assert!(matches!(
            validate_pickup_date(None, today()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_empty_draft_fails_every_step() {
        let draft = ParcelDraft::default();
        assert_eq!(validate_step(WizardStep::ParcelInfo, &draft, today()).len(), 3);
        assert_eq!(validate_step(WizardStep::SenderInfo, &draft, today()).len(), 8);
        assert_eq!(validate_step(WizardStep::ReceiverInfo, &draft, today()).len(), 6);
        assert!(validate_step(WizardStep::Confirmation, &draft, today()).is_valid());
        assert_eq!(validate_all(&draft, today()).len(), 17);
    }

    #[test]
    fn test_complete_draft_is_valid() {
        let draft = complete_draft();
        assert!(validate_all(&draft, today()).is_valid());
    }

    #[test]
    fn test_step_errors_belong_to_step() {
        let draft = ParcelDraft::default();
        for step in WizardStep::FORM_STEPS {
            for field in validate_step(step, &draft, today()).fields() {
                assert_eq!(field.step(), step);
            }
        }
    }

    #[test]
    fn test_unknown_district_rejected() {
        let mut draft = complete_draft();
        draft.receiver.district = "Gotham".to_string();
        let errors = validate_step(WizardStep::ReceiverInfo, &draft, today());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::ReceiverDistrict]);
        assert!(errors.to_string().contains("not a served district"));
    }

    #[test]
    fn test_form_errors_first_error_wins_and_merge() {
        let mut errors = StepValidation::new();
        errors.insert(
            Field::Weight,
            ValidationError::Required {
                field: "weight".to_string(),
            },
        );
        errors.insert(
            Field::Weight,
            ValidationError::TooShort {
                field: "weight".to_string(),
                min: 1,
            },
        );
        assert!(matches!(
            errors.get(Field::Weight),
            Some(ValidationError::Required { .. })
        ));

        let mut other = StepValidation::new();
        other.insert(
            Field::ParcelName,
            ValidationError::Required {
                field: "parcel name".to_string(),
            },
        );
        errors.merge(other);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "parcel name is required; weight is required"
        );
        assert!(errors.into_result().is_err());
        assert!(StepValidation::new().into_result().is_ok());
    }
}
