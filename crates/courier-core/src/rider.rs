//! # Rider Applications
//!
//! Validation and payload for the "Be a rider" form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::coverage::Region;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::{
    validate_district, validate_email, validate_min_len, validate_phone, validate_required,
    FormErrors, ValidationResult, MIN_NAME_LEN,
};

pub const MIN_RIDER_AGE: u8 = 18;
pub const MAX_RIDER_AGE: u8 = 60;

/// Accepted national ID lengths (old 13/17-digit and smart-card 10-digit).
pub const NATIONAL_ID_LENGTHS: [usize; 3] = [10, 13, 17];

/// Inputs of the rider application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum RiderField {
    Name,
    Email,
    Phone,
    Age,
    Region,
    District,
    NationalId,
    BikeBrand,
    BikeRegistration,
}

impl RiderField {
    pub fn label(&self) -> &'static str {
        match self {
            RiderField::Name => "name",
            RiderField::Email => "email",
            RiderField::Phone => "phone",
            RiderField::Age => "age",
            RiderField::Region => "region",
            RiderField::District => "district",
            RiderField::NationalId => "national ID",
            RiderField::BikeBrand => "bike brand",
            RiderField::BikeRegistration => "bike registration number",
        }
    }
}

impl fmt::Display for RiderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type RiderValidation = FormErrors<RiderField>;

/// Review state of an application. New applications are always `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// The rider application form as filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RiderApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u8,
    pub region: String,
    pub district: String,
    pub national_id: String,
    pub bike_brand: String,
    pub bike_registration: String,
    pub note: Option<String>,
}

/// The body of `POST /riders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RiderSubmission {
    #[serde(flatten)]
    #[ts(flatten)]
    pub application: RiderApplication,
    pub status: RiderStatus,
    #[ts(as = "String")]
    pub applied_at: DateTime<Utc>,
}

/// Checks every rider field and reports all failures.
pub fn validate_rider_application(app: &RiderApplication) -> RiderValidation {
    let mut errors = RiderValidation::new();
    errors.check(
        RiderField::Name,
        validate_min_len(RiderField::Name.label(), &app.name, MIN_NAME_LEN),
    );
    errors.check(RiderField::Email, validate_email(RiderField::Email.label(), &app.email));
    errors.check(RiderField::Phone, validate_phone(RiderField::Phone.label(), &app.phone));
    errors.check(RiderField::Age, validate_age(app.age));
    errors.check(RiderField::NationalId, validate_national_id(&app.national_id));
    errors.check(
        RiderField::BikeBrand,
        validate_required(RiderField::BikeBrand.label(), &app.bike_brand),
    );
    errors.check(
        RiderField::BikeRegistration,
        validate_required(RiderField::BikeRegistration.label(), &app.bike_registration),
    );

    let region = validate_required(RiderField::Region.label(), &app.region)
        .and_then(|()| app.region.parse::<Region>());
    let district = validate_district(RiderField::District.label(), &app.district);

    match (region, district) {
        (Ok(region), Ok(district)) if district.region != region => errors.insert(
            RiderField::District,
            ValidationError::Inconsistent {
                field: RiderField::District.label().to_string(),
                reason: format!("{} is in {}, not {}", district.name, district.region, region),
            },
        ),
        (region, district) => {
            errors.check(RiderField::Region, region);
            errors.check(RiderField::District, district);
        }
    }

    errors
}

fn validate_age(age: u8) -> ValidationResult<()> {
    if !(MIN_RIDER_AGE..=MAX_RIDER_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: RiderField::Age.label().to_string(),
            min: MIN_RIDER_AGE.to_string(),
            max: MAX_RIDER_AGE.to_string(),
        });
    }
    Ok(())
}

fn validate_national_id(value: &str) -> ValidationResult<()> {
    let field = RiderField::NationalId.label();
    validate_required(field, value)?;
    let value = value.trim();
    if !value.bytes().all(|b| b.is_ascii_digit()) || !NATIONAL_ID_LENGTHS.contains(&value.len()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected 10, 13 or 17 digits".to_string(),
        });
    }
    Ok(())
}

impl RiderApplication {
    /// Validates the form and stamps it for submission.
    pub fn into_submission(self, now: DateTime<Utc>) -> CoreResult<RiderSubmission> {
        let errors = validate_rider_application(&self);
        if !errors.is_valid() {
            return Err(CoreError::InvalidRiderApplication(errors));
        }
        Ok(RiderSubmission {
            application: self,
            status: RiderStatus::Pending,
            applied_at: now,
        })
    }
}
