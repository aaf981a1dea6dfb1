//! # Domain Types
//!
//! Core domain types used throughout the courier workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   finalize    ┌─────────────────┐   POST /parcels  │
//! │  │  ParcelDraft    │ ────────────► │  ParcelRequest  │ ───────────────► │
//! │  │  (form state,   │               │  (typed payload,│                  │
//! │  │   raw text)     │               │   price, TRK id)│                  │
//! │  └─────────────────┘               └────────┬────────┘                  │
//! │                                             │ + API id                  │
//! │                                             ▼                           │
//! │                                    ┌─────────────────┐                  │
//! │                                    │  ParcelRecord   │ ◄── dashboard    │
//! │                                    └─────────────────┘                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ParcelType     │   │ PaymentMethod   │   │ PaymentStatus   │       │
//! │  │  Document       │   │  Cash           │   │  PendingCash    │       │
//! │  │  NonDocument    │   │  Card           │   │  Pending        │       │
//! │  └─────────────────┘   │  MobileBanking  │   │  PayOnPickup    │       │
//! │                        └─────────────────┘   │  Paid           │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All JSON field names are camelCase to match the parcel API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::coverage::Region;
use crate::money::Money;
use crate::tracking::TrackingId;
use crate::weight::Weight;

// =============================================================================
// Parcel Type
// =============================================================================

/// What is being shipped. Drives the base fare and the per-kg rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ParcelType {
    /// Papers and envelopes.
    Document,
    /// Everything else.
    NonDocument,
}

impl fmt::Display for ParcelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParcelType::Document => write!(f, "document"),
            ParcelType::NonDocument => write!(f, "non-document"),
        }
    }
}

impl std::str::FromStr for ParcelType {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" | "doc" => Ok(ParcelType::Document),
            "non-document" | "non_document" | "parcel" => Ok(ParcelType::NonDocument),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "parcel type".to_string(),
                allowed: vec!["document".to_string(), "non-document".to_string()],
            }),
        }
    }
}

// =============================================================================
// Payment Method / Status
// =============================================================================

/// How the sender intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash collected at pickup. Also the fallback when nothing was chosen.
    #[default]
    Cash,
    /// Online card payment.
    Card,
    /// Mobile financial service (bKash, Nagad, ...).
    MobileBanking,
}

impl PaymentMethod {
    /// Card and mobile banking go through the online payment branch.
    pub fn is_online(&self) -> bool {
        matches!(self, PaymentMethod::Card | PaymentMethod::MobileBanking)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::MobileBanking => write!(f, "mobile banking"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "mobile_banking" | "mobile" => Ok(PaymentMethod::MobileBanking),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec![
                    "cash".to_string(),
                    "card".to_string(),
                    "mobile_banking".to_string(),
                ],
            }),
        }
    }
}

/// Settlement state of a parcel's charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    /// Cash booking; collected at pickup.
    PendingCash,
    /// Online booking awaiting the pay-now / pay-on-pickup decision or checkout.
    Pending,
    /// Online booking switched to cash collection at pickup.
    PayOnPickup,
    /// Settled through the payment processor.
    Paid,
}

impl PaymentStatus {
    /// Initial status for a freshly submitted parcel.
    pub fn initial_for(method: PaymentMethod) -> Self {
        if method.is_online() {
            PaymentStatus::Pending
        } else {
            PaymentStatus::PendingCash
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::PendingCash => write!(f, "pending-cash"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::PayOnPickup => write!(f, "pay-on-pickup"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

// =============================================================================
// Parcel Status
// =============================================================================

/// Delivery lifecycle as reported by the API. Client submissions always start
/// at `Pending`; later states are set by operations staff and riders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ParcelStatus {
    #[default]
    Pending,
    RiderAssigned,
    InTransit,
    Delivered,
    Cancelled,
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParcelStatus::Pending => "pending",
            ParcelStatus::RiderAssigned => "rider assigned",
            ParcelStatus::InTransit => "in transit",
            ParcelStatus::Delivered => "delivered",
            ParcelStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Time Slot
// =============================================================================

/// The four fixed pickup windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimeSlot {
    #[serde(rename = "09:00-12:00")]
    Morning,
    #[serde(rename = "12:00-15:00")]
    Midday,
    #[serde(rename = "15:00-18:00")]
    Afternoon,
    #[serde(rename = "18:00-21:00")]
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    /// Wire value, e.g. `"09:00-12:00"`.
    pub fn window(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "09:00-12:00",
            TimeSlot::Midday => "12:00-15:00",
            TimeSlot::Afternoon => "15:00-18:00",
            TimeSlot::Evening => "18:00-21:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.window())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.window() == s || format!("{:?}", slot).to_lowercase() == s)
            .ok_or_else(|| crate::error::ValidationError::NotAllowed {
                field: "time slot".to_string(),
                allowed: TimeSlot::ALL.iter().map(|t| t.window().to_string()).collect(),
            })
    }
}

// =============================================================================
// Form State
// =============================================================================

/// One side of the shipment as typed into the form.
///
/// `location` is the pickup point on the sender side and the delivery point
/// on the receiver side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub district: String,
    pub location: String,
    pub instructions: String,
}

/// The send-parcel form state. Created empty when the wizard mounts and
/// mutated field by field; everything stays raw text until finalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ParcelDraft {
    pub parcel_type: Option<ParcelType>,
    pub parcel_name: String,
    /// Kilograms as typed, e.g. `"1.5"`.
    pub weight: String,
    pub sender: ContactDraft,
    pub receiver: ContactDraft,
    #[ts(as = "Option<String>")]
    pub pickup_date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub insurance: bool,
    pub payment_method: Option<PaymentMethod>,
}

impl ParcelDraft {
    /// Parsed weight, or `None` when the text is empty or not a decimal.
    pub fn weight_value(&self) -> Option<Weight> {
        Weight::parse_kg(&self.weight)
    }

    /// The receiver district if one has been selected.
    pub fn receiver_district(&self) -> Option<&str> {
        let district = self.receiver.district.trim();
        (!district.is_empty()).then_some(district)
    }

    /// Payment method with the cash fallback applied.
    pub fn resolved_payment_method(&self) -> PaymentMethod {
        self.payment_method.unwrap_or_default()
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The signed-in user as supplied by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Who submitted a parcel. Anonymous submissions are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Submitter {
    pub uid: Option<String>,
    pub email: String,
    pub display_name: Option<String>,
}

/// Email stamped on submissions made without a signed-in user.
pub const ANONYMOUS: &str = "anonymous";

impl Submitter {
    pub fn anonymous() -> Self {
        Submitter {
            uid: None,
            email: ANONYMOUS.to_string(),
            display_name: None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.uid.is_none()
    }
}

impl From<Option<&UserIdentity>> for Submitter {
    fn from(user: Option<&UserIdentity>) -> Self {
        match user {
            Some(user) => Submitter {
                uid: Some(user.uid.clone()),
                email: user.email.clone(),
                display_name: user.display_name.clone(),
            },
            None => Submitter::anonymous(),
        }
    }
}

// =============================================================================
// Finalized Payloads
// =============================================================================

/// One side of the shipment after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub region: Region,
    pub district: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// The body of `POST /parcels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRequest {
    pub parcel_type: ParcelType,
    pub parcel_name: String,
    /// Kilograms on the wire.
    #[ts(type = "number")]
    pub weight: Weight,
    pub sender: Contact,
    pub receiver: Contact,
    #[ts(as = "String")]
    pub pickup_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub insurance: bool,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: ParcelStatus,
    /// Total charge in poisha.
    pub cost_poisha: i64,
    #[ts(as = "String")]
    pub tracking_id: TrackingId,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub created_by: Submitter,
}

impl ParcelRequest {
    /// Returns the charge as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_poisha(self.cost_poisha)
    }
}

/// A parcel as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub parcel: ParcelRequest,
}

/// The body of `PATCH /parcels/:id/payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

impl PaymentUpdate {
    /// Switches an online booking to cash collected at pickup.
    pub const fn pay_on_pickup() -> Self {
        PaymentUpdate {
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::PayOnPickup,
        }
    }
}

/// A settled payment as listed in the payment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub parcel_id: String,
    #[serde(default)]
    pub tracking_id: Option<String>,
    pub amount_poisha: i64,
    pub transaction_id: String,
    pub email: String,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

impl PaymentRecord {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_poisha(self.amount_poisha)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
