//! # Pricing Calculator
//!
//! The delivery charge is a pure function of four inputs.
//!
//! ## Tariff
//! ```text
//! ┌─────────────────┬───────────┬───────────────┐
//! │ Component       │ Document  │ Non-document  │
//! ├─────────────────┼───────────┼───────────────┤
//! │ Base            │ ৳50       │ ৳100          │
//! │ Per kg          │ ৳10       │ ৳20           │
//! ├─────────────────┴───────────┴───────────────┤
//! │ Delivery        near ৳60 · far ৳120 · none ৳0│
//! │ Insurance       ৳50 when opted in           │
//! └─────────────────────────────────────────────┘
//!
//! total = base + weight × per_kg + delivery + insurance
//! ```
//!
//! A parcel type that has not been chosen yet is priced at the non-document
//! rate, a missing or unparsable weight counts as zero, and no district
//! means no delivery charge. The live preview and the submitted price go
//! through the same function, so they always agree.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ParcelDraft, ParcelType};
use crate::weight::Weight;
use crate::zones::{zone_for, DeliveryZone};

pub const DOCUMENT_BASE: Money = Money::from_taka(50);
pub const NON_DOCUMENT_BASE: Money = Money::from_taka(100);
pub const DOCUMENT_PER_KG: Money = Money::from_taka(10);
pub const NON_DOCUMENT_PER_KG: Money = Money::from_taka(20);
pub const INSURANCE_FEE: Money = Money::from_taka(50);

/// Each component of a quote, for display next to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base: Money,
    pub weight_cost: Money,
    pub delivery_charge: Money,
    pub insurance: Money,
    pub total: Money,
    /// `None` while no receiver district is selected.
    pub zone: Option<DeliveryZone>,
}

/// Itemised quote.
pub fn quote(
    parcel_type: Option<ParcelType>,
    weight: Option<Weight>,
    receiver_district: Option<&str>,
    insurance: bool,
) -> PriceBreakdown {
    let (base, per_kg) = match parcel_type {
        Some(ParcelType::Document) => (DOCUMENT_BASE, DOCUMENT_PER_KG),
        Some(ParcelType::NonDocument) | None => (NON_DOCUMENT_BASE, NON_DOCUMENT_PER_KG),
    };
    let weight_cost = per_kg.per_kg_for(weight.unwrap_or_default());
    let zone = zone_for(receiver_district);
    let delivery_charge = zone.map(|z| z.charge()).unwrap_or_default();
    let insurance = if insurance {
        INSURANCE_FEE
    } else {
        Money::zero()
    };

    PriceBreakdown {
        base,
        weight_cost,
        delivery_charge,
        insurance,
        total: base + weight_cost + delivery_charge + insurance,
        zone,
    }
}

/// Total charge for a parcel.
///
/// ## Example
/// ```rust
/// use courier_core::money::Money;
/// use courier_core::pricing::compute_price;
/// use courier_core::types::ParcelType;
/// use courier_core::weight::Weight;
///
/// let price = compute_price(
///     Some(ParcelType::Document),
///     Some(Weight::from_grams(2_000)),
///     Some("Dhaka"),
///     false,
/// );
/// assert_eq!(price, Money::from_taka(130));
/// ```
pub fn compute_price(
    parcel_type: Option<ParcelType>,
    weight: Option<Weight>,
    receiver_district: Option<&str>,
    insurance: bool,
) -> Money {
    quote(parcel_type, weight, receiver_district, insurance).total
}

/// Quote for the current state of a form.
pub fn quote_draft(draft: &ParcelDraft) -> PriceBreakdown {
    quote(
        draft.parcel_type,
        draft.weight_value(),
        draft.receiver_district(),
        draft.insurance,
    )
}
