//! # Delivery Zones
//!
//! Classifies a destination district into the near (metro) or far tariff
//! zone. Pure and total: any district not in the near-zone list, including
//! unknown names, is far-zone.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Districts billed at the metro tariff.
pub const NEAR_ZONE_DISTRICTS: [&str; 6] = [
    "Dhaka",
    "Gazipur",
    "Narayanganj",
    "Munshiganj",
    "Manikganj",
    "Narsingdi",
];

/// Delivery charge inside the metro cluster.
pub const NEAR_ZONE_CHARGE: Money = Money::from_taka(60);

/// Delivery charge everywhere else.
pub const FAR_ZONE_CHARGE: Money = Money::from_taka(120);

/// Tariff zone of a destination district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryZone {
    Near,
    Far,
}

impl DeliveryZone {
    /// Delivery charge for this zone.
    pub const fn charge(&self) -> Money {
        match self {
            DeliveryZone::Near => NEAR_ZONE_CHARGE,
            DeliveryZone::Far => FAR_ZONE_CHARGE,
        }
    }
}

impl fmt::Display for DeliveryZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryZone::Near => write!(f, "inside Dhaka metro"),
            DeliveryZone::Far => write!(f, "outside Dhaka metro"),
        }
    }
}

/// Returns true when the district is billed at the metro tariff.
///
/// ```rust
/// use courier_core::zones::is_near_zone;
///
/// assert!(is_near_zone("Dhaka"));
/// assert!(is_near_zone(" gazipur "));
/// assert!(!is_near_zone("Sylhet"));
/// assert!(!is_near_zone("Gotham"));
/// ```
pub fn is_near_zone(district: &str) -> bool {
    let district = district.trim();
    NEAR_ZONE_DISTRICTS
        .iter()
        .any(|near| near.eq_ignore_ascii_case(district))
}

/// Zone for a selected district, or `None` while nothing is selected.
pub fn zone_for(district: Option<&str>) -> Option<DeliveryZone> {
    let district = district.map(str::trim).filter(|d| !d.is_empty())?;
    Some(if is_near_zone(district) {
        DeliveryZone::Near
    } else {
        DeliveryZone::Far
    })
}
