//! # Coverage Catalog
//!
//! The static list of districts the service delivers to, grouped by region
//! (administrative division). Backs the district pickers in the send-parcel
//! form, the coverage search, and the rider application's region check.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Region       │ Districts                                                │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ Dhaka        │ 13 (incl. the metro near-zone cluster)                   │
//! │ Chattogram   │ 11                                                       │
//! │ Khulna       │ 10                                                       │
//! │ Rajshahi     │  8                                                       │
//! │ Rangpur      │  8                                                       │
//! │ Barishal     │  6                                                       │
//! │ Sylhet       │  4                                                       │
//! │ Mymensingh   │  4                                                       │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Region
// =============================================================================

/// An administrative division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Region {
    Dhaka,
    Chattogram,
    Rajshahi,
    Khulna,
    Barishal,
    Sylhet,
    Rangpur,
    Mymensingh,
}

impl Region {
    /// All regions in display order.
    pub const ALL: [Region; 8] = [
        Region::Dhaka,
        Region::Chattogram,
        Region::Rajshahi,
        Region::Khulna,
        Region::Barishal,
        Region::Sylhet,
        Region::Rangpur,
        Region::Mymensingh,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::Dhaka => "Dhaka",
            Region::Chattogram => "Chattogram",
            Region::Rajshahi => "Rajshahi",
            Region::Khulna => "Khulna",
            Region::Barishal => "Barishal",
            Region::Sylhet => "Sylhet",
            Region::Rangpur => "Rangpur",
            Region::Mymensingh => "Mymensingh",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "region".to_string(),
                allowed: Region::ALL.iter().map(|r| r.name().to_string()).collect(),
            })
    }
}

// =============================================================================
// District
// =============================================================================

/// A served district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct District {
    pub name: &'static str,
    pub region: Region,
}

const fn d(name: &'static str, region: Region) -> District {
    District { name, region }
}

/// Every served district.
pub static DISTRICTS: [District; 64] = [
    // Dhaka
    d("Dhaka", Region::Dhaka),
    d("Faridpur", Region::Dhaka),
    d("Gazipur", Region::Dhaka),
    d("Gopalganj", Region::Dhaka),
    d("Kishoreganj", Region::Dhaka),
    d("Madaripur", Region::Dhaka),
    d("Manikganj", Region::Dhaka),
    d("Munshiganj", Region::Dhaka),
    d("Narayanganj", Region::Dhaka),
    d("Narsingdi", Region::Dhaka),
    d("Rajbari", Region::Dhaka),
    d("Shariatpur", Region::Dhaka),
    d("Tangail", Region::Dhaka),
    // Chattogram
    d("Bandarban", Region::Chattogram),
    d("Brahmanbaria", Region::Chattogram),
    d("Chandpur", Region::Chattogram),
    d("Chattogram", Region::Chattogram),
    d("Cox's Bazar", Region::Chattogram),
    d("Cumilla", Region::Chattogram),
    d("Feni", Region::Chattogram),
    d("Khagrachhari", Region::Chattogram),
    d("Lakshmipur", Region::Chattogram),
    d("Noakhali", Region::Chattogram),
    d("Rangamati", Region::Chattogram),
    // Rajshahi
    d("Bogura", Region::Rajshahi),
    d("Chapainawabganj", Region::Rajshahi),
    d("Joypurhat", Region::Rajshahi),
    d("Naogaon", Region::Rajshahi),
    d("Natore", Region::Rajshahi),
    d("Pabna", Region::Rajshahi),
    d("Rajshahi", Region::Rajshahi),
    d("Sirajganj", Region::Rajshahi),
    // Khulna
    d("Bagerhat", Region::Khulna),
    d("Chuadanga", Region::Khulna),
    d("Jashore", Region::Khulna),
    d("Jhenaidah", Region::Khulna),
    d("Khulna", Region::Khulna),
    d("Kushtia", Region::Khulna),
    d("Magura", Region::Khulna),
    d("Meherpur", Region::Khulna),
    d("Narail", Region::Khulna),
    d("Satkhira", Region::Khulna),
    // Barishal
    d("Barguna", Region::Barishal),
    d("Barishal", Region::Barishal),
    d("Bhola", Region::Barishal),
    d("Jhalokathi", Region::Barishal),
    d("Patuakhali", Region::Barishal),
    d("Pirojpur", Region::Barishal),
    // Sylhet
    d("Habiganj", Region::Sylhet),
    d("Moulvibazar", Region::Sylhet),
    d("Sunamganj", Region::Sylhet),
    d("Sylhet", Region::Sylhet),
    // Rangpur
    d("Dinajpur", Region::Rangpur),
    d("Gaibandha", Region::Rangpur),
    d("Kurigram", Region::Rangpur),
    d("Lalmonirhat", Region::Rangpur),
    d("Nilphamari", Region::Rangpur),
    d("Panchagarh", Region::Rangpur),
    d("Rangpur", Region::Rangpur),
    d("Thakurgaon", Region::Rangpur),
    // Mymensingh
    d("Jamalpur", Region::Mymensingh),
    d("Mymensingh", Region::Mymensingh),
    d("Netrokona", Region::Mymensingh),
    d("Sherpur", Region::Mymensingh),
];

// =============================================================================
// Lookups
// =============================================================================

/// Finds a served district by name (case-insensitive, whitespace-trimmed).
pub fn find_district(name: &str) -> Option<&'static District> {
    let wanted = name.trim();
    if wanted.is_empty() {
        return None;
    }
    DISTRICTS.iter().find(|d| d.name.eq_ignore_ascii_case(wanted))
}

/// All districts in a region, in catalog order.
pub fn districts_in(region: Region) -> impl Iterator<Item = &'static District> {
    DISTRICTS.iter().filter(move |d| d.region == region)
}

/// All regions in display order.
pub fn regions() -> &'static [Region] {
    &Region::ALL
}

/// Coverage search used by the coverage page.
///
/// Matches the query as a case-insensitive substring of either the district
/// name or its region name. An empty query returns the whole catalog.
///
/// ```rust
/// use courier_core::coverage::search_coverage;
///
/// let hits: Vec<_> = search_coverage("syl").map(|d| d.name).collect();
/// assert!(hits.contains(&"Sylhet"));
/// assert!(hits.contains(&"Sunamganj")); // region match
/// ```
pub fn search_coverage(query: &str) -> impl Iterator<Item = &'static District> {
    let needle = query.trim().to_lowercase();
    DISTRICTS.iter().filter(move |d| {
        needle.is_empty()
            || d.name.to_lowercase().contains(&needle)
            || d.region.name().to_lowercase().contains(&needle)
    })
}
