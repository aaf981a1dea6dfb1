//! # Tracking IDs
//!
//! Client-generated identifiers handed to the sender for later lookup.
//!
//! ```text
//!   TRK-MGX3K2P1-7F3A
//!   ─┬─ ────┬─── ──┬─
//!    │      │      └── 4 random hex digits (uuid v4)
//!    │      └───────── submission time, unix millis in base 36
//!    └──────────────── fixed prefix
//! ```
//!
//! The timestamp part keeps IDs roughly sortable by submission time; the
//! random suffix separates two submissions in the same millisecond.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const TRACKING_PREFIX: &str = "TRK";

/// An opaque tracking identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// Generates a fresh ID for a submission made at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self::with_suffix(now, Uuid::new_v4())
    }

    fn with_suffix(now: DateTime<Utc>, nonce: Uuid) -> Self {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let suffix: String = nonce
            .simple()
            .to_string()
            .chars()
            .take(4)
            .collect::<String>()
            .to_uppercase();
        TrackingId(format!("{}-{}-{}", TRACKING_PREFIX, to_base36(millis), suffix))
    }

    /// Wraps an ID received from the API without checking its shape.
    pub fn from_string(id: impl Into<String>) -> Self {
        TrackingId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn test_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let id = TrackingId::generate(now);
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TRK");
        assert_eq!(parts[1], to_base36(now.timestamp_millis() as u64));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_deterministic_given_nonce() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let nonce = Uuid::parse_str("7f3a0000-0000-4000-8000-000000000000").unwrap();
        let id = TrackingId::with_suffix(now, nonce);
        assert!(id.as_str().ends_with("-7F3A"));
    }

    #[test]
    fn test_unique_per_submission() {
        let now = Utc::now();
        let ids: std::collections::HashSet<_> =
            (0..50).map(|_| TrackingId::generate(now)).collect();
        // 16 bits of randomness; 50 draws colliding is vanishingly unlikely
        assert!(ids.len() >= 48);
    }

    #[test]
    fn test_serde_transparent() {
        let id = TrackingId::from_string("TRK-ABC-1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"TRK-ABC-1234\"");
    }
}
