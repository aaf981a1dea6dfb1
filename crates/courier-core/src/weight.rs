//! # Weight
//!
//! Parcel weight held as integer grams.
//!
//! The form collects weight as free decimal text in kilograms ("1.5"). It is
//! parsed once into grams so pricing never touches floating point; the API
//! payload carries kilograms as a JSON number.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lightest accepted parcel (0.1 kg).
pub const MIN_WEIGHT_GRAMS: u32 = 100;

/// Heaviest accepted parcel (50 kg).
pub const MAX_WEIGHT_GRAMS: u32 = 50_000;

/// Maximum number of decimal places accepted in the kilogram text.
const MAX_FRACTION_DIGITS: usize = 3;

/// A weight in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(u32);

impl Weight {
    #[inline]
    pub const fn from_grams(grams: u32) -> Self {
        Weight(grams)
    }

    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }

    #[inline]
    pub const fn grams(&self) -> u32 {
        self.0
    }

    /// Parses kilogram text such as `"2"`, `"1.5"` or `"0.125"`.
    ///
    /// Returns `None` for anything that is not a plain non-negative decimal
    /// with at most three fractional digits. Bounds are NOT checked here;
    /// see [`Weight::is_within_limits`].
    ///
    /// ```rust
    /// use courier_core::weight::Weight;
    ///
    /// assert_eq!(Weight::parse_kg("1.5"), Some(Weight::from_grams(1_500)));
    /// assert_eq!(Weight::parse_kg(" 2 "), Some(Weight::from_grams(2_000)));
    /// assert_eq!(Weight::parse_kg("abc"), None);
    /// assert_eq!(Weight::parse_kg("1.2345"), None);
    /// ```
    pub fn parse_kg(text: &str) -> Option<Weight> {
        let text = text.trim();
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole_kg: u32 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        // Right-pad the fraction to grams: "5" -> 500, "25" -> 250
        let mut fraction_grams: u32 = 0;
        for (i, digit) in fraction.bytes().enumerate() {
            let place = 10u32.pow((MAX_FRACTION_DIGITS - 1 - i) as u32);
            fraction_grams += u32::from(digit - b'0') * place;
        }

        whole_kg
            .checked_mul(1000)
            .and_then(|g| g.checked_add(fraction_grams))
            .map(Weight)
    }

    /// True when the weight lies in the accepted 0.1–50 kg range.
    pub fn is_within_limits(&self) -> bool {
        (MIN_WEIGHT_GRAMS..=MAX_WEIGHT_GRAMS).contains(&self.0)
    }

    /// Kilograms as a float, for the JSON payload and display only.
    pub fn as_kg_f64(&self) -> f64 {
        f64::from(self.0) / 1000.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let grams = self.0 % 1000;
        if grams == 0 {
            write!(f, "{} kg", whole)
        } else {
            let fraction = format!("{:03}", grams);
            write!(f, "{}.{} kg", whole, fraction.trim_end_matches('0'))
        }
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_kg_f64())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kg = f64::deserialize(deserializer)?;
        if !kg.is_finite() || kg < 0.0 || kg > f64::from(u32::MAX) / 1000.0 {
            return Err(serde::de::Error::custom(format!("invalid weight: {}", kg)));
        }
        Ok(Weight((kg * 1000.0).round() as u32))
    }
}
