//! Size-keyed maps and input units
//!
//! Sizes ("8mm", "10mm", ...) are opaque configuration keys. Nothing in the
//! calculators enumerates them; every lookup goes through a [`SizeMap`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Rebar diameter class key
pub type Size = String;

/// Mapping keyed by size. Ordered so listings are stable.
pub type SizeMap<T> = BTreeMap<Size, T>;

/// Look up a size and keep the value only when it is strictly positive.
///
/// A stored 0 (or a negative left over from bad data entry) means "unknown
/// for this size", same as a missing entry.
pub fn positive_entry(map: &SizeMap<f64>, size: &str) -> Option<f64> {
    map.get(size)
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Same as [`positive_entry`] for integer counts
pub fn positive_count(map: &SizeMap<u32>, size: &str) -> Option<u32> {
    map.get(size).copied().filter(|v| *v > 0)
}

/// Unit a quantity is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputUnit {
    /// Kilograms
    Kg,
    /// Pieces ("nos")
    Nos,
    /// Bundles
    Bundle,
}

impl InputUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Nos => "nos",
            Self::Bundle => "bundle",
        }
    }
}

impl fmt::Display for InputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(Self::Kg),
            "nos" => Ok(Self::Nos),
            "bundle" => Ok(Self::Bundle),
            other => Err(AppError::invalid_input(
                "inputUnit",
                format!("unknown input unit '{other}' (expected kg, nos or bundle)"),
            )),
        }
    }
}
