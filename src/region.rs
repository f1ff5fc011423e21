//! Mixed-unit region values for scan boundaries, steps and dwell times.
//!
//! A scan is described by three parallel lists. Each entry is either a plain
//! number in eV (or seconds, for dwell times) or a wavenumber-tagged number
//! written with a trailing `k`, such as `14k` or `0.05k`.
//!
//! | list     | `Energy(x)`                         | `Wavenumber(x)`                               |
//! |----------|-------------------------------------|-----------------------------------------------|
//! | bounds   | `x` eV relative to the edge          | `x` Å⁻¹, converted to eV relative to the edge |
//! | steps    | constant energy step of `x` eV       | constant wavenumber step of `x` Å⁻¹           |
//! | times    | constant dwell of `x` s              | dwell of `x × k` s at each point              |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::k_to_energy;

/// A region-list entry: plain energy-unit value or wavenumber-tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegionValue", into = "RawRegionValue")]
pub enum RegionValue {
    /// eV (bounds, steps) or seconds (times).
    Energy(f64),
    /// Å⁻¹ (bounds, steps) or seconds per Å⁻¹ (times).
    Wavenumber(f64),
}

/// A region boundary, relative to the edge energy.
pub type BoundaryValue = RegionValue;
/// The step rule for one region.
pub type StepSpec = RegionValue;
/// The dwell-time rule for one region.
pub type TimeSpec = RegionValue;

/// Token that is neither a number nor a `k`-tagged number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid region token '{0}'")]
pub struct InvalidRegionToken(pub String);

impl RegionValue {
    /// The bare number, whatever its unit.
    pub fn magnitude(&self) -> f64 {
        match *self {
            RegionValue::Energy(v) | RegionValue::Wavenumber(v) => v,
        }
    }

    /// Boundary in eV relative to the edge.
    pub fn to_energy_offset(&self) -> f64 {
        match *self {
            RegionValue::Energy(e) => e,
            RegionValue::Wavenumber(k) => k_to_energy(k),
        }
    }

    /// Parse a whitespace-separated token list such as `-200 -30 15.3 14k`.
    pub fn parse_list(text: &str) -> Result<Vec<RegionValue>, InvalidRegionToken> {
        text.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for RegionValue {
    type Err = InvalidRegionToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Ok(value) = token.parse::<f64>() {
            return Ok(RegionValue::Energy(value));
        }
        token
            .strip_suffix(['k', 'K'])
            .and_then(|number| number.parse::<f64>().ok())
            .map(RegionValue::Wavenumber)
            .ok_or_else(|| InvalidRegionToken(token.to_string()))
    }
}

impl fmt::Display for RegionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionValue::Energy(v) => write!(f, "{v}"),
            RegionValue::Wavenumber(v) => write!(f, "{v}k"),
        }
    }
}

/// Serialized form: a bare number for energies, a `"<n>k"` string for wavenumbers.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRegionValue {
    Number(f64),
    Token(String),
}

impl TryFrom<RawRegionValue> for RegionValue {
    type Error = InvalidRegionToken;

    fn try_from(raw: RawRegionValue) -> Result<Self, Self::Error> {
        match raw {
            RawRegionValue::Number(v) => Ok(RegionValue::Energy(v)),
            RawRegionValue::Token(s) => s.parse(),
        }
    }
}

impl From<RegionValue> for RawRegionValue {
    fn from(value: RegionValue) -> Self {
        match value {
            RegionValue::Energy(v) => RawRegionValue::Number(v),
            RegionValue::Wavenumber(_) => RawRegionValue::Token(value.to_string()),
        }
    }
}

/// Format a region list the way it is written in a config file.
pub fn format_list(values: &[RegionValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
