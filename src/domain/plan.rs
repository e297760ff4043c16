use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A signed percentage string, e.g. `"-10%"` or `"+2.5%"`.
///
/// The raw text is kept verbatim for display and storage; the parsed
/// fraction (`"-10%"` → `-0.10`) is cached so downstream recomputes never
/// have to re-parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    raw: String,
    fraction: f64,
}

impl Plan {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Signed fraction, e.g. `-0.10` for a 10% reduction plan.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Unsigned fraction used for impact sums.
    pub fn magnitude(&self) -> f64 {
        self.fraction.abs()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Plan {
    type Err = ParsePlanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let parsed = numeric.parse::<f64>().map_err(|_| ParsePlanError {
            value: value.to_string(),
        })?;
        if !parsed.is_finite() {
            return Err(ParsePlanError {
                value: value.to_string(),
            });
        }
        Ok(Plan {
            raw: trimmed.to_string(),
            fraction: parsed / 100.0,
        })
    }
}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Plan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Plan::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlanError {
    value: String,
}

impl fmt::Display for ParsePlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid plan percentage '{}': expected a signed number with optional trailing %, e.g. -10%",
            self.value
        )
    }
}

impl Error for ParsePlanError {}

#[cfg(test)]
mod tests {
    use super::Plan;
    use std::str::FromStr;

    #[test]
    fn parses_signed_percentage_strings() {
        let plan = Plan::from_str("-10%").expect("plan should parse");
        assert_eq!(plan.fraction(), -0.10);
        assert_eq!(plan.magnitude(), 0.10);
        assert_eq!(plan.as_str(), "-10%");

        let plus = Plan::from_str("+5%").expect("plan should parse");
        assert_eq!(plus.fraction(), 0.05);

        let bare = Plan::from_str("10").expect("bare number should parse");
        assert_eq!(bare.fraction(), 0.10);

        let fractional = Plan::from_str(" -12.5% ").expect("fractional plan should parse");
        assert_eq!(fractional.fraction(), -0.125);
        assert_eq!(fractional.as_str(), "-12.5%");
    }

    #[test]
    fn rejects_garbage_and_non_finite_values() {
        assert!(Plan::from_str("ten percent").is_err());
        assert!(Plan::from_str("").is_err());
        assert!(Plan::from_str("%").is_err());
        assert!(Plan::from_str("inf%").is_err());
        assert!(Plan::from_str("NaN").is_err());
    }

    #[test]
    fn serde_round_trips_as_the_raw_string() {
        let plan = Plan::from_str("-7.5%").expect("plan should parse");
        let json = serde_json::to_string(&plan).expect("plan should serialize");
        assert_eq!(json, "\"-7.5%\"");
        let back: Plan = serde_json::from_str(&json).expect("plan should deserialize");
        assert_eq!(back, plan);
    }
}
