use serde::{Deserialize, Serialize};

use crate::domain::plan::Plan;

/// A top-level emissions category, e.g. a GHG scope.
///
/// `total_emissions` is derived: always the sum of `calculated_value` over
/// the measurements currently pointing at this track. It is never settable
/// by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub total_emissions: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A conversion multiplier attached to a track (value per unit of activity).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Factor {
    pub id: String,
    pub track_id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One recorded activity quantity, converted via its factor.
///
/// `track_id` and `unit` follow the factor; `calculated_value` is always
/// `quantity * factor.value` as of the last recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub id: String,
    pub track_id: String,
    pub factor_id: String,
    pub supplier_id: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub calculated_value: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A reduction goal: `target_value` is derived from the baseline/percentage
/// pair and never directly settable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Target {
    pub id: String,
    pub track_id: String,
    pub scenario_id: Option<String>,
    pub supplier_id: Option<String>,
    pub baseline_value: f64,
    pub target_percentage: f64,
    pub target_value: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A planned intervention over one or more targets.
///
/// `target_ids` is a duplicate-free set in insertion order; `absolute` is
/// derived from the attached targets and the plan magnitude.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Initiative {
    pub id: String,
    pub name: String,
    pub plan: Plan,
    pub target_ids: Vec<String>,
    pub absolute: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A named grouping of targets for planning purposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An external organization optionally linked to measurements and targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
}
