//! Create inputs and update patches for the mutation operations.
//!
//! Derived fields (`total_emissions`, `calculated_value`, `target_value`,
//! `absolute`) have no input counterpart: they cannot be supplied, only
//! computed.

#[derive(Debug, Clone)]
pub struct TrackInput {
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub unit: Option<String>,
}

impl TrackPatch {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.unit.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct FactorInput {
    pub track_id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct FactorPatch {
    pub track_id: Option<String>,
    pub name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
}

impl FactorPatch {
    pub fn has_changes(&self) -> bool {
        self.track_id.is_some()
            || self.name.is_some()
            || self.value.is_some()
            || self.unit.is_some()
            || self.category.is_some()
    }
}

/// The track of a measurement is not independently chosen; it follows the
/// factor's track, so the input carries no `track_id`.
#[derive(Debug, Clone)]
pub struct MeasurementInput {
    pub factor_id: String,
    pub quantity: f64,
    pub supplier_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MeasurementPatch {
    pub factor_id: Option<String>,
    pub quantity: Option<f64>,
    pub supplier_id: Option<String>,
    pub clear_supplier: bool,
}

impl MeasurementPatch {
    pub fn has_changes(&self) -> bool {
        self.factor_id.is_some()
            || self.quantity.is_some()
            || self.supplier_id.is_some()
            || self.clear_supplier
    }
}

#[derive(Debug, Clone)]
pub struct TargetInput {
    pub track_id: String,
    pub scenario_id: Option<String>,
    pub supplier_id: Option<String>,
    pub baseline_value: f64,
    pub target_percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TargetPatch {
    pub track_id: Option<String>,
    pub scenario_id: Option<String>,
    pub clear_scenario: bool,
    pub supplier_id: Option<String>,
    pub clear_supplier: bool,
    pub baseline_value: Option<f64>,
    pub target_percentage: Option<f64>,
}

impl TargetPatch {
    pub fn has_changes(&self) -> bool {
        self.track_id.is_some()
            || self.scenario_id.is_some()
            || self.clear_scenario
            || self.supplier_id.is_some()
            || self.clear_supplier
            || self.baseline_value.is_some()
            || self.target_percentage.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct InitiativeInput {
    pub name: String,
    pub plan: String,
    pub target_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InitiativePatch {
    pub name: Option<String>,
    pub plan: Option<String>,
    pub target_ids: Option<Vec<String>>,
}

impl InitiativePatch {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.plan.is_some() || self.target_ids.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ScenarioPatch {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.description.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SupplierInput {
    pub name: String,
    pub industry: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub currency: Option<String>,
}

impl SupplierPatch {
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.industry.is_some()
            || self.contact_name.is_some()
            || self.contact_email.is_some()
            || self.currency.is_some()
    }
}
