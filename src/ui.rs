use std::io::{self, IsTerminal};

use crate::domain::records::{
    Factor, Initiative, Measurement, Scenario, Supplier, Target, Track,
};

pub fn print_track_list(tracks: &[Track]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Tracks"));
    if tracks.is_empty() {
        println!("{}", palette.dim("no tracks recorded"));
        return;
    }
    for track in tracks {
        println!(
            "{} {} {} {}",
            palette.id(&track.id),
            track.name,
            palette.value(&format!("{}", track.total_emissions)),
            palette.dim(&track.unit)
        );
    }
    println!("{}", palette.dim(&format!("{} track(s)", tracks.len())));
}

pub fn print_factor_list(factors: &[Factor]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Factors"));
    if factors.is_empty() {
        println!("{}", palette.dim("no factors recorded"));
        return;
    }
    for factor in factors {
        println!(
            "{} {} {} {} {}",
            palette.id(&factor.id),
            factor.name,
            palette.value(&format!("{}", factor.value)),
            palette.dim(&factor.unit),
            palette.label(&format!("({}, track {})", factor.category, factor.track_id))
        );
    }
    println!("{}", palette.dim(&format!("{} factor(s)", factors.len())));
}

pub fn print_measurement_list(measurements: &[Measurement]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Measurements"));
    if measurements.is_empty() {
        println!("{}", palette.dim("no measurements recorded"));
        return;
    }
    for m in measurements {
        let supplier = m
            .supplier_id
            .as_deref()
            .map(|id| format!(", supplier {id}"))
            .unwrap_or_default();
        println!(
            "{} {} × factor {} = {} {}",
            palette.id(&m.id),
            m.quantity,
            m.factor_id,
            palette.value(&format!("{}", m.calculated_value)),
            palette.dim(&format!("(track {}{})", m.track_id, supplier))
        );
    }
    println!(
        "{}",
        palette.dim(&format!("{} measurement(s)", measurements.len()))
    );
}

pub fn print_target_list(targets: &[Target]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Targets"));
    if targets.is_empty() {
        println!("{}", palette.dim("no targets recorded"));
        return;
    }
    for target in targets {
        let mut extra = format!("track {}", target.track_id);
        if let Some(scenario) = target.scenario_id.as_deref() {
            extra.push_str(&format!(", scenario {scenario}"));
        }
        if let Some(supplier) = target.supplier_id.as_deref() {
            extra.push_str(&format!(", supplier {supplier}"));
        }
        println!(
            "{} {} -{}% → {} {}",
            palette.id(&target.id),
            target.baseline_value,
            target.target_percentage,
            palette.value(&format!("{}", target.target_value)),
            palette.dim(&format!("({extra})"))
        );
    }
    println!("{}", palette.dim(&format!("{} target(s)", targets.len())));
}

pub fn print_initiative_list(initiatives: &[Initiative]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Initiatives"));
    if initiatives.is_empty() {
        println!("{}", palette.dim("no initiatives recorded"));
        return;
    }
    for initiative in initiatives {
        println!(
            "{} {} {} {} {}",
            palette.id(&initiative.id),
            initiative.name,
            palette.label(&format!("[{}]", initiative.plan)),
            palette.value(&format!("{}", initiative.absolute)),
            palette.dim(&format!("({} target(s))", initiative.target_ids.len()))
        );
    }
    println!(
        "{}",
        palette.dim(&format!("{} initiative(s)", initiatives.len()))
    );
}

pub fn print_scenario_list(scenarios: &[Scenario]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Scenarios"));
    if scenarios.is_empty() {
        println!("{}", palette.dim("no scenarios recorded"));
        return;
    }
    for scenario in scenarios {
        let description = scenario
            .description
            .as_deref()
            .map(|text| palette.dim(text))
            .unwrap_or_default();
        println!("{} {} {}", palette.id(&scenario.id), scenario.name, description);
    }
    println!(
        "{}",
        palette.dim(&format!("{} scenario(s)", scenarios.len()))
    );
}

pub fn print_supplier_list(suppliers: &[Supplier]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Suppliers"));
    if suppliers.is_empty() {
        println!("{}", palette.dim("no suppliers recorded"));
        return;
    }
    for supplier in suppliers {
        println!(
            "{} {} {} {}",
            palette.id(&supplier.id),
            supplier.name,
            palette.label(&format!("({})", supplier.industry)),
            palette.dim(&supplier.currency)
        );
    }
    println!(
        "{}",
        palette.dim(&format!("{} supplier(s)", suppliers.len()))
    );
}

pub fn print_track_show(track: &Track) {
    let palette = Palette::auto();
    println!("{} {}", palette.id(&track.id), track.name);
    field(&palette, "unit", &track.unit);
    field(
        &palette,
        "total_emissions",
        &format!("{}", track.total_emissions),
    );
    timestamps(&palette, &track.created_at, &track.updated_at);
}

pub fn print_factor_show(factor: &Factor) {
    let palette = Palette::auto();
    println!("{} {}", palette.id(&factor.id), factor.name);
    field(&palette, "track", &factor.track_id);
    field(&palette, "value", &format!("{}", factor.value));
    field(&palette, "unit", &factor.unit);
    field(&palette, "category", &factor.category);
    timestamps(&palette, &factor.created_at, &factor.updated_at);
}

pub fn print_measurement_show(measurement: &Measurement) {
    let palette = Palette::auto();
    println!("{}", palette.id(&measurement.id));
    field(&palette, "factor", &measurement.factor_id);
    field(&palette, "track", &measurement.track_id);
    field(&palette, "quantity", &format!("{}", measurement.quantity));
    field(&palette, "unit", &measurement.unit);
    field(
        &palette,
        "calculated_value",
        &format!("{}", measurement.calculated_value),
    );
    if let Some(supplier) = measurement.supplier_id.as_deref() {
        field(&palette, "supplier", supplier);
    }
    timestamps(&palette, &measurement.created_at, &measurement.updated_at);
}

pub fn print_target_show(target: &Target) {
    let palette = Palette::auto();
    println!("{}", palette.id(&target.id));
    field(&palette, "track", &target.track_id);
    field(
        &palette,
        "baseline_value",
        &format!("{}", target.baseline_value),
    );
    field(
        &palette,
        "target_percentage",
        &format!("{}", target.target_percentage),
    );
    field(
        &palette,
        "target_value",
        &format!("{}", target.target_value),
    );
    if let Some(scenario) = target.scenario_id.as_deref() {
        field(&palette, "scenario", scenario);
    }
    if let Some(supplier) = target.supplier_id.as_deref() {
        field(&palette, "supplier", supplier);
    }
    timestamps(&palette, &target.created_at, &target.updated_at);
}

pub fn print_initiative_show(initiative: &Initiative) {
    let palette = Palette::auto();
    println!("{} {}", palette.id(&initiative.id), initiative.name);
    field(&palette, "plan", initiative.plan.as_str());
    field(&palette, "absolute", &format!("{}", initiative.absolute));
    if initiative.target_ids.is_empty() {
        field(&palette, "targets", "none");
    } else {
        field(&palette, "targets", &initiative.target_ids.join(", "));
    }
    timestamps(&palette, &initiative.created_at, &initiative.updated_at);
}

pub fn print_scenario_show(scenario: &Scenario) {
    let palette = Palette::auto();
    println!("{} {}", palette.id(&scenario.id), scenario.name);
    if let Some(description) = scenario.description.as_deref() {
        field(&palette, "description", description);
    }
    timestamps(&palette, &scenario.created_at, &scenario.updated_at);
}

pub fn print_supplier_show(supplier: &Supplier) {
    let palette = Palette::auto();
    println!("{} {}", palette.id(&supplier.id), supplier.name);
    field(&palette, "industry", &supplier.industry);
    if let Some(name) = supplier.contact_name.as_deref() {
        field(&palette, "contact_name", name);
    }
    if let Some(email) = supplier.contact_email.as_deref() {
        field(&palette, "contact_email", email);
    }
    field(&palette, "currency", &supplier.currency);
    timestamps(&palette, &supplier.created_at, &supplier.updated_at);
}

fn field(palette: &Palette, label: &str, value: &str) {
    println!("  {} {}", palette.label(&format!("{label}:")), value);
}

fn timestamps(palette: &Palette, created_at: &str, updated_at: &str) {
    println!(
        "  {}",
        palette.dim(&format!("created {created_at}, updated {updated_at}"))
    );
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn auto() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint("1;36", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn id(&self, text: &str) -> String {
        self.paint("1;94", text)
    }

    fn value(&self, text: &str) -> String {
        self.paint("1;32", text)
    }

    fn label(&self, text: &str) -> String {
        self.paint("35", text)
    }
}
