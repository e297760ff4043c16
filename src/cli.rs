use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, CommandFactory, Parser, Subcommand};

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::BrightMagenta.on_default())
}

pub fn styled_command() -> clap::Command {
    Cli::command()
}

#[derive(Debug, Parser)]
#[command(name = "fpt")]
#[command(bin_name = "fpt")]
#[command(version)]
#[command(about = "A local-first carbon accounting ledger with derived-value consistency")]
#[command(styles = cli_styles())]
pub struct Cli {
    #[arg(
        short = 'd',
        long,
        env = "FOOTPRINT_DB_PATH",
        help = "Path to the SQLite state database (overrides footprint.toml)."
    )]
    pub db: Option<String>,

    #[arg(
        short = 'C',
        long,
        env = "FOOTPRINT_DATA_ROOT",
        default_value = ".",
        help = "Data root that contains footprint.toml and .footprint/."
    )]
    pub data_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Manage emission tracks.")]
    Track(TrackArgs),
    #[command(about = "Manage emission factors.")]
    Factor(FactorArgs),
    #[command(about = "Manage measurements.", alias = "measurement")]
    Measure(MeasureArgs),
    #[command(about = "Manage reduction targets.")]
    Target(TargetArgs),
    #[command(about = "Manage reduction initiatives.")]
    Initiative(InitiativeArgs),
    #[command(about = "Manage scenarios.")]
    Scenario(ScenarioArgs),
    #[command(about = "Manage suppliers.")]
    Supplier(SupplierArgs),
    #[command(about = "Generate or install shell completions.")]
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
#[command(about = "Completions options.")]
pub struct CompletionsArgs {
    #[arg(help = "Shell name (bash, zsh, fish). Auto-detected if omitted.")]
    pub shell: Option<String>,

    #[arg(
        short = 'i',
        long = "install",
        help = "Write completions to the canonical path for the shell."
    )]
    pub install: bool,
}

#[derive(Debug, Args)]
#[command(about = "List output options.")]
pub struct ListArgs {
    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Show one record.")]
pub struct ShowArgs {
    #[arg(help = "Record id.")]
    pub id: String,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Delete one record.")]
pub struct RmArgs {
    #[arg(help = "Record id.")]
    pub id: String,
}

#[derive(Debug, Args)]
#[command(about = "Track commands.")]
pub struct TrackArgs {
    #[command(subcommand)]
    pub command: TrackCommands,
}

#[derive(Debug, Subcommand)]
pub enum TrackCommands {
    #[command(about = "Create a track.")]
    New(TrackNewArgs),
    #[command(about = "Update track fields.")]
    Update(TrackUpdateArgs),
    #[command(about = "Delete a track (refused while referenced).")]
    Rm(RmArgs),
    #[command(about = "List tracks.")]
    Ls(ListArgs),
    #[command(about = "Show one track.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(about = "Create a track.")]
pub struct TrackNewArgs {
    #[arg(help = "Track name.")]
    pub name: String,

    #[arg(short = 'u', long, help = "Unit the track totals are reported in.")]
    pub unit: String,
}

#[derive(Debug, Args)]
#[command(about = "Update a track.")]
pub struct TrackUpdateArgs {
    #[arg(help = "Track id.")]
    pub id: String,

    #[arg(short = 'n', long, help = "Set name.")]
    pub name: Option<String>,

    #[arg(short = 'u', long, help = "Set unit.")]
    pub unit: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Factor commands.")]
pub struct FactorArgs {
    #[command(subcommand)]
    pub command: FactorCommands,
}

#[derive(Debug, Subcommand)]
pub enum FactorCommands {
    #[command(about = "Create an emission factor.")]
    New(FactorNewArgs),
    #[command(about = "Update factor fields and recompute dependents.")]
    Update(FactorUpdateArgs),
    #[command(about = "Delete a factor (refused while measurements use it).")]
    Rm(RmArgs),
    #[command(about = "List factors.")]
    Ls(ListArgs),
    #[command(about = "Show one factor.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(about = "Create an emission factor.")]
pub struct FactorNewArgs {
    #[arg(help = "Factor name.")]
    pub name: String,

    #[arg(short = 't', long = "track", help = "Track id the factor belongs to.")]
    pub track_id: String,

    #[arg(short = 'v', long, help = "Emission value per unit of activity.")]
    pub value: f64,

    #[arg(short = 'u', long, help = "Unit of the emitted quantity.")]
    pub unit: String,

    #[arg(short = 'c', long, help = "Factor category.")]
    pub category: String,
}

#[derive(Debug, Args)]
#[command(about = "Update an emission factor.")]
pub struct FactorUpdateArgs {
    #[arg(help = "Factor id.")]
    pub id: String,

    #[arg(short = 't', long = "track", help = "Move the factor to another track.")]
    pub track_id: Option<String>,

    #[arg(short = 'n', long, help = "Set name.")]
    pub name: Option<String>,

    #[arg(short = 'v', long, help = "Set emission value per unit of activity.")]
    pub value: Option<f64>,

    #[arg(short = 'u', long, help = "Set unit.")]
    pub unit: Option<String>,

    #[arg(short = 'c', long, help = "Set category.")]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Measurement commands.")]
pub struct MeasureArgs {
    #[command(subcommand)]
    pub command: MeasureCommands,
}

#[derive(Debug, Subcommand)]
pub enum MeasureCommands {
    #[command(about = "Record a measurement against a factor.")]
    New(MeasureNewArgs),
    #[command(about = "Update measurement fields and recompute its value.")]
    Update(MeasureUpdateArgs),
    #[command(about = "Delete a measurement.")]
    Rm(RmArgs),
    #[command(about = "List measurements.")]
    Ls(ListArgs),
    #[command(about = "Show one measurement.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(about = "Record a measurement.")]
pub struct MeasureNewArgs {
    #[arg(short = 'f', long = "factor", help = "Factor id the measurement uses.")]
    pub factor_id: String,

    #[arg(short = 'q', long, help = "Measured activity quantity.")]
    pub quantity: f64,

    #[arg(short = 's', long = "supplier", help = "Optional supplier id.")]
    pub supplier_id: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Update a measurement.")]
pub struct MeasureUpdateArgs {
    #[arg(help = "Measurement id.")]
    pub id: String,

    #[arg(short = 'f', long = "factor", help = "Point the measurement at another factor.")]
    pub factor_id: Option<String>,

    #[arg(short = 'q', long, help = "Set measured quantity.")]
    pub quantity: Option<f64>,

    #[arg(short = 's', long = "supplier", help = "Set supplier id.")]
    pub supplier_id: Option<String>,

    #[arg(long = "clear-supplier", help = "Detach the supplier.")]
    pub clear_supplier: bool,
}

#[derive(Debug, Args)]
#[command(about = "Target commands.")]
pub struct TargetArgs {
    #[command(subcommand)]
    pub command: TargetCommands,
}

#[derive(Debug, Subcommand)]
pub enum TargetCommands {
    #[command(about = "Create a reduction target.")]
    New(TargetNewArgs),
    #[command(about = "Update target fields and recompute its value.")]
    Update(TargetUpdateArgs),
    #[command(about = "Delete a target and detach it from initiatives.")]
    Rm(RmArgs),
    #[command(about = "List targets.")]
    Ls(ListArgs),
    #[command(about = "Show one target.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(about = "Create a reduction target.")]
pub struct TargetNewArgs {
    #[arg(short = 't', long = "track", help = "Track id the target applies to.")]
    pub track_id: String,

    #[arg(short = 'b', long, help = "Baseline emission value.")]
    pub baseline: f64,

    #[arg(short = 'p', long = "percentage", help = "Reduction percentage of the baseline.")]
    pub target_percentage: f64,

    #[arg(short = 'n', long = "scenario", help = "Optional scenario id.")]
    pub scenario_id: Option<String>,

    #[arg(short = 's', long = "supplier", help = "Optional supplier id (one target per supplier).")]
    pub supplier_id: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Update a reduction target.")]
pub struct TargetUpdateArgs {
    #[arg(help = "Target id.")]
    pub id: String,

    #[arg(short = 't', long = "track", help = "Move the target to another track.")]
    pub track_id: Option<String>,

    #[arg(short = 'b', long, help = "Set baseline emission value.")]
    pub baseline: Option<f64>,

    #[arg(short = 'p', long = "percentage", help = "Set reduction percentage.")]
    pub target_percentage: Option<f64>,

    #[arg(short = 'n', long = "scenario", help = "Set scenario id.")]
    pub scenario_id: Option<String>,

    #[arg(long = "clear-scenario", help = "Detach the scenario.")]
    pub clear_scenario: bool,

    #[arg(short = 's', long = "supplier", help = "Set supplier id.")]
    pub supplier_id: Option<String>,

    #[arg(long = "clear-supplier", help = "Detach the supplier.")]
    pub clear_supplier: bool,
}

#[derive(Debug, Args)]
#[command(about = "Initiative commands.")]
pub struct InitiativeArgs {
    #[command(subcommand)]
    pub command: InitiativeCommands,
}

#[derive(Debug, Subcommand)]
pub enum InitiativeCommands {
    #[command(about = "Create a reduction initiative.")]
    New(InitiativeNewArgs),
    #[command(about = "Update initiative fields and recompute its impact.")]
    Update(InitiativeUpdateArgs),
    #[command(about = "Delete an initiative.")]
    Rm(RmArgs),
    #[command(about = "List initiatives.")]
    Ls(ListArgs),
    #[command(about = "Show one initiative.")]
    Show(ShowArgs),
    #[command(about = "Attach targets to an initiative.")]
    Attach(InitiativeAttachArgs),
    #[command(about = "Detach one target from an initiative.")]
    Detach(InitiativeDetachArgs),
}

#[derive(Debug, Args)]
#[command(about = "Create a reduction initiative.")]
pub struct InitiativeNewArgs {
    #[arg(help = "Initiative name.")]
    pub name: String,

    #[arg(
        short = 'p',
        long,
        allow_hyphen_values = true,
        help = "Plan percentage, e.g. \"-10%\"."
    )]
    pub plan: String,

    #[arg(short = 't', long = "target", help = "Target id to attach (repeatable).")]
    pub target_ids: Vec<String>,
}

#[derive(Debug, Args)]
#[command(about = "Update a reduction initiative.")]
pub struct InitiativeUpdateArgs {
    #[arg(help = "Initiative id.")]
    pub id: String,

    #[arg(short = 'n', long, help = "Set name.")]
    pub name: Option<String>,

    #[arg(
        short = 'p',
        long,
        allow_hyphen_values = true,
        help = "Set plan percentage, e.g. \"-10%\"."
    )]
    pub plan: Option<String>,

    #[arg(
        short = 't',
        long = "target",
        help = "Replace the attached target set (repeatable)."
    )]
    pub target_ids: Vec<String>,
}

#[derive(Debug, Args)]
#[command(about = "Attach targets.")]
pub struct InitiativeAttachArgs {
    #[arg(help = "Initiative id.")]
    pub id: String,

    #[arg(help = "Target ids to attach.", required = true)]
    pub target_ids: Vec<String>,
}

#[derive(Debug, Args)]
#[command(about = "Detach one target.")]
pub struct InitiativeDetachArgs {
    #[arg(help = "Initiative id.")]
    pub id: String,

    #[arg(help = "Target id to detach.")]
    pub target_id: String,
}

#[derive(Debug, Args)]
#[command(about = "Scenario commands.")]
pub struct ScenarioArgs {
    #[command(subcommand)]
    pub command: ScenarioCommands,
}

#[derive(Debug, Subcommand)]
pub enum ScenarioCommands {
    #[command(about = "Create a scenario.")]
    New(ScenarioNewArgs),
    #[command(about = "Update scenario fields.")]
    Update(ScenarioUpdateArgs),
    #[command(about = "Delete a scenario and detach its targets.")]
    Rm(RmArgs),
    #[command(about = "List scenarios.")]
    Ls(ListArgs),
    #[command(about = "Show one scenario.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(about = "Create a scenario.")]
pub struct ScenarioNewArgs {
    #[arg(help = "Scenario name.")]
    pub name: String,

    #[arg(short = 'd', long = "desc", help = "Optional description text.")]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Update a scenario.")]
pub struct ScenarioUpdateArgs {
    #[arg(help = "Scenario id.")]
    pub id: String,

    #[arg(short = 'n', long, help = "Set name.")]
    pub name: Option<String>,

    #[arg(short = 'd', long = "desc", help = "Set description.")]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Supplier commands.")]
pub struct SupplierArgs {
    #[command(subcommand)]
    pub command: SupplierCommands,
}

#[derive(Debug, Subcommand)]
pub enum SupplierCommands {
    #[command(about = "Create a supplier.")]
    New(SupplierNewArgs),
    #[command(about = "Update supplier fields.")]
    Update(SupplierUpdateArgs),
    #[command(about = "Delete a supplier (refused while referenced).")]
    Rm(RmArgs),
    #[command(about = "List suppliers.")]
    Ls(ListArgs),
    #[command(about = "Show one supplier.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
#[command(about = "Create a supplier.")]
pub struct SupplierNewArgs {
    #[arg(help = "Supplier name.")]
    pub name: String,

    #[arg(short = 'i', long, help = "Supplier industry.")]
    pub industry: String,

    #[arg(long = "contact-name", help = "Contact person name.")]
    pub contact_name: Option<String>,

    #[arg(long = "contact-email", help = "Contact email address.")]
    pub contact_email: Option<String>,

    #[arg(
        short = 'c',
        long,
        help = "Billing currency (defaults to footprint.toml default_currency)."
    )]
    pub currency: Option<String>,
}

#[derive(Debug, Args)]
#[command(about = "Update a supplier.")]
pub struct SupplierUpdateArgs {
    #[arg(help = "Supplier id.")]
    pub id: String,

    #[arg(short = 'n', long, help = "Set name.")]
    pub name: Option<String>,

    #[arg(short = 'i', long, help = "Set industry.")]
    pub industry: Option<String>,

    #[arg(long = "contact-name", help = "Set contact person name.")]
    pub contact_name: Option<String>,

    #[arg(long = "contact-email", help = "Set contact email address.")]
    pub contact_email: Option<String>,

    #[arg(short = 'c', long, help = "Set billing currency.")]
    pub currency: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
