mod app;
mod cli;
mod completions;
mod compute;
mod config;
mod db;
mod domain;
mod engine;
mod ident;
mod integrity;
mod propagate;
mod store;
mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("json serialization should work")
    );
}

fn run() -> Result<(), app::AppError> {
    use clap::Parser;
    use cli::{
        Commands, FactorCommands, InitiativeCommands, MeasureCommands, ScenarioCommands,
        SupplierCommands, TargetCommands, TrackCommands,
    };
    use domain::inputs::{
        FactorInput, FactorPatch, InitiativeInput, InitiativePatch, MeasurementInput,
        MeasurementPatch, ScenarioInput, ScenarioPatch, SupplierInput, SupplierPatch, TargetInput,
        TargetPatch, TrackInput, TrackPatch,
    };

    let cli = cli::Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        return run_completions(args);
    }

    let config = config::Config::load(&cli.data_root)?;
    let db_path = config.db_path(&cli.data_root, cli.db.as_deref());
    let db_path = db_path.to_str().ok_or_else(|| {
        app::AppError::InvalidArgument(format!("db path is not valid UTF-8: {}", db_path.display()))
    })?;
    let mut app = app::App::open(db_path)?;

    match cli.command {
        Commands::Track(args) => match args.command {
            TrackCommands::New(new_args) => {
                let track = app.create_track(TrackInput {
                    name: new_args.name,
                    unit: new_args.unit,
                })?;
                println!("created {} {}", track.id, track.name);
            }
            TrackCommands::Update(update_args) => {
                let track = app.update_track(
                    &update_args.id,
                    TrackPatch {
                        name: update_args.name,
                        unit: update_args.unit,
                    },
                )?;
                println!("updated {} {}", track.id, track.name);
            }
            TrackCommands::Rm(rm_args) => {
                app.delete_track(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            TrackCommands::Ls(ls_args) => {
                let tracks = app.tracks();
                if ls_args.json {
                    print_json(&tracks);
                } else {
                    ui::print_track_list(&tracks);
                }
            }
            TrackCommands::Show(show_args) => match app.track(&show_args.id) {
                Some(track) => {
                    if show_args.json {
                        print_json(&track);
                    } else {
                        ui::print_track_show(&track);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
        },
        Commands::Factor(args) => match args.command {
            FactorCommands::New(new_args) => {
                let factor = app.create_factor(FactorInput {
                    track_id: new_args.track_id,
                    name: new_args.name,
                    value: new_args.value,
                    unit: new_args.unit,
                    category: new_args.category,
                })?;
                println!("created {} {}", factor.id, factor.name);
            }
            FactorCommands::Update(update_args) => {
                let factor = app.update_factor(
                    &update_args.id,
                    FactorPatch {
                        track_id: update_args.track_id,
                        name: update_args.name,
                        value: update_args.value,
                        unit: update_args.unit,
                        category: update_args.category,
                    },
                )?;
                println!("updated {} {}", factor.id, factor.name);
            }
            FactorCommands::Rm(rm_args) => {
                app.delete_factor(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            FactorCommands::Ls(ls_args) => {
                let factors = app.factors();
                if ls_args.json {
                    print_json(&factors);
                } else {
                    ui::print_factor_list(&factors);
                }
            }
            FactorCommands::Show(show_args) => match app.factor(&show_args.id) {
                Some(factor) => {
                    if show_args.json {
                        print_json(&factor);
                    } else {
                        ui::print_factor_show(&factor);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
        },
        Commands::Measure(args) => match args.command {
            MeasureCommands::New(new_args) => {
                let measurement = app.create_measurement(MeasurementInput {
                    factor_id: new_args.factor_id,
                    quantity: new_args.quantity,
                    supplier_id: new_args.supplier_id,
                })?;
                println!(
                    "created {} = {} {}",
                    measurement.id, measurement.calculated_value, measurement.unit
                );
            }
            MeasureCommands::Update(update_args) => {
                let measurement = app.update_measurement(
                    &update_args.id,
                    MeasurementPatch {
                        factor_id: update_args.factor_id,
                        quantity: update_args.quantity,
                        supplier_id: update_args.supplier_id,
                        clear_supplier: update_args.clear_supplier,
                    },
                )?;
                println!(
                    "updated {} = {} {}",
                    measurement.id, measurement.calculated_value, measurement.unit
                );
            }
            MeasureCommands::Rm(rm_args) => {
                app.delete_measurement(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            MeasureCommands::Ls(ls_args) => {
                let measurements = app.measurements();
                if ls_args.json {
                    print_json(&measurements);
                } else {
                    ui::print_measurement_list(&measurements);
                }
            }
            MeasureCommands::Show(show_args) => match app.measurement(&show_args.id) {
                Some(measurement) => {
                    if show_args.json {
                        print_json(&measurement);
                    } else {
                        ui::print_measurement_show(&measurement);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
        },
        Commands::Target(args) => match args.command {
            TargetCommands::New(new_args) => {
                let target = app.create_target(TargetInput {
                    track_id: new_args.track_id,
                    scenario_id: new_args.scenario_id,
                    supplier_id: new_args.supplier_id,
                    baseline_value: new_args.baseline,
                    target_percentage: new_args.target_percentage,
                })?;
                println!("created {} -> {}", target.id, target.target_value);
            }
            TargetCommands::Update(update_args) => {
                let target = app.update_target(
                    &update_args.id,
                    TargetPatch {
                        track_id: update_args.track_id,
                        scenario_id: update_args.scenario_id,
                        clear_scenario: update_args.clear_scenario,
                        supplier_id: update_args.supplier_id,
                        clear_supplier: update_args.clear_supplier,
                        baseline_value: update_args.baseline,
                        target_percentage: update_args.target_percentage,
                    },
                )?;
                println!("updated {} -> {}", target.id, target.target_value);
            }
            TargetCommands::Rm(rm_args) => {
                app.delete_target(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            TargetCommands::Ls(ls_args) => {
                let targets = app.targets();
                if ls_args.json {
                    print_json(&targets);
                } else {
                    ui::print_target_list(&targets);
                }
            }
            TargetCommands::Show(show_args) => match app.target(&show_args.id) {
                Some(target) => {
                    if show_args.json {
                        print_json(&target);
                    } else {
                        ui::print_target_show(&target);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
        },
        Commands::Initiative(args) => match args.command {
            InitiativeCommands::New(new_args) => {
                let initiative = app.create_initiative(InitiativeInput {
                    name: new_args.name,
                    plan: new_args.plan,
                    target_ids: new_args.target_ids,
                })?;
                println!(
                    "created {} {} ({})",
                    initiative.id, initiative.name, initiative.absolute
                );
            }
            InitiativeCommands::Update(update_args) => {
                let target_ids = if update_args.target_ids.is_empty() {
                    None
                } else {
                    Some(update_args.target_ids)
                };
                let initiative = app.update_initiative(
                    &update_args.id,
                    InitiativePatch {
                        name: update_args.name,
                        plan: update_args.plan,
                        target_ids,
                    },
                )?;
                println!(
                    "updated {} {} ({})",
                    initiative.id, initiative.name, initiative.absolute
                );
            }
            InitiativeCommands::Rm(rm_args) => {
                app.delete_initiative(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            InitiativeCommands::Ls(ls_args) => {
                let initiatives = app.initiatives();
                if ls_args.json {
                    print_json(&initiatives);
                } else {
                    ui::print_initiative_list(&initiatives);
                }
            }
            InitiativeCommands::Show(show_args) => match app.initiative(&show_args.id) {
                Some(initiative) => {
                    if show_args.json {
                        print_json(&initiative);
                    } else {
                        ui::print_initiative_show(&initiative);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
            InitiativeCommands::Attach(attach_args) => {
                let initiative =
                    app.add_targets_to_initiative(&attach_args.id, &attach_args.target_ids)?;
                println!(
                    "attached: {} now tracks {} target(s) ({})",
                    initiative.id,
                    initiative.target_ids.len(),
                    initiative.absolute
                );
            }
            InitiativeCommands::Detach(detach_args) => {
                let initiative =
                    app.remove_target_from_initiative(&detach_args.id, &detach_args.target_id)?;
                println!(
                    "detached: {} now tracks {} target(s) ({})",
                    initiative.id,
                    initiative.target_ids.len(),
                    initiative.absolute
                );
            }
        },
        Commands::Scenario(args) => match args.command {
            ScenarioCommands::New(new_args) => {
                let scenario = app.create_scenario(ScenarioInput {
                    name: new_args.name,
                    description: new_args.description,
                })?;
                println!("created {} {}", scenario.id, scenario.name);
            }
            ScenarioCommands::Update(update_args) => {
                let scenario = app.update_scenario(
                    &update_args.id,
                    ScenarioPatch {
                        name: update_args.name,
                        description: update_args.description,
                    },
                )?;
                println!("updated {} {}", scenario.id, scenario.name);
            }
            ScenarioCommands::Rm(rm_args) => {
                app.delete_scenario(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            ScenarioCommands::Ls(ls_args) => {
                let scenarios = app.scenarios();
                if ls_args.json {
                    print_json(&scenarios);
                } else {
                    ui::print_scenario_list(&scenarios);
                }
            }
            ScenarioCommands::Show(show_args) => match app.scenario(&show_args.id) {
                Some(scenario) => {
                    if show_args.json {
                        print_json(&scenario);
                    } else {
                        ui::print_scenario_show(&scenario);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
        },
        Commands::Supplier(args) => match args.command {
            SupplierCommands::New(new_args) => {
                let currency = new_args
                    .currency
                    .unwrap_or_else(|| config.currency().to_string());
                let supplier = app.create_supplier(SupplierInput {
                    name: new_args.name,
                    industry: new_args.industry,
                    contact_name: new_args.contact_name,
                    contact_email: new_args.contact_email,
                    currency,
                })?;
                println!("created {} {}", supplier.id, supplier.name);
            }
            SupplierCommands::Update(update_args) => {
                let supplier = app.update_supplier(
                    &update_args.id,
                    SupplierPatch {
                        name: update_args.name,
                        industry: update_args.industry,
                        contact_name: update_args.contact_name,
                        contact_email: update_args.contact_email,
                        currency: update_args.currency,
                    },
                )?;
                println!("updated {} {}", supplier.id, supplier.name);
            }
            SupplierCommands::Rm(rm_args) => {
                app.delete_supplier(&rm_args.id)?;
                println!("deleted {}", rm_args.id);
            }
            SupplierCommands::Ls(ls_args) => {
                let suppliers = app.suppliers();
                if ls_args.json {
                    print_json(&suppliers);
                } else {
                    ui::print_supplier_list(&suppliers);
                }
            }
            SupplierCommands::Show(show_args) => match app.supplier(&show_args.id) {
                Some(supplier) => {
                    if show_args.json {
                        print_json(&supplier);
                    } else {
                        ui::print_supplier_show(&supplier);
                    }
                }
                None => return Err(app::AppError::NotFound(show_args.id)),
            },
        },
        Commands::Completions(_) => {
            unreachable!("completions are handled before app initialization")
        }
    }

    Ok(())
}

fn run_completions(args: &cli::CompletionsArgs) -> Result<(), app::AppError> {
    let shell = match args.shell.as_deref() {
        Some(raw) => completions::parse_shell(raw).ok_or_else(|| {
            app::AppError::InvalidArgument(format!("unsupported shell '{raw}'"))
        })?,
        None => completions::detect_current_shell().ok_or_else(|| {
            app::AppError::InvalidArgument(
                "could not detect shell from $SHELL; pass one of: bash, zsh, fish".to_string(),
            )
        })?,
    };
    if args.install {
        let path = completions::install_completions(shell).map_err(app::AppError::Io)?;
        println!("installed completions to {}", path.display());
    } else {
        let mut stdout = std::io::stdout();
        completions::generate_completions(shell, &mut stdout);
    }
    Ok(())
}
