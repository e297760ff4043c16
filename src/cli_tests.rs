use clap::Parser;

use super::{
    Cli, Commands, FactorCommands, InitiativeCommands, MeasureCommands, SupplierCommands,
    TargetCommands, TrackCommands,
};

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(args)
}

#[test]
fn track_new_parses() {
    let cli = parse(&["fpt", "track", "new", "Electricity", "--unit", "kgCO2e"]);
    match cli.command {
        Commands::Track(args) => match args.command {
            TrackCommands::New(new_args) => {
                assert_eq!(new_args.name, "Electricity");
                assert_eq!(new_args.unit, "kgCO2e");
            }
            other => panic!("expected New, got {:?}", other),
        },
        other => panic!("expected Track, got {:?}", other),
    }
}

#[test]
fn track_update_flags_parse() {
    let cli = parse(&["fpt", "track", "update", "trk-1", "-n", "Grid power"]);
    match cli.command {
        Commands::Track(args) => match args.command {
            TrackCommands::Update(update_args) => {
                assert_eq!(update_args.id, "trk-1");
                assert_eq!(update_args.name.as_deref(), Some("Grid power"));
                assert!(update_args.unit.is_none());
            }
            other => panic!("expected Update, got {:?}", other),
        },
        other => panic!("expected Track, got {:?}", other),
    }
}

#[test]
fn factor_new_parses_all_flags() {
    let cli = parse(&[
        "fpt", "factor", "new", "Diesel", "-t", "trk-1", "-v", "2.68", "-u", "kgCO2e", "-c",
        "fuel",
    ]);
    match cli.command {
        Commands::Factor(args) => match args.command {
            FactorCommands::New(new_args) => {
                assert_eq!(new_args.name, "Diesel");
                assert_eq!(new_args.track_id, "trk-1");
                assert_eq!(new_args.value, 2.68);
                assert_eq!(new_args.unit, "kgCO2e");
                assert_eq!(new_args.category, "fuel");
            }
            other => panic!("expected New, got {:?}", other),
        },
        other => panic!("expected Factor, got {:?}", other),
    }
}

#[test]
fn measure_new_parses_without_supplier() {
    let cli = parse(&["fpt", "measure", "new", "-f", "fac-1", "-q", "10"]);
    match cli.command {
        Commands::Measure(args) => match args.command {
            MeasureCommands::New(new_args) => {
                assert_eq!(new_args.factor_id, "fac-1");
                assert_eq!(new_args.quantity, 10.0);
                assert!(new_args.supplier_id.is_none());
            }
            other => panic!("expected New, got {:?}", other),
        },
        other => panic!("expected Measure, got {:?}", other),
    }
}

#[test]
fn measurement_alias_parses() {
    let cli = parse(&["fpt", "measurement", "ls"]);
    match cli.command {
        Commands::Measure(args) => {
            assert!(matches!(args.command, MeasureCommands::Ls(_)));
        }
        other => panic!("expected Measure, got {:?}", other),
    }
}

#[test]
fn measure_update_clear_supplier_parses() {
    let cli = parse(&["fpt", "measure", "update", "mea-1", "--clear-supplier"]);
    match cli.command {
        Commands::Measure(args) => match args.command {
            MeasureCommands::Update(update_args) => {
                assert_eq!(update_args.id, "mea-1");
                assert!(update_args.clear_supplier);
                assert!(update_args.supplier_id.is_none());
            }
            other => panic!("expected Update, got {:?}", other),
        },
        other => panic!("expected Measure, got {:?}", other),
    }
}

#[test]
fn target_new_parses_percentage() {
    let cli = parse(&[
        "fpt",
        "target",
        "new",
        "--track",
        "trk-1",
        "-b",
        "100",
        "--percentage",
        "25",
    ]);
    match cli.command {
        Commands::Target(args) => match args.command {
            TargetCommands::New(new_args) => {
                assert_eq!(new_args.track_id, "trk-1");
                assert_eq!(new_args.baseline, 100.0);
                assert_eq!(new_args.target_percentage, 25.0);
                assert!(new_args.scenario_id.is_none());
            }
            other => panic!("expected New, got {:?}", other),
        },
        other => panic!("expected Target, got {:?}", other),
    }
}

#[test]
fn initiative_new_collects_repeated_targets() {
    let cli = parse(&[
        "fpt",
        "initiative",
        "new",
        "LED retrofit",
        "-p",
        "-10%",
        "-t",
        "tgt-1",
        "-t",
        "tgt-2",
    ]);
    match cli.command {
        Commands::Initiative(args) => match args.command {
            InitiativeCommands::New(new_args) => {
                assert_eq!(new_args.name, "LED retrofit");
                assert_eq!(new_args.plan, "-10%");
                assert_eq!(new_args.target_ids, vec!["tgt-1", "tgt-2"]);
            }
            other => panic!("expected New, got {:?}", other),
        },
        other => panic!("expected Initiative, got {:?}", other),
    }
}

#[test]
fn initiative_attach_requires_at_least_one_target() {
    assert!(Cli::try_parse_from(["fpt", "initiative", "attach", "ini-1"]).is_err());
    let cli = parse(&["fpt", "initiative", "attach", "ini-1", "tgt-1", "tgt-2"]);
    match cli.command {
        Commands::Initiative(args) => match args.command {
            InitiativeCommands::Attach(attach_args) => {
                assert_eq!(attach_args.id, "ini-1");
                assert_eq!(attach_args.target_ids, vec!["tgt-1", "tgt-2"]);
            }
            other => panic!("expected Attach, got {:?}", other),
        },
        other => panic!("expected Initiative, got {:?}", other),
    }
}

#[test]
fn initiative_detach_parses() {
    let cli = parse(&["fpt", "initiative", "detach", "ini-1", "tgt-1"]);
    match cli.command {
        Commands::Initiative(args) => match args.command {
            InitiativeCommands::Detach(detach_args) => {
                assert_eq!(detach_args.id, "ini-1");
                assert_eq!(detach_args.target_id, "tgt-1");
            }
            other => panic!("expected Detach, got {:?}", other),
        },
        other => panic!("expected Initiative, got {:?}", other),
    }
}

#[test]
fn supplier_new_currency_is_optional() {
    let cli = parse(&["fpt", "supplier", "new", "Acme", "-i", "logistics"]);
    match cli.command {
        Commands::Supplier(args) => match args.command {
            SupplierCommands::New(new_args) => {
                assert_eq!(new_args.name, "Acme");
                assert_eq!(new_args.industry, "logistics");
                assert!(new_args.currency.is_none());
            }
            other => panic!("expected New, got {:?}", other),
        },
        other => panic!("expected Supplier, got {:?}", other),
    }
}

#[test]
fn show_json_flag_parses() {
    let cli = parse(&["fpt", "track", "show", "trk-1", "-j"]);
    match cli.command {
        Commands::Track(args) => match args.command {
            TrackCommands::Show(show_args) => {
                assert_eq!(show_args.id, "trk-1");
                assert!(show_args.json);
            }
            other => panic!("expected Show, got {:?}", other),
        },
        other => panic!("expected Track, got {:?}", other),
    }
}

#[test]
fn completions_parses_with_shell() {
    let cli = parse(&["fpt", "completions", "bash"]);
    match cli.command {
        Commands::Completions(args) => {
            assert_eq!(args.shell.as_deref(), Some("bash"));
            assert!(!args.install);
        }
        other => panic!("expected Completions, got {:?}", other),
    }
}
