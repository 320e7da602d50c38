use crate::analyze::{run_analysis, AnalyzeArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::infra::{load_catalogs, parse_strategy};
use clap::{Parser, Subcommand};
use nearshore::catalog::{CityRepository, CompensationCatalog};
use nearshore::config::AppConfig;
use nearshore::error::AppError;
use nearshore::simulator::StrategyKind;
use nearshore::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Nearshore Advisor",
    about = "Rank Portuguese cities for a nearshore engineering team from the command line",
    version
)]
struct Cli {
    /// Directory holding cities.json and compensation.json (overrides NEARSHORE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Scoring formulas: normalized or tabular (overrides NEARSHORE_STRATEGY)
    #[arg(long, global = true, value_parser = parse_strategy)]
    strategy: Option<StrategyKind>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank every city for one hiring scenario
    Analyze(AnalyzeArgs),
    /// List the cities in the dataset
    Cities,
    /// List role bands, seniority multipliers and stack premiums
    Roles,
    /// Run three canned scenarios end to end (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(data_dir) = cli.data_dir {
        config.simulator = config.simulator.with_data_dir(data_dir);
    }
    if let Some(strategy) = cli.strategy {
        config.simulator.strategy = strategy;
    }

    telemetry::init(&config.telemetry)?;

    let (cities, compensation) = load_catalogs(&config.simulator)?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Analyze(args) => run_analysis(args, &config.simulator, &cities, &compensation),
        Command::Cities => {
            list_cities(&cities);
            Ok(())
        }
        Command::Roles => {
            list_roles(&compensation);
            Ok(())
        }
        Command::Demo(args) => run_demo(args, &config.simulator, &cities, &compensation),
    }
}

fn list_cities(cities: &impl CityRepository) {
    println!("{} candidate cities", cities.cities().len());
    for city in cities.cities() {
        println!(
            "- {:<14} {:<16} idx {:>5.1} | STEM {:>5} | ICT {:>5} | CoL {:>4.1} | office €{}-{}/m² | airport {}{}",
            city.id,
            city.name,
            city.salary_index,
            city.stem_grads,
            city.ict_grads,
            city.col_index,
            city.office_rent.min,
            city.office_rent.max,
            if city.has_airport { "yes" } else { "no" },
            if city.featured { " | featured" } else { "" },
        );
    }
}

fn list_roles(compensation: &CompensationCatalog) {
    println!("Role bands (monthly gross, reference city)");
    for (key, band) in compensation.role_bands() {
        println!(
            "- {:<20} {:<30} €{:.0} / €{:.0} / €{:.0}",
            key, band.label, band.min, band.mid, band.max
        );
    }

    println!("\nSeniority multipliers");
    for (key, multiplier) in compensation.seniority_multipliers() {
        println!("- {key:<8} x{multiplier:.2}");
    }

    println!("\nStack premiums (the highest selected premium applies)");
    for (key, premium) in compensation.stack_premiums() {
        println!("- {:<14} +{:.0}%", key, premium * 100.0);
    }
}
