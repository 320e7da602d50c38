use crate::infra::{parse_budget, parse_date, parse_team_size};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use nearshore::catalog::{CityRepository, CompensationCatalog, DEFAULT_ROLE};
use nearshore::config::SimulatorConfig;
use nearshore::error::AppError;
use nearshore::simulator::report::format_thousands;
use nearshore::simulator::{
    render_ranking_table, write_csv, Analysis, AnalysisSummary, Scenario, SimulatorEngine,
};
use std::io;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown ranking table with the risk flags underneath
    #[default]
    Table,
    /// Snake-case summary for downstream tooling
    Json,
    /// Every computed field, camelCase
    FullJson,
    /// One row per city
    Csv,
}

#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    /// Role band key, for example ml-data-engineer (see `roles`)
    #[arg(long, default_value = DEFAULT_ROLE)]
    pub role: String,
    /// Seniority level: junior, mid, senior or lead
    #[arg(long, default_value = "mid")]
    pub seniority: String,
    /// Technology stacks; the highest premium among them applies
    #[arg(long = "stack", value_delimiter = ',')]
    pub stacks: Vec<String>,
    /// Team size as typed by the client, e.g. "about 12 engineers"
    #[arg(long)]
    pub team: Option<String>,
    /// Monthly budget as typed by the client, e.g. "€ 75,000"
    #[arg(long)]
    pub budget: Option<String>,
    /// Industry, used for domain fit
    #[arg(long, default_value = "")]
    pub industry: String,
    /// Primary objective: cost, quality, speed or balanced
    #[arg(long, default_value = "balanced")]
    pub objective: String,
    /// Free-text hard requirements, e.g. "airport within 1h30, coastal"
    #[arg(long, default_value = "")]
    pub dealbreakers: String,
    /// hybrid, office-first, fully-onsite, remote-first or fully-remote
    #[arg(long, default_value = "")]
    pub work_model: String,
    /// university-adjacent or city-center
    #[arg(long, default_value = "")]
    pub office_strategy: String,
    /// coastal-warm or low-cost
    #[arg(long, default_value = "")]
    pub lifestyle: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Date stamped on the JSON summary (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

/// Resolve the form values against the compensation catalog.
pub fn build_scenario(args: &AnalyzeArgs, compensation: &CompensationCatalog) -> Scenario {
    if !args.role.is_empty() && !compensation.has_role(&args.role) {
        warn!(role = %args.role, fallback = DEFAULT_ROLE, "unknown role, using fallback band");
    }

    let mut scenario = Scenario::new(
        compensation.role_band(&args.role),
        compensation.tier_multiplier(&args.seniority),
        compensation.resolve_stack_premium(args.stacks.iter().map(String::as_str)),
    );

    let team = args.team.as_deref().and_then(parse_team_size);
    if args.team.is_some() && team.is_none() {
        warn!(input = ?args.team, "team size has no number, using the default");
    }
    scenario.team_size = team.map(f64::from);
    scenario.headcount = scenario.team_size;
    scenario.budget = args.budget.as_deref().and_then(parse_budget);
    scenario.industry = args.industry.clone();
    scenario.objective = args.objective.clone();
    scenario.dealbreakers = args.dealbreakers.clone();
    scenario.work_model = args.work_model.clone();
    scenario.office_strategy = args.office_strategy.clone();
    scenario.lifestyle = args.lifestyle.clone();
    scenario
}

pub fn run_analysis(
    args: AnalyzeArgs,
    config: &SimulatorConfig,
    cities: &impl CityRepository,
    compensation: &CompensationCatalog,
) -> Result<(), AppError> {
    let scenario = build_scenario(&args, compensation);
    let engine = SimulatorEngine::new(config.strategy);
    let analysis = engine.analyze_with(cities, &scenario);

    if analysis.all_cities.is_empty() {
        return Err(AppError::InvalidInput(
            "the dataset has no city that can be ranked".to_string(),
        ));
    }

    info!(
        version = analysis.version,
        mode = analysis.mode.label(),
        leader = analysis.all_cities[0].id(),
        "analysis complete"
    );

    match args.format {
        OutputFormat::Table => print_report(&analysis),
        OutputFormat::Json => {
            let today = args.today.unwrap_or_else(|| Local::now().date_naive());
            println!("{}", AnalysisSummary::new(&analysis, today).to_json_pretty()?);
        }
        OutputFormat::FullJson => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Csv => write_csv(&analysis, io::stdout().lock())?,
    }

    Ok(())
}

pub fn print_report(analysis: &Analysis) {
    println!(
        "{} | team of {} | seniority x{:.2} | objective {} | scoring {}",
        analysis.role_label,
        analysis.team_size,
        analysis.tier_multiplier,
        analysis.objective.label(),
        analysis.version,
    );
    println!(
        "{}: €{}/month{}",
        analysis.mode.label(),
        format_thousands(analysis.effective_budget.round().max(0.0) as u64),
        if analysis.budget_assumed {
            " (assumed: Lisbon team cost + 10%)"
        } else {
            ""
        },
    );
    println!(
        "Lisbon baseline: €{} EMC/month per hire, €{} per year for the team\n",
        format_thousands(analysis.reference_baseline.emc_monthly),
        format_thousands(analysis.reference_baseline.team_annual),
    );
    println!("{}", render_ranking_table(analysis));

    if analysis.risk_flags.is_empty() {
        return;
    }

    println!("\nRisk flags");
    for flag in &analysis.risk_flags {
        let mut line = format!("- {}: {}", flag.city, flag.flag.label());
        if let Some(note) = &flag.note {
            line.push_str(&format!(" ({note})"));
        }
        if let Some(confidence) = flag.confidence {
            line.push_str(&format!(" [confidence {confidence:?}]"));
        }
        println!("{line}");
    }
}
