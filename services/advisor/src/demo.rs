use crate::analyze::{build_scenario, AnalyzeArgs};
use clap::Args;
use nearshore::catalog::{CityRepository, CompensationCatalog};
use nearshore::config::SimulatorConfig;
use nearshore::error::AppError;
use nearshore::simulator::report::format_thousands;
use nearshore::simulator::SimulatorEngine;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Cities shown per scenario
    #[arg(long, default_value_t = 3)]
    pub top: usize,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self { top: 3 }
    }
}

fn demo_scenarios() -> Vec<(&'static str, AnalyzeArgs)> {
    vec![
        (
            "Five mid-level software engineers, no budget given",
            AnalyzeArgs {
                role: "software-engineer".to_string(),
                seniority: "mid".to_string(),
                team: Some("5".to_string()),
                objective: "balanced".to_string(),
                ..AnalyzeArgs::default()
            },
        ),
        (
            "Cost-driven QA centre of 25 on € 75,000/month",
            AnalyzeArgs {
                role: "qa-testing".to_string(),
                seniority: "junior".to_string(),
                team: Some("25 testers".to_string()),
                budget: Some("€ 75,000".to_string()),
                objective: "cost".to_string(),
                lifestyle: "low-cost".to_string(),
                ..AnalyzeArgs::default()
            },
        ),
        (
            "Senior ML team for a fintech, airport within 1h30",
            AnalyzeArgs {
                role: "ml-data-engineer".to_string(),
                seniority: "senior".to_string(),
                stacks: vec!["ml-mlops".to_string(), "devops-cloud".to_string()],
                team: Some("12".to_string()),
                industry: "fintech".to_string(),
                objective: "quality".to_string(),
                dealbreakers: "airport within 1h30, university pipeline".to_string(),
                work_model: "hybrid".to_string(),
                office_strategy: "university-adjacent".to_string(),
                ..AnalyzeArgs::default()
            },
        ),
    ]
}

pub fn run_demo(
    args: DemoArgs,
    config: &SimulatorConfig,
    cities: &impl CityRepository,
    compensation: &CompensationCatalog,
) -> Result<(), AppError> {
    let engine = SimulatorEngine::new(config.strategy);
    println!(
        "Nearshore demo: {} cities, {} scoring\n",
        cities.cities().len(),
        engine.strategy_kind()
    );

    for (title, input) in demo_scenarios() {
        let scenario = build_scenario(&input, compensation);
        let analysis = engine.analyze_with(cities, &scenario);

        println!("== {title}");
        println!(
            "   {} | {} | budget €{}/month{}",
            analysis.role_label,
            analysis.mode.label(),
            format_thousands(analysis.effective_budget.round().max(0.0) as u64),
            if analysis.budget_assumed { " (assumed)" } else { "" },
        );

        for city in analysis.top(args.top) {
            let flags = analysis.flags_for(city.id()).count();
            println!(
                "   #{} {:<16} weighted {:>5.2} | EMC €{}/mo | buffer {:>6.1}% | {} | {}{}",
                city.rank,
                city.name(),
                city.weighted,
                format_thousands(city.emc_monthly),
                city.buffer_pct,
                city.verdict.label(),
                city.feasibility_band.label(),
                if flags > 0 {
                    format!(" | {flags} flag(s)")
                } else {
                    String::new()
                },
            );
        }
        println!();
    }

    Ok(())
}
