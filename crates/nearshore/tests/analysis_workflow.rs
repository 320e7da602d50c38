use std::path::PathBuf;

use chrono::NaiveDate;
use nearshore::catalog::{CityCatalog, CityRepository, CompensationCatalog};
use nearshore::simulator::{
    compute_emc, render_ranking_table, write_csv, AnalysisSummary, EmployerCost, Feasibility,
    FinancialMode, RiskFlagKind, Scenario, SimulatorEngine, StrategyKind, Verdict,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn catalogs() -> (CityCatalog, CompensationCatalog) {
    let cities = CityCatalog::from_path(data_dir().join("cities.json")).expect("cities load");
    let compensation = CompensationCatalog::from_path(data_dir().join("compensation.json"))
        .expect("compensation loads");
    (cities, compensation)
}

fn senior_ml_scenario(compensation: &CompensationCatalog) -> Scenario {
    let mut scenario = Scenario::new(
        compensation.role_band("ml-data-engineer"),
        compensation.tier_multiplier("senior"),
        compensation.resolve_stack_premium(["ml-mlops", "devops-cloud"]),
    );
    scenario.team_size = Some(8.0);
    scenario.industry = "AI for logistics".to_string();
    scenario.objective = "quality".to_string();
    scenario
}

#[test]
fn employer_cost_for_a_senior_premium_role() {
    let cost = compute_emc(4000.0, 1.25, 0.25, 90.0);
    assert_eq!(cost.gross_monthly, 5625);
    assert_eq!(cost.emc_monthly, 7136);
}

#[test]
fn ten_person_team_on_a_short_budget() {
    let cost = EmployerCost::from_monthly(2280, 3000);
    let feasibility = Feasibility::evaluate(&cost, 28000.0, 10);

    assert_eq!(feasibility.buffer_pct, -6.7);
    assert_eq!(feasibility.verdict, Verdict::Infeasible);
    assert_eq!(feasibility.max_feasible, 9);
}

#[test]
fn full_dataset_ranks_every_city() {
    let (cities, compensation) = catalogs();
    let scenario = senior_ml_scenario(&compensation);
    let analysis = SimulatorEngine::default().analyze_with(&cities, &scenario);

    assert_eq!(analysis.all_cities.len(), cities.cities().len());
    assert_eq!(analysis.all_cities.len(), 20);
    assert_eq!(analysis.team_size, 8);
    assert_eq!(analysis.role_label, "ML / Data Engineer");
    assert_eq!(analysis.tier_multiplier, 1.25);
    assert_eq!(analysis.stack_premium, 0.25);
    assert!(analysis.budget_assumed);
    assert_eq!(analysis.mode, FinancialMode::BufferPct);

    let lisbon = analysis.city("lisbon").expect("lisbon ranked");
    assert_eq!(lisbon.savings_annual, 0);
    assert!(lisbon.domain_fit);

    for (index, city) in analysis.all_cities.iter().enumerate() {
        assert_eq!(city.rank as usize, index + 1);
        assert_eq!(city.verdict, Verdict::from_buffer_pct(city.buffer_pct));
        if city.verdict == Verdict::Infeasible {
            assert!(analysis
                .flags_for(city.id())
                .any(|flag| flag.flag == RiskFlagKind::InfeasibleCity));
        }
    }
}

#[test]
fn airport_time_window_dealbreaker_against_the_dataset() {
    let (cities, compensation) = catalogs();
    let mut scenario = senior_ml_scenario(&compensation);
    scenario.dealbreakers = "Airport within 1h for client visits".to_string();
    scenario.work_model = "hybrid".to_string();

    let analysis = SimulatorEngine::default().analyze_with(&cities, &scenario);

    let braga = analysis.city("braga").expect("braga ranked");
    assert!(braga.dealbreaker_hits.is_empty());

    let covilha = analysis.city("covilha").expect("covilha ranked");
    assert_eq!(
        covilha.dealbreaker_hits,
        vec!["airport-time-window-fail".to_string()]
    );
    assert!(covilha.weighted < covilha.weighted_raw);
}

#[test]
fn strategies_rank_the_same_dataset_independently() {
    let (cities, compensation) = catalogs();
    let scenario = senior_ml_scenario(&compensation);

    let normalized =
        SimulatorEngine::new(StrategyKind::Normalized).analyze_with(&cities, &scenario);
    let tabular = SimulatorEngine::new(StrategyKind::Tabular).analyze_with(&cities, &scenario);

    assert_eq!(normalized.version, "normalized-v3");
    assert_eq!(tabular.version, "tabular-v4");
    assert_eq!(
        normalized.reference_baseline,
        tabular.reference_baseline,
        "costing does not depend on the scoring strategy"
    );
    for city in &tabular.all_cities {
        let counterpart = normalized.city(city.id()).expect("same cities");
        assert_eq!(city.emc_monthly, counterpart.emc_monthly);
        assert_eq!(city.buffer_pct, counterpart.buffer_pct);
    }
}

#[test]
fn reports_render_every_city() {
    let (cities, compensation) = catalogs();
    let analysis =
        SimulatorEngine::default().analyze_with(&cities, &senior_ml_scenario(&compensation));

    let table = render_ranking_table(&analysis);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 22);
    assert!(lines[0].starts_with("| # | City |"));
    assert!(lines[2].starts_with("| 1 | "));

    let mut csv = Vec::new();
    write_csv(&analysis, &mut csv).expect("csv written");
    let csv = String::from_utf8(csv).expect("utf8 csv");
    assert_eq!(csv.lines().count(), 21);
    assert!(csv.starts_with("rank,id,name,"));

    let today = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
    let summary = AnalysisSummary::new(&analysis, today);
    assert_eq!(summary.scores.len(), 20);
    assert_eq!(summary.weighted_order_all_cities[0], analysis.all_cities[0].city.id);
    let json = summary.to_json_pretty().expect("summary serializes");
    assert!(json.contains("\"generated_on\": \"2026-03-02\""));
    assert!(json.contains("\"savings_vs_lisbon_annual\""));
}
