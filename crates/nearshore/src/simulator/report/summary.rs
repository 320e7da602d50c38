use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::analysis::{Analysis, CityResult};
use super::super::domain::Objective;
use super::super::feasibility::{FinancialMode, Verdict};
use super::super::ranking::{FeasibilityBand, RiskFlag};

/// Per-city figures in the machine-readable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityScoreSummary {
    pub rank: u32,
    pub weighted: f64,
    pub weighted_raw: f64,
    pub financial_score: f64,
    pub talent_score: f64,
    pub strategic_score: f64,
    pub dealbreaker_penalty: f64,
    pub dealbreaker_hits: Vec<String>,
    pub feasibility_band: FeasibilityBand,
    pub verdict: Verdict,
    pub buffer_pct: f64,
    pub emc_monthly: u64,
    pub emc_annual: u64,
    pub team_cost_monthly: u64,
    pub team_cost_annual: u64,
    pub savings_vs_lisbon_annual: i64,
}

impl From<&CityResult> for CityScoreSummary {
    fn from(city: &CityResult) -> Self {
        Self {
            rank: city.rank,
            weighted: city.weighted,
            weighted_raw: city.weighted_raw,
            financial_score: city.financial_score,
            talent_score: city.talent_score,
            strategic_score: city.strategic_score,
            dealbreaker_penalty: city.dealbreaker_penalty,
            dealbreaker_hits: city.dealbreaker_hits.clone(),
            feasibility_band: city.feasibility_band,
            verdict: city.verdict,
            buffer_pct: city.buffer_pct,
            emc_monthly: city.emc_monthly,
            emc_annual: city.emc_annual,
            team_cost_monthly: city.team_total_monthly,
            team_cost_annual: city.team_total_annual,
            savings_vs_lisbon_annual: city.savings_annual,
        }
    }
}

/// Snake-case digest of an analysis, stamped with the day it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub version: String,
    pub generated_on: NaiveDate,
    pub mode: FinancialMode,
    pub budget_assumed: bool,
    pub effective_budget_monthly: f64,
    pub primary_objective: Objective,
    pub team_size: u32,
    pub role: String,
    pub lisbon_baseline_emc_annual: u64,
    pub lisbon_team_annual: u64,
    /// Every ranked city id, alphabetical.
    pub considered_cities: Vec<String>,
    pub weighted_order_all_cities: Vec<String>,
    pub scores: BTreeMap<String, CityScoreSummary>,
    pub risk_flags: Vec<RiskFlag>,
}

impl AnalysisSummary {
    pub fn new(analysis: &Analysis, generated_on: NaiveDate) -> Self {
        let weighted_order_all_cities: Vec<String> = analysis
            .all_cities
            .iter()
            .map(|city| city.id().to_string())
            .collect();

        let mut considered_cities = weighted_order_all_cities.clone();
        considered_cities.sort();

        let scores = analysis
            .all_cities
            .iter()
            .map(|city| (city.id().to_string(), CityScoreSummary::from(city)))
            .collect();

        Self {
            version: analysis.version.to_string(),
            generated_on,
            mode: analysis.mode,
            budget_assumed: analysis.budget_assumed,
            effective_budget_monthly: analysis.effective_budget,
            primary_objective: analysis.objective,
            team_size: analysis.team_size,
            role: analysis.role_label.clone(),
            lisbon_baseline_emc_annual: analysis.reference_baseline.emc_annual,
            lisbon_team_annual: analysis.reference_baseline.team_annual,
            considered_cities,
            weighted_order_all_cities,
            scores,
            risk_flags: analysis.risk_flags.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
