use serde::Serialize;

use super::cost::EmployerCost;
use super::dealbreakers::DealbreakerAssessment;
use super::domain::{CityRecord, Objective};
use super::feasibility::{Feasibility, FinancialMode, Verdict};
use super::ranking::{FeasibilityBand, RiskFlag};
use super::scoring::{CityTier, ObjectiveWeights};

/// One city after costing, scoring and ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResult {
    #[serde(flatten)]
    pub city: CityRecord,
    pub gross_monthly: u64,
    pub emc_monthly: u64,
    pub emc_annual: u64,
    pub team_total_monthly: u64,
    pub team_total_annual: u64,
    pub buffer_pct: f64,
    pub max_feasible: u32,
    pub verdict: Verdict,
    /// Whole-team annual saving against the reference city; negative when dearer.
    pub savings_annual: i64,
    pub tier: CityTier,
    pub domain_fit: bool,
    pub hiring_pressure: f64,
    pub strategic_score: f64,
    pub financial_score: f64,
    pub talent_score: f64,
    pub dealbreaker_penalty: f64,
    pub dealbreaker_hits: Vec<String>,
    pub weighted_raw: f64,
    pub weighted: f64,
    pub rank: u32,
    pub feasibility_band: FeasibilityBand,
}

/// Costing and feasibility of one city before any scoring.
#[derive(Debug, Clone)]
pub(crate) struct CostedCity {
    pub city: CityRecord,
    pub cost: EmployerCost,
    pub feasibility: Feasibility,
    pub savings_annual: i64,
}

/// Sub-scores of one city under the run's strategy.
#[derive(Debug, Clone)]
pub(crate) struct CityScores {
    pub tier: CityTier,
    pub domain_fit: bool,
    pub hiring_pressure: f64,
    pub strategic: f64,
    pub financial: f64,
    pub talent: f64,
    pub weighted_raw: f64,
    pub weighted: f64,
}

impl CityResult {
    pub(crate) fn assemble(
        costed: CostedCity,
        scores: CityScores,
        dealbreaker: DealbreakerAssessment,
    ) -> Self {
        let CostedCity {
            city,
            cost,
            feasibility,
            savings_annual,
        } = costed;

        let feasibility_band = FeasibilityBand::classify(
            feasibility.verdict,
            dealbreaker.penalty,
            scores.weighted,
            feasibility.buffer_pct,
        );

        Self {
            city,
            gross_monthly: cost.gross_monthly,
            emc_monthly: cost.emc_monthly,
            emc_annual: cost.emc_annual,
            team_total_monthly: feasibility.team_total_monthly,
            team_total_annual: feasibility.team_total_annual,
            buffer_pct: feasibility.buffer_pct,
            max_feasible: feasibility.max_feasible,
            verdict: feasibility.verdict,
            savings_annual,
            tier: scores.tier,
            domain_fit: scores.domain_fit,
            hiring_pressure: scores.hiring_pressure,
            strategic_score: scores.strategic,
            financial_score: scores.financial,
            talent_score: scores.talent,
            dealbreaker_penalty: dealbreaker.penalty,
            dealbreaker_hits: dealbreaker.hits,
            weighted_raw: scores.weighted_raw,
            weighted: scores.weighted,
            rank: 0,
            feasibility_band,
        }
    }

    pub fn id(&self) -> &str {
        &self.city.id
    }

    pub fn name(&self) -> &str {
        &self.city.name
    }
}

/// Reference-city cost for one hire and for the whole team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceBaseline {
    pub gross_monthly: u64,
    pub emc_monthly: u64,
    pub emc_annual: u64,
    pub team_annual: u64,
}

impl ReferenceBaseline {
    pub fn new(cost: &EmployerCost, team_size: u32) -> Self {
        Self {
            gross_monthly: cost.gross_monthly,
            emc_monthly: cost.emc_monthly,
            emc_annual: cost.emc_annual,
            team_annual: cost.emc_annual.saturating_mul(u64::from(team_size)),
        }
    }
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub version: &'static str,
    pub mode: FinancialMode,
    pub objective: Objective,
    pub budget_assumed: bool,
    pub effective_budget: f64,
    pub weights: ObjectiveWeights,
    #[serde(rename = "lisbonBaseline")]
    pub reference_baseline: ReferenceBaseline,
    pub team_size: u32,
    pub role_label: String,
    pub role_midpoint: f64,
    pub tier_multiplier: f64,
    pub stack_premium: f64,
    /// Ranked cities, best first.
    pub all_cities: Vec<CityResult>,
    pub risk_flags: Vec<RiskFlag>,
}

impl Analysis {
    pub fn city(&self, id: &str) -> Option<&CityResult> {
        self.all_cities.iter().find(|result| result.id() == id)
    }

    pub fn top(&self, count: usize) -> &[CityResult] {
        &self.all_cities[..count.min(self.all_cities.len())]
    }

    pub fn flags_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RiskFlag> + 'a {
        self.risk_flags.iter().filter(move |flag| flag.city == id)
    }
}
