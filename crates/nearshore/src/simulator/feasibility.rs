use serde::{Deserialize, Serialize};

use super::cost::EmployerCost;
use super::numeric::{round_half_up, round_to};

/// Assumed budget headroom over the reference-city team cost.
pub const DEFAULT_BUDGET_BUFFER: f64 = 1.10;
/// Buffer at or above which a city is comfortably affordable.
pub const FEASIBLE_BUFFER_PCT: f64 = 10.0;

const MONTHS_PER_YEAR: u64 = 12;

/// Three-state affordability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Feasible,
    Tight,
    Infeasible,
}

impl Verdict {
    pub fn from_buffer_pct(buffer_pct: f64) -> Self {
        if buffer_pct >= FEASIBLE_BUFFER_PCT {
            Self::Feasible
        } else if buffer_pct >= 0.0 {
            Self::Tight
        } else {
            Self::Infeasible
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Feasible => "FEASIBLE",
            Verdict::Tight => "TIGHT",
            Verdict::Infeasible => "INFEASIBLE",
        }
    }
}

/// Which financial-score table applies to the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancialMode {
    /// At least one city affords the requested team; score on buffer %.
    #[serde(rename = "MODE_A")]
    BufferPct,
    /// No city affords the team; score on `maxFeasible / teamSize`.
    #[serde(rename = "MODE_B")]
    HeadcountRatio,
}

impl FinancialMode {
    pub const fn label(self) -> &'static str {
        match self {
            FinancialMode::BufferPct => "MODE_A",
            FinancialMode::HeadcountRatio => "MODE_B",
        }
    }
}

/// Monthly budget the run is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetBasis {
    pub effective_budget: f64,
    pub budget_assumed: bool,
}

impl BudgetBasis {
    /// Use the stated budget, or assume the reference team cost plus 10%.
    pub fn resolve(budget: Option<f64>, reference: &EmployerCost, team_size: u32) -> Self {
        match budget {
            Some(stated) => Self {
                effective_budget: stated,
                budget_assumed: false,
            },
            None => Self {
                effective_budget: round_half_up(
                    reference.emc_monthly as f64 * team_size as f64 * DEFAULT_BUDGET_BUFFER,
                ),
                budget_assumed: true,
            },
        }
    }
}

/// Affordability of one city's team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feasibility {
    pub team_total_monthly: u64,
    pub team_total_annual: u64,
    /// Surplus (+) or deficit (-) as a whole-number percentage, one decimal.
    pub buffer_pct: f64,
    pub max_feasible: u32,
    pub verdict: Verdict,
}

impl Feasibility {
    pub fn evaluate(cost: &EmployerCost, effective_budget: f64, team_size: u32) -> Self {
        let team_size = team_size.max(1);
        let team_total_monthly = cost.emc_monthly.saturating_mul(u64::from(team_size));
        let team_total_annual = team_total_monthly.saturating_mul(MONTHS_PER_YEAR);
        let emc_monthly = cost.emc_monthly.max(1) as f64;
        let team_cost = emc_monthly * team_size as f64;

        let buffer_pct = round_to((effective_budget - team_cost) / team_cost * 100.0, 1);
        let max_feasible = (effective_budget / emc_monthly).floor().max(0.0);
        let max_feasible = max_feasible.min(u32::MAX as f64) as u32;

        Self {
            team_total_monthly,
            team_total_annual,
            buffer_pct,
            max_feasible,
            verdict: Verdict::from_buffer_pct(buffer_pct),
        }
    }

    pub fn affords(&self, team_size: u32) -> bool {
        self.max_feasible >= team_size
    }

    pub fn headcount_ratio(&self, team_size: u32) -> f64 {
        self.max_feasible as f64 / team_size.max(1) as f64
    }
}

/// MODE_A as soon as any city affords the full team.
pub fn select_mode<'a, I>(feasibilities: I, team_size: u32) -> FinancialMode
where
    I: IntoIterator<Item = &'a Feasibility>,
{
    if feasibilities
        .into_iter()
        .any(|feasibility| feasibility.affords(team_size))
    {
        FinancialMode::BufferPct
    } else {
        FinancialMode::HeadcountRatio
    }
}
