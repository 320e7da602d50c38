//! Strategic, financial and talent sub-scores and their weighted blend.
//!
//! Two interchangeable formula sets implement [`ScoringStrategy`]:
//! [`NormalizedStrategy`] (continuous, pool-normalized, the default) and
//! [`TabularStrategy`] (step tables kept for reproducing older rankings).
//! Tier classification, contextual bonuses and weighting are shared.

mod normalized;
mod strategic;
mod tabular;

pub use normalized::NormalizedStrategy;
pub use strategic::{domain_fit, is_coastal, CityTier};
pub use tabular::TabularStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::{
    CityRecord, ComputationContext, Lifestyle, Objective, OfficeStrategy, WorkModel,
};
use super::feasibility::{Feasibility, FinancialMode};
use super::numeric::round_to;

/// Headcount from which strategic weight is favored over financial weight.
pub const LARGE_TEAM_HEADCOUNT: u32 = 50;

/// Formula set used for the three sub-scores.
pub trait ScoringStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn financial_score(&self, mode: FinancialMode, feasibility: &Feasibility, team_size: u32)
        -> f64;

    fn talent(&self, city: &CityRecord, context: &ScoringContext<'_>) -> TalentAssessment;

    fn strategic_score(
        &self,
        city: &CityRecord,
        tier: CityTier,
        context: &ScoringContext<'_>,
    ) -> f64;
}

/// Selectable strategy identifier, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Normalized,
    Tabular,
}

impl StrategyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normalized" | "continuous" => Some(Self::Normalized),
            "tabular" | "legacy" | "step" => Some(Self::Tabular),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::Normalized => "normalized",
            StrategyKind::Tabular => "tabular",
        }
    }

    /// Version tag stamped on every analysis produced with this strategy.
    pub const fn version(self) -> &'static str {
        match self {
            StrategyKind::Normalized => "normalized-v3",
            StrategyKind::Tabular => "tabular-v4",
        }
    }

    pub fn build(self) -> Box<dyn ScoringStrategy> {
        match self {
            StrategyKind::Normalized => Box::new(NormalizedStrategy),
            StrategyKind::Tabular => Box::new(TabularStrategy),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Talent sub-score with the pressure figure it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TalentAssessment {
    pub score: f64,
    /// Objective-scaled headcount over ICT graduates, percent, one decimal.
    pub hiring_pressure: f64,
}

/// Observed spread of a graduate pool across the candidate cities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolRange {
    pub min: f64,
    pub max: f64,
}

impl PoolRange {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Self { min: 0.0, max: 0.0 };
        };
        iter.fold(
            Self {
                min: first,
                max: first,
            },
            |range, value| Self {
                min: range.min.min(value),
                max: range.max.max(value),
            },
        )
    }

    /// Position of `value` in the range, `0.0..=1.0` for observed values.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min).max(1.0)
    }
}

/// Run-wide inputs every strategy may read.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub objective: Objective,
    pub work_model: WorkModel,
    pub office_strategy: OfficeStrategy,
    pub lifestyle: Lifestyle,
    pub industry: &'a str,
    pub team_size: u32,
    pub headcount: u32,
    pub stem_range: PoolRange,
    pub ict_range: PoolRange,
}

impl<'a> ScoringContext<'a> {
    pub fn new(context: &'a ComputationContext, cities: &[CityRecord]) -> Self {
        Self {
            objective: context.objective,
            work_model: context.work_model,
            office_strategy: context.office_strategy,
            lifestyle: context.lifestyle,
            industry: &context.industry,
            team_size: context.team_size,
            headcount: context.headcount,
            stem_range: PoolRange::from_values(cities.iter().map(|city| city.stem_grads as f64)),
            ict_range: PoolRange::from_values(
                cities.iter().map(|city| city.effective_ict_grads() as f64),
            ),
        }
    }

    /// Demand multiplier: speed hires more aggressively, cost more patiently.
    pub fn team_scale_factor(&self) -> f64 {
        match self.objective {
            Objective::Speed => 1.1,
            Objective::Cost => 0.95,
            Objective::Quality | Objective::Balanced => 1.0,
        }
    }

    /// Pressure above which a city is considered over-fished for this team.
    pub fn pressure_threshold(&self) -> f64 {
        match self.headcount {
            0..=15 => 20.0,
            16..=30 => 15.0,
            _ => 10.0,
        }
    }

    /// Unrounded hiring pressure in percent.
    pub fn hiring_pressure(&self, city: &CityRecord) -> f64 {
        let demand = self.team_size as f64 * self.team_scale_factor();
        demand / city.effective_ict_grads() as f64 * 100.0
    }
}

/// Weight given to each sub-score; always sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub strategic: f64,
    pub financial: f64,
    pub talent: f64,
}

impl ObjectiveWeights {
    pub const fn for_objective(objective: Objective) -> Self {
        match objective {
            Objective::Cost => Self {
                strategic: 0.15,
                financial: 0.60,
                talent: 0.25,
            },
            Objective::Quality => Self {
                strategic: 0.40,
                financial: 0.20,
                talent: 0.40,
            },
            Objective::Speed => Self {
                strategic: 0.20,
                financial: 0.35,
                talent: 0.45,
            },
            Objective::Balanced => Self {
                strategic: 0.25,
                financial: 0.40,
                talent: 0.35,
            },
        }
    }

    /// Objective profile, nudged toward strategy for large teams.
    pub fn for_headcount(objective: Objective, headcount: u32) -> Self {
        let base = Self::for_objective(objective);
        let adjusted = if headcount >= LARGE_TEAM_HEADCOUNT {
            Self {
                strategic: (base.strategic + 0.05).min(0.50),
                financial: (base.financial - 0.05).max(0.15),
                talent: base.talent,
            }
        } else {
            base
        };
        adjusted.normalized()
    }

    pub fn sum(&self) -> f64 {
        self.strategic + self.financial + self.talent
    }

    fn normalized(self) -> Self {
        let total = self.sum();
        Self {
            strategic: self.strategic / total,
            financial: self.financial / total,
            talent: self.talent / total,
        }
    }

    /// Weighted blend rounded to two decimals.
    pub fn combine(&self, strategic: f64, financial: f64, talent: f64) -> f64 {
        round_to(
            strategic * self.strategic + financial * self.financial + talent * self.talent,
            2,
        )
    }
}

/// Subtract a dealbreaker penalty; the result never drops below 1.
pub fn apply_penalty(weighted_raw: f64, penalty: f64) -> f64 {
    round_to(weighted_raw - penalty, 2).max(1.0)
}
