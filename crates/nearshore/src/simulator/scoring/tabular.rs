use super::super::domain::CityRecord;
use super::super::feasibility::{Feasibility, FinancialMode};
use super::super::numeric::{clamp, round_to};
use super::strategic::{contextual_bonus, domain_fit, CityTier};
use super::{ScoringContext, ScoringStrategy, StrategyKind, TalentAssessment};

/// `(lower bound, score)` rows, checked top to bottom.
const BUFFER_TABLE: [(f64, f64); 6] = [
    (30.0, 10.0),
    (20.0, 9.0),
    (10.0, 8.0),
    (5.0, 6.0),
    (0.0, 5.0),
    (-10.0, 3.0),
];
const BUFFER_FLOOR: f64 = 1.0;

const RATIO_TABLE: [(f64, f64); 5] = [
    (1.25, 10.0),
    (1.00, 8.0),
    (0.90, 5.0),
    (0.75, 3.0),
    (0.65, 2.0),
];
const RATIO_FLOOR: f64 = 1.0;

/// `(exclusive upper bound, score)` rows for hiring pressure in percent.
const PRESSURE_TABLE: [(f64, f64); 5] = [
    (3.0, 10.0),
    (5.0, 9.0),
    (8.0, 8.0),
    (12.0, 7.0),
    (20.0, 5.0),
];
const PRESSURE_FLOOR: f64 = 3.0;

const DOMAIN_FIT_BONUS: f64 = 1.0;

/// Step-table formulas; every breakpoint is auditable by eye.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularStrategy;

impl TabularStrategy {
    pub fn buffer_score(buffer_pct: f64) -> f64 {
        BUFFER_TABLE
            .iter()
            .find(|(lower, _)| buffer_pct >= *lower)
            .map(|(_, score)| *score)
            .unwrap_or(BUFFER_FLOOR)
    }

    pub fn headcount_ratio_score(ratio: f64) -> f64 {
        RATIO_TABLE
            .iter()
            .find(|(lower, _)| ratio >= *lower)
            .map(|(_, score)| *score)
            .unwrap_or(RATIO_FLOOR)
    }

    pub fn pressure_score(pressure: f64) -> f64 {
        PRESSURE_TABLE
            .iter()
            .find(|(upper, _)| pressure < *upper)
            .map(|(_, score)| *score)
            .unwrap_or(PRESSURE_FLOOR)
    }

    fn tier_base(tier: CityTier) -> f64 {
        match tier {
            CityTier::One => 8.0,
            CityTier::Two => 7.0,
            CityTier::Three => 6.0,
            CityTier::Four => 5.0,
        }
    }
}

impl ScoringStrategy for TabularStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Tabular
    }

    fn financial_score(
        &self,
        mode: FinancialMode,
        feasibility: &Feasibility,
        team_size: u32,
    ) -> f64 {
        match mode {
            FinancialMode::BufferPct => Self::buffer_score(feasibility.buffer_pct),
            FinancialMode::HeadcountRatio => {
                Self::headcount_ratio_score(feasibility.headcount_ratio(team_size))
            }
        }
    }

    /// The step table is read with the published one-decimal pressure.
    fn talent(&self, city: &CityRecord, context: &ScoringContext<'_>) -> TalentAssessment {
        let pressure = round_to(context.hiring_pressure(city), 1);
        TalentAssessment {
            score: Self::pressure_score(pressure),
            hiring_pressure: pressure,
        }
    }

    fn strategic_score(
        &self,
        city: &CityRecord,
        tier: CityTier,
        context: &ScoringContext<'_>,
    ) -> f64 {
        let mut score = Self::tier_base(tier);

        if domain_fit(&city.id, context.industry) {
            score += DOMAIN_FIT_BONUS;
        }

        score += contextual_bonus(city, tier, context);

        round_to(clamp(score, 3.0, 10.0), 2)
    }
}
