use super::super::domain::{CityRecord, Objective};
use super::super::feasibility::{Feasibility, FinancialMode};
use super::super::numeric::{clamp, round_to};
use super::strategic::{contextual_bonus, domain_fit, CityTier};
use super::{ScoringContext, ScoringStrategy, StrategyKind, TalentAssessment};

/// Continuous formulas with graduate pools normalized across the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedStrategy;

impl NormalizedStrategy {
    pub fn buffer_score(buffer_pct: f64) -> f64 {
        round_to(clamp(5.0 + buffer_pct / 6.0, 1.0, 10.0), 2)
    }

    pub fn headcount_ratio_score(ratio: f64) -> f64 {
        round_to(clamp(1.0 + (ratio - 0.50) * 9.0, 1.0, 10.0), 2)
    }

    pub fn pressure_score(pressure: f64) -> f64 {
        round_to(clamp(10.0 - pressure / 4.0, 3.0, 10.0), 2)
    }

    fn tier_base(tier: CityTier) -> f64 {
        match tier {
            CityTier::One => 7.8,
            CityTier::Two => 7.0,
            CityTier::Three => 6.4,
            CityTier::Four => 5.8,
        }
    }
}

fn ecosystem_depth(city: &CityRecord) -> f64 {
    (1.0 + city.company_count() as f64).log10()
}

impl ScoringStrategy for NormalizedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Normalized
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

    fn talent(&self, city: &CityRecord, context: &ScoringContext<'_>) -> TalentAssessment {
        let pressure = context.hiring_pressure(city);
        let ict_norm = context
            .ict_range
            .normalize(city.effective_ict_grads() as f64);
        let stem_norm = context.stem_range.normalize(city.stem_grads as f64);
        let ecosystem = (4.0 + ecosystem_depth(city) * 3.2).min(10.0);

        let mut score = Self::pressure_score(pressure) * 0.55
            + (3.0 + ict_norm * 7.0) * 0.25
            + (3.0 + stem_norm * 7.0) * 0.15
            + ecosystem * 0.05;

        if matches!(context.objective, Objective::Quality | Objective::Speed) {
            score += ict_norm * 0.25;
        }

        if pressure > context.pressure_threshold() {
            score -= 0.4;
        }

        TalentAssessment {
            score: round_to(clamp(score, 3.0, 10.0), 2),
            hiring_pressure: round_to(pressure, 1),
        }
    }

    fn strategic_score(
        &self,
        city: &CityRecord,
        tier: CityTier,
        context: &ScoringContext<'_>,
    ) -> f64 {
        let mut score = Self::tier_base(tier);

        score += context.stem_range.normalize(city.stem_grads as f64) * 0.7;
        score += context
            .ict_range
            .normalize(city.effective_ict_grads() as f64)
            * 0.6;
        score += ecosystem_depth(city) * 0.45;

        if domain_fit(&city.id, context.industry) {
            score += 0.6;
        }

        score += contextual_bonus(city, tier, context);

        round_to(clamp(score, 3.0, 10.0), 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_score_is_linear_between_the_clamps() {
        assert_eq!(NormalizedStrategy::buffer_score(0.0), 5.0);
        assert_eq!(NormalizedStrategy::buffer_score(10.0), 6.67);
        assert_eq!(NormalizedStrategy::buffer_score(30.0), 10.0);
        assert_eq!(NormalizedStrategy::buffer_score(-40.0), 1.0);
    }

    #[test]
    fn headcount_ratio_score_spans_one_to_ten() {
        assert_eq!(NormalizedStrategy::headcount_ratio_score(0.4), 1.0);
        assert_eq!(NormalizedStrategy::headcount_ratio_score(1.0), 5.5);
        assert_eq!(NormalizedStrategy::headcount_ratio_score(1.5), 10.0);
    }

    #[test]
    fn pressure_score_floors_at_three() {
        assert_eq!(NormalizedStrategy::pressure_score(0.0), 10.0);
        assert_eq!(NormalizedStrategy::pressure_score(8.0), 8.0);
        assert_eq!(NormalizedStrategy::pressure_score(60.0), 3.0);
    }
}
