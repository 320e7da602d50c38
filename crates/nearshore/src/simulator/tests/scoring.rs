use super::common::*;
use crate::simulator::domain::{CityRecord, ComputationContext};
use crate::simulator::scoring::{
    CityTier, NormalizedStrategy, ScoringContext, ScoringStrategy, TabularStrategy,
};

#[test]
fn pools_are_normalized_across_the_candidate_set() {
    let context = ComputationContext::from_scenario(&scenario());
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    assert_eq!(scoring.stem_range.min, 240.0);
    assert_eq!(scoring.stem_range.max, 6850.0);
    assert_eq!(scoring.ict_range.normalize(2140.0), 1.0);
    assert_eq!(scoring.ict_range.normalize(70.0), 0.0);
}

#[test]
fn normalized_strategic_score_for_the_capital() {
    let context = ComputationContext::from_scenario(&scenario());
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    let score = NormalizedStrategy.strategic_score(&lisbon(), CityTier::One, &scoring);
    assert_eq!(score, 9.71);
}

#[test]
fn domain_fit_can_push_the_strategic_score_to_the_ceiling() {
    let mut scenario = scenario();
    scenario.industry = "Fintech payments".to_string();
    let context = ComputationContext::from_scenario(&scenario);
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    let normalized = NormalizedStrategy.strategic_score(&lisbon(), CityTier::One, &scoring);
    let tabular = TabularStrategy.strategic_score(&lisbon(), CityTier::One, &scoring);

    assert_eq!(normalized, 10.0);
    assert_eq!(tabular, 9.2);
}

#[test]
fn tabular_strategic_score_adds_objective_nudges() {
    let mut scenario = scenario();
    scenario.objective = "speed".to_string();
    let context = ComputationContext::from_scenario(&scenario);
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    assert_eq!(
        TabularStrategy.strategic_score(&lisbon(), CityTier::One, &scoring),
        8.4
    );
    assert_eq!(
        TabularStrategy.strategic_score(&covilha(), CityTier::Four, &scoring),
        5.0
    );
}

#[test]
fn tabular_talent_uses_the_published_pressure() {
    let context = ComputationContext::from_scenario(&scenario());
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    let talent = TabularStrategy.talent(&beja(), &scoring);
    assert_eq!(talent.hiring_pressure, 7.1);
    assert_eq!(talent.score, 8.0);
}

#[test]
fn tabular_talent_reads_the_rounded_pressure_at_a_breakpoint() {
    let context = ComputationContext::from_scenario(&scenario());
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    let mut edge = CityRecord::new("edge", "Edge", 85.0);
    edge.ict_grads = 169;

    let raw = scoring.hiring_pressure(&edge);
    assert!(raw < 3.0 && raw > 2.95, "{raw}");
    assert_eq!(TabularStrategy::pressure_score(raw), 10.0);

    let talent = TabularStrategy.talent(&edge, &scoring);
    assert_eq!(talent.hiring_pressure, 3.0);
    assert_eq!(talent.score, 9.0);
}

#[test]
fn normalized_talent_prefers_deep_pools() {
    let context = ComputationContext::from_scenario(&scenario());
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    let capital = NormalizedStrategy.talent(&lisbon(), &scoring);
    let small = NormalizedStrategy.talent(&beja(), &scoring);

    assert!(capital.score > small.score);
    assert!((3.0..=10.0).contains(&small.score));
}

#[test]
fn speed_objective_scales_hiring_demand() {
    let mut scenario = scenario();
    scenario.objective = "speed".to_string();
    scenario.team_size = Some(20.0);
    let context = ComputationContext::from_scenario(&scenario);
    let cities = sample_cities();
    let scoring = ScoringContext::new(&context, &cities);

    let talent = NormalizedStrategy.talent(&beja(), &scoring);
    assert_eq!(talent.hiring_pressure, 31.4);
    assert_eq!(scoring.pressure_threshold(), 15.0);
}

#[test]
fn zero_ict_graduates_count_as_one() {
    let context = ComputationContext::from_scenario(&scenario());
    let mut empty = beja();
    empty.ict_grads = 0;
    let cities = vec![lisbon(), empty.clone()];
    let scoring = ScoringContext::new(&context, &cities);

    let talent = NormalizedStrategy.talent(&empty, &scoring);
    assert_eq!(talent.hiring_pressure, 500.0);
    assert_eq!(talent.score, 3.0);
}
