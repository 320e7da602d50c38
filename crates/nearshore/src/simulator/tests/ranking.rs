use super::common::*;
use crate::simulator::cost::EmployerCost;
use crate::simulator::feasibility::Verdict;
use crate::simulator::ranking::{assign_ranks, derive_risk_flags, Confidence, RiskFlagKind};

fn ids(results: &[crate::simulator::CityResult]) -> Vec<&str> {
    results.iter().map(|result| result.id()).collect()
}

#[test]
fn higher_weighted_score_wins_outside_the_tie_window() {
    let mut results = vec![
        ranked_result("cheap", 7.31, 4000, 100, 5.0),
        ranked_result("better", 7.32, 6000, 100, 5.0),
    ];
    assign_ranks(&mut results);
    assert_eq!(ids(&results), vec!["better", "cheap"]);
}

#[test]
fn ties_fall_through_cost_pool_strategy_then_id() {
    let mut results = vec![
        ranked_result("zeta", 7.0, 5000, 300, 6.0),
        ranked_result("alpha", 7.0, 5000, 300, 6.0),
        ranked_result("strategic", 7.0, 5000, 300, 6.5),
        ranked_result("deep-pool", 7.0, 5000, 900, 5.0),
        ranked_result("cheapest", 7.0, 4800, 50, 4.0),
    ];
    assign_ranks(&mut results);

    assert_eq!(
        ids(&results),
        vec!["cheapest", "deep-pool", "strategic", "alpha", "zeta"]
    );
    let ranks: Vec<u32> = results.iter().map(|result| result.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}

#[test]
fn tie_break_ignores_input_order() {
    let build = || {
        vec![
            ranked_result("a", 6.5, 5000, 200, 6.0),
            ranked_result("b", 6.5, 5000, 200, 6.0),
            ranked_result("c", 6.5, 4900, 200, 6.0),
        ]
    };
    let mut forward = build();
    let mut backward = build();
    backward.reverse();

    assign_ranks(&mut forward);
    assign_ranks(&mut backward);

    assert_eq!(ids(&forward), ids(&backward));
}

#[test]
fn flags_follow_rank_order_and_carry_notes() {
    let reference = EmployerCost::from_monthly(4300, 5496);

    let mut infeasible = ranked_result("faro", 5.0, 5000, 150, 6.0);
    infeasible.verdict = Verdict::Infeasible;
    infeasible.savings_annual = (5496 - 5000) * 12 * 5;

    let mut penalized = ranked_result("braga", 7.0, 5000, 840, 7.0);
    penalized.dealbreaker_penalty = 2.7;
    penalized.dealbreaker_hits = vec!["no-airport".to_string(), "limited-ict-pool".to_string()];
    penalized.savings_annual = (5496 - 5000) * 12 * 5;

    let mut mismatched = ranked_result("porto", 8.0, 5000, 1730, 8.0);
    mismatched.savings_annual = 0;

    let results = vec![mismatched, penalized, infeasible];
    let flags = derive_risk_flags(&results, &reference, 5);

    assert_eq!(flags.len(), 3);
    assert_eq!(flags[0].city, "porto");
    assert_eq!(flags[0].flag, RiskFlagKind::SavingsMismatch);
    assert_eq!(flags[0].confidence, Some(Confidence::Low));
    assert_eq!(flags[1].flag, RiskFlagKind::DealbreakerPenalty);
    assert_eq!(flags[1].note.as_deref(), Some("no-airport, limited-ict-pool"));
    assert_eq!(flags[2].flag, RiskFlagKind::InfeasibleCity);
    assert_eq!(flags[2].note, None);
}
