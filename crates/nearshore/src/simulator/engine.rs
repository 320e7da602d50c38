use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use super::analysis::{Analysis, CityResult, CityScores, CostedCity, ReferenceBaseline};
use super::cost::{compute_emc, EmployerCost, REFERENCE_SALARY_INDEX};
use super::dealbreakers::ConstraintSet;
use super::domain::{AnalysisRequest, CityRecord, ComputationContext, Scenario};
use super::feasibility::{select_mode, BudgetBasis, Feasibility};
use super::ranking::{assign_ranks, derive_risk_flags, RiskFlag};
use super::scoring::{
    apply_penalty, domain_fit, CityTier, ObjectiveWeights, ScoringContext, ScoringStrategy,
    StrategyKind,
};
use crate::catalog::CityRepository;

/// Runs the cost, feasibility, scoring and ranking stages for one scenario.
///
/// The engine holds only its scoring strategy, so one value can serve any
/// number of calls, from any thread.
pub struct SimulatorEngine {
    strategy: Box<dyn ScoringStrategy>,
}

impl Default for SimulatorEngine {
    fn default() -> Self {
        Self::new(StrategyKind::default())
    }
}

impl fmt::Debug for SimulatorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatorEngine")
            .field("strategy", &self.strategy.kind())
            .finish()
    }
}

impl SimulatorEngine {
    pub fn new(kind: StrategyKind) -> Self {
        Self::with_strategy(kind.build())
    }

    pub fn with_strategy(strategy: Box<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Analysis {
        self.run(&request.scenario, &request.cities)
    }

    pub fn analyze_with<R>(&self, repository: &R, scenario: &Scenario) -> Analysis
    where
        R: CityRepository + ?Sized,
    {
        self.run(scenario, repository.cities())
    }

    pub fn run(&self, scenario: &Scenario, cities: &[CityRecord]) -> Analysis {
        let context = ComputationContext::from_scenario(scenario);
        let team_size = context.team_size;
        let (records, mut risk_flags) = screen_records(cities);

        let reference = compute_emc(
            context.midpoint,
            context.tier_multiplier,
            context.stack_premium,
            REFERENCE_SALARY_INDEX,
        );
        let basis = BudgetBasis::resolve(context.budget, &reference, team_size);

        let scoring = ScoringContext::new(&context, &records);
        let costed: Vec<CostedCity> = records
            .into_iter()
            .map(|city| cost_city(city, &context, &reference, basis.effective_budget))
            .collect();

        let mode = select_mode(costed.iter().map(|entry| &entry.feasibility), team_size);
        let weights = ObjectiveWeights::for_headcount(context.objective, context.headcount);
        let constraints = ConstraintSet::interpret(
            &context.dealbreakers,
            context.work_model,
            context.office_strategy,
            context.lifestyle,
        );

        debug!(
            strategy = %self.strategy.kind(),
            mode = mode.label(),
            budget_assumed = basis.budget_assumed,
            effective_budget = basis.effective_budget,
            cities = costed.len(),
            constraints = constraints.constraints().len(),
            "scoring cities"
        );

        let mut results: Vec<CityResult> = costed
            .into_iter()
            .map(|entry| {
                let tier = CityTier::for_city(&entry.city.id);
                let talent = self.strategy.talent(&entry.city, &scoring);
                let strategic = self.strategy.strategic_score(&entry.city, tier, &scoring);
                let financial = self
                    .strategy
                    .financial_score(mode, &entry.feasibility, team_size);
                let weighted_raw = weights.combine(strategic, financial, talent.score);
                let dealbreaker = constraints.assess(&entry.city);

                let scores = CityScores {
                    tier,
                    domain_fit: domain_fit(&entry.city.id, &context.industry),
                    hiring_pressure: talent.hiring_pressure,
                    strategic,
                    financial,
                    talent: talent.score,
                    weighted_raw,
                    weighted: apply_penalty(weighted_raw, dealbreaker.penalty),
                };

                CityResult::assemble(entry, scores, dealbreaker)
            })
            .collect();

        assign_ranks(&mut results);
        risk_flags.extend(derive_risk_flags(&results, &reference, team_size));

        Analysis {
            version: self.strategy.kind().version(),
            mode,
            objective: context.objective,
            budget_assumed: basis.budget_assumed,
            effective_budget: basis.effective_budget,
            weights,
            reference_baseline: ReferenceBaseline::new(&reference, team_size),
            team_size,
            role_label: context.role_band.label.clone(),
            role_midpoint: context.midpoint,
            tier_multiplier: context.tier_multiplier,
            stack_premium: context.stack_premium,
            all_cities: results,
            risk_flags,
        }
    }
}

fn cost_city(
    city: CityRecord,
    context: &ComputationContext,
    reference: &EmployerCost,
    effective_budget: f64,
) -> CostedCity {
    let cost = compute_emc(
        context.midpoint,
        context.tier_multiplier,
        context.stack_premium,
        city.salary_index,
    );
    let feasibility = Feasibility::evaluate(&cost, effective_budget, context.team_size);
    let per_head = signed(reference.emc_annual).saturating_sub(signed(cost.emc_annual));

    CostedCity {
        city,
        cost,
        feasibility,
        savings_annual: per_head.saturating_mul(i64::from(context.team_size)),
    }
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Drop records that cannot be priced and repeated ids; both are flagged.
fn screen_records(cities: &[CityRecord]) -> (Vec<CityRecord>, Vec<RiskFlag>) {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(cities.len());
    let mut flags = Vec::new();

    for city in cities {
        if let Some(field) = city.invalid_field() {
            warn!(city = %city.id, field, "excluding city with unusable record");
            flags.push(RiskFlag::invalid_record(&city.id, field));
            continue;
        }

        if !seen.insert(city.id.as_str()) {
            warn!(city = %city.id, "excluding duplicate city id");
            flags.push(RiskFlag::duplicate_id(&city.id));
            continue;
        }

        accepted.push(city.clone());
    }

    (accepted, flags)
}
