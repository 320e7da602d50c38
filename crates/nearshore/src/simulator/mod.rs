//! Deterministic city comparison for nearshore hiring.
//!
//! Every run executes four stages in order: employer cost per city, budget
//! feasibility, multi-factor scoring and ranking. Inputs are never mutated
//! and nothing is cached between runs.

mod analysis;
pub mod cost;
pub mod dealbreakers;
pub mod domain;
mod engine;
pub mod feasibility;
mod numeric;
pub mod ranking;
pub mod report;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use analysis::{Analysis, CityResult, ReferenceBaseline};
pub use cost::{compute_emc, EmployerCost};
pub use dealbreakers::{ConstraintSet, DealbreakerAssessment};
pub use domain::{
    AnalysisRequest, CityRecord, ComputationContext, Lifestyle, Objective, OfficeStrategy,
    RoleBand, Scenario, ValueRange, WorkModel,
};
pub use engine::SimulatorEngine;
pub use feasibility::{BudgetBasis, Feasibility, FinancialMode, Verdict};
pub use ranking::{Confidence, FeasibilityBand, RiskFlag, RiskFlagKind};
pub use report::{render_ranking_table, write_csv, AnalysisSummary};
pub use scoring::{
    CityTier, NormalizedStrategy, ObjectiveWeights, ScoringStrategy, StrategyKind,
    TabularStrategy,
};
