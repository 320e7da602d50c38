use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::analysis::CityResult;
use super::cost::EmployerCost;
use super::feasibility::Verdict;

/// Weighted scores closer than this are ranked by the tie-break cascade.
pub const TIE_EPSILON: f64 = 0.005;
/// Tolerance for the per-head savings cross-check, in currency per year.
pub const SAVINGS_TOLERANCE: f64 = 500.0;

const HIGH_BAND_SCORE: f64 = 8.4;
const HIGH_BAND_BUFFER: f64 = 8.0;
const MEDIUM_BAND_SCORE: f64 = 6.8;
const HEAVY_PENALTY: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeasibilityBand {
    High,
    Medium,
    Low,
}

impl FeasibilityBand {
    pub fn classify(verdict: Verdict, penalty: f64, weighted: f64, buffer_pct: f64) -> Self {
        if verdict == Verdict::Infeasible || penalty >= HEAVY_PENALTY {
            return Self::Low;
        }
        if weighted >= HIGH_BAND_SCORE && buffer_pct >= HIGH_BAND_BUFFER {
            Self::High
        } else if weighted >= MEDIUM_BAND_SCORE && buffer_pct >= 0.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FeasibilityBand::High => "HIGH",
            FeasibilityBand::Medium => "MEDIUM",
            FeasibilityBand::Low => "LOW",
        }
    }
}

/// Weighted score quantized to the hundredths it was published with.
///
/// Two published scores share a bucket exactly when they are within
/// [`TIE_EPSILON`] of each other, which keeps the ordering transitive.
fn score_bucket(weighted: f64) -> i64 {
    (weighted / (TIE_EPSILON * 2.0)).round() as i64
}

/// Total order used for ranking: best city first.
pub fn rank_order(a: &CityResult, b: &CityResult) -> Ordering {
    score_bucket(b.weighted)
        .cmp(&score_bucket(a.weighted))
        .then_with(|| a.emc_monthly.cmp(&b.emc_monthly))
        .then_with(|| {
            b.city
                .effective_ict_grads()
                .cmp(&a.city.effective_ict_grads())
        })
        .then_with(|| b.strategic_score.total_cmp(&a.strategic_score))
        .then_with(|| a.city.id.cmp(&b.city.id))
}

/// Sort best-first and number the cities `1..=N`.
pub fn assign_ranks(results: &mut [CityResult]) {
    results.sort_by(rank_order);
    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index as u32 + 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlagKind {
    SavingsMismatch,
    InfeasibleCity,
    DealbreakerPenalty,
    InvalidRecord,
    DuplicateId,
}

impl RiskFlagKind {
    pub const fn label(self) -> &'static str {
        match self {
            RiskFlagKind::SavingsMismatch => "savings_mismatch",
            RiskFlagKind::InfeasibleCity => "infeasible_city",
            RiskFlagKind::DealbreakerPenalty => "dealbreaker_penalty",
            RiskFlagKind::InvalidRecord => "invalid_record",
            RiskFlagKind::DuplicateId => "duplicate_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Advisory note attached to a city. Flags never change scores or ranks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub city: String,
    pub flag: RiskFlagKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl RiskFlag {
    fn new(city: &str, flag: RiskFlagKind) -> Self {
        Self {
            city: city.to_string(),
            flag,
            note: None,
            confidence: None,
        }
    }

    pub fn invalid_record(city: &str, field: &str) -> Self {
        Self {
            note: Some(format!("{field} is missing or not a usable number")),
            confidence: Some(Confidence::Low),
            ..Self::new(city, RiskFlagKind::InvalidRecord)
        }
    }

    pub fn duplicate_id(city: &str) -> Self {
        Self {
            note: Some("later record with the same id was ignored".to_string()),
            confidence: Some(Confidence::Low),
            ..Self::new(city, RiskFlagKind::DuplicateId)
        }
    }
}

/// Flags for ranked cities, in rank order.
pub fn derive_risk_flags(
    results: &[CityResult],
    reference: &EmployerCost,
    team_size: u32,
) -> Vec<RiskFlag> {
    let team_size = team_size.max(1) as f64;
    let mut flags = Vec::new();

    for result in results {
        let id = result.city.id.as_str();

        let expected_per_head = reference.emc_annual as f64 - result.emc_annual as f64;
        let actual_per_head = result.savings_annual as f64 / team_size;
        if (expected_per_head - actual_per_head).abs() > SAVINGS_TOLERANCE {
            flags.push(RiskFlag {
                confidence: Some(Confidence::Low),
                ..RiskFlag::new(id, RiskFlagKind::SavingsMismatch)
            });
        }

        if result.verdict == Verdict::Infeasible {
            flags.push(RiskFlag::new(id, RiskFlagKind::InfeasibleCity));
        }

        if result.dealbreaker_penalty > 0.0 {
            flags.push(RiskFlag {
                note: Some(result.dealbreaker_hits.join(", ")),
                ..RiskFlag::new(id, RiskFlagKind::DealbreakerPenalty)
            });
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_or_heavily_penalized_cities_are_low() {
        assert_eq!(
            FeasibilityBand::classify(Verdict::Infeasible, 0.0, 9.5, -1.0),
            FeasibilityBand::Low
        );
        assert_eq!(
            FeasibilityBand::classify(Verdict::Feasible, 2.5, 9.5, 30.0),
            FeasibilityBand::Low
        );
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(
            FeasibilityBand::classify(Verdict::Tight, 0.0, 8.4, 8.0),
            FeasibilityBand::High
        );
        assert_eq!(
            FeasibilityBand::classify(Verdict::Tight, 0.0, 8.4, 7.9),
            FeasibilityBand::Medium
        );
        assert_eq!(
            FeasibilityBand::classify(Verdict::Tight, 1.0, 6.8, 0.0),
            FeasibilityBand::Medium
        );
        assert_eq!(
            FeasibilityBand::classify(Verdict::Tight, 0.0, 6.79, 5.0),
            FeasibilityBand::Low
        );
    }

    #[test]
    fn published_scores_within_epsilon_share_a_bucket() {
        assert_eq!(score_bucket(7.31), score_bucket(7.31));
        assert_ne!(score_bucket(7.31), score_bucket(7.32));
        assert!(score_bucket(7.32) > score_bucket(7.31));
    }

    #[test]
    fn flag_labels_match_serialized_names() {
        for kind in [
            RiskFlagKind::SavingsMismatch,
            RiskFlagKind::InfeasibleCity,
            RiskFlagKind::DealbreakerPenalty,
            RiskFlagKind::InvalidRecord,
            RiskFlagKind::DuplicateId,
        ] {
            let json = serde_json::to_string(&kind).expect("flag serializes");
            assert_eq!(json, format!("\"{}\"", kind.label()));
        }
    }

    #[test]
    fn optional_flag_fields_are_omitted() {
        let flag = RiskFlag::new("beja", RiskFlagKind::InfeasibleCity);
        let json = serde_json::to_value(&flag).expect("flag serializes");
        assert_eq!(json, serde_json::json!({ "city": "beja", "flag": "infeasible_city" }));
    }
}
