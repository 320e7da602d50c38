//! Free-text dealbreaker interpretation.
//!
//! The client's constraint text is parsed once per run into a
//! [`ConstraintSet`]; each active constraint then checks every city against
//! the fixed penalty table below. Penalties are summed and capped at
//! [`MAX_DEALBREAKER_PENALTY`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::domain::{CityRecord, Lifestyle, OfficeStrategy, WorkModel};
use super::numeric::round_to;
use super::scoring::is_coastal;

pub const MAX_DEALBREAKER_PENALTY: f64 = 4.0;

static AIRPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"airport|direct\s*flight|international\s*flight").expect("valid airport regex")
});
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:within|under|<=?|max(?:imum)?|up\s*to)?\s*(\d{1,2})\s*h(?:\s*(\d{1,2}))?")
        .expect("valid hours regex")
});
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:within|under|<=?|max(?:imum)?|up\s*to)?\s*(\d{1,3})\s*(?:min|mins|minutes)")
        .expect("valid minutes regex")
});
static UNIVERSITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"university|graduate\s*pipeline|campus").expect("valid university regex")
});
static LARGE_POOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"large\s*talent|big\s*pool|deep\s*pool|high\s*volume")
        .expect("valid talent pool regex")
});
static TECH_HUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tech\s*hub|office\s*hub|cowork(?:ing)?|startup\s*ecosystem|innovation\s*hub")
        .expect("valid tech hub regex")
});
static COASTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"coastal|beach|seaside|warm").expect("valid coastal regex"));
static LOW_COST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"low\s*cost|budget|cost\s*first|cost\s*sensitive").expect("valid low cost regex")
});
static CITY_CENTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"city\s*center|city\s*centre|central\s*office").expect("valid city center regex")
});
static ONSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"must\s*be\s*onsite|onsite\s*mandatory|office\s*every\s*day")
        .expect("valid onsite regex")
});

/// One hard constraint recognized in the client's text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Airport access, optionally within a ground-travel time window.
    Airport { max_minutes: Option<f64> },
    UniversityPipeline,
    LargeTalentPool,
    TechHub,
    Coastal,
    LowCost,
    CentralOffice,
    RemoteOnsiteConflict,
}

impl Constraint {
    pub const fn penalty(self) -> f64 {
        match self {
            Constraint::Airport { .. } => 1.6,
            Constraint::UniversityPipeline => 1.2,
            Constraint::LargeTalentPool => 1.1,
            Constraint::TechHub => 1.0,
            Constraint::Coastal => 1.0,
            Constraint::LowCost => 1.0,
            Constraint::CentralOffice => 1.1,
            Constraint::RemoteOnsiteConflict => 0.8,
        }
    }

    pub const fn hit_label(self) -> &'static str {
        match self {
            Constraint::Airport {
                max_minutes: Some(_),
            } => "airport-time-window-fail",
            Constraint::Airport { max_minutes: None } => "no-airport",
            Constraint::UniversityPipeline => "weak-university-pipeline",
            Constraint::LargeTalentPool => "limited-ict-pool",
            Constraint::TechHub => "weak-tech-hub-signal",
            Constraint::Coastal => "non-coastal-fit",
            Constraint::LowCost => "high-col-for-low-cost-priority",
            Constraint::CentralOffice => "high-central-office-cost",
            Constraint::RemoteOnsiteConflict => "remote-vs-onsite-constraint-conflict",
        }
    }

    /// True when the city fails this constraint.
    pub fn violated_by(self, city: &CityRecord) -> bool {
        match self {
            Constraint::Airport {
                max_minutes: Some(limit),
            } => {
                let within_window = city.has_airport
                    || city
                        .airport_access_minutes
                        .map(|minutes| minutes <= limit)
                        .unwrap_or(false);
                !within_window
            }
            Constraint::Airport { max_minutes: None } => !city.has_airport,
            Constraint::UniversityPipeline => {
                city.stem_grads < 1000 && city.regional_stem_pool < 2500
            }
            Constraint::LargeTalentPool => city.ict_grads < 800,
            Constraint::TechHub => city.company_count() < 3,
            Constraint::Coastal => !is_coastal(&city.id),
            Constraint::LowCost => city.col_index > 42.0,
            Constraint::CentralOffice => city.office_rent.max > 24.0,
            Constraint::RemoteOnsiteConflict => true,
        }
    }
}

/// Penalty charged to one city, with the labels of the failed constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealbreakerAssessment {
    pub penalty: f64,
    pub hits: Vec<String>,
}

/// Constraints active for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Interpret lowercased dealbreaker text. Without text nothing is active,
    /// even when the lifestyle or office strategy would otherwise imply a rule.
    pub fn interpret(
        dealbreakers_lower: &str,
        work_model: WorkModel,
        office_strategy: OfficeStrategy,
        lifestyle: Lifestyle,
    ) -> Self {
        let text = dealbreakers_lower;
        let mut constraints = Vec::new();

        if text.trim().is_empty() {
            return Self { constraints };
        }

        if AIRPORT_RE.is_match(text) {
            constraints.push(Constraint::Airport {
                max_minutes: airport_time_window(text),
            });
        }

        if UNIVERSITY_RE.is_match(text) {
            constraints.push(Constraint::UniversityPipeline);
        }

        if LARGE_POOL_RE.is_match(text) {
            constraints.push(Constraint::LargeTalentPool);
        }

        if TECH_HUB_RE.is_match(text) {
            constraints.push(Constraint::TechHub);
        }

        if COASTAL_RE.is_match(text) || lifestyle == Lifestyle::CoastalWarm {
            constraints.push(Constraint::Coastal);
        }

        if LOW_COST_RE.is_match(text) || lifestyle == Lifestyle::LowCost {
            constraints.push(Constraint::LowCost);
        }

        let wants_city_center =
            office_strategy == OfficeStrategy::CityCenter || CITY_CENTER_RE.is_match(text);
        if work_model.is_office_centric() && wants_city_center {
            constraints.push(Constraint::CentralOffice);
        }

        if work_model.is_remote_first() && ONSITE_RE.is_match(text) {
            constraints.push(Constraint::RemoteOnsiteConflict);
        }

        Self { constraints }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn assess(&self, city: &CityRecord) -> DealbreakerAssessment {
        let mut penalty = 0.0;
        let mut hits = Vec::new();

        for constraint in &self.constraints {
            if constraint.violated_by(city) {
                penalty += constraint.penalty();
                hits.push(constraint.hit_label().to_string());
            }
        }

        DealbreakerAssessment {
            penalty: round_to(penalty, 2).min(MAX_DEALBREAKER_PENALTY),
            hits,
        }
    }
}

/// Ground-access limit in minutes: `2h`, `1h30`, `1 h 30` or `90 min`.
fn airport_time_window(text: &str) -> Option<f64> {
    if let Some(captures) = HOURS_RE.captures(text) {
        let hours = captures
            .get(1)
            .and_then(|value| value.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        let minutes = captures
            .get(2)
            .and_then(|value| value.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        return Some(f64::from(hours * 60 + minutes));
    }

    MINUTES_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse::<u32>().ok())
        .map(f64::from)
}
