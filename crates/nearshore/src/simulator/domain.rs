use serde::{Deserialize, Serialize};

/// Inclusive `{min, max}` range used for rents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default = "missing_number", deserialize_with = "nullable_number")]
    pub min: f64,
    #[serde(default = "missing_number", deserialize_with = "nullable_number")]
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

fn default_office_rent() -> ValueRange {
    ValueRange::new(12.0, 18.0)
}

fn default_residential_rent() -> ValueRange {
    ValueRange::new(800.0, 1200.0)
}

fn default_col_index() -> f64 {
    35.0
}

fn missing_number() -> f64 {
    f64::NAN
}

fn nullable_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or_else(missing_number))
}

/// A `null` range is unusable; the record is screened out, not the request.
fn nullable_range<'de, D>(deserializer: D) -> Result<ValueRange, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<ValueRange>::deserialize(deserializer)?;
    Ok(value.unwrap_or_else(|| ValueRange::new(missing_number(), missing_number())))
}

/// Counts, flags and lists read `null` as their empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One candidate city as supplied by the dataset.
///
/// `salaryIndex` has no default: a record without one is excluded from the
/// ranking instead of being priced against an invented labor cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default = "missing_number", deserialize_with = "nullable_number")]
    pub salary_index: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_baseline: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stem_grads: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ict_grads: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub regional_stem_pool: u32,
    #[serde(default = "default_col_index", deserialize_with = "nullable_number")]
    pub col_index: f64,
    #[serde(default = "default_office_rent", deserialize_with = "nullable_range")]
    pub office_rent: ValueRange,
    #[serde(
        default = "default_residential_rent",
        deserialize_with = "nullable_range"
    )]
    pub residential_rent: ValueRange,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_airport: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_access_minutes: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub major_companies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

impl CityRecord {
    /// Minimal record for callers that assemble cities in code.
    pub fn new(id: impl Into<String>, name: impl Into<String>, salary_index: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: None,
            salary_index,
            regional_baseline: None,
            stem_grads: 0,
            ict_grads: 0,
            regional_stem_pool: 0,
            col_index: default_col_index(),
            office_rent: default_office_rent(),
            residential_rent: default_residential_rent(),
            has_airport: false,
            airport_access_minutes: None,
            major_companies: Vec::new(),
            tags: Vec::new(),
            featured: false,
        }
    }

    /// Name of the first numeric field that cannot enter the pipeline.
    pub fn invalid_field(&self) -> Option<&'static str> {
        if !self.salary_index.is_finite() || self.salary_index <= 0.0 {
            return Some("salaryIndex");
        }
        if !self.col_index.is_finite() {
            return Some("colIndex");
        }
        if !self.office_rent.is_finite() {
            return Some("officeRent");
        }
        if !self.residential_rent.is_finite() {
            return Some("residentialRent");
        }
        if self
            .airport_access_minutes
            .map(|minutes| !minutes.is_finite())
            .unwrap_or(false)
        {
            return Some("airportAccessMinutes");
        }
        None
    }

    /// Graduate count used as a divisor; zero is read as one.
    pub fn effective_ict_grads(&self) -> u32 {
        self.ict_grads.max(1)
    }

    pub fn company_count(&self) -> usize {
        self.major_companies.len()
    }
}

/// Reference-city compensation band for the requested role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleBand {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
    pub label: String,
}

/// Client priority selecting the weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Cost,
    Quality,
    Speed,
    #[default]
    Balanced,
}

impl Objective {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cost" => Self::Cost,
            "quality" => Self::Quality,
            "speed" => Self::Speed,
            _ => Self::Balanced,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Objective::Cost => "cost",
            Objective::Quality => "quality",
            Objective::Speed => "speed",
            Objective::Balanced => "balanced",
        }
    }

    pub const fn ordered() -> [Objective; 4] {
        [
            Objective::Cost,
            Objective::Quality,
            Objective::Speed,
            Objective::Balanced,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkModel {
    Hybrid,
    OfficeFirst,
    FullyOnsite,
    RemoteFirst,
    FullyRemote,
    Unspecified,
}

impl WorkModel {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Self::Hybrid,
            "office-first" => Self::OfficeFirst,
            "fully-onsite" => Self::FullyOnsite,
            "remote-first" => Self::RemoteFirst,
            "fully-remote" => Self::FullyRemote,
            _ => Self::Unspecified,
        }
    }

    pub const fn is_office_centric(self) -> bool {
        matches!(
            self,
            WorkModel::Hybrid | WorkModel::OfficeFirst | WorkModel::FullyOnsite
        )
    }

    pub const fn is_remote_first(self) -> bool {
        matches!(self, WorkModel::RemoteFirst | WorkModel::FullyRemote)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficeStrategy {
    UniversityAdjacent,
    CityCenter,
    Other,
}

impl OfficeStrategy {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "university-adjacent" => Self::UniversityAdjacent,
            "city-center" => Self::CityCenter,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifestyle {
    CoastalWarm,
    LowCost,
    Other,
}

impl Lifestyle {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "coastal-warm" => Self::CoastalWarm,
            "low-cost" => Self::LowCost,
            _ => Self::Other,
        }
    }
}

/// Hiring scenario as entered by the client, before sanitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub role_band: RoleBand,
    pub tier_multiplier: f64,
    #[serde(default)]
    pub stack_premium: f64,
    #[serde(default)]
    pub team_size: Option<f64>,
    /// Raw requested headcount for the large-team weight rule.
    #[serde(default)]
    pub headcount: Option<f64>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub dealbreakers: String,
    #[serde(default)]
    pub work_model: String,
    #[serde(default)]
    pub office_strategy: String,
    #[serde(default)]
    pub lifestyle: String,
}

impl Scenario {
    pub fn new(role_band: RoleBand, tier_multiplier: f64, stack_premium: f64) -> Self {
        Self {
            role_band,
            tier_multiplier,
            stack_premium,
            team_size: None,
            headcount: None,
            budget: None,
            industry: String::new(),
            objective: String::new(),
            dealbreakers: String::new(),
            work_model: String::new(),
            office_strategy: String::new(),
            lifestyle: String::new(),
        }
    }
}

/// Full engine input: the scenario plus the candidate cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub cities: Vec<CityRecord>,
}

pub const DEFAULT_TEAM_SIZE: u32 = 5;

/// Sanitized scenario. Every numeric field is finite and non-negative;
/// currency totals derived from it saturate instead of overflowing.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationContext {
    pub role_band: RoleBand,
    pub midpoint: f64,
    pub tier_multiplier: f64,
    pub stack_premium: f64,
    pub team_size: u32,
    pub headcount: u32,
    pub budget: Option<f64>,
    pub industry: String,
    pub dealbreakers: String,
    pub objective: Objective,
    pub work_model: WorkModel,
    pub office_strategy: OfficeStrategy,
    pub lifestyle: Lifestyle,
}

impl ComputationContext {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let team_size = positive_count(scenario.team_size).unwrap_or(DEFAULT_TEAM_SIZE);
        let headcount = positive_count(scenario.headcount).unwrap_or(team_size);

        let midpoint = if scenario.role_band.mid.is_finite() {
            scenario.role_band.mid.max(0.0)
        } else {
            0.0
        };
        let tier_multiplier =
            if scenario.tier_multiplier.is_finite() && scenario.tier_multiplier > 0.0 {
                scenario.tier_multiplier
            } else {
                1.0
            };
        let stack_premium = if scenario.stack_premium.is_finite() {
            scenario.stack_premium.max(0.0)
        } else {
            0.0
        };
        let budget = scenario
            .budget
            .filter(|value| value.is_finite() && *value > 0.0);

        Self {
            role_band: scenario.role_band.clone(),
            midpoint,
            tier_multiplier,
            stack_premium,
            team_size,
            headcount,
            budget,
            industry: scenario.industry.trim().to_lowercase(),
            dealbreakers: scenario.dealbreakers.trim().to_lowercase(),
            objective: Objective::from_label(&scenario.objective),
            work_model: WorkModel::from_label(&scenario.work_model),
            office_strategy: OfficeStrategy::from_label(&scenario.office_strategy),
            lifestyle: Lifestyle::from_label(&scenario.lifestyle),
        }
    }
}

fn positive_count(value: Option<f64>) -> Option<u32> {
    value
        .filter(|raw| raw.is_finite() && *raw >= 1.0)
        .map(|raw| raw.floor().min(u32::MAX as f64) as u32)
}
