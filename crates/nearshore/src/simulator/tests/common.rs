use crate::simulator::domain::{CityRecord, RoleBand, Scenario, ValueRange};
use crate::simulator::feasibility::Verdict;
use crate::simulator::ranking::FeasibilityBand;
use crate::simulator::scoring::CityTier;
use crate::simulator::{CityResult, SimulatorEngine, StrategyKind};

pub(super) fn software_engineer() -> RoleBand {
    RoleBand {
        min: 3680.0,
        mid: 4300.0,
        max: 4920.0,
        label: "Software Engineer".to_string(),
    }
}

/// Mid-level core backend team of five with no stated budget.
pub(super) fn scenario() -> Scenario {
    let mut scenario = Scenario::new(software_engineer(), 1.0, 0.0);
    scenario.team_size = Some(5.0);
    scenario
}

pub(super) fn engine() -> SimulatorEngine {
    SimulatorEngine::new(StrategyKind::Normalized)
}

#[allow(clippy::too_many_arguments)]
fn city(
    id: &str,
    name: &str,
    salary_index: f64,
    stem_grads: u32,
    ict_grads: u32,
    col_index: f64,
    office_max: f64,
    has_airport: bool,
    companies: usize,
) -> CityRecord {
    let mut record = CityRecord::new(id, name, salary_index);
    record.stem_grads = stem_grads;
    record.ict_grads = ict_grads;
    record.col_index = col_index;
    record.office_rent = ValueRange::new(office_max - 6.0, office_max);
    record.has_airport = has_airport;
    record.major_companies = (0..companies).map(|index| format!("company-{index}")).collect();
    record
}

pub(super) fn lisbon() -> CityRecord {
    let mut record = city("lisbon", "Lisbon", 100.0, 6850, 2140, 48.5, 28.0, true, 7);
    record.featured = true;
    record.airport_access_minutes = Some(20.0);
    record.regional_stem_pool = 11800;
    record
}

pub(super) fn porto() -> CityRecord {
    let mut record = city("porto", "Porto", 92.1, 5420, 1730, 42.0, 22.0, true, 6);
    record.featured = true;
    record.airport_access_minutes = Some(25.0);
    record.regional_stem_pool = 9300;
    record
}

pub(super) fn braga() -> CityRecord {
    let mut record = city("braga", "Braga", 87.4, 2310, 840, 36.0, 14.0, false, 4);
    record.featured = true;
    record.airport_access_minutes = Some(50.0);
    record.regional_stem_pool = 9300;
    record
}

pub(super) fn covilha() -> CityRecord {
    let mut record = city("covilha", "Covilha", 81.2, 780, 230, 29.5, 9.0, false, 2);
    record.airport_access_minutes = Some(160.0);
    record.regional_stem_pool = 4600;
    record
}

pub(super) fn beja() -> CityRecord {
    let mut record = city("beja", "Beja", 81.0, 240, 70, 27.5, 7.0, true, 0);
    record.airport_access_minutes = Some(0.0);
    record.regional_stem_pool = 1300;
    record
}

pub(super) fn sample_cities() -> Vec<CityRecord> {
    vec![lisbon(), porto(), braga(), covilha(), beja()]
}

/// Ranked result with only the fields the tie-break cascade reads set.
pub(super) fn ranked_result(
    id: &str,
    weighted: f64,
    emc_monthly: u64,
    ict_grads: u32,
    strategic_score: f64,
) -> CityResult {
    let mut record = CityRecord::new(id, id, 90.0);
    record.ict_grads = ict_grads;

    CityResult {
        city: record,
        gross_monthly: 0,
        emc_monthly,
        emc_annual: emc_monthly * 12,
        team_total_monthly: emc_monthly * 5,
        team_total_annual: emc_monthly * 60,
        buffer_pct: 12.0,
        max_feasible: 5,
        verdict: Verdict::Feasible,
        savings_annual: 0,
        tier: CityTier::Four,
        domain_fit: false,
        hiring_pressure: 1.0,
        strategic_score,
        financial_score: 7.0,
        talent_score: 7.0,
        dealbreaker_penalty: 0.0,
        dealbreaker_hits: Vec::new(),
        weighted_raw: weighted,
        weighted,
        rank: 0,
        feasibility_band: FeasibilityBand::Medium,
    }
}
