use std::io::Write;

use serde::Serialize;

use super::super::analysis::{Analysis, CityResult};

/// One spreadsheet row per ranked city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow<'a> {
    pub rank: u32,
    pub id: &'a str,
    pub name: &'a str,
    pub salary_index: f64,
    pub gross_monthly: u64,
    pub emc_monthly: u64,
    pub team_total_monthly: u64,
    pub buffer_pct: f64,
    pub max_feasible: u32,
    pub verdict: &'static str,
    pub financial_score: f64,
    pub talent_score: f64,
    pub strategic_score: f64,
    pub hiring_pressure: f64,
    pub dealbreaker_penalty: f64,
    pub dealbreaker_hits: String,
    pub weighted_raw: f64,
    pub weighted: f64,
    pub feasibility_band: &'static str,
    pub savings_annual: i64,
}

impl<'a> From<&'a CityResult> for CsvRow<'a> {
    fn from(city: &'a CityResult) -> Self {
        Self {
            rank: city.rank,
            id: city.id(),
            name: city.name(),
            salary_index: city.city.salary_index,
            gross_monthly: city.gross_monthly,
            emc_monthly: city.emc_monthly,
            team_total_monthly: city.team_total_monthly,
            buffer_pct: city.buffer_pct,
            max_feasible: city.max_feasible,
            verdict: city.verdict.label(),
            financial_score: city.financial_score,
            talent_score: city.talent_score,
            strategic_score: city.strategic_score,
            hiring_pressure: city.hiring_pressure,
            dealbreaker_penalty: city.dealbreaker_penalty,
            dealbreaker_hits: city.dealbreaker_hits.join(";"),
            weighted_raw: city.weighted_raw,
            weighted: city.weighted,
            feasibility_band: city.feasibility_band.label(),
            savings_annual: city.savings_annual,
        }
    }
}

/// Write the ranked cities as CSV with a header row.
pub fn write_csv<W: Write>(analysis: &Analysis, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for city in &analysis.all_cities {
        csv_writer.serialize(CsvRow::from(city))?;
    }

    csv_writer.flush()?;
    Ok(())
}
