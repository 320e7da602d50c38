use chrono::NaiveDate;
use nearshore::catalog::{CityCatalog, CompensationCatalog};
use nearshore::config::SimulatorConfig;
use nearshore::error::AppError;
use nearshore::simulator::StrategyKind;
use tracing::info;

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn parse_strategy(raw: &str) -> Result<StrategyKind, String> {
    StrategyKind::parse(raw)
        .ok_or_else(|| format!("unknown strategy '{raw}' (expected normalized or tabular)"))
}

/// First whole number in a free-text team size such as "about 12 engineers".
pub fn parse_team_size(raw: &str) -> Option<u32> {
    let digits: String = raw
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Monthly budget from text like "€ 75,000 / month": the first run of digits
/// and thousands separators, commas dropped.
pub fn parse_budget(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(|ch| ch.is_ascii_digit() || *ch == ',')
        .filter(|ch| *ch != ',')
        .collect();
    digits.parse::<f64>().ok().filter(|value| *value > 0.0)
}

pub fn load_catalogs(
    config: &SimulatorConfig,
) -> Result<(CityCatalog, CompensationCatalog), AppError> {
    let cities = CityCatalog::from_path(config.cities_path())?;
    let compensation = CompensationCatalog::from_path(config.compensation_path())?;
    info!(
        data_dir = %config.data_dir.display(),
        cities = cities.len(),
        strategy = %config.strategy,
        "datasets loaded"
    );
    Ok((cities, compensation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_and_reports_bad_input() {
        let date = parse_date(" 2026-03-02 ").expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 2).expect("date"));

        let err = parse_date("02/03/2026").expect_err("wrong format");
        assert!(err.contains("YYYY-MM-DD"), "unexpected message: {err}");
    }

    #[test]
    fn team_size_takes_the_first_number() {
        assert_eq!(parse_team_size("12"), Some(12));
        assert_eq!(parse_team_size("about 25 engineers, maybe 30"), Some(25));
        assert_eq!(parse_team_size("a handful"), None);
        assert_eq!(parse_team_size(""), None);
    }

    #[test]
    fn budget_ignores_currency_and_thousands_separators() {
        assert_eq!(parse_budget("75000"), Some(75000.0));
        assert_eq!(parse_budget("€ 75,000 / month"), Some(75000.0));
        assert_eq!(parse_budget("EUR 1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_budget("0"), None);
        assert_eq!(parse_budget("flexible"), None);
    }

    #[test]
    fn strategy_names_are_validated() {
        assert_eq!(parse_strategy("tabular"), Ok(StrategyKind::Tabular));
        assert_eq!(parse_strategy("Normalized"), Ok(StrategyKind::Normalized));
        assert!(parse_strategy("vibes").is_err());
    }
}
