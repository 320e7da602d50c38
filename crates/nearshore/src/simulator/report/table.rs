use super::super::analysis::Analysis;

const HEADER: &str =
    "| # | City | Idx | EMC/mo | Buffer% | Fin | Talent | Strat | Dbreak | Band | Weighted | Verdict |";
const SEPARATOR: &str =
    "|---|------|-----|--------|---------|-----|--------|-------|--------|------|----------|---------|";

/// Markdown table of every ranked city, best first.
pub fn render_ranking_table(analysis: &Analysis) -> String {
    let mut lines = Vec::with_capacity(analysis.all_cities.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(SEPARATOR.to_string());

    for city in &analysis.all_cities {
        lines.push(format!(
            "| {} | {} | {} | €{} | {}% | {} | {} | {} | {} | {} | {} | {} |",
            city.rank,
            city.name(),
            city.city.salary_index,
            format_thousands(city.emc_monthly),
            city.buffer_pct,
            city.financial_score,
            city.talent_score,
            city.strategic_score,
            city.dealbreaker_penalty,
            city.feasibility_band.label(),
            city.weighted,
            city.verdict.label(),
        ));
    }

    lines.join("\n")
}

/// `7136` -> `7,136`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
