//! Renderings of a finished [`Analysis`](super::Analysis) for people and tools.

mod export;
mod summary;
mod table;

pub use export::{write_csv, CsvRow};
pub use summary::{AnalysisSummary, CityScoreSummary};
pub use table::{format_thousands, render_ranking_table};
