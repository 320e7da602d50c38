//! Reference datasets loaded once by the application and handed to the engine.

mod cities;
mod compensation;

pub use cities::{salary_index_from_baseline, CityCatalog, CityRepository};
pub use compensation::{CompensationCatalog, DEFAULT_ROLE};

use std::path::PathBuf;

/// File names expected inside the configured data directory.
pub const CITIES_FILE: &str = "cities.json";
pub const COMPENSATION_FILE: &str = "compensation.json";

/// Error enumeration for dataset loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} dataset contains no entries")]
    Empty(&'static str),
    #[error("duplicate city id '{0}'")]
    DuplicateId(String),
    #[error("city '{id}' has an unusable {field}")]
    InvalidRecord { id: String, field: &'static str },
}

fn read_file(path: &std::path::Path) -> Result<std::fs::File, CatalogError> {
    std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
