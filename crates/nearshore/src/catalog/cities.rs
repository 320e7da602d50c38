use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{read_file, CatalogError};
use crate::simulator::CityRecord;

const IT_CONVERGENCE: f64 = 0.45;
const NATIONAL_COL_AVERAGE: f64 = 33.0;
const COL_SENSITIVITY: f64 = 0.65;
const MAX_SALARY_INDEX: f64 = 100.0;

/// Read access to candidate cities so the engine can run against any source.
pub trait CityRepository: Send + Sync {
    /// Cities in display order.
    fn cities(&self) -> &[CityRecord];

    fn find(&self, id: &str) -> Option<&CityRecord> {
        self.cities().iter().find(|city| city.id == id)
    }
}

/// Regional all-sector pay baseline compressed toward parity, then shifted by
/// local cost of living. Capped at the reference city's 100.
pub fn salary_index_from_baseline(regional_baseline: f64, col_index: f64) -> f64 {
    let compressed = regional_baseline + (100.0 - regional_baseline) * IT_CONVERGENCE;
    let adjusted = compressed + (col_index - NATIONAL_COL_AVERAGE) * COL_SENSITIVITY;
    ((adjusted * 10.0 + 0.5).floor() / 10.0).min(MAX_SALARY_INDEX)
}

#[derive(Debug, Deserialize)]
struct CitiesFile {
    cities: Vec<CityRecord>,
}

/// Validated, in-memory city dataset.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<CityRecord>,
}

impl CityCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = Self::from_reader(read_file(path)?)?;
        debug!(path = %path.display(), cities = catalog.len(), "city catalog loaded");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let file: CitiesFile = serde_json::from_reader(reader)?;
        Self::from_records(file.cities)
    }

    /// Derive missing salary indices and reject records the engine would
    /// have to exclude anyway.
    pub fn from_records(records: Vec<CityRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty("city"));
        }

        let mut seen = HashSet::new();
        let mut cities = Vec::with_capacity(records.len());

        for mut city in records {
            if !seen.insert(city.id.clone()) {
                return Err(CatalogError::DuplicateId(city.id));
            }

            if !city.salary_index.is_finite() {
                if let Some(baseline) = city.regional_baseline.filter(|value| value.is_finite()) {
                    city.salary_index = salary_index_from_baseline(baseline, city.col_index);
                }
            }

            if let Some(field) = city.invalid_field() {
                return Err(CatalogError::InvalidRecord {
                    id: city.id,
                    field,
                });
            }

            cities.push(city);
        }

        Ok(Self { cities })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn into_records(self) -> Vec<CityRecord> {
        self.cities
    }
}

impl CityRepository for CityCatalog {
    fn cities(&self) -> &[CityRecord] {
        &self.cities
    }
}
