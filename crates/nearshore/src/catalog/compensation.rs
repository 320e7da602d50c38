use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{read_file, CatalogError};
use crate::simulator::RoleBand;

/// Role used when a requested role key is unknown.
pub const DEFAULT_ROLE: &str = "software-engineer";
const BLENDED_ROLE: &str = "mixed";
const DEFAULT_TIER_MULTIPLIER: f64 = 1.0;

const FALLBACK_ROLE_BANDS: [(&str, f64, f64, f64, &str); 12] = [
    ("software-engineer", 3680.0, 4300.0, 4920.0, "Software Engineer"),
    ("devops-sre", 3900.0, 4600.0, 5300.0, "DevOps / SRE"),
    ("ml-data-engineer", 4200.0, 5200.0, 6200.0, "ML / Data Engineer"),
    (
        "mobile-engineer",
        3700.0,
        4200.0,
        4700.0,
        "Mobile Engineer (iOS/Android)",
    ),
    ("engineering-manager", 5200.0, 6500.0, 8000.0, "Engineering Manager"),
    ("product-manager", 4200.0, 5000.0, 6000.0, "Product Manager (PM)"),
    ("data-analyst", 3800.0, 4400.0, 5000.0, "Data Analyst / BI"),
    ("tech-support", 1800.0, 2100.0, 2400.0, "Tech Support L1/L2"),
    ("creative", 2900.0, 3350.0, 3800.0, "UX / Creative"),
    ("qa-testing", 2300.0, 2600.0, 2900.0, "QA / Testing"),
    ("admin-backoffice", 1500.0, 1750.0, 2000.0, "Admin / Back-office"),
    (BLENDED_ROLE, 2800.0, 3200.0, 3600.0, "Mixed roles (blended)"),
];

const FALLBACK_SENIORITY: [(&str, f64); 4] = [
    ("junior", 0.85),
    ("mid", 1.00),
    ("senior", 1.25),
    ("lead", 1.40),
];

const FALLBACK_STACK_PREMIUMS: [(&str, f64); 8] = [
    ("core-backend", 0.0),
    ("frontend", 0.05),
    ("mobile-native", 0.10),
    ("devops-cloud", 0.15),
    ("systems-rust", 0.25),
    ("ml-mlops", 0.25),
    ("security", 0.30),
    ("blockchain", 0.40),
];

fn fallback_band(key: &str) -> Option<RoleBand> {
    FALLBACK_ROLE_BANDS
        .iter()
        .find(|(band_key, ..)| *band_key == key)
        .map(|(_, min, mid, max, label)| RoleBand {
            min: *min,
            mid: *mid,
            max: *max,
            label: (*label).to_string(),
        })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompensationFile {
    #[serde(default)]
    role_bands: BTreeMap<String, RoleBand>,
    #[serde(default)]
    seniority_multipliers: BTreeMap<String, f64>,
    #[serde(default)]
    stack_premiums: BTreeMap<String, f64>,
}

/// Role bands, seniority multipliers and stack premiums keyed by form value.
///
/// Any section missing from the dataset is filled from the built-in tables,
/// so lookups always resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct CompensationCatalog {
    role_bands: BTreeMap<String, RoleBand>,
    seniority_multipliers: BTreeMap<String, f64>,
    stack_premiums: BTreeMap<String, f64>,
}

impl Default for CompensationCatalog {
    fn default() -> Self {
        Self::from_file(CompensationFile::default())
    }
}

impl CompensationCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = Self::from_reader(read_file(path)?)?;
        debug!(
            path = %path.display(),
            roles = catalog.role_bands.len(),
            "compensation catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let file: CompensationFile = serde_json::from_reader(reader)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: CompensationFile) -> Self {
        let mut role_bands = file.role_bands;
        if role_bands.is_empty() {
            role_bands = FALLBACK_ROLE_BANDS
                .iter()
                .filter_map(|(key, ..)| fallback_band(key).map(|band| (key.to_string(), band)))
                .collect();
        }
        if !role_bands.contains_key(BLENDED_ROLE) {
            if let Some(band) = fallback_band(BLENDED_ROLE) {
                role_bands.insert(BLENDED_ROLE.to_string(), band);
            }
        }

        let mut seniority_multipliers = file.seniority_multipliers;
        if seniority_multipliers.is_empty() {
            seniority_multipliers = FALLBACK_SENIORITY
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect();
        }

        let mut stack_premiums = file.stack_premiums;
        if stack_premiums.is_empty() {
            stack_premiums = FALLBACK_STACK_PREMIUMS
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect();
        }

        Self {
            role_bands,
            seniority_multipliers,
            stack_premiums,
        }
    }

    /// Band for `key`, falling back to the software engineer band.
    pub fn role_band(&self, key: &str) -> RoleBand {
        self.role_bands
            .get(key)
            .or_else(|| self.role_bands.get(DEFAULT_ROLE))
            .cloned()
            .or_else(|| fallback_band(DEFAULT_ROLE))
            .unwrap_or(RoleBand {
                min: 0.0,
                mid: 0.0,
                max: 0.0,
                label: DEFAULT_ROLE.to_string(),
            })
    }

    pub fn has_role(&self, key: &str) -> bool {
        self.role_bands.contains_key(key)
    }

    /// Seniority multiplier; unknown levels price at mid level.
    pub fn tier_multiplier(&self, seniority: &str) -> f64 {
        self.seniority_multipliers
            .get(seniority)
            .copied()
            .unwrap_or(DEFAULT_TIER_MULTIPLIER)
    }

    /// Single highest premium among the selected stacks; unknown stacks add nothing.
    pub fn resolve_stack_premium<'a, I>(&self, stacks: I) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        stacks
            .into_iter()
            .filter_map(|stack| self.stack_premiums.get(stack.trim()).copied())
            .fold(0.0, f64::max)
    }

    pub fn role_bands(&self) -> impl Iterator<Item = (&str, &RoleBand)> {
        self.role_bands
            .iter()
            .map(|(key, band)| (key.as_str(), band))
    }

    pub fn seniority_multipliers(&self) -> impl Iterator<Item = (&str, f64)> {
        self.seniority_multipliers
            .iter()
            .map(|(key, value)| (key.as_str(), *value))
    }

    pub fn stack_premiums(&self) -> impl Iterator<Item = (&str, f64)> {
        self.stack_premiums
            .iter()
            .map(|(key, value)| (key.as_str(), *value))
    }
}
