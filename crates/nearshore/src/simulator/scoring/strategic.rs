use serde::{Deserialize, Serialize};

use super::super::domain::{CityRecord, Lifestyle, Objective, OfficeStrategy};
use super::ScoringContext;

/// Static market-maturity classification of the candidate cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CityTier {
    One,
    Two,
    Three,
    Four,
}

const TIER_ONE: [&str; 2] = ["lisbon", "porto"];
const TIER_TWO: [&str; 3] = ["braga", "coimbra", "aveiro"];
const TIER_THREE: [&str; 4] = ["guimaraes", "evora", "faro", "setubal"];

const COASTAL_CITIES: [&str; 6] = ["lisbon", "porto", "setubal", "faro", "aveiro", "vianacastelo"];

/// Industry keywords each city has a demonstrated cluster for.
const DOMAIN_MAP: [(&str, &[&str]); 6] = [
    (
        "lisbon",
        &[
            "biotech", "pharma", "life", "fintech", "banking", "ai", "ml", "data", "gaming",
            "graphics", "aerospace",
        ],
    ),
    (
        "porto",
        &[
            "biotech", "pharma", "automotive", "mobility", "fintech", "banking", "ai", "ml",
            "data", "gaming",
        ],
    ),
    ("braga", &["automotive", "mobility"]),
    (
        "coimbra",
        &[
            "biotech", "pharma", "life", "ai", "ml", "data", "agritech", "cleantech",
        ],
    ),
    ("aveiro", &["telecom", "5g", "networks", "iot"]),
    ("evora", &["aerospace", "defense", "agritech", "cleantech"]),
];

impl CityTier {
    /// Cities outside the first three tiers, including unknown ids, are tier 4.
    pub fn for_city(city_id: &str) -> Self {
        if TIER_ONE.contains(&city_id) {
            Self::One
        } else if TIER_TWO.contains(&city_id) {
            Self::Two
        } else if TIER_THREE.contains(&city_id) {
            Self::Three
        } else {
            Self::Four
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            CityTier::One => 1,
            CityTier::Two => 2,
            CityTier::Three => 3,
            CityTier::Four => 4,
        }
    }
}

impl From<CityTier> for u8 {
    fn from(tier: CityTier) -> Self {
        tier.number()
    }
}

impl TryFrom<u8> for CityTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(format!("city tier must be 1-4, found {other}")),
        }
    }
}

/// True when any of the city's domain keywords appears in the industry text.
pub fn domain_fit(city_id: &str, industry_lower: &str) -> bool {
    if industry_lower.is_empty() {
        return false;
    }

    DOMAIN_MAP
        .iter()
        .find(|(id, _)| *id == city_id)
        .map(|(_, domains)| {
            domains
                .iter()
                .any(|domain| industry_lower.contains(domain))
        })
        .unwrap_or(false)
}

pub fn is_coastal(city_id: &str) -> bool {
    COASTAL_CITIES.contains(&city_id)
}

/// Bonuses both strategies add on top of their own base score.
pub(crate) fn contextual_bonus(
    city: &CityRecord,
    tier: CityTier,
    context: &ScoringContext<'_>,
) -> f64 {
    let mut bonus = 0.0;

    if city.featured {
        bonus += 0.2;
    }

    if context.work_model.is_office_centric() && city.has_airport {
        bonus += 0.2;
    }

    match context.office_strategy {
        OfficeStrategy::UniversityAdjacent if city.stem_grads >= 1200 => bonus += 0.25,
        OfficeStrategy::CityCenter if city.office_rent.max <= 15.0 => bonus += 0.15,
        _ => {}
    }

    if context.lifestyle == Lifestyle::CoastalWarm && is_coastal(&city.id) {
        bonus += 0.2;
    }

    match context.objective {
        Objective::Speed if tier == CityTier::One => bonus += 0.2,
        Objective::Cost if city.col_index <= 34.0 => bonus += 0.15,
        _ => {}
    }

    bonus
}
