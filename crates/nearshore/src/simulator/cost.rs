use serde::{Deserialize, Serialize};

use super::numeric::whole_units;

/// Mandatory employer social-security surcharge on gross pay.
pub const EMPLOYER_SOCIAL_RATE: f64 = 0.2375;
/// Fixed monthly meal allowance paid on top of gross pay.
pub const MEAL_ALLOWANCE_MONTHLY: f64 = 175.0;
/// Stack premiums never exceed this share of the tiered gross.
pub const MAX_STACK_PREMIUM: f64 = 0.60;
/// Salary index of the reference city (Lisbon).
pub const REFERENCE_SALARY_INDEX: f64 = 100.0;

const MONTHS_PER_YEAR: u64 = 12;

/// Employer cost of one hire in one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerCost {
    pub gross_monthly: u64,
    pub emc_monthly: u64,
    pub emc_annual: u64,
}

impl EmployerCost {
    pub fn from_monthly(gross_monthly: u64, emc_monthly: u64) -> Self {
        Self {
            gross_monthly,
            emc_monthly,
            emc_annual: emc_monthly.saturating_mul(MONTHS_PER_YEAR),
        }
    }
}

/// Price one role in one city.
///
/// The order is fixed: tier, capped stack premium, salary index, then the
/// employer surcharge and allowance. Gross pay is rounded before the
/// surcharge is applied.
pub fn compute_emc(
    midpoint: f64,
    tier_multiplier: f64,
    stack_premium: f64,
    salary_index: f64,
) -> EmployerCost {
    let tiered_gross = midpoint * tier_multiplier;
    let capped_premium = stack_premium.min(MAX_STACK_PREMIUM);
    let stack_adjusted = tiered_gross * (1.0 + capped_premium);
    let gross_monthly = whole_units(stack_adjusted * (salary_index / 100.0));
    let emc_monthly =
        whole_units(gross_monthly as f64 * (1.0 + EMPLOYER_SOCIAL_RATE) + MEAL_ALLOWANCE_MONTHLY);

    EmployerCost::from_monthly(gross_monthly, emc_monthly)
}
