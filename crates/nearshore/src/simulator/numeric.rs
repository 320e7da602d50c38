//! Rounding helpers shared by every pipeline stage.
//!
//! Published figures round half up (toward positive infinity at `.5`), so a
//! buffer of `-2.25` rounds to `-2.2` rather than away from zero.

pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Round a non-negative currency amount to whole units.
pub(crate) fn whole_units(value: f64) -> u64 {
    let rounded = round_half_up(value);
    if rounded.is_finite() && rounded > 0.0 {
        rounded as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_to(-6.6666, 1), -6.7);
        assert_eq!(round_to(6.96, 1), 7.0);
    }

    #[test]
    fn whole_units_never_goes_negative() {
        assert_eq!(whole_units(-12.0), 0);
        assert_eq!(whole_units(f64::NAN), 0);
        assert_eq!(whole_units(7135.94), 7136);
    }
}
