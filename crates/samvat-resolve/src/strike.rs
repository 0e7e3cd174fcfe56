//! ATM strike computation.

use thiserror::Error;

/// Errors for invalid strike-resolution inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrikeError {
    /// Spot price was negative or not finite.
    #[error("Invalid spot price: {0}")]
    InvalidSpot(f64),

    /// Granularity was zero, negative, or not finite.
    #[error("Invalid strike granularity: {0}")]
    InvalidGranularity(f64),
}

/// Rounds a spot price to the nearest valid strike.
///
/// With `remainder = spot % granularity`, a remainder below half the
/// granularity rounds down and anything else rounds up - so the exact
/// midpoint rounds up. The result is always an exact multiple of
/// `granularity` and within `granularity / 2` of the spot.
///
/// # Errors
///
/// Returns [`StrikeError`] for a negative or non-finite spot, or a
/// non-positive granularity.
pub fn atm_strike(spot: f64, granularity: f64) -> Result<f64, StrikeError> {
    if !spot.is_finite() || spot < 0.0 {
        return Err(StrikeError::InvalidSpot(spot));
    }
    if !granularity.is_finite() || granularity <= 0.0 {
        return Err(StrikeError::InvalidGranularity(granularity));
    }

    let remainder = spot % granularity;
    let strike = if remainder < granularity / 2.0 {
        spot - remainder
    } else {
        spot - remainder + granularity
    };
    Ok(strike)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rounds_down_below_midpoint() {
        assert_relative_eq!(atm_strike(124.0, 50.0).unwrap(), 100.0);
        assert_relative_eq!(atm_strike(21_980.0, 50.0).unwrap(), 22_000.0);
        assert_relative_eq!(atm_strike(22_020.0, 50.0).unwrap(), 22_000.0);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_relative_eq!(atm_strike(125.0, 50.0).unwrap(), 150.0);
        assert_relative_eq!(atm_strike(22_025.0, 50.0).unwrap(), 22_050.0);
    }

    #[test]
    fn test_exact_multiple_is_unchanged() {
        assert_relative_eq!(atm_strike(22_000.0, 50.0).unwrap(), 22_000.0);
        assert_relative_eq!(atm_strike(0.0, 50.0).unwrap(), 0.0);
    }

    #[test]
    fn test_result_is_always_a_multiple_within_half_step() {
        let granularity = 50.0;
        for tenth in 0..=10_000 {
            let spot = f64::from(tenth) / 10.0 * 25.0;
            let strike = atm_strike(spot, granularity).unwrap();

            assert_relative_eq!(strike % granularity, 0.0, epsilon = 1e-9);
            assert!((strike - spot).abs() <= granularity / 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            atm_strike(-1.0, 50.0),
            Err(StrikeError::InvalidSpot(_))
        ));
        assert!(matches!(
            atm_strike(f64::NAN, 50.0),
            Err(StrikeError::InvalidSpot(_))
        ));
        assert!(matches!(
            atm_strike(100.0, 0.0),
            Err(StrikeError::InvalidGranularity(_))
        ));
        assert!(matches!(
            atm_strike(100.0, -50.0),
            Err(StrikeError::InvalidGranularity(_))
        ));
    }
}
