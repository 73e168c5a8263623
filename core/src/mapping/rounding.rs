/// Rounds a value to `decimals` decimal places, halves away from zero
///
/// Non-finite values are returned unchanged, as are values for which the
/// scale factor `10^decimals` overflows.
pub fn round_number(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(47.336, 2, 47.34)]
    #[case(47.334, 2, 47.33)]
    #[case(2.5, 0, 3.0)]
    #[case(-2.5, 0, -3.0)]
    #[case(12.0, 2, 12.0)]
    #[case(0.123456, 4, 0.1235)]
    #[case(47.336, 320, 47.336)]
    #[case(47.336, 3_000_000_000, 47.336)]
    fn test_round_number(#[case] value: f64, #[case] decimals: u32, #[case] expected: f64) {
        assert_eq!(round_number(value, decimals), expected);
    }

    #[test]
    fn test_round_non_finite() {
        assert!(round_number(f64::NAN, 2).is_nan());
        assert_eq!(round_number(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_rounded_display() {
        assert_eq!(round_number(47.336, 2).to_string(), "47.34");
        assert_eq!(round_number(30.0, 2).to_string(), "30");
    }
}
