//! Decimal rendering of evaluation results.

const DECIMAL_LOWER_BOUND: f64 = 1e-6;
const DECIMAL_UPPER_BOUND: f64 = 1e21;

/// Render `value` the way an ECMAScript `Number` prints.
///
/// Magnitudes in `[1e-6, 1e21)` use plain decimal notation with the shortest
/// digits that round-trip; anything outside uses exponent notation with an
/// explicit sign (`1e+21`, `1.5e-7`). Negative zero renders as `0`.
///
/// # Examples
/// ```
/// use calculator_backend::domain::expression::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }

    if (DECIMAL_LOWER_BOUND..DECIMAL_UPPER_BOUND).contains(&value.abs()) {
        return value.to_string();
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4.0, "4")]
    #[case(-0.0, "0")]
    #[case(-12.5, "-12.5")]
    #[case(2.0 / 3.0, "0.6666666666666666")]
    #[case(0.000_001, "0.000001")]
    #[case(0.000_000_15, "1.5e-7")]
    #[case(123_456_789_012_345_680_000.0, "123456789012345680000")]
    #[case(1e21, "1e+21")]
    #[case(-2.5e22, "-2.5e+22")]
    fn renders_like_ecmascript(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }
}
