//! Rendering of numeric values for the display.

use crate::error::ERROR_LITERAL;

/// Magnitudes above this switch to scientific notation.
pub const SCIENTIFIC_THRESHOLD: f64 = 1e10;

/// Decimal places kept for non-integral values.
pub const MAX_DECIMALS: usize = 10;

/// Render a value for the display.
///
/// - NaN or infinite: the error literal
/// - `|value| > 1e10`: scientific notation with two fractional digits (`1.23e+11`)
/// - integral: no decimal point
/// - otherwise: rounded to ten decimal places, shortest exact decimal
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_LITERAL.to_string();
    }

    if value.abs() > SCIENTIFIC_THRESHOLD {
        return scientific(value);
    }

    if value.fract() == 0.0 {
        // |value| <= 1e10 so the cast is exact; -0.0 becomes 0.
        return (value as i64).to_string();
    }

    let rounded = round_decimals(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Round half-to-even on the exact decimal expansion, like `{:.10}` does.
fn round_decimals(value: f64) -> f64 {
    format!("{:.*}", MAX_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

/// `{:.2e}` with an explicit exponent sign and at least two exponent digits.
fn scientific(value: f64) -> String {
    let raw = format!("{:.2e}", value);
    match raw.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn integers_have_no_decimal_point() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(1e10), "10000000000");
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn fractions_round_to_ten_places() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(std::f64::consts::PI), "3.1415926536");
    }

    #[test]
    fn tiny_fraction_rounds_to_zero() {
        assert_eq!(format_number(1e-12), "0");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn large_values_use_scientific() {
        assert_eq!(format_number(1.234e11), "1.23e+11");
        assert_eq!(format_number(-5e15), "-5.00e+15");
        assert_eq!(format_number(120.0 * 1e300), "1.20e+302");
    }

    #[test]
    fn non_finite_is_error_literal() {
        assert_eq!(format_number(f64::NAN), "Error");
        assert_eq!(format_number(f64::INFINITY), "Error");
        assert_eq!(format_number(f64::NEG_INFINITY), "Error");
    }

    proptest! {
        #[test]
        fn integers_round_trip(i in -10_000_000_000i64..=10_000_000_000i64) {
            prop_assert_eq!(format_number(i as f64), i.to_string());
        }

        #[test]
        fn huge_values_have_two_fraction_digits(
            v in prop_oneof![1.0000001e10f64..f64::MAX, f64::MIN..-1.0000001e10f64]
        ) {
            let text = format_number(v);
            let (mantissa, exponent) = text.split_once('e').unwrap();
            let (_, fraction) = mantissa.split_once('.').unwrap();
            prop_assert_eq!(fraction.len(), 2);
            prop_assert!(exponent.starts_with('+'));
        }

        #[test]
        fn deterministic_and_never_error_for_finite(v in -1e10f64..1e10f64) {
            let first = format_number(v);
            prop_assert_eq!(&first, &format_number(v));
            prop_assert!(!first.starts_with(ERROR_LITERAL));
        }
    }
}
