//! Display formatting of numeric results

/// Text placed in the accumulator while an error is displayed
pub const ERROR_SENTINEL: &str = "Error";

/// Largest magnitude rendered in plain decimal notation
const SCIENTIFIC_UPPER: f64 = 1e10;
/// Smallest non-zero magnitude rendered in plain decimal notation
const SCIENTIFIC_LOWER: f64 = 1e-10;
/// Fractional digits kept in the rendered value
const MAX_DECIMALS: usize = 10;

/// Formats a value for the display
///
/// Infinite values render as `Infinito`/`-Infinito`. Magnitudes above `1e10`
/// or below `1e-10` (but non-zero) use `<mantissa>e<sign><exponent>`.
/// Everything else is plain decimal. Fractional digits past the tenth are
/// truncated, not rounded, and trailing zeros are stripped.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinito" } else { "-Infinito" }.to_string();
    }
    if value.is_nan() {
        return ERROR_SENTINEL.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude > SCIENTIFIC_UPPER || magnitude < SCIENTIFIC_LOWER {
        return scientific(value);
    }

    // Shortest round-trip rendering; never exponential in this range
    truncate_fraction(&value.to_string())
}

fn scientific(value: f64) -> String {
    let rendered = format!("{value:e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let mantissa = truncate_fraction(mantissa);
    if exponent.starts_with('-') {
        format!("{mantissa}e{exponent}")
    } else {
        format!("{mantissa}e+{exponent}")
    }
}

/// Keeps at most [`MAX_DECIMALS`] fractional digits, then strips zeros
fn truncate_fraction(text: &str) -> String {
    let Some((int_part, frac_part)) = text.split_once('.') else {
        return text.to_string();
    };
    let cut = frac_part.get(..MAX_DECIMALS).unwrap_or(frac_part);
    let kept = cut.trim_end_matches('0');
    if kept.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{kept}")
    }
}

/// Parses accumulator text back into a number
///
/// Accepts everything [`format_result`] emits for finite values, plus
/// partially typed input such as `"12."`. Returns `None` for the error
/// sentinel and any other non-numeric text.
#[must_use]
pub fn parse_operand(text: &str) -> Option<f64> {
    match text {
        "Infinito" => Some(f64::INFINITY),
        "-Infinito" => Some(f64::NEG_INFINITY),
        ERROR_SENTINEL => None,
        _ => text.parse::<f64>().ok().filter(|v| !v.is_nan()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integer() {
        assert_eq!(format_result(100.0), "100");
        assert_eq!(format_result(-42.0), "-42");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_strips_float_noise() {
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(2.5), "2.5");
    }

    #[test]
    fn test_format_truncates_past_ten_decimals() {
        assert_eq!(format_result(2.0 / 3.0), "0.6666666666");
        assert_eq!(format_result(-2.0 / 3.0), "-0.6666666666");
        assert_eq!(format_result(-1.0 / 3.0), "-0.3333333333");
        assert_eq!(format_result(0.499_999_999_999_999_94), "0.4999999999");
        assert_eq!(format_result(0.123_456_789_19), "0.1234567891");
    }

    #[test]
    fn test_format_infinity() {
        assert_eq!(format_result(f64::INFINITY), "Infinito");
        assert_eq!(format_result(f64::NEG_INFINITY), "-Infinito");
    }

    #[test]
    fn test_format_small_uses_scientific() {
        assert_eq!(format_result(0.000_000_000_01), "1e-11");
        assert_eq!(format_result(-2.5e-12), "-2.5e-12");
    }

    #[test]
    fn test_format_large_uses_scientific() {
        assert_eq!(format_result(12_345_678_901.0), "1.2345678901e+10");
        assert_eq!(format_result(1e20), "1e+20");
    }

    #[test]
    fn test_format_thresholds_are_exclusive() {
        assert_eq!(format_result(1e10), "10000000000");
        assert_eq!(format_result(1e-10), "0.0000000001");
    }

    #[test]
    fn test_format_scientific_mantissa_truncated() {
        assert_eq!(format_result(1.234_567_890_123_4e15), "1.2345678901e+15");
        assert_eq!(format_result(1.999_999_999_99e20), "1.9999999999e+20");
        assert_eq!(format_result(-3.000_000_000_04e-12), "-3e-12");
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("12.5"), Some(12.5));
        assert_eq!(parse_operand("12."), Some(12.0));
        assert_eq!(parse_operand("1e-11"), Some(1e-11));
        assert_eq!(parse_operand("1.5e+12"), Some(1.5e12));
        assert_eq!(parse_operand("Infinito"), Some(f64::INFINITY));
        assert_eq!(parse_operand(ERROR_SENTINEL), None);
        assert_eq!(parse_operand("NaN"), None);
        assert_eq!(parse_operand(""), None);
    }

    #[test]
    fn test_formatted_values_parse_back() {
        for value in [3.25, -7.0, 1e-11, 4.5e13, 0.6666666666] {
            let text = format_result(value);
            assert!(parse_operand(&text).is_some(), "{text} should parse");
        }
    }
}
