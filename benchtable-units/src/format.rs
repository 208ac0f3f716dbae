//! Significant-Digit Formatting
//!
//! Rust's formatter has no `%g`. This reproduces the C behavior: round to a
//! number of significant digits, use positional notation for moderate
//! exponents and scientific notation otherwise, and strip trailing zeros.

/// Format `value` with `digits` significant digits, like C's `%.{digits}g`.
///
/// # Examples
///
/// ```ignore
/// # use benchtable_units::format_significant;
/// assert_eq!(format_significant(2.0, 3), "2");
/// assert_eq!(format_significant(0.2828, 2), "0.28");
/// assert_eq!(format_significant(12345.0, 3), "1.23e+04");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);

    // Let the scientific formatter do the rounding so that e.g. 9.996 with
    // three digits lands on exponent 1, not 0.
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
