//! Number formatting for the calculator display.
//!
//! The display is plain text that the engine parses back on every
//! operation, so formatting and parsing here are the two halves of the
//! same numeral convention:
//! - integers print without a fractional part (`8`, not `8.0`)
//! - undefined arithmetic prints as `Infinity`, `-Infinity` or `NaN`
//! - very large or very small magnitudes use exponent form (`1e+21`)

use lazy_static::lazy_static;
use regex::Regex;

/// Magnitude at and above which numbers switch to exponent form.
const EXPONENT_UPPER: f64 = 1e21;

/// Magnitude below which non-zero numbers switch to exponent form.
const EXPONENT_LOWER: f64 = 1e-6;

pub const INFINITY: &str = "Infinity";
pub const NOT_A_NUMBER: &str = "NaN";

lazy_static! {
    /// Unsigned decimal mantissa with an optional exponent. An exponent
    /// without digits is left out of the match.
    static ref NUMERIC_PREFIX: Regex = Regex::new(
        r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?"
    ).unwrap();
}

/// Format a number for the display.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return NOT_A_NUMBER.to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            INFINITY.to_string()
        } else {
            format!("-{}", INFINITY)
        };
    }
    // Also catches -0
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || magnitude < EXPONENT_LOWER {
        format_exponent(value)
    } else {
        // Display for f64 is the shortest string that round-trips
        format!("{}", value)
    }
}

/// Format with an explicitly signed exponent: `1e+21`, `-2.5e-7`.
fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Parse display text back into a number.
///
/// Only the leading numeric prefix is read, so a display that was extended
/// past a sentinel (`Infinity5`) or ends in a bare point (`5.`) still
/// parses. Text without a numeric prefix yields NaN.
pub fn parse_display(text: &str) -> f64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = if rest.starts_with(INFINITY) {
        f64::INFINITY
    } else {
        match NUMERIC_PREFIX.find(rest) {
            Some(m) => m.as_str().parse::<f64>().unwrap_or(f64::NAN),
            None => return f64::NAN,
        }
    };

    if negative { -magnitude } else { magnitude }
}

/// Insert thousand separators into the integer part of a display string.
///
/// Sentinels and exponent forms are returned unchanged.
pub fn group_thousands(display: &str) -> String {
    let (sign, unsigned) = match display.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", display),
    };

    let (int_part, rest) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    if int_part.is_empty()
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || rest.contains(['e', 'E'])
    {
        return display.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let grouped: String = grouped.chars().rev().collect();
    format!("{}{}{}", sign, grouped, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(1000000.0), "1000000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.05), "0.05");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789012345680000.0), "123456789012345680000");
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_display("123"), 123.0);
        assert_eq!(parse_display("-0.5"), -0.5);
        assert_eq!(parse_display("5."), 5.0);
        assert_eq!(parse_display("0."), 0.0);
        assert_eq!(parse_display(".25"), 0.25);
        assert_eq!(parse_display("12.5.3"), 12.5);
    }

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(parse_display("Infinity"), f64::INFINITY);
        assert_eq!(parse_display("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_display("Infinity5"), f64::INFINITY);
        assert!(parse_display("NaN").is_nan());
        assert!(parse_display("NaN7").is_nan());
        assert!(parse_display("").is_nan());
        assert!(parse_display("-").is_nan());
        assert!(parse_display(".").is_nan());
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_display("1e+21"), 1e21);
        assert_eq!(parse_display("1.5e-7"), 1.5e-7);
        // Incomplete exponent is ignored
        assert_eq!(parse_display("3e"), 3.0);
        assert_eq!(parse_display("1e+215"), 1e215);
    }

    #[test]
    fn test_format_parse_agree() {
        for value in [0.0, 8.0, -3.25, 1e21, 1.5e-7, 0.1 + 0.2, 123.456] {
            assert_eq!(parse_display(&format_number(value)), value);
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1000000"), "1,000,000");
        assert_eq!(group_thousands("-1234.5678"), "-1,234.5678");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1234."), "1,234.");
    }

    #[test]
    fn test_group_thousands_passthrough() {
        assert_eq!(group_thousands("Infinity"), "Infinity");
        assert_eq!(group_thousands("NaN"), "NaN");
        assert_eq!(group_thousands("1.5e+21"), "1.5e+21");
        assert_eq!(group_thousands("1e+21"), "1e+21");
    }
}
