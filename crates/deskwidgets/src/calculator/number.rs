//! Number <-> display text
//!
//! The display stores operands as text. Numbers are rendered the way a browser
//! renders them (`String(x)`), and text is read back with a prefix-tolerant
//! parser (`parseFloat`), so `"1e-7."` still reads as `1e-7`.

use super::{CalcError, CalcResult};

/// Longest display text rendered verbatim
pub const MAX_DISPLAY_LEN: usize = 15;

/// Fraction digits used when a value is too long for the display
pub const EXPONENT_DIGITS: usize = 8;

/// Renders `value` as the shortest text that reads back to the same `f64`.
///
/// Plain decimal notation is used when the decimal exponent lies in
/// `[-6, 21)`, otherwise `d.ddde±x`. Negative zero renders as `"0"`.
#[must_use]
pub fn js_number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3"
    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return format!("{sign}{sci}");
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{e_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{e_sign}{}", e.abs())
        }
    };
    format!("{sign}{body}")
}

/// Renders `value` in exponential form with `fraction_digits` after the point,
/// exponent always signed (`1.50000000e+20`).
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return js_number_string(value);
    }
    let raw = format!("{value:.fraction_digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

/// Reads the longest numeric prefix of `text`, skipping leading whitespace.
///
/// Returns `None` when no prefix is a number.
#[must_use]
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let unsigned = text.trim_start_matches(['+', '-']);
    if unsigned.starts_with("Infinity") {
        let negative = text.len() - unsigned.len() == 1 && text.starts_with('-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let numeric_len = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    (1..=numeric_len)
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
}

/// Parses display text as a finite operand.
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    match parse_float_prefix(text) {
        Some(value) if value.is_finite() => Ok(value),
        Some(_) => Err(CalcError::Overflow),
        None => Err(CalcError::InvalidOperand(text.to_string())),
    }
}

/// Applies the display length rule to already-rendered text.
///
/// Text up to [`MAX_DISPLAY_LEN`] characters, or text already in exponential
/// form, is shown verbatim. Longer text is re-rendered with
/// [`EXPONENT_DIGITS`] fraction digits.
#[must_use]
pub fn format_display(text: &str) -> String {
    if text.len() <= MAX_DISPLAY_LEN || text.contains('e') {
        return text.to_string();
    }
    match parse_float_prefix(text) {
        Some(value) => to_exponential(value, EXPONENT_DIGITS),
        None => "NaN".to_string(),
    }
}

/// Renders a computed value for the display.
#[must_use]
pub fn format_number(value: f64) -> String {
    format_display(&js_number_string(value))
}
