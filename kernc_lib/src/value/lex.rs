//! C-style numeric literal lexing.
//!
//! Every function takes a cursor (`&mut &str`) and advances it past what it consumed. A failed
//! lex returns [`Value::None`] and leaves the cursor where it was.

use super::Value;

/// Lexes one literal at the start of `cursor`.
///
/// Radix literals (`0x`, `0b`) are returned as the radix loaders produce them, so a suffix after
/// them is left in the cursor: `0x10L` lexes as `uint16` 16 with `L` remaining.
///
/// ```
/// # use kernc_lib::value::*;
/// let mut cursor = "0x10L";
/// assert_eq!(load(&mut cursor, true), Value::UInt16(16));
/// assert_eq!(cursor, "L");
/// ```
pub fn load(cursor: &mut &str, include_sign: bool) -> Value {
    let start = *cursor;

    if let Some(rest) = start.strip_prefix("true") {
        *cursor = rest;
        return Value::Bool(true);
    }
    if let Some(rest) = start.strip_prefix("false") {
        *cursor = rest;
        return Value::Bool(false);
    }

    let mut s = start;
    let mut is_negative = false;
    if let Some(sign @ (b'+' | b'-')) = s.bytes().next() {
        if !include_sign {
            return Value::None;
        }
        is_negative = sign == b'-';
        s = s[1..].trim_start_matches(|c: char| c.is_ascii_whitespace());
    }

    let mut prefix = s.chars();
    if let (Some('0'), Some(marker)) = (prefix.next(), prefix.next()) {
        let bits_per_digit = match marker {
            'b' | 'B' => Some(1),
            'x' | 'X' => Some(4),
            _ => None,
        };
        if let Some(bits_per_digit) = bits_per_digit {
            let mut digits = &s[2..];
            let value = load_radix(&mut digits, is_negative, bits_per_digit);
            if !value.is_nan() {
                *cursor = digits;
            }
            return value;
        }
    }

    let mantissa_len = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let mantissa = &s[..mantissa_len];
    if !mantissa.bytes().any(|b| b.is_ascii_digit()) {
        return Value::None;
    }

    let mut rest = &s[mantissa_len..];
    let mut longs = 0;
    let mut is_unsigned = false;
    let mut is_float = false;
    let mut exponent = None;
    while let Some(c) = rest.chars().next() {
        match c.to_ascii_uppercase() {
            'L' => longs += 1,
            'U' => is_unsigned = true,
            'F' => is_float = true,
            'E' => {
                let mut after = &rest[1..];
                let before = after;
                // An 'F' inside the exponent decides, even over an earlier one.
                is_float = load(&mut after, true).is_float();
                exponent = Some(&before[..before.len() - after.len()]);
                rest = after;
                break;
            }
            _ => break,
        }
        rest = &rest[1..];
    }
    *cursor = rest;

    if mantissa.contains('.') || is_float {
        let text = float_text(is_negative, mantissa, exponent);
        if is_float {
            Value::Float(parse_or_zero(&text, mantissa))
        } else {
            Value::Double(parse_or_zero(&text, mantissa))
        }
    } else {
        let magnitude = mantissa
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0u64, |acc, digit| {
                acc.wrapping_mul(10).wrapping_add(u64::from(digit - b'0'))
            });
        let value = if is_negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        };
        match (longs, is_unsigned) {
            (0, true) => Value::UInt32(value as u32),
            (0, false) => Value::Int32(value as i32),
            (_, true) => Value::UInt64(value),
            (_, false) => Value::Int64(value as i64),
        }
    }
}

/// Rebuilds a float literal without its suffix letters. A second `.` ends the mantissa.
fn float_text(is_negative: bool, mantissa: &str, exponent: Option<&str>) -> String {
    let mut text = String::new();
    if is_negative {
        text.push('-');
    }
    let mut parts = mantissa.splitn(3, '.');
    text.push_str(parts.next().unwrap_or_default());
    if let Some(fraction) = parts.next() {
        text.push('.');
        text.push_str(fraction);
    }
    if let Some(exponent) = exponent {
        let exponent: String = exponent
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && !"LlUuFf".contains(*c))
            .collect();
        if !exponent.is_empty() {
            text.push('e');
            text.push_str(&exponent);
        }
    }
    text
}

/// A malformed exponent falls back to the mantissa alone.
fn parse_or_zero<F: std::str::FromStr + Default>(text: &str, mantissa: &str) -> F {
    text.parse()
        .or_else(|_| {
            let sign = if text.starts_with('-') { "-" } else { "" };
            format!("{sign}{mantissa}").parse()
        })
        .unwrap_or_default()
}

/// Lexes binary digits (the part after `0b`).
///
/// The width comes from the digit count, not the magnitude: with
/// `bits = digits + is_negative`, `bits < 8` gives an 8-bit value, `< 16` 16-bit, `< 32` 32-bit
/// and 64-bit otherwise.
pub fn load_binary(cursor: &mut &str, is_negative: bool) -> Value {
    load_radix(cursor, is_negative, 1)
}

/// Lexes hexadecimal digits (the part after `0x`), see [`load_binary`] for the width rule.
///
/// ```
/// # use kernc_lib::value::*;
/// let mut cursor = "1F";
/// assert_eq!(load_hex(&mut cursor, false), Value::UInt16(31));
/// ```
pub fn load_hex(cursor: &mut &str, is_negative: bool) -> Value {
    load_radix(cursor, is_negative, 4)
}

fn load_radix(cursor: &mut &str, is_negative: bool, bits_per_digit: u32) -> Value {
    let s = *cursor;
    let radix = 1 << bits_per_digit;
    let digits = s.find(|c: char| !c.is_digit(radix)).unwrap_or(s.len());
    if digits == 0 {
        return Value::None;
    }

    let magnitude = s[..digits]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u64, |acc, digit| {
            acc.wrapping_shl(bits_per_digit) | u64::from(digit)
        });
    *cursor = &s[digits..];

    let bits = digits * bits_per_digit as usize + usize::from(is_negative);
    let negated = magnitude.wrapping_neg();
    match (bits, is_negative) {
        (0..=7, true) => Value::Int8(negated as i8),
        (0..=7, false) => Value::UInt8(magnitude as u8),
        (8..=15, true) => Value::Int16(negated as i16),
        (8..=15, false) => Value::UInt16(magnitude as u16),
        (16..=31, true) => Value::Int32(negated as i32),
        (16..=31, false) => Value::UInt32(magnitude as u32),
        (_, true) => Value::Int64(negated as i64),
        (_, false) => Value::UInt64(magnitude),
    }
}
