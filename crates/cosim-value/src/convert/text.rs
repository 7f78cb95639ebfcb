//! Text forms of values.
//!
//! All parsing is locale independent. Formatting produces the shortest text
//! that parses back to the same bits, so `format -> parse` is lossless for
//! every finite double.
//!
//! | Kind | Form |
//! |---|---|
//! | complex | `3+4j`, `-2.5j`, `1e-3-2i` |
//! | double vector | `[1,2.5,-3]` (optional `vN` prefix, `;` also separates) |
//! | complex vector | `[1+2j,3]` (optional `cN` prefix) |
//! | named point | `{"name":12.5}` |
//! | time | number with optional unit: `ns`, `us`, `ms`, `s`, `sec`, `min`, `h`, `hr`, `day` |

use serde_json::{json, Map, Value as Json};

use crate::model::{complex_vector_norm, vector_norm, Complex, NamedPoint, Time};

/// A number read from text, keeping integers exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parses a plain decimal number (surrounding whitespace allowed).
pub fn parse_f64(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse().ok()
}

/// Parses text as a number.
///
/// Integers stay exact. Complex text reduces to its magnitude and vector text
/// to its L2 norm.
pub fn parse_number(text: &str) -> Option<Number> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    // "-0" stays a float so negative zero survives.
    match t.parse::<i64>() {
        Ok(0) if t.starts_with('-') => {}
        Ok(v) => return Some(Number::Int(v)),
        Err(_) => {}
    }
    if let Some(v) = parse_f64(t) {
        return Some(Number::Float(v));
    }
    if t.starts_with('[') || t.starts_with('v') {
        if let Some(v) = parse_vector(t) {
            return Some(Number::Float(vector_norm(&v)));
        }
    }
    if t.starts_with('c') {
        if let Some(v) = parse_complex_vector(t) {
            return Some(Number::Float(complex_vector_norm(&v)));
        }
    }
    if t.ends_with('j') || t.ends_with('i') {
        if let Some(c) = parse_complex(t) {
            return Some(Number::Float(c.norm()));
        }
    }
    None
}

/// Parses complex text such as `3+4j`, `-4i`, `2.5`, or `[3,4]`.
pub fn parse_complex(text: &str) -> Option<Complex> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if t.starts_with('[') {
        return match parse_vector(t)?.as_slice() {
            [re] => Some(Complex::new(*re, 0.0)),
            [re, im] => Some(Complex::new(*re, *im)),
            _ => None,
        };
    }
    let Some(body) = t.strip_suffix(['j', 'i']) else {
        return parse_f64(t).map(Complex::from);
    };
    let body = body.trim_end();

    match imaginary_split(body) {
        Some(k) => {
            let re = parse_f64(&body[..k])?;
            let im = signed_unit(&body[k..])?;
            Some(Complex::new(re, im))
        }
        None => signed_unit(body).map(|im| Complex::new(0.0, im)),
    }
}

/// Finds the sign that starts the imaginary part, skipping a leading sign
/// and exponent signs.
fn imaginary_split(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len()).rev().find(|&i| {
        matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E')
    })
}

/// Parses an optionally signed coefficient; a bare sign means one.
fn signed_unit(text: &str) -> Option<f64> {
    let t = text.trim();
    let (sign, rest) = match t.as_bytes().first() {
        Some(b'+') => (1.0, t[1..].trim()),
        Some(b'-') => (-1.0, t[1..].trim()),
        _ => (1.0, t),
    };
    if rest.is_empty() {
        return Some(sign);
    }
    parse_f64(rest).map(|v| sign * v)
}

/// Strips an optional `<tag><digits>` prefix and the surrounding brackets.
fn bracket_body(text: &str, tag: char) -> Option<&str> {
    let t = text.trim();
    let t = match t.strip_prefix(tag) {
        Some(rest) => rest.trim_start_matches(|c: char| c.is_ascii_digit()),
        None => t,
    };
    t.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

/// Parses vector text such as `[1,2,3]`, `v2[1;2]`, or `[]`.
pub fn parse_vector(text: &str) -> Option<Vec<f64>> {
    let body = bracket_body(text, 'v')?;
    if body.is_empty() {
        return Some(Vec::new());
    }
    body.split([',', ';']).map(parse_f64).collect()
}

/// Parses complex-vector text such as `[1+2j,3-4j]` or `c1[2j]`.
pub fn parse_complex_vector(text: &str) -> Option<Vec<Complex>> {
    let body = bracket_body(text, 'c')?;
    if body.is_empty() {
        return Some(Vec::new());
    }
    body.split([',', ';']).map(parse_complex).collect()
}

/// Parses the `{"name":value}` form of a named point.
pub fn parse_named_point(text: &str) -> Option<NamedPoint> {
    let map: Map<String, Json> = serde_json::from_str(text.trim()).ok()?;
    let mut entries = map.into_iter();
    let (name, value) = entries.next()?;
    if entries.next().is_some() {
        return None;
    }
    let value = match value {
        Json::Null => None,
        Json::String(s) => Some(parse_f64(&s)?),
        other => Some(other.as_f64()?),
    };
    Some(NamedPoint { name, value })
}

/// Parses time text: a number with an optional unit suffix (seconds if none).
pub fn parse_time(text: &str) -> Option<Time> {
    let t = text.trim();
    let number = t.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let unit = t[number.len()..].to_ascii_lowercase();
    let number = number.trim_end();

    let seconds_per_unit = match unit.as_str() {
        "" | "s" | "sec" => 1.0,
        "ms" => 1e-3,
        "us" => 1e-6,
        "ns" => {
            if let Ok(ticks) = number.parse::<i64>() {
                return Some(Time::from_ticks(ticks));
            }
            1e-9
        }
        "min" => 60.0,
        "h" | "hr" => 3600.0,
        "day" => 86400.0,
        _ => return None,
    };
    let value = parse_f64(number)?;
    Some(Time::from_seconds(value * seconds_per_unit))
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Formats a double as the shortest round-tripping decimal text.
///
/// Very large and very small magnitudes use exponent notation.
pub fn format_f64(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-5..1e16).contains(&magnitude) {
        format!("{value}")
    } else {
        format!("{value:e}")
    }
}

/// Formats a complex number as `re+imj`.
pub fn format_complex(c: Complex) -> String {
    let im = format_f64(c.im);
    if im.starts_with('-') {
        format!("{}{}j", format_f64(c.re), im)
    } else {
        format!("{}+{}j", format_f64(c.re), im)
    }
}

/// Formats a double vector as `[a,b,...]`.
pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format_f64(*v)).collect();
    format!("[{}]", parts.join(","))
}

/// Formats a complex vector as `[a+bj,...]`.
pub fn format_complex_vector(values: &[Complex]) -> String {
    let parts: Vec<String> = values.iter().map(|c| format_complex(*c)).collect();
    format!("[{}]", parts.join(","))
}

/// Formats a named point as `{"name":value}`, or just the name when it has
/// no value.
pub fn format_named_point(point: &NamedPoint) -> String {
    match point.value.filter(|v| !v.is_nan()) {
        Some(value) => {
            let mut map = Map::new();
            map.insert(point.name.clone(), json!(value));
            Json::Object(map).to_string()
        }
        None => point.name.clone(),
    }
}
