//! Extraction of concrete types from a [`Value`].
//!
//! Numeric targets reduce structured branches to one scalar: complex numbers
//! by magnitude, vectors by L2 norm. Text is parsed; text that is not a
//! number is an [`ExtractError::UnparsableText`], except for the name of a
//! [`NamedPoint`] without a value, which falls back to the target's invalid
//! sentinel instead.

use tracing::debug;

use crate::convert::text::{
    format_complex, format_complex_vector, format_f64, format_named_point, format_vector,
    parse_complex, parse_complex_vector, parse_named_point, parse_number, parse_time,
    parse_vector, Number,
};
use crate::error::ExtractError;
use crate::model::{complex_vector_norm, vector_norm, Complex, NamedPoint, Time, Value};

/// Invalid double, used when a named point's name is not numeric.
pub const INVALID_DOUBLE: f64 = f64::NAN;

/// Invalid integer, used when a named point's name is not numeric.
pub const INVALID_INT: i64 = i64::MIN;

/// A type that can be extracted from any [`Value`].
///
/// Implemented once per supported target. A target without an
/// implementation has no extraction rule and is rejected at compile time.
pub trait Extract: Sized {
    fn extract(value: &Value) -> Result<Self, ExtractError>;
}

/// Extracts a `T` from `value`.
pub fn value_extract<T: Extract>(value: &Value) -> Result<T, ExtractError> {
    T::extract(value)
}

/// One scalar reduced from a value.
enum Scalar {
    Number(Number),
    /// A named point whose name did not parse.
    Invalid,
}

fn reduce(value: &Value) -> Result<Scalar, ExtractError> {
    let number = match value {
        Value::Double(v) => Number::Float(*v),
        Value::Integer(v) => Number::Int(*v),
        Value::String(s) => parse_number(s).ok_or_else(|| ExtractError::unparsable(s))?,
        Value::Complex(c) => Number::Float(c.norm()),
        Value::DoubleVector(v) => Number::Float(vector_norm(v)),
        Value::ComplexVector(v) => Number::Float(complex_vector_norm(v)),
        Value::NamedPoint(p) => match p.value {
            Some(v) => Number::Float(v),
            None => match parse_number(&p.name) {
                Some(n) => n,
                None => {
                    debug!(
                        name = %p.name,
                        "named point name is not numeric, using invalid sentinel"
                    );
                    return Ok(Scalar::Invalid);
                }
            },
        },
    };
    Ok(Scalar::Number(number))
}

// =============================================================================
// NUMERIC TARGETS
// =============================================================================

/// Extracts a double.
pub fn extract_f64(value: &Value) -> Result<f64, ExtractError> {
    Ok(match reduce(value)? {
        Scalar::Number(n) => n.as_f64(),
        Scalar::Invalid => INVALID_DOUBLE,
    })
}

/// Extracts a single-precision float.
pub fn extract_f32(value: &Value) -> Result<f32, ExtractError> {
    Ok(match reduce(value)? {
        Scalar::Number(n) => n.as_f64() as f32,
        Scalar::Invalid => f32::NAN,
    })
}

/// Extracts a 64-bit integer. Integers are exact; doubles are truncated
/// toward zero and saturate at the i64 range.
pub fn extract_i64(value: &Value) -> Result<i64, ExtractError> {
    Ok(match reduce(value)? {
        Scalar::Number(Number::Int(v)) => v,
        Scalar::Number(Number::Float(v)) => v as i64,
        Scalar::Invalid => INVALID_INT,
    })
}

/// Extracts a 32-bit integer. 64-bit integers keep their low 32 bits;
/// doubles saturate at the i32 range.
pub fn extract_i32(value: &Value) -> Result<i32, ExtractError> {
    Ok(match reduce(value)? {
        Scalar::Number(Number::Int(v)) => v as i32,
        Scalar::Number(Number::Float(v)) => v as i32,
        Scalar::Invalid => i32::MIN,
    })
}

// =============================================================================
// STRUCTURED TARGETS
// =============================================================================

/// Extracts text. Numbers use the shortest round-tripping decimal form.
pub fn extract_string(value: &Value) -> Result<String, ExtractError> {
    Ok(match value {
        Value::Double(v) => format_f64(*v),
        Value::Integer(v) => v.to_string(),
        Value::String(s) => s.clone(),
        Value::Complex(c) => format_complex(*c),
        Value::DoubleVector(v) => format_vector(v),
        Value::ComplexVector(v) => format_complex_vector(v),
        Value::NamedPoint(p) => format_named_point(p),
    })
}

/// Extracts a complex number. Scalars become the real part.
pub fn extract_complex(value: &Value) -> Result<Complex, ExtractError> {
    Ok(match value {
        Value::Double(v) => Complex::from(*v),
        Value::Integer(v) => Complex::from(*v as f64),
        Value::String(s) => parse_complex(s).ok_or_else(|| ExtractError::unparsable(s))?,
        Value::Complex(c) => *c,
        Value::DoubleVector(v) => match v.as_slice() {
            [] => Complex::ZERO,
            [re] => Complex::from(*re),
            [re, im, ..] => Complex::new(*re, *im),
        },
        Value::ComplexVector(v) => v.first().copied().unwrap_or(Complex::ZERO),
        Value::NamedPoint(p) => match p.value {
            Some(v) => Complex::from(v),
            None => parse_complex(&p.name).unwrap_or(Complex::from(INVALID_DOUBLE)),
        },
    })
}

/// Extracts a double vector. Scalars become a one-element vector and complex
/// numbers their interleaved real and imaginary parts.
pub fn extract_vector(value: &Value) -> Result<Vec<f64>, ExtractError> {
    Ok(match value {
        Value::Double(v) => vec![*v],
        Value::Integer(v) => vec![*v as f64],
        Value::String(s) => vector_from_text(s).ok_or_else(|| ExtractError::unparsable(s))?,
        Value::Complex(c) => vec![c.re, c.im],
        Value::DoubleVector(v) => v.clone(),
        Value::ComplexVector(v) => v.iter().flat_map(|c| [c.re, c.im]).collect(),
        Value::NamedPoint(p) => match p.value {
            Some(v) => vec![v],
            None => vector_from_text(&p.name).unwrap_or_else(|| vec![INVALID_DOUBLE]),
        },
    })
}

fn vector_from_text(text: &str) -> Option<Vec<f64>> {
    parse_vector(text).or_else(|| parse_number(text).map(|n| vec![n.as_f64()]))
}

/// Extracts a complex vector. Real values get a zero imaginary part.
pub fn extract_complex_vector(value: &Value) -> Result<Vec<Complex>, ExtractError> {
    Ok(match value {
        Value::Double(v) => vec![Complex::from(*v)],
        Value::Integer(v) => vec![Complex::from(*v as f64)],
        Value::String(s) => {
            complex_vector_from_text(s).ok_or_else(|| ExtractError::unparsable(s))?
        }
        Value::Complex(c) => vec![*c],
        Value::DoubleVector(v) => v.iter().map(|re| Complex::from(*re)).collect(),
        Value::ComplexVector(v) => v.clone(),
        Value::NamedPoint(p) => match p.value {
            Some(v) => vec![Complex::from(v)],
            None => complex_vector_from_text(&p.name)
                .unwrap_or_else(|| vec![Complex::from(INVALID_DOUBLE)]),
        },
    })
}

fn complex_vector_from_text(text: &str) -> Option<Vec<Complex>> {
    parse_complex_vector(text).or_else(|| parse_complex(text).map(|c| vec![c]))
}

/// Extracts a named point. Numbers get an empty name; structured values that
/// do not reduce to one number are carried as text in the name.
pub fn extract_named_point(value: &Value) -> Result<NamedPoint, ExtractError> {
    Ok(match value {
        Value::Double(v) => NamedPoint::value_only(*v),
        Value::Integer(v) => NamedPoint::value_only(*v as f64),
        Value::String(s) => {
            parse_named_point(s).unwrap_or_else(|| NamedPoint::name_only(s.as_str()))
        }
        Value::Complex(c) => NamedPoint::name_only(format_complex(*c)),
        Value::DoubleVector(v) => match v.as_slice() {
            [single] => NamedPoint::value_only(*single),
            _ => NamedPoint::name_only(format_vector(v)),
        },
        Value::ComplexVector(v) => match v.as_slice() {
            [single] if single.im == 0.0 => NamedPoint::value_only(single.re),
            _ => NamedPoint::name_only(format_complex_vector(v)),
        },
        Value::NamedPoint(p) => p.clone(),
    })
}

/// Extracts a time. Integers are tick counts; every other number is seconds.
pub fn extract_time(value: &Value) -> Result<Time, ExtractError> {
    Ok(match value {
        Value::Integer(v) => Time::from_ticks(*v),
        Value::Double(v) => Time::from_seconds(*v),
        Value::String(s) => parse_time(s).ok_or_else(|| ExtractError::unparsable(s))?,
        Value::Complex(c) => Time::from_seconds(c.norm()),
        Value::DoubleVector(v) => Time::from_seconds(vector_norm(v)),
        Value::ComplexVector(v) => Time::from_seconds(complex_vector_norm(v)),
        Value::NamedPoint(p) => match p.value {
            Some(v) => Time::from_seconds(v),
            None => parse_time(&p.name).unwrap_or_else(|| {
                debug!(name = %p.name, "named point name is not a time, using invalid sentinel");
                Time::MIN
            }),
        },
    })
}

/// Extracts a boolean. Text is true unless it is exactly `"0"`; numbers are
/// true when non-zero.
pub fn extract_bool(value: &Value) -> Result<bool, ExtractError> {
    Ok(match value {
        Value::Double(v) => *v != 0.0,
        Value::Integer(v) => *v != 0,
        Value::String(s) => s != "0",
        Value::Complex(c) => c.norm() != 0.0,
        Value::DoubleVector(v) => vector_norm(v) != 0.0,
        Value::ComplexVector(v) => complex_vector_norm(v) != 0.0,
        Value::NamedPoint(p) => match p.value {
            Some(v) => v != 0.0,
            None => p.name != "0",
        },
    })
}

/// Extracts a character. One-character text is taken as is; anything else is
/// reduced to a number and read as a Unicode scalar value. A named point with
/// an unparsable name gives `'\0'`.
pub fn extract_char(value: &Value) -> Result<char, ExtractError> {
    let text = match value {
        Value::String(s) => Some(s.as_str()),
        Value::NamedPoint(p) if !p.has_value() => Some(p.name.as_str()),
        _ => None,
    };
    if let Some(c) = text.and_then(single_char) {
        return Ok(c);
    }
    match reduce(value)? {
        Scalar::Number(Number::Int(code)) => char_from_code(code),
        Scalar::Number(Number::Float(v)) => char_from_code(v as i64),
        Scalar::Invalid => Ok('\0'),
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn char_from_code(code: i64) -> Result<char, ExtractError> {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or(ExtractError::InvalidCharacter { code })
}

// =============================================================================
// EXTRACT IMPLS
// =============================================================================

macro_rules! impl_extract {
    ($($t:ty => $f:ident),* $(,)?) => {
        $(
            impl Extract for $t {
                #[inline]
                fn extract(value: &Value) -> Result<Self, ExtractError> {
                    $f(value)
                }
            }
        )*
    };
}

impl_extract!(
    f64 => extract_f64,
    f32 => extract_f32,
    i64 => extract_i64,
    i32 => extract_i32,
    String => extract_string,
    Complex => extract_complex,
    Vec<f64> => extract_vector,
    Vec<Complex> => extract_complex_vector,
    NamedPoint => extract_named_point,
    Time => extract_time,
    bool => extract_bool,
    char => extract_char,
);

impl Extract for Value {
    fn extract(value: &Value) -> Result<Self, ExtractError> {
        Ok(value.clone())
    }
}
