//! Value types for co-simulation exchanges.
//!
//! A [`Value`] is one published or subscribed data item. It always holds
//! exactly one of seven storage kinds; the [`DataType`] tag is the separate
//! wire-declared kind that accompanies a raw byte buffer.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// Declared external type of a byte buffer.
///
/// The numeric codes are the identifiers used on the wire by publishers and
/// subscribers; see [`DataType::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DataType {
    String = 0,
    Double = 1,
    Int = 2,
    Complex = 3,
    Vector = 4,
    ComplexVector = 5,
    NamedPoint = 6,
    Bool = 7,
    Time = 8,
    Custom = 25,
    Json = 30,
    Any = 25262,
}

impl DataType {
    /// All twelve tags, in code order.
    pub const ALL: [DataType; 12] = [
        DataType::String,
        DataType::Double,
        DataType::Int,
        DataType::Complex,
        DataType::Vector,
        DataType::ComplexVector,
        DataType::NamedPoint,
        DataType::Bool,
        DataType::Time,
        DataType::Custom,
        DataType::Json,
        DataType::Any,
    ];

    /// Returns the wire code of this tag.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Creates a DataType from its wire code.
    pub fn from_code(code: i32) -> Option<DataType> {
        match code {
            0 => Some(DataType::String),
            1 => Some(DataType::Double),
            2 => Some(DataType::Int),
            3 => Some(DataType::Complex),
            4 => Some(DataType::Vector),
            5 => Some(DataType::ComplexVector),
            6 => Some(DataType::NamedPoint),
            7 => Some(DataType::Bool),
            8 => Some(DataType::Time),
            25 => Some(DataType::Custom),
            30 => Some(DataType::Json),
            25262 => Some(DataType::Any),
            _ => None,
        }
    }

    /// Like [`DataType::from_code`], but unrecognized codes fall back to
    /// [`DataType::String`], the default interpretation of an unknown buffer.
    pub fn from_code_or_string(code: i32) -> DataType {
        DataType::from_code(code).unwrap_or(DataType::String)
    }

    /// Returns the canonical lowercase name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Double => "double",
            DataType::Int => "int64",
            DataType::Complex => "complex",
            DataType::Vector => "double_vector",
            DataType::ComplexVector => "complex_vector",
            DataType::NamedPoint => "named_point",
            DataType::Bool => "bool",
            DataType::Time => "time",
            DataType::Custom => "custom",
            DataType::Json => "json",
            DataType::Any => "any",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataType {
    pub name: String,
}

impl fmt::Display for UnknownDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown data type name: {:?}", self.name)
    }
}

impl std::error::Error for UnknownDataType {}

impl FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let data_type = match lowered.as_str() {
            "string" | "str" => DataType::String,
            "double" | "float" | "f64" => DataType::Double,
            "int" | "int64" | "integer" => DataType::Int,
            "complex" => DataType::Complex,
            "vector" | "double_vector" => DataType::Vector,
            "complex_vector" => DataType::ComplexVector,
            "named_point" => DataType::NamedPoint,
            "bool" | "boolean" => DataType::Bool,
            "time" => DataType::Time,
            "custom" | "raw" => DataType::Custom,
            "json" => DataType::Json,
            "any" => DataType::Any,
            _ => {
                return Err(UnknownDataType {
                    name: s.to_string(),
                })
            }
        };
        Ok(data_type)
    }
}

/// A complex number with 64-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Euclidean magnitude of the (re, im) pair.
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self { re, im: 0.0 }
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

/// A complex number with 32-bit components, as produced by narrow publishers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

impl Complex32 {
    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// A name paired with an optional numeric value.
///
/// When `value` is `None` the name itself carries the payload and numeric
/// consumers parse it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedPoint {
    pub name: String,
    pub value: Option<f64>,
}

impl NamedPoint {
    /// Creates a point with both a name and a numeric value. A NaN value
    /// counts as absent.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: present(value),
        }
    }

    /// Creates a point with a name only.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates a point with an empty name. A NaN value counts as absent.
    pub fn value_only(value: f64) -> Self {
        Self {
            name: String::new(),
            value: present(value),
        }
    }

    /// Returns whether a numeric value is present.
    pub fn has_value(&self) -> bool {
        self.value.is_some_and(|v| !v.is_nan())
    }
}

fn present(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

/// A typed value exchanged between federates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit IEEE 754 float.
    Double(f64),

    /// 64-bit signed integer.
    Integer(i64),

    /// UTF-8 text.
    String(String),

    /// Complex number with double components.
    Complex(Complex),

    /// Ordered sequence of doubles.
    DoubleVector(Vec<f64>),

    /// Ordered sequence of complex numbers.
    ComplexVector(Vec<Complex>),

    /// Name with optional numeric value.
    NamedPoint(NamedPoint),
}

impl Value {
    /// Returns the stable branch index (0 = Double .. 6 = NamedPoint).
    pub fn index(&self) -> u8 {
        match self {
            Value::Double(_) => 0,
            Value::Integer(_) => 1,
            Value::String(_) => 2,
            Value::Complex(_) => 3,
            Value::DoubleVector(_) => 4,
            Value::ComplexVector(_) => 5,
            Value::NamedPoint(_) => 6,
        }
    }

    /// Returns the external tag that natively describes this branch.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Double(_) => DataType::Double,
            Value::Integer(_) => DataType::Int,
            Value::String(_) => DataType::String,
            Value::Complex(_) => DataType::Complex,
            Value::DoubleVector(_) => DataType::Vector,
            Value::ComplexVector(_) => DataType::ComplexVector,
            Value::NamedPoint(_) => DataType::NamedPoint,
        }
    }

    /// Returns true for the Double and Integer branches.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Double(_) | Value::Integer(_))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Double(0.0)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Value::Complex(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::DoubleVector(v)
    }
}

impl From<Vec<Complex>> for Value {
    fn from(v: Vec<Complex>) -> Self {
        Value::ComplexVector(v)
    }
}

impl From<NamedPoint> for Value {
    fn from(v: NamedPoint) -> Self {
        Value::NamedPoint(v)
    }
}

/// L2 norm of a double sequence: `sqrt(sum(v_i^2))`.
pub fn vector_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// L2 norm of a complex sequence, over the element magnitudes.
pub fn complex_vector_norm(values: &[Complex]) -> f64 {
    values
        .iter()
        .map(|c| c.re * c.re + c.im * c.im)
        .sum::<f64>()
        .sqrt()
}
