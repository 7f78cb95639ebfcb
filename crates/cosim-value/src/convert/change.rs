//! Tolerance-based change detection.
//!
//! A candidate is compared against a previously stored [`Value`] after the
//! stored value is projected into the candidate's domain with the same rules
//! the extractors use. A stored value that cannot be projected always counts
//! as changed.
//!
//! A tolerance of zero means exact equality. A negative or NaN tolerance
//! disables filtering: every candidate is reported as changed.

use crate::convert::extract::{
    extract_complex, extract_complex_vector, extract_f64, extract_named_point, extract_string,
    extract_time, extract_vector,
};
use crate::convert::text::{parse_number, Number};
use crate::model::{Complex, NamedPoint, Time, Value};

/// A candidate type that can be compared against a stored [`Value`].
pub trait DetectChange {
    /// Returns true if `self` differs from `previous` by more than
    /// `tolerance`. `tolerance` is non-negative here.
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool;
}

/// Returns true if `candidate` should be treated as a new value.
pub fn change_detected<T>(previous: &Value, candidate: &T, tolerance: f64) -> bool
where
    T: DetectChange + ?Sized,
{
    // Also catches NaN.
    if !(tolerance >= 0.0) {
        return true;
    }
    candidate.changed_from(previous, tolerance)
}

fn scalar_differs(previous: f64, candidate: f64, tolerance: f64) -> bool {
    match (previous.is_nan(), candidate.is_nan()) {
        (true, true) => false,
        (false, false) => (previous - candidate).abs() > tolerance,
        _ => true,
    }
}

fn complex_differs(previous: Complex, candidate: Complex, tolerance: f64) -> bool {
    let nan = |c: Complex| c.re.is_nan() || c.im.is_nan();
    match (nan(previous), nan(candidate)) {
        (true, true) => false,
        (false, false) => (previous - candidate).norm() > tolerance,
        _ => true,
    }
}

impl DetectChange for f64 {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        match extract_f64(previous) {
            Ok(p) => scalar_differs(p, *self, tolerance),
            Err(_) => true,
        }
    }
}

impl DetectChange for i64 {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        match previous {
            Value::Integer(p) => (i128::from(*p) - i128::from(*self)).abs() as f64 > tolerance,
            _ => (*self as f64).changed_from(previous, tolerance),
        }
    }
}

impl DetectChange for Time {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        match extract_time(previous) {
            Ok(p) => scalar_differs(p.as_seconds(), self.as_seconds(), tolerance),
            Err(_) => true,
        }
    }
}

/// Compared as 0 or 1 against the stored value's numeric reduction.
impl DetectChange for bool {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        f64::from(u8::from(*self)).changed_from(previous, tolerance)
    }
}

impl DetectChange for str {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        match previous {
            Value::String(p) => p != self,
            _ if previous.is_numeric() => match parse_number(self) {
                Some(Number::Int(n)) => n.changed_from(previous, tolerance),
                Some(Number::Float(v)) => v.changed_from(previous, tolerance),
                None => formatted_differs(previous, self),
            },
            _ => formatted_differs(previous, self),
        }
    }
}

fn formatted_differs(previous: &Value, candidate: &str) -> bool {
    extract_string(previous).map_or(true, |p| p != candidate)
}

impl DetectChange for String {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        self.as_str().changed_from(previous, tolerance)
    }
}

impl DetectChange for Complex {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        match extract_complex(previous) {
            Ok(p) => complex_differs(p, *self, tolerance),
            Err(_) => true,
        }
    }
}

impl DetectChange for [f64] {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        let Ok(p) = extract_vector(previous) else {
            return true;
        };
        p.len() != self.len()
            || p.iter()
                .zip(self)
                .any(|(a, b)| scalar_differs(*a, *b, tolerance))
    }
}

impl DetectChange for Vec<f64> {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        self.as_slice().changed_from(previous, tolerance)
    }
}

impl DetectChange for [Complex] {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        let Ok(p) = extract_complex_vector(previous) else {
            return true;
        };
        p.len() != self.len()
            || p.iter()
                .zip(self)
                .any(|(a, b)| complex_differs(*a, *b, tolerance))
    }
}

impl DetectChange for Vec<Complex> {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        self.as_slice().changed_from(previous, tolerance)
    }
}

impl DetectChange for NamedPoint {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        let Ok(p) = extract_named_point(previous) else {
            return true;
        };
        if p.name != self.name {
            return true;
        }
        match (p.value, self.value) {
            (Some(a), Some(b)) => scalar_differs(a, b, tolerance),
            _ => false,
        }
    }
}

impl DetectChange for Value {
    fn changed_from(&self, previous: &Value, tolerance: f64) -> bool {
        match self {
            Value::Double(v) => v.changed_from(previous, tolerance),
            Value::Integer(v) => v.changed_from(previous, tolerance),
            Value::String(v) => v.changed_from(previous, tolerance),
            Value::Complex(v) => v.changed_from(previous, tolerance),
            Value::DoubleVector(v) => v.changed_from(previous, tolerance),
            Value::ComplexVector(v) => v.changed_from(previous, tolerance),
            Value::NamedPoint(v) => v.changed_from(previous, tolerance),
        }
    }
}

/// Holds the last propagated value and passes on only material changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeFilter {
    tolerance: f64,
    last: Option<Value>,
}

impl ChangeFilter {
    /// Creates a filter with the given tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            last: None,
        }
    }

    /// Creates a filter that lets every value through.
    pub fn disabled() -> Self {
        Self::new(-1.0)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Offers a candidate. Returns true and stores it when there is no
    /// previous value or the candidate differs from it.
    pub fn offer(&mut self, candidate: Value) -> bool {
        let changed = match &self.last {
            None => true,
            Some(previous) => change_detected(previous, &candidate, self.tolerance),
        };
        if changed {
            self.last = Some(candidate);
        }
        changed
    }

    /// Returns the last value that passed the filter.
    pub fn last(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    /// Forgets the stored value, so the next offer always passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
