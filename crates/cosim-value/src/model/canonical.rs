//! Canonicalization of producer-side values.
//!
//! Publishers hand over whatever primitive they have; [`canonicalize`] maps it
//! onto one of the storage types a [`Value`] branch accepts. Types that are
//! already canonical pass through unchanged, so canonicalizing twice is the
//! same as canonicalizing once.

use crate::model::{Complex, Complex32, NamedPoint, Time, Value};

/// Conversion of a producer value into its canonical storage type.
pub trait Canonicalize {
    /// The canonical storage type.
    type Output;

    fn canonicalize(self) -> Self::Output;
}

/// Maps `value` onto its canonical storage type.
pub fn canonicalize<T: Canonicalize>(value: T) -> T::Output {
    value.canonicalize()
}

impl Canonicalize for bool {
    type Output = i64;

    fn canonicalize(self) -> i64 {
        if self { 1 } else { 0 }
    }
}

macro_rules! widen_to_i64 {
    ($($t:ty),*) => {
        $(
            impl Canonicalize for $t {
                type Output = i64;

                #[inline]
                fn canonicalize(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

widen_to_i64!(i8, i16, i32, u8, u16, u32);

impl Canonicalize for u64 {
    type Output = i64;

    /// Reinterpreted as two's complement; values above `i64::MAX` wrap.
    fn canonicalize(self) -> i64 {
        self as i64
    }
}

impl Canonicalize for char {
    type Output = i64;

    fn canonicalize(self) -> i64 {
        i64::from(u32::from(self))
    }
}

impl Canonicalize for Time {
    type Output = i64;

    fn canonicalize(self) -> i64 {
        self.ticks()
    }
}

impl Canonicalize for f32 {
    type Output = f64;

    fn canonicalize(self) -> f64 {
        f64::from(self)
    }
}

impl Canonicalize for Complex32 {
    type Output = Complex;

    fn canonicalize(self) -> Complex {
        Complex::new(f64::from(self.re), f64::from(self.im))
    }
}

macro_rules! identity {
    ($($t:ty),*) => {
        $(
            impl Canonicalize for $t {
                type Output = $t;

                #[inline]
                fn canonicalize(self) -> $t {
                    self
                }
            }
        )*
    };
}

identity!(f64, i64, String, Complex, Vec<f64>, Vec<Complex>, NamedPoint, Value);

impl<'a> Canonicalize for &'a str {
    type Output = &'a str;

    fn canonicalize(self) -> &'a str {
        self
    }
}

impl Value {
    /// Builds a value from any producer type whose canonical form maps onto a
    /// branch.
    pub fn from_canonical<T>(value: T) -> Value
    where
        T: Canonicalize,
        T::Output: Into<Value>,
    {
        value.canonicalize().into()
    }
}
