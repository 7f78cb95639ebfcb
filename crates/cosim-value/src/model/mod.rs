//! Data model types for co-simulation values.
//!
//! This module contains the core types:
//! - Values (the seven-branch tagged union) and their external type tags
//! - Simulation time
//! - Canonicalization of producer-side primitives

pub mod canonical;
pub mod time;
pub mod value;

pub use canonical::{canonicalize, Canonicalize};
pub use time::Time;
pub use value::{
    complex_vector_norm, vector_norm, Complex, Complex32, DataType, NamedPoint, UnknownDataType,
    Value,
};
