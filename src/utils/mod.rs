/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numeric utilities shared by the functional formulas and the evaluation pipeline
//!
//! Every formula is written against [`num_dual::DualNum`] so that the same expression can be
//! evaluated on plain floats and on (nested) dual numbers. [`XcFloat`] names the plain
//! floating type underneath a dual number: thresholds, parameters and output arrays always
//! live in this type.

pub mod constants;

use num_dual::{DualNum, DualNumFloat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Floating-point representation used for one evaluation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericType {
    /// Single precision
    F32,
    /// Double precision
    F64,
}

impl NumericType {
    /// Numeric type of the plain float `F`
    pub fn of<F: XcFloat>() -> Self {
        F::NUMERIC_TYPE
    }

    /// The wider of two numeric types
    pub fn promote(self, other: NumericType) -> NumericType {
        self.max(other)
    }

    /// Machine epsilon of this representation
    pub fn epsilon(&self) -> f64 {
        match self {
            NumericType::F32 => f32::EPSILON as f64,
            NumericType::F64 => f64::EPSILON,
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericType::F32 => write!(f, "f32"),
            NumericType::F64 => write!(f, "f64"),
        }
    }
}

/// Plain floating type a functional is evaluated in
///
/// `F` is itself a (zero-order) dual number, so `Dual<F, F>` and `Dual<Dual<F, F>, F>` are
/// valid derivative-carrying types over it.
pub trait XcFloat: DualNumFloat + DualNum<Self> + Copy {
    /// Tag used for type promotion
    const NUMERIC_TYPE: NumericType;

    /// Convert a literal constant into this representation
    fn constant(value: f64) -> Self;
}

impl XcFloat for f64 {
    const NUMERIC_TYPE: NumericType = NumericType::F64;

    #[inline]
    fn constant(value: f64) -> Self {
        value
    }
}

impl XcFloat for f32 {
    const NUMERIC_TYPE: NumericType = NumericType::F32;

    #[inline]
    fn constant(value: f64) -> Self {
        value as f32
    }
}

/// Type-level counterpart of [`NumericType::promote`]
///
/// `Promoted<F, G>` is the plain type a call mixing `F` parameters and `G` inputs runs in.
pub trait Promote<G: XcFloat>: XcFloat {
    type Output: XcFloat;
}

impl Promote<f32> for f32 {
    type Output = f32;
}

impl Promote<f64> for f32 {
    type Output = f64;
}

impl Promote<f32> for f64 {
    type Output = f64;
}

impl Promote<f64> for f64 {
    type Output = f64;
}

pub type Promoted<F, G> = <F as Promote<G>>::Output;

/// Convert between plain floating types through `f64`
#[inline]
pub fn convert<F: XcFloat, G: XcFloat>(value: F) -> G {
    G::constant(num_traits::ToPrimitive::to_f64(&value).unwrap_or(f64::NAN))
}
