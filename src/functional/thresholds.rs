/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numerical floors applied before a formula is evaluated
//!
//! Thresholds are always plain floats. When a formula runs on dual numbers the comparison is
//! made on the real part and a clamped input is replaced by the floor as a constant, so the
//! guard itself never carries a derivative.

use crate::utils::XcFloat;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Default density floor
pub const DENSITY_FLOOR: f64 = 1e-15;

/// Default kinetic-energy-density floor
pub const KINETIC_DENSITY_FLOOR: f64 = 1e-20;

/// Per-functional threshold policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds<F> {
    /// Below this density energy and all derivatives are exactly zero
    pub density: F,
    /// σ is clamped from below to this value
    pub gradient_squared: F,
    /// τ is clamped from below to this value
    pub kinetic_density: F,
    /// Smallest distinguishable spin polarization
    pub spin_polarization: F,
}

impl<F: XcFloat> Default for Thresholds<F> {
    fn default() -> Self {
        Self::with_density_floor(F::constant(DENSITY_FLOOR))
    }
}

impl<F: XcFloat> Thresholds<F> {
    /// Policy derived from a density floor: σ floor is `floor^(4/3)`
    pub fn with_density_floor(density: F) -> Self {
        Self {
            density,
            gradient_squared: Float::powf(density, F::constant(4.0 / 3.0)),
            kinetic_density: F::constant(KINETIC_DENSITY_FLOOR),
            spin_polarization: F::epsilon(),
        }
    }

    /// Whether a density value is treated as vanishing
    #[inline]
    pub fn is_vanishing(&self, density: F) -> bool {
        density <= self.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::<f64>::default();
        assert_eq!(thresholds.density, 1e-15);
        assert_relative_eq!(thresholds.gradient_squared, 1e-20, max_relative = 1e-12);
        assert_eq!(thresholds.kinetic_density, 1e-20);
        assert_eq!(thresholds.spin_polarization, f64::EPSILON);
    }

    #[test]
    fn test_single_precision_epsilon() {
        let thresholds = Thresholds::<f32>::default();
        assert_eq!(thresholds.spin_polarization, f32::EPSILON);
        assert!(thresholds.gradient_squared > 0.0);
    }

    #[test]
    fn test_vanishing_density() {
        let thresholds = Thresholds::<f64>::default();
        assert!(thresholds.is_vanishing(1e-16));
        assert!(thresholds.is_vanishing(-1e-3));
        assert!(!thresholds.is_vanishing(1e-10));
    }
}
