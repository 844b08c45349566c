/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Constants of the homogeneous electron gas (atomic units)

use std::f64::consts::PI;

/// 3π²
pub const THREE_PI_SQUARED: f64 = 3.0 * PI * PI;

/// Slater exchange prefactor: e_x = -3/4 (3/π)^(1/3) ρ^(4/3)
pub const SLATER_EXCHANGE: f64 = -0.738_558_766_382_022_3;

/// Thomas-Fermi kinetic prefactor 3/10 (3π²)^(2/3)
pub const THOMAS_FERMI: f64 = 2.871_234_000_188_191;

/// (3π²)^(2/3), the denominator scale of the reduced gradient s² = σ / (4 (3π²)^(2/3) ρ^(8/3))
pub const THREE_PI_SQUARED_TWO_THIRDS: f64 = 9.570_780_000_627_304;

/// 3 / (4π), used for the Wigner-Seitz radius r_s = (3 / (4πρ))^(1/3)
pub const WIGNER_SEITZ: f64 = 3.0 / (4.0 * PI);
