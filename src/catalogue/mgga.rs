/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Meta-GGA functionals

use super::lda::{slater_exchange, thomas_fermi};
use super::{reduced_gradient_squared, reduced_laplacian};
use crate::functional::{Family, Functional, Identifier, Kind, Parameters, PointInput, Result};
use crate::utils::XcFloat;
use num_dual::DualNum;

/// Iso-orbital indicator α = (τ - τ_W) / τ_unif
#[inline]
fn iso_orbital_indicator<F: XcFloat, D: DualNum<F> + Copy>(point: &PointInput<D>) -> D {
    let weizsaecker = point.sigma / (point.rho * F::constant(8.0));
    (point.tau - weizsaecker) / thomas_fermi::<F, D>(point.rho)
}

/// Made-very-simple exchange of Sun, Perdew and Ruzsinszky (2015)
///
/// F_x = (1 + k₀ f(α)) / (1 + b s⁴)^(1/8), f(α) = (1 - α) / ((1 + e₁α²)² + c₁α⁴)^(1/4)
#[derive(Debug, Clone, PartialEq)]
pub struct MvsExchange<F> {
    identifier: Identifier,
    k0: F,
    e1: F,
    c1: F,
    b: F,
}

impl<F: XcFloat> MvsExchange<F> {
    pub fn new() -> Self {
        Self {
            identifier: Identifier::from_static("mgga_x_mvs"),
            k0: F::constant(0.174),
            e1: F::constant(-1.6665),
            c1: F::constant(0.7438),
            b: F::constant(0.0233),
        }
    }
}

impl<F: XcFloat> Default for MvsExchange<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: XcFloat> Functional<F> for MvsExchange<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::MetaGga
    }

    fn kind(&self) -> Kind {
        Kind::Exchange
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new([
            ("k0", self.k0),
            ("e1", self.e1),
            ("c1", self.c1),
            ("b", self.b),
        ])
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self {
            identifier,
            k0: parameters.require("k0")?,
            e1: parameters.require("e1")?,
            c1: parameters.require("c1")?,
            b: parameters.require("b")?,
        })
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let alpha = iso_orbital_indicator::<F, D>(point);
        let alpha2 = alpha * alpha;
        let quadratic = alpha2 * self.e1 + F::one();
        // α grows like ρ^(-8/3) near the density floor; roots keep nested duals finite
        let damping = (quadratic * quadratic + alpha2 * alpha2 * self.c1).sqrt().sqrt();
        let f_alpha = -(alpha - F::one()) / damping;

        let s2 = reduced_gradient_squared::<F, D>(point.rho, point.sigma);
        let gradient_damping = (s2 * s2 * self.b + F::one()).sqrt().sqrt().sqrt();
        let enhancement = (f_alpha * self.k0 + F::one()) / gradient_damping;
        slater_exchange::<F, D>(point.rho) * enhancement
    }
}

/// Laplacian-level Pauli-Gaussian kinetic functional of Constantin, Fabiano and Della Sala
///
/// F_s = 5/3 p + exp(-μ p) + β q², with p = s² and q the reduced Laplacian.
#[derive(Debug, Clone, PartialEq)]
pub struct PgslKinetic<F> {
    identifier: Identifier,
    mu: F,
    beta: F,
}

impl<F: XcFloat> PgslKinetic<F> {
    /// The β = 0.25 variant
    pub fn pgsl025() -> Self {
        Self {
            identifier: Identifier::from_static("mgga_k_pgsl025"),
            mu: F::constant(40.0 / 27.0),
            beta: F::constant(0.25),
        }
    }
}

impl<F: XcFloat> Functional<F> for PgslKinetic<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::MetaGgaLaplacian
    }

    fn kind(&self) -> Kind {
        Kind::Kinetic
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new([("mu", self.mu), ("beta", self.beta)])
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self {
            identifier,
            mu: parameters.require("mu")?,
            beta: parameters.require("beta")?,
        })
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let p = reduced_gradient_squared::<F, D>(point.rho, point.sigma);
        let q = reduced_laplacian::<F, D>(point.rho, point.lapl);
        let enhancement =
            p * F::constant(5.0 / 3.0) + (-(p * self.mu)).exp() + q * q * self.beta;
        thomas_fermi::<F, D>(point.rho) * enhancement
    }
}
