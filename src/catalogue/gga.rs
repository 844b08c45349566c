/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Generalized gradient approximation functionals
//!
//! The PBE exchange and correlation forms with their reparametrizations, the Thomas-Fermi plus
//! von Weizsäcker kinetic family and the potential-only LB94 exchange correction.

use super::lda::{
    pw92_epsilon, slater_exchange, thomas_fermi, wigner_seitz_radius, Pw92Parameters,
};
use super::reduced_gradient_squared;
use crate::evaluation::{fallback, FamilyInputs, PotentialTerms};
use crate::functional::{
    Family, Functional, FunctionalError, Identifier, Kind, Parameters, PointInput, Quantity,
    Result,
};
use crate::utils::constants::{SLATER_EXCHANGE, THREE_PI_SQUARED};
use crate::utils::XcFloat;
use num_dual::DualNum;
use std::f64::consts::{LN_2, PI};

/// PBE correlation gradient coefficient β
pub const PBE_BETA: f64 = 0.06672455060314922;
/// PBE exchange gradient coefficient μ = β π² / 3
pub const PBE_MU: f64 = 0.2195149727645171;
/// PBE exchange enhancement bound κ
pub const PBE_KAPPA: f64 = 0.804;
/// PBE correlation prefactor γ = (1 - ln 2) / π²
pub const PBE_GAMMA: f64 = (1.0 - LN_2) / (PI * PI);

/// μ of the exchange functional that cancels the gradient expansion of correlation β
pub fn pbe_mu_from_beta(beta: f64) -> f64 {
    beta * PI * PI / 3.0
}

/// Inverse of [`pbe_mu_from_beta`]
pub fn pbe_beta_from_mu(mu: f64) -> f64 {
    3.0 * mu / (PI * PI)
}

/// PBE-form exchange, e = e_x^LDA F(s) with F(s) = 1 + κ - κ / (1 + μ s² / κ)
#[derive(Debug, Clone, PartialEq)]
pub struct PbeExchange<F> {
    identifier: Identifier,
    kappa: F,
    mu: F,
}

impl<F: XcFloat> PbeExchange<F> {
    pub fn new(identifier: Identifier, kappa: F, mu: F) -> Self {
        Self {
            identifier,
            kappa,
            mu,
        }
    }

    fn preset(name: &'static str, kappa: f64, mu: f64) -> Self {
        Self::new(
            Identifier::from_static(name),
            F::constant(kappa),
            F::constant(mu),
        )
    }

    /// Perdew, Burke, Ernzerhof (1996)
    pub fn pbe() -> Self {
        Self::preset("gga_x_pbe", PBE_KAPPA, PBE_MU)
    }

    /// PBE for solids, μ = 10/81
    pub fn pbe_sol() -> Self {
        Self::preset("gga_x_pbe_sol", PBE_KAPPA, 10.0 / 81.0)
    }

    /// Zhang and Yang revision, κ = 1.245
    pub fn revpbe() -> Self {
        Self::preset("gga_x_revpbe", 1.245, PBE_MU)
    }

    /// Asymptotic PBE, μ = 0.260
    pub fn apbe() -> Self {
        Self::preset("gga_x_apbe", PBE_KAPPA, 0.260)
    }

    /// Xu and Goddard extended PBE
    pub fn xpbe() -> Self {
        Self::preset("gga_x_xpbe", 0.91954, 0.23214)
    }

    pub fn kappa(&self) -> F {
        self.kappa
    }

    pub fn mu(&self) -> F {
        self.mu
    }
}

impl<F: XcFloat> Functional<F> for PbeExchange<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Gga
    }

    fn kind(&self) -> Kind {
        Kind::Exchange
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new([("kappa", self.kappa), ("mu", self.mu)])
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self::new(
            identifier,
            parameters.require("kappa")?,
            parameters.require("mu")?,
        ))
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let s2 = reduced_gradient_squared::<F, D>(point.rho, point.sigma);
        // written so that F(0) is exactly one
        let mu_s2 = s2 * self.mu;
        let enhancement = mu_s2 / (mu_s2 / self.kappa + F::one()) + F::one();
        slater_exchange::<F, D>(point.rho) * enhancement
    }
}

/// PBE-form correlation, e = ρ (ε_c^PW92 + H(r_s, t))
#[derive(Debug, Clone, PartialEq)]
pub struct PbeCorrelation<F> {
    identifier: Identifier,
    beta: F,
    gamma: F,
    pw92: Pw92Parameters<F>,
}

impl<F: XcFloat> PbeCorrelation<F> {
    pub fn new(identifier: Identifier, beta: F, gamma: F) -> Self {
        Self {
            identifier,
            beta,
            gamma,
            pw92: Pw92Parameters::unpolarized(),
        }
    }

    pub fn pbe() -> Self {
        Self::new(
            Identifier::from_static("gga_c_pbe"),
            F::constant(PBE_BETA),
            F::constant(PBE_GAMMA),
        )
    }

    /// PBE for solids, β = 0.046
    pub fn pbe_sol() -> Self {
        Self::new(
            Identifier::from_static("gga_c_pbe_sol"),
            F::constant(0.046),
            F::constant(PBE_GAMMA),
        )
    }
}

impl<F: XcFloat> Functional<F> for PbeCorrelation<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Gga
    }

    fn kind(&self) -> Kind {
        Kind::Correlation
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new([("beta", self.beta), ("gamma", self.gamma)])
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self::new(
            identifier,
            parameters.require("beta")?,
            parameters.require("gamma")?,
        ))
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let rho = point.rho;
        let epsilon = pw92_epsilon(wigner_seitz_radius::<F, D>(rho), &self.pw92);

        // t² = σ / (4 k_s² ρ²) with k_s² = 4 k_F / π
        let k_fermi = (rho * F::constant(THREE_PI_SQUARED)).cbrt();
        let t2 = point.sigma * F::constant(PI / 16.0) / (k_fermi * rho * rho);

        let beta_over_gamma = self.beta / self.gamma;
        let a = ((-epsilon / self.gamma).exp() - F::one()).recip() * beta_over_gamma;
        let at2 = a * t2;
        let ratio = (at2 + F::one()) / (at2 + F::one() + at2 * at2);
        let h = (t2 * ratio * beta_over_gamma + F::one()).ln() * self.gamma;

        rho * (epsilon + h)
    }
}

/// Thomas-Fermi plus λ times the von Weizsäcker kinetic energy
///
/// e = C_TF ρ^(5/3) + λ σ / (8ρ). λ = 1 is the full Weizsäcker term, λ = 1/9 the second-order
/// gradient expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ThomasFermiWeizsaecker<F> {
    identifier: Identifier,
    lambda: F,
}

impl<F: XcFloat> ThomasFermiWeizsaecker<F> {
    pub fn new(identifier: Identifier, lambda: F) -> Self {
        Self { identifier, lambda }
    }

    pub fn tfvw() -> Self {
        Self::new(Identifier::from_static("gga_k_tfvw"), F::one())
    }

    pub fn ge2() -> Self {
        Self::new(Identifier::from_static("gga_k_ge2"), F::constant(1.0 / 9.0))
    }
}

impl<F: XcFloat> Functional<F> for ThomasFermiWeizsaecker<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Gga
    }

    fn kind(&self) -> Kind {
        Kind::Kinetic
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new([("lambda", self.lambda)])
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self::new(identifier, parameters.require("lambda")?))
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let weizsaecker = point.sigma / (point.rho * F::constant(8.0));
        thomas_fermi::<F, D>(point.rho) + weizsaecker * self.lambda
    }
}

/// van Leeuwen-Baerends (1994) exchange potential
///
/// Defined only as a potential:
/// v = 4/3 c_x ρ^(1/3) - β ρ^(1/3) x² / (1 + 3β x asinh x) with x = |∇ρ| / ρ^(4/3).
/// It has no energy expression, so only [`crate::evaluation::potential_terms`] accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lb94Potential<F> {
    identifier: Identifier,
    beta: F,
}

impl<F: XcFloat> Lb94Potential<F> {
    pub fn new() -> Self {
        Self {
            identifier: Identifier::from_static("gga_x_lb"),
            beta: F::constant(0.05),
        }
    }

    fn potential(&self, inputs: &FamilyInputs<'_, F>) -> Result<PotentialTerms<F>> {
        if inputs.n_spin() != 1 {
            return Err(fallback::not_implemented(self, inputs.n_spin()));
        }
        let sigma = inputs
            .array(Quantity::GradientSquared)
            .ok_or(FunctionalError::MissingInput {
                family: Family::Gga,
                quantity: Quantity::GradientSquared,
            })?;
        let rho = inputs.rho();
        let thresholds = self.thresholds();

        // the model defines no derivative with respect to σ
        let mut terms = PotentialTerms::zeros(inputs, false);
        terms.v_sigma = None;
        for i in 0..inputs.n_points() {
            let density = rho[[0, i]];
            if thresholds.is_vanishing(density) {
                continue;
            }
            let mut gradient_squared = sigma[[0, i]];
            if gradient_squared < thresholds.gradient_squared {
                gradient_squared = thresholds.gradient_squared;
            }
            terms.v_rho[[0, i]] = lb94_potential(density, gradient_squared, self.beta);
        }
        Ok(terms)
    }
}

impl<F: XcFloat> Default for Lb94Potential<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn lb94_potential<F: XcFloat, D: DualNum<F> + Copy>(rho: D, sigma: D, beta: F) -> D {
    let rho_third = rho.cbrt();
    let x = sigma.sqrt() / (rho * rho_third);
    let correction = rho_third * x * x * beta / (x * x.asinh() * (beta * F::constant(3.0)) + F::one());
    rho_third * F::constant(4.0 / 3.0 * SLATER_EXCHANGE) - correction
}

impl<F: XcFloat> Functional<F> for Lb94Potential<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Gga
    }

    fn kind(&self) -> Kind {
        Kind::Exchange
    }

    fn has_energy(&self) -> bool {
        false
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new([("beta", self.beta)])
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self {
            identifier,
            beta: parameters.require("beta")?,
        })
    }

    /// Never called by the pipeline; see [`Functional::has_energy`]
    fn energy<D: DualNum<F> + Copy>(&self, _point: &PointInput<D>) -> D {
        D::from(F::zero())
    }

    fn custom_potential_terms(
        &self,
        inputs: &FamilyInputs<'_, F>,
    ) -> Option<Result<PotentialTerms<F>>> {
        Some(self.potential(inputs))
    }
}
