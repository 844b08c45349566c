/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! The functional protocol
//!
//! A functional is an immutable value tagged with a [`Family`] and a [`Kind`]. It owns a
//! [`Parameters`] set and supplies one scalar energy expression per grid point, written
//! generically over [`DualNum`] so the evaluation pipeline can differentiate it to first and
//! second order. Everything else (which inputs are needed, which derivatives are produced)
//! follows from the family tag.

pub mod classification;
pub mod errors;
pub mod parameters;
pub mod thresholds;

pub use classification::{Family, Kind, Quantity};
pub use errors::{FunctionalError, Result};
pub use parameters::Parameters;
pub use thresholds::Thresholds;

use crate::evaluation::{FamilyInputs, PotentialTerms};
use crate::utils::{NumericType, XcFloat};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Symbolic name of a functional
///
/// Catalogue presets carry their literature tag (`gga_x_pbe`, ...). A functional whose
/// parameters were changed without keeping its identifier is tagged `custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(Cow<'static, str>);

impl Identifier {
    /// Tag of functionals with non-standard parameters
    pub const CUSTOM: &'static str = "custom";

    pub const fn from_static(name: &'static str) -> Self {
        Identifier(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Identifier(name.into())
    }

    pub const fn custom() -> Self {
        Self::from_static(Self::CUSTOM)
    }

    pub fn is_custom(&self) -> bool {
        self.0 == Self::CUSTOM
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scalar inputs of a formula at one grid point
///
/// Entries the functional's family does not use are zero and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointInput<D> {
    /// Density ρ
    pub rho: D,
    /// Squared density gradient σ
    pub sigma: D,
    /// Kinetic-energy density τ
    pub tau: D,
    /// Density Laplacian Δρ
    pub lapl: D,
}

impl<D: Copy> PointInput<D> {
    /// Build from differentiation variables ordered as [`Family::quantities`]
    pub fn from_variables(variables: &[D], zero: D) -> Self {
        let at = |index: usize| variables.get(index).copied().unwrap_or(zero);
        Self {
            rho: at(Quantity::Density.index()),
            sigma: at(Quantity::GradientSquared.index()),
            tau: at(Quantity::KineticDensity.index()),
            lapl: at(Quantity::Laplacian.index()),
        }
    }
}

/// An exchange-correlation (or kinetic) energy functional
///
/// Implementors supply the tags, their parameter set and the per-point energy density `e`
/// (energy per unit volume) of a single spin-unpolarized channel. `energy` must only use
/// arithmetic that is valid on dual numbers: no branching on values other than through
/// [`DualNum::re`].
pub trait Functional<F: XcFloat>: Clone + fmt::Debug + Send + Sync {
    fn identifier(&self) -> &Identifier;

    fn family(&self) -> Family;

    fn kind(&self) -> Kind;

    /// Whether `energy` is meaningful. Potential-only functionals return false and provide
    /// [`Functional::custom_potential_terms`] instead.
    fn has_energy(&self) -> bool {
        true
    }

    /// Threshold policy applied before `energy` is called
    fn thresholds(&self) -> Thresholds<F> {
        Thresholds::default()
    }

    /// Current parameter values
    fn parameters(&self) -> Parameters<F>;

    /// Same formula with new parameter values and the given identity
    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self>;

    /// Energy density at one point
    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D;

    /// Specialized potential evaluation, bypassing automatic differentiation
    fn custom_potential_terms(
        &self,
        _inputs: &FamilyInputs<'_, F>,
    ) -> Option<Result<PotentialTerms<F>>> {
        None
    }

    fn needs_gradient_squared(&self) -> bool {
        self.family().needs_gradient_squared()
    }

    fn needs_kinetic_density(&self) -> bool {
        self.family().needs_kinetic_density()
    }

    fn needs_laplacian(&self) -> bool {
        self.family().needs_laplacian()
    }

    /// Element type of the parameters
    fn parameter_type(&self) -> NumericType {
        F::NUMERIC_TYPE
    }

    /// New functional with substituted parameters, tagged `custom`
    fn change_parameters(&self, parameters: &Parameters<F>) -> Result<Self> {
        self.rebuild(parameters, Identifier::custom())
    }

    /// New functional with substituted parameters and the same identifier
    fn change_parameters_keep_identifier(&self, parameters: &Parameters<F>) -> Result<Self> {
        self.rebuild(parameters, self.identifier().clone())
    }
}

/// Parameter update with an explicit identity policy
pub fn change_parameters<F, M>(
    functional: &M,
    parameters: &Parameters<F>,
    keep_identifier: bool,
) -> Result<M>
where
    F: XcFloat,
    M: Functional<F>,
{
    if keep_identifier {
        functional.change_parameters_keep_identifier(parameters)
    } else {
        functional.change_parameters(parameters)
    }
}
