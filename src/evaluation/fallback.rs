/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Single-channel evaluation of a functional's scalar formula
//!
//! Used whenever a functional has no specialized multi-spin implementation: the spin channel
//! is extracted, the threshold policy applied, and only then the formula called.

use super::autodiff::ScalarField;
use crate::functional::{
    Family, Functional, FunctionalError, PointInput, Quantity, Result, Thresholds,
};
use crate::utils::XcFloat;
use num_dual::DualNum;
use std::marker::PhantomData;

/// Energy of `functional` at one point given per-quantity spin channels
///
/// `channels[k]` holds the spin components of the k-th quantity of the functional's family.
/// More than one density channel is rejected with [`FunctionalError::NotImplemented`], a
/// potential-only functional with [`FunctionalError::MissingEnergy`].
pub fn fallback_energy<F, M, D>(functional: &M, channels: &[&[D]]) -> Result<D>
where
    F: XcFloat,
    M: Functional<F>,
    D: DualNum<F> + Copy,
{
    require_energy(functional)?;
    let family = functional.family();
    let quantities = family.quantities();

    let density = channels.first().copied().unwrap_or(&[]);
    if density.len() > 1 {
        return Err(not_implemented(functional, density.len()));
    }

    let mut variables = Vec::with_capacity(quantities.len());
    for (position, &quantity) in quantities.iter().enumerate() {
        let value = channels
            .get(position)
            .and_then(|channel| channel.first())
            .copied()
            .ok_or(FunctionalError::MissingInput { family, quantity })?;
        variables.push(value);
    }

    Ok(thresholded_energy(
        functional,
        family,
        &functional.thresholds(),
        &variables,
    ))
}

pub(crate) fn require_energy<F: XcFloat, M: Functional<F>>(functional: &M) -> Result<()> {
    if functional.has_energy() {
        Ok(())
    } else {
        Err(FunctionalError::MissingEnergy(
            functional.identifier().to_string(),
        ))
    }
}

pub(crate) fn not_implemented<F: XcFloat, M: Functional<F>>(
    functional: &M,
    n_spin: usize,
) -> FunctionalError {
    FunctionalError::NotImplemented(format!(
        "'{}' has no multi-spin implementation ({} density channels supplied)",
        functional.identifier(),
        n_spin
    ))
}

/// Apply the threshold policy and evaluate the formula on single-channel variables
fn thresholded_energy<F, M, D>(
    functional: &M,
    family: Family,
    thresholds: &Thresholds<F>,
    variables: &[D],
) -> D
where
    F: XcFloat,
    M: Functional<F>,
    D: DualNum<F> + Copy,
{
    let zero = D::from(F::zero());
    let mut point = PointInput::from_variables(variables, zero);

    if thresholds.is_vanishing(point.rho.re()) {
        return zero;
    }
    if family.needs(Quantity::GradientSquared) && point.sigma.re() < thresholds.gradient_squared
    {
        point.sigma = D::from(thresholds.gradient_squared);
    }
    if family.needs(Quantity::KineticDensity) && point.tau.re() < thresholds.kinetic_density {
        point.tau = D::from(thresholds.kinetic_density);
    }

    functional.energy(&point)
}

/// Thresholded single-channel formula as a differentiable field
pub(crate) struct SingleChannel<'f, F, M> {
    functional: &'f M,
    family: Family,
    thresholds: Thresholds<F>,
    _marker: PhantomData<F>,
}

impl<'f, F: XcFloat, M: Functional<F>> SingleChannel<'f, F, M> {
    pub(crate) fn new(functional: &'f M) -> Self {
        Self {
            functional,
            family: functional.family(),
            thresholds: functional.thresholds(),
            _marker: PhantomData,
        }
    }
}

impl<F: XcFloat, M: Functional<F>> ScalarField<F> for SingleChannel<'_, F, M> {
    fn eval<D: DualNum<F> + Copy>(&self, variables: &[D]) -> D {
        thresholded_energy(self.functional, self.family, &self.thresholds, variables)
    }
}
