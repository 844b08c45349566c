/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Result bundles of an evaluation
//!
//! Terms are addressed by the conventional names `e`, `Vρ`, `Vσ`, `Vτ`, `Vl` and, for kernels,
//! `Vρρ`, `Vρσ`, `Vσσ`, ... Quantities a functional does not depend on are absent rather than
//! zero-filled.

use super::grid::FamilyInputs;
use crate::functional::Quantity;
use crate::utils::XcFloat;
use ndarray::{Array1, Array2, Array3, ArrayViewD};
use std::collections::BTreeMap;

/// Energy density and first derivatives
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialTerms<F> {
    /// Energy per unit volume, one value per point; `None` for potential-only functionals
    pub e: Option<Array1<F>>,
    /// ∂e/∂ρ, shape (spin channels, points)
    pub v_rho: Array2<F>,
    /// ∂e/∂σ
    pub v_sigma: Option<Array2<F>>,
    /// ∂e/∂τ
    pub v_tau: Option<Array2<F>>,
    /// ∂e/∂Δρ
    pub v_lapl: Option<Array2<F>>,
}

impl<F: XcFloat> PotentialTerms<F> {
    /// Zero-initialized terms sized for `inputs`
    pub fn zeros(inputs: &FamilyInputs<'_, F>, with_energy: bool) -> Self {
        let n_points = inputs.n_points();
        let allocate = |quantity: Quantity| {
            inputs
                .array(quantity)
                .map(|array| Array2::zeros((array.nrows(), n_points)))
        };
        Self {
            e: with_energy.then(|| Array1::zeros(n_points)),
            v_rho: Array2::zeros((inputs.n_spin(), n_points)),
            v_sigma: allocate(Quantity::GradientSquared),
            v_tau: allocate(Quantity::KineticDensity),
            v_lapl: allocate(Quantity::Laplacian),
        }
    }

    pub fn n_points(&self) -> usize {
        self.v_rho.ncols()
    }

    /// First derivative with respect to `quantity`
    pub fn potential(&self, quantity: Quantity) -> Option<&Array2<F>> {
        match quantity {
            Quantity::Density => Some(&self.v_rho),
            Quantity::GradientSquared => self.v_sigma.as_ref(),
            Quantity::KineticDensity => self.v_tau.as_ref(),
            Quantity::Laplacian => self.v_lapl.as_ref(),
        }
    }

    pub(crate) fn potential_mut(&mut self, quantity: Quantity) -> Option<&mut Array2<F>> {
        match quantity {
            Quantity::Density => Some(&mut self.v_rho),
            Quantity::GradientSquared => self.v_sigma.as_mut(),
            Quantity::KineticDensity => self.v_tau.as_mut(),
            Quantity::Laplacian => self.v_lapl.as_mut(),
        }
    }

    /// Quantities with a first-derivative term, in canonical order
    pub fn quantities(&self) -> Vec<Quantity> {
        ALL_QUANTITIES
            .into_iter()
            .filter(|quantity| self.potential(*quantity).is_some())
            .collect()
    }

    /// Names of the terms present
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.e.is_some() {
            names.push("e".to_string());
        }
        names.extend(self.quantities().iter().map(Quantity::potential_name));
        names
    }

    /// Term by conventional name
    pub fn get(&self, name: &str) -> Option<ArrayViewD<'_, F>> {
        if name == "e" {
            return self.e.as_ref().map(|e| e.view().into_dyn());
        }
        ALL_QUANTITIES
            .into_iter()
            .find(|quantity| quantity.potential_name() == name)
            .and_then(|quantity| self.potential(quantity))
            .map(|term| term.view().into_dyn())
    }
}

const ALL_QUANTITIES: [Quantity; 4] = [
    Quantity::Density,
    Quantity::GradientSquared,
    Quantity::KineticDensity,
    Quantity::Laplacian,
];

/// Name of a second-derivative term, independent of argument order
pub fn kernel_name(a: Quantity, b: Quantity) -> String {
    let (first, second) = ordered(a, b);
    format!("V{}{}", first.symbol(), second.symbol())
}

fn ordered(a: Quantity, b: Quantity) -> (Quantity, Quantity) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Potential terms plus second derivatives
#[derive(Debug, Clone, PartialEq)]
pub struct KernelTerms<F> {
    /// Energy and first derivatives
    pub potential: PotentialTerms<F>,
    second: BTreeMap<(Quantity, Quantity), Array3<F>>,
}

impl<F: XcFloat> KernelTerms<F> {
    /// Zero-initialized terms covering every pair of the family's quantities
    pub fn zeros(inputs: &FamilyInputs<'_, F>) -> Self {
        let n_points = inputs.n_points();
        let quantities = inputs.family().quantities();
        let mut second = BTreeMap::new();
        for (position, &a) in quantities.iter().enumerate() {
            for &b in &quantities[position..] {
                let rows = |quantity: Quantity| {
                    inputs
                        .array(quantity)
                        .map(|array| array.nrows())
                        .unwrap_or(0)
                };
                second.insert((a, b), Array3::zeros((rows(a), rows(b), n_points)));
            }
        }
        Self {
            potential: PotentialTerms::zeros(inputs, true),
            second,
        }
    }

    /// Mixed second derivative ∂²e/∂a∂b; the order of `a` and `b` does not matter
    pub fn second(&self, a: Quantity, b: Quantity) -> Option<&Array3<F>> {
        self.second.get(&ordered(a, b))
    }

    pub(crate) fn second_mut(&mut self, a: Quantity, b: Quantity) -> Option<&mut Array3<F>> {
        self.second.get_mut(&ordered(a, b))
    }

    /// ∂²e/∂ρ², present for every family
    pub fn v_rho_rho(&self) -> Option<&Array3<F>> {
        self.second(Quantity::Density, Quantity::Density)
    }

    /// ∂²e/∂ρ∂σ
    pub fn v_rho_sigma(&self) -> Option<&Array3<F>> {
        self.second(Quantity::Density, Quantity::GradientSquared)
    }

    /// ∂²e/∂σ²
    pub fn v_sigma_sigma(&self) -> Option<&Array3<F>> {
        self.second(Quantity::GradientSquared, Quantity::GradientSquared)
    }

    /// Names of the terms present
    pub fn names(&self) -> Vec<String> {
        let mut names = self.potential.names();
        names.extend(self.second.keys().map(|(a, b)| kernel_name(*a, *b)));
        names
    }

    /// Term by conventional name
    pub fn get(&self, name: &str) -> Option<ArrayViewD<'_, F>> {
        if let Some(term) = self.potential.get(name) {
            return Some(term);
        }
        self.second
            .iter()
            .find(|((a, b), _)| kernel_name(*a, *b) == name)
            .map(|(_, term)| term.view().into_dyn())
    }
}
