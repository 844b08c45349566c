/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Batched grid inputs
//!
//! Arrays are laid out with one row per spin channel and one column per grid point. A
//! [`GridBatch`] may carry more quantities than a functional needs; [`GridBatch::select`]
//! forwards only those of the functional's family.

use crate::functional::{Family, FunctionalError, Quantity, Result};
use crate::utils::{convert, XcFloat};
use log::trace;
use ndarray::{Array2, ArrayView2};

/// Borrowed per-point physical quantities for a batch of grid points
#[derive(Debug, Clone)]
pub struct GridBatch<'a, F> {
    rho: ArrayView2<'a, F>,
    sigma: Option<ArrayView2<'a, F>>,
    tau: Option<ArrayView2<'a, F>>,
    lapl: Option<ArrayView2<'a, F>>,
}

impl<'a, F: XcFloat> GridBatch<'a, F> {
    /// Density only
    pub fn lda(rho: ArrayView2<'a, F>) -> Self {
        Self {
            rho,
            sigma: None,
            tau: None,
            lapl: None,
        }
    }

    /// Density and squared gradient
    pub fn gga(rho: ArrayView2<'a, F>, sigma: ArrayView2<'a, F>) -> Self {
        Self {
            sigma: Some(sigma),
            ..Self::lda(rho)
        }
    }

    /// Density, squared gradient and kinetic-energy density
    pub fn meta_gga(
        rho: ArrayView2<'a, F>,
        sigma: ArrayView2<'a, F>,
        tau: ArrayView2<'a, F>,
    ) -> Self {
        Self {
            tau: Some(tau),
            ..Self::gga(rho, sigma)
        }
    }

    /// All four quantities
    pub fn meta_gga_laplacian(
        rho: ArrayView2<'a, F>,
        sigma: ArrayView2<'a, F>,
        tau: ArrayView2<'a, F>,
        lapl: ArrayView2<'a, F>,
    ) -> Self {
        Self {
            lapl: Some(lapl),
            ..Self::meta_gga(rho, sigma, tau)
        }
    }

    pub fn n_points(&self) -> usize {
        self.rho.ncols()
    }

    pub fn n_spin(&self) -> usize {
        self.rho.nrows()
    }

    /// Array of one quantity, if supplied
    pub fn get(&self, quantity: Quantity) -> Option<ArrayView2<'a, F>> {
        match quantity {
            Quantity::Density => Some(self.rho.clone()),
            Quantity::GradientSquared => self.sigma.clone(),
            Quantity::KineticDensity => self.tau.clone(),
            Quantity::Laplacian => self.lapl.clone(),
        }
    }

    /// Keep exactly the quantities `family` needs
    pub fn select(&self, family: Family) -> Result<FamilyInputs<'a, F>> {
        let n_points = self.n_points();
        let n_spin = self.n_spin();
        if n_spin == 0 {
            return Err(FunctionalError::ShapeMismatch(
                "density must have at least one spin channel".to_string(),
            ));
        }

        let mut arrays = Vec::with_capacity(family.quantities().len());
        for &quantity in family.quantities() {
            let array = self
                .get(quantity)
                .ok_or(FunctionalError::MissingInput { family, quantity })?;
            if array.ncols() != n_points {
                return Err(FunctionalError::ShapeMismatch(format!(
                    "{} has {} grid points, density has {}",
                    quantity,
                    array.ncols(),
                    n_points
                )));
            }
            let expected_rows = spin_rows(quantity, n_spin);
            if array.nrows() != expected_rows {
                return Err(FunctionalError::ShapeMismatch(format!(
                    "{} has {} spin rows, expected {} for {} density channel(s)",
                    quantity,
                    array.nrows(),
                    expected_rows,
                    n_spin
                )));
            }
            arrays.push(array);
        }

        for quantity in [
            Quantity::GradientSquared,
            Quantity::KineticDensity,
            Quantity::Laplacian,
        ] {
            if !family.needs(quantity) && self.get(quantity).is_some() {
                trace!("dropping {} input unused by {} functional", quantity, family);
            }
        }

        Ok(FamilyInputs { family, arrays })
    }
}

impl<F: XcFloat> GridBatch<'_, F> {
    /// Owned copy of every supplied quantity converted to `G`
    pub fn cast<G: XcFloat>(&self) -> GridArrays<G> {
        let cast = |array: &ArrayView2<'_, F>| array.mapv(convert::<F, G>);
        GridArrays {
            rho: cast(&self.rho),
            sigma: self.sigma.as_ref().map(cast),
            tau: self.tau.as_ref().map(cast),
            lapl: self.lapl.as_ref().map(cast),
        }
    }
}

/// Owned counterpart of [`GridBatch`], produced by [`GridBatch::cast`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridArrays<F> {
    rho: Array2<F>,
    sigma: Option<Array2<F>>,
    tau: Option<Array2<F>>,
    lapl: Option<Array2<F>>,
}

impl<F: XcFloat> GridArrays<F> {
    pub fn batch(&self) -> GridBatch<'_, F> {
        GridBatch {
            rho: self.rho.view(),
            sigma: self.sigma.as_ref().map(Array2::view),
            tau: self.tau.as_ref().map(Array2::view),
            lapl: self.lapl.as_ref().map(Array2::view),
        }
    }
}

/// Rows of a quantity for a density with `n_spin` channels: σ carries one row per channel pair
fn spin_rows(quantity: Quantity, n_spin: usize) -> usize {
    match quantity {
        Quantity::GradientSquared => n_spin * (n_spin + 1) / 2,
        _ => n_spin,
    }
}

/// Inputs restricted to one family, in differentiation order
#[derive(Debug, Clone)]
pub struct FamilyInputs<'a, F> {
    family: Family,
    arrays: Vec<ArrayView2<'a, F>>,
}

impl<'a, F: XcFloat> FamilyInputs<'a, F> {
    pub fn family(&self) -> Family {
        self.family
    }

    pub fn n_points(&self) -> usize {
        self.arrays[0].ncols()
    }

    pub fn n_spin(&self) -> usize {
        self.arrays[0].nrows()
    }

    /// Array of a quantity the family needs
    pub fn array(&self, quantity: Quantity) -> Option<&ArrayView2<'a, F>> {
        self.arrays.get(quantity.index())
    }

    pub fn rho(&self) -> &ArrayView2<'a, F> {
        &self.arrays[0]
    }

    /// First-channel values at one point, written into `variables`; returns how many were set
    pub(crate) fn variables(&self, point: usize, variables: &mut [F]) -> usize {
        for (slot, array) in variables.iter_mut().zip(self.arrays.iter()) {
            *slot = array[[0, point]];
        }
        self.arrays.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_select_drops_unused_quantities() {
        let rho = array![[0.5, 0.25]];
        let sigma = array![[0.1, 0.2]];
        let tau = array![[0.3, 0.4]];
        let lapl = array![[0.0, 1.0]];
        let batch =
            GridBatch::meta_gga_laplacian(rho.view(), sigma.view(), tau.view(), lapl.view());

        let inputs = batch.select(Family::Gga).unwrap();
        assert_eq!(inputs.family(), Family::Gga);
        assert_eq!(inputs.n_points(), 2);
        assert!(inputs.array(Quantity::GradientSquared).is_some());
        assert!(inputs.array(Quantity::KineticDensity).is_none());

        let mut variables = [0.0; 4];
        assert_eq!(inputs.variables(1, &mut variables), 2);
        assert_eq!(&variables[..2], &[0.25, 0.2]);
    }

    #[test]
    fn test_cast_keeps_supplied_quantities() {
        let rho = array![[0.5f32, 0.25]];
        let sigma = array![[0.1f32, 0.2]];
        let arrays = GridBatch::gga(rho.view(), sigma.view()).cast::<f64>();
        let batch = arrays.batch();
        assert_eq!(batch.n_points(), 2);
        assert_eq!(batch.get(Quantity::Density).unwrap(), array![[0.5, 0.25]]);
        assert_eq!(
            batch.get(Quantity::GradientSquared).unwrap(),
            sigma.mapv(f64::from)
        );
        assert!(batch.get(Quantity::KineticDensity).is_none());
    }

    #[test]
    fn test_select_reports_missing_input() {
        let rho = array![[0.5]];
        let batch = GridBatch::lda(rho.view());
        match batch.select(Family::MetaGga) {
            Err(FunctionalError::MissingInput { quantity, .. }) => {
                assert_eq!(quantity, Quantity::GradientSquared)
            }
            other => panic!("expected missing input, got {:?}", other),
        }
    }

    #[test]
    fn test_select_checks_point_counts() {
        let rho = array![[0.5, 0.5]];
        let sigma = array![[0.1]];
        let batch = GridBatch::gga(rho.view(), sigma.view());
        assert!(matches!(
            batch.select(Family::Gga),
            Err(FunctionalError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_select_accepts_two_channel_layout() {
        let rho = array![[0.5], [0.4]];
        let sigma = array![[0.1], [0.05], [0.1]];
        let batch = GridBatch::gga(rho.view(), sigma.view());
        let inputs = batch.select(Family::Gga).unwrap();
        assert_eq!(inputs.n_spin(), 2);
    }
}
