/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Evaluation with inputs and parameters of different precision
//!
//! The functional and the grid are both converted into the promoted type before the
//! regular pipeline runs, so results are in the wider of the two representations.

use super::{kernel_terms_with, potential_terms_with, GridBatch, KernelTerms, PotentialTerms};
use crate::catalogue::AnyFunctional;
use crate::config::EvaluationConfig;
use crate::functional::{Functional, Result};
use crate::utils::{NumericType, Promote, Promoted, XcFloat};
use log::debug;

/// [`super::potential_terms`] for a functional and inputs of any precision
pub fn promoted_potential_terms<F, G>(
    functional: &AnyFunctional<F>,
    batch: &GridBatch<'_, G>,
) -> Result<PotentialTerms<Promoted<F, G>>>
where
    F: Promote<G>,
    G: XcFloat,
{
    let functional = promote_functional(functional, batch)?;
    let arrays = batch.cast::<Promoted<F, G>>();
    potential_terms_with(&functional, &arrays.batch(), &EvaluationConfig::default())
}

/// [`super::kernel_terms`] for a functional and inputs of any precision
pub fn promoted_kernel_terms<F, G>(
    functional: &AnyFunctional<F>,
    batch: &GridBatch<'_, G>,
) -> Result<KernelTerms<Promoted<F, G>>>
where
    F: Promote<G>,
    G: XcFloat,
{
    let functional = promote_functional(functional, batch)?;
    let arrays = batch.cast::<Promoted<F, G>>();
    kernel_terms_with(&functional, &arrays.batch(), &EvaluationConfig::default())
}

fn promote_functional<F, G>(
    functional: &AnyFunctional<F>,
    batch: &GridBatch<'_, G>,
) -> Result<AnyFunctional<Promoted<F, G>>>
where
    F: Promote<G>,
    G: XcFloat,
{
    let input_type = NumericType::of::<G>();
    debug!(
        "promoting '{}' ({} parameters, {} inputs on {} points) to {}",
        functional.identifier(),
        functional.parameter_type(),
        input_type,
        batch.n_points(),
        functional.parameter_type().promote(input_type)
    );
    functional.cast::<Promoted<F, G>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{functional_from_identifier, PbeExchange};
    use crate::evaluation::potential_terms;
    use crate::functional::FunctionalError;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_single_precision_inputs_on_double_functional() {
        let functional: AnyFunctional<f64> = PbeExchange::pbe().into();
        let rho = array![[0.5f32, 0.125]];
        let sigma = array![[0.25f32, 0.0625]];
        let promoted: PotentialTerms<f64> =
            promoted_potential_terms(&functional, &GridBatch::gga(rho.view(), sigma.view()))
                .unwrap();

        // the chosen inputs are exact in both precisions
        let rho = rho.mapv(f64::from);
        let sigma = sigma.mapv(f64::from);
        let reference =
            potential_terms(&functional, &GridBatch::gga(rho.view(), sigma.view())).unwrap();
        assert_eq!(promoted, reference);
    }

    #[test]
    fn test_double_precision_inputs_on_single_functional() {
        let functional = functional_from_identifier::<f32>("lda_c_pw").unwrap();
        let rho = array![[0.3f64]];
        let promoted = promoted_kernel_terms(&functional, &GridBatch::lda(rho.view())).unwrap();
        let reference = kernel_terms_with(
            &functional_from_identifier::<f64>("lda_c_pw").unwrap(),
            &GridBatch::lda(rho.view()),
            &EvaluationConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(
            promoted.potential.v_rho[[0, 0]],
            reference.potential.v_rho[[0, 0]],
            max_relative = 1e-6
        );
        assert_relative_eq!(
            promoted.v_rho_rho().unwrap()[[0, 0, 0]],
            reference.v_rho_rho().unwrap()[[0, 0, 0]],
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_promotion_keeps_pipeline_errors() {
        let functional = functional_from_identifier::<f64>("gga_x_lb").unwrap();
        let rho = array![[0.3f32]];
        let sigma = array![[0.1f32]];
        let result = promoted_kernel_terms(&functional, &GridBatch::gga(rho.view(), sigma.view()));
        assert!(matches!(result, Err(FunctionalError::MissingEnergy(_))));
    }
}
