/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Generic evaluation of functionals on batches of grid points
//!
//! Each functional only supplies its scalar energy expression. [`potential_terms`] and
//! [`kernel_terms`] differentiate that expression with forward-mode dual numbers at every grid
//! point to obtain the potential (first derivatives) and kernel (second derivatives). Grid
//! points are independent; large batches are spread over the rayon thread pool.

pub mod autodiff;
pub mod fallback;
pub mod grid;
pub mod promotion;
pub mod terms;

pub use fallback::fallback_energy;
pub use grid::{FamilyInputs, GridArrays, GridBatch};
pub use promotion::{promoted_kernel_terms, promoted_potential_terms};
pub use terms::{kernel_name, KernelTerms, PotentialTerms};

use crate::config::EvaluationConfig;
use crate::functional::{Functional, Result};
use crate::utils::XcFloat;
use autodiff::{first_order, second_order, MAX_VARIABLES};
use fallback::{require_energy, SingleChannel};
use log::debug;
use rayon::prelude::*;

/// Energy density and first derivatives of `functional` on every point of `batch`
pub fn potential_terms<F, M>(functional: &M, batch: &GridBatch<'_, F>) -> Result<PotentialTerms<F>>
where
    F: XcFloat,
    M: Functional<F>,
{
    potential_terms_with(functional, batch, &EvaluationConfig::default())
}

/// [`potential_terms`] with an explicit configuration
pub fn potential_terms_with<F, M>(
    functional: &M,
    batch: &GridBatch<'_, F>,
    config: &EvaluationConfig,
) -> Result<PotentialTerms<F>>
where
    F: XcFloat,
    M: Functional<F>,
{
    let inputs = batch.select(functional.family())?;
    debug!(
        "potential terms of '{}' ({} {}) on {} points",
        functional.identifier(),
        functional.family(),
        functional.kind(),
        inputs.n_points()
    );

    if let Some(result) = functional.custom_potential_terms(&inputs) {
        return result;
    }
    require_energy(functional)?;
    require_single_channel(functional, &inputs)?;

    let field = SingleChannel::new(functional);
    let points = map_points(&inputs, config, |x| first_order(&field, x));

    let mut terms = PotentialTerms::zeros(&inputs, true);
    let quantities = inputs.family().quantities();
    for (i, point) in points.iter().enumerate() {
        if let Some(e) = terms.e.as_mut() {
            e[i] = point.value;
        }
        for (k, &quantity) in quantities.iter().enumerate() {
            if let Some(v) = terms.potential_mut(quantity) {
                v[[0, i]] = point.gradient[k];
            }
        }
    }
    Ok(terms)
}

/// Energy density, first and second derivatives of `functional` on every point of `batch`
pub fn kernel_terms<F, M>(functional: &M, batch: &GridBatch<'_, F>) -> Result<KernelTerms<F>>
where
    F: XcFloat,
    M: Functional<F>,
{
    kernel_terms_with(functional, batch, &EvaluationConfig::default())
}

/// [`kernel_terms`] with an explicit configuration
pub fn kernel_terms_with<F, M>(
    functional: &M,
    batch: &GridBatch<'_, F>,
    config: &EvaluationConfig,
) -> Result<KernelTerms<F>>
where
    F: XcFloat,
    M: Functional<F>,
{
    let inputs = batch.select(functional.family())?;
    debug!(
        "kernel terms of '{}' ({} {}) on {} points",
        functional.identifier(),
        functional.family(),
        functional.kind(),
        inputs.n_points()
    );

    require_energy(functional)?;
    require_single_channel(functional, &inputs)?;

    let field = SingleChannel::new(functional);
    let points = map_points(&inputs, config, |x| second_order(&field, x));

    let mut terms = KernelTerms::zeros(&inputs);
    let quantities = inputs.family().quantities();
    for (i, point) in points.iter().enumerate() {
        if let Some(e) = terms.potential.e.as_mut() {
            e[i] = point.value;
        }
        for (a, &qa) in quantities.iter().enumerate() {
            if let Some(v) = terms.potential.potential_mut(qa) {
                v[[0, i]] = point.gradient[a];
            }
            for (b, &qb) in quantities.iter().enumerate().skip(a) {
                if let Some(v) = terms.second_mut(qa, qb) {
                    v[[0, 0, i]] = point.hessian[a][b];
                }
            }
        }
    }
    Ok(terms)
}

fn require_single_channel<F: XcFloat, M: Functional<F>>(
    functional: &M,
    inputs: &FamilyInputs<'_, F>,
) -> Result<()> {
    match inputs.n_spin() {
        1 => Ok(()),
        n_spin => Err(fallback::not_implemented(functional, n_spin)),
    }
}

/// Evaluate `evaluate` on the first-channel variables of every point, in point order
fn map_points<F, R, G>(inputs: &FamilyInputs<'_, F>, config: &EvaluationConfig, evaluate: G) -> Vec<R>
where
    F: XcFloat,
    R: Send,
    G: Fn(&[F]) -> R + Sync + Send,
{
    let n_points = inputs.n_points();
    let at = |i: usize| {
        let mut variables = [F::zero(); MAX_VARIABLES];
        let n = inputs.variables(i, &mut variables);
        evaluate(&variables[..n])
    };

    if config.runs_parallel(n_points) {
        (0..n_points).into_par_iter().map(at).collect()
    } else {
        (0..n_points).map(at).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{LdaExchange, PbeExchange};
    use crate::utils::constants::SLATER_EXCHANGE;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_lda_exchange_single_point() {
        let rho = array![[0.5]];
        let terms = potential_terms(&LdaExchange::new(), &GridBatch::lda(rho.view())).unwrap();

        let e = terms.e.as_ref().unwrap();
        assert_eq!(e.len(), 1);
        assert_eq!(terms.v_rho.shape(), &[1, 1]);
        assert_relative_eq!(
            e[0],
            SLATER_EXCHANGE * f64::powf(0.5, 4.0 / 3.0),
            max_relative = 1e-14
        );
        assert_relative_eq!(
            terms.v_rho[[0, 0]],
            4.0 / 3.0 * SLATER_EXCHANGE * f64::cbrt(0.5),
            max_relative = 1e-14
        );
        assert!(terms.v_sigma.is_none());
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let n = 64;
        let rho = Array2::from_shape_fn((1, n), |(_, i)| 0.01 + i as f64 * 0.05);
        let sigma = Array2::from_shape_fn((1, n), |(_, i)| i as f64 * 0.01);
        let batch = GridBatch::gga(rho.view(), sigma.view());
        let functional = PbeExchange::pbe();

        let parallel = EvaluationConfig {
            parallel: true,
            parallel_threshold: 1,
        };
        let a = kernel_terms_with(&functional, &batch, &parallel).unwrap();
        let b = kernel_terms_with(&functional, &batch, &EvaluationConfig::sequential()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_kernel_and_potential_agree() {
        let rho = array![[0.3, 1.2]];
        let sigma = array![[0.05, 0.7]];
        let batch = GridBatch::gga(rho.view(), sigma.view());
        let functional = PbeExchange::pbe();

        let potential = potential_terms(&functional, &batch).unwrap();
        let kernel = kernel_terms(&functional, &batch).unwrap();
        for i in 0..2 {
            assert_relative_eq!(
                potential.e.as_ref().unwrap()[i],
                kernel.potential.e.as_ref().unwrap()[i],
                max_relative = 1e-14
            );
            assert_relative_eq!(
                potential.v_sigma.as_ref().unwrap()[[0, i]],
                kernel.potential.v_sigma.as_ref().unwrap()[[0, i]],
                max_relative = 1e-14
            );
        }
    }
}
