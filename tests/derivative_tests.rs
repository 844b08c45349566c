/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Automatic derivatives against central finite differences

use approx::assert_relative_eq;
use dft_functionals::catalogue::{functional_from_identifier, AnyFunctional};
use dft_functionals::evaluation::{kernel_terms, potential_terms, GridBatch, PotentialTerms};
use dft_functionals::functional::{Functional, Quantity};
use ndarray::{array, Array2};
use rstest::rstest;

/// A point well inside every functional's domain: ρ, σ, τ, Δρ
const POINT: [f64; 4] = [0.6, 0.3, 1.2, 0.4];
const STEP: f64 = 1e-4;

fn evaluate(functional: &AnyFunctional<f64>, values: [f64; 4]) -> PotentialTerms<f64> {
    let arrays: Vec<Array2<f64>> = values.iter().map(|&value| array![[value]]).collect();
    let batch = GridBatch::meta_gga_laplacian(
        arrays[0].view(),
        arrays[1].view(),
        arrays[2].view(),
        arrays[3].view(),
    );
    potential_terms(functional, &batch).unwrap()
}

/// Central difference of `term` along `quantity` at [`POINT`]
fn central_difference<T>(functional: &AnyFunctional<f64>, quantity: Quantity, term: T) -> f64
where
    T: Fn(&PotentialTerms<f64>) -> f64,
{
    let h = STEP * POINT[quantity.index()];
    let mut forward = POINT;
    let mut backward = POINT;
    forward[quantity.index()] += h;
    backward[quantity.index()] -= h;
    (term(&evaluate(functional, forward)) - term(&evaluate(functional, backward))) / (2.0 * h)
}

fn energy(terms: &PotentialTerms<f64>) -> f64 {
    terms.e.as_ref().map(|e| e[0]).unwrap_or(f64::NAN)
}

fn potential(quantity: Quantity) -> impl Fn(&PotentialTerms<f64>) -> f64 {
    move |terms: &PotentialTerms<f64>| {
        terms
            .potential(quantity)
            .map(|v| v[[0, 0]])
            .unwrap_or(f64::NAN)
    }
}

#[rstest]
#[case("lda_x")]
#[case("lda_c_pw")]
#[case("lda_k_tf")]
#[case("lda_xc_teter93")]
#[case("gga_x_pbe")]
#[case("gga_x_pbe_sol")]
#[case("gga_x_revpbe")]
#[case("gga_x_apbe")]
#[case("gga_x_xpbe")]
#[case("gga_c_pbe")]
#[case("gga_c_pbe_sol")]
#[case("gga_k_tfvw")]
#[case("gga_k_ge2")]
#[case("mgga_x_mvs")]
#[case("mgga_k_pgsl025")]
fn test_derivatives_match_finite_differences(#[case] name: &str) {
    let functional = functional_from_identifier::<f64>(name).unwrap();
    let terms = evaluate(&functional, POINT);
    let quantities = functional.family().quantities();

    // first derivatives of the energy
    for &quantity in quantities {
        assert_relative_eq!(
            potential(quantity)(&terms),
            central_difference(&functional, quantity, energy),
            epsilon = 1e-9,
            max_relative = 1e-6
        );
    }

    // second derivatives against differences of the potential
    let arrays: Vec<Array2<f64>> = POINT.iter().map(|&value| array![[value]]).collect();
    let batch = GridBatch::meta_gga_laplacian(
        arrays[0].view(),
        arrays[1].view(),
        arrays[2].view(),
        arrays[3].view(),
    );
    let kernel = kernel_terms(&functional, &batch).unwrap();
    for &a in quantities {
        for &b in quantities {
            let second = kernel.second(a, b).unwrap()[[0, 0, 0]];
            assert_relative_eq!(
                second,
                central_difference(&functional, b, potential(a)),
                epsilon = 1e-8,
                max_relative = 1e-5
            );
        }
    }
}

#[rstest]
#[case("gga_x_pbe")]
#[case("gga_c_pbe")]
#[case("mgga_x_mvs")]
fn test_mixed_density_gradient_derivative_is_symmetric(#[case] name: &str) {
    let functional = functional_from_identifier::<f64>(name).unwrap();
    let d_sigma_d_rho = central_difference(
        &functional,
        Quantity::Density,
        potential(Quantity::GradientSquared),
    );
    let d_rho_d_sigma = central_difference(
        &functional,
        Quantity::GradientSquared,
        potential(Quantity::Density),
    );
    assert_relative_eq!(d_sigma_d_rho, d_rho_d_sigma, epsilon = 1e-8, max_relative = 1e-5);

    let arrays: Vec<Array2<f64>> = POINT.iter().map(|&value| array![[value]]).collect();
    let batch = GridBatch::meta_gga_laplacian(
        arrays[0].view(),
        arrays[1].view(),
        arrays[2].view(),
        arrays[3].view(),
    );
    let kernel = kernel_terms(&functional, &batch).unwrap();
    assert_relative_eq!(
        kernel.v_rho_sigma().unwrap()[[0, 0, 0]],
        d_rho_d_sigma,
        epsilon = 1e-8,
        max_relative = 1e-5
    );
}

#[test]
fn test_kernel_potential_matches_potential_terms() {
    let functional = functional_from_identifier::<f64>("gga_c_pbe").unwrap();
    let rho = array![[0.6]];
    let sigma = array![[0.3]];
    let batch = GridBatch::gga(rho.view(), sigma.view());
    let potential = potential_terms(&functional, &batch).unwrap();
    let kernel = kernel_terms(&functional, &batch).unwrap();
    assert_relative_eq!(
        potential.e.unwrap()[0],
        kernel.potential.e.unwrap()[0],
        max_relative = 1e-14
    );
    assert_relative_eq!(
        potential.v_rho[[0, 0]],
        kernel.potential.v_rho[[0, 0]],
        max_relative = 1e-14
    );
}
