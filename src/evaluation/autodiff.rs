/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Forward-mode differentiation of a per-point scalar expression
//!
//! First derivatives use one `Dual<F, F>` pass per variable. Second derivatives nest the
//! differentiation: the inner dual is seeded along variable `a`, the outer along `b`, so a
//! single pass yields the value, ∂_a, ∂_b and ∂_a∂_b. Passes run over the unordered pairs
//! `a <= b` and the Hessian is filled symmetrically.

use crate::utils::XcFloat;
use num_dual::{Dual, DualNum};

/// Largest number of differentiation variables (ρ, σ, τ, Δρ)
pub const MAX_VARIABLES: usize = 4;

/// A scalar function of up to [`MAX_VARIABLES`] variables, generic over the number type
pub trait ScalarField<F: XcFloat> {
    fn eval<D: DualNum<F> + Copy>(&self, variables: &[D]) -> D;
}

/// Value and gradient at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrder<F> {
    pub value: F,
    pub gradient: [F; MAX_VARIABLES],
}

/// Value, gradient and Hessian at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrder<F> {
    pub value: F,
    pub gradient: [F; MAX_VARIABLES],
    pub hessian: [[F; MAX_VARIABLES]; MAX_VARIABLES],
}

#[inline]
fn seed<F: XcFloat>(active: bool) -> F {
    if active {
        F::one()
    } else {
        F::zero()
    }
}

/// Value and gradient of `field` at `x`
pub fn first_order<F: XcFloat, S: ScalarField<F>>(field: &S, x: &[F]) -> FirstOrder<F> {
    let n = x.len();
    debug_assert!(n > 0 && n <= MAX_VARIABLES);

    let zero = F::zero();
    let mut result = FirstOrder {
        value: zero,
        gradient: [zero; MAX_VARIABLES],
    };
    let mut seeded = [Dual::<F, F>::new(zero, zero); MAX_VARIABLES];

    for direction in 0..n {
        for (i, &xi) in x.iter().enumerate() {
            seeded[i] = Dual::<F, F>::new(xi, seed(i == direction));
        }
        let out = field.eval(&seeded[..n]);
        result.value = out.re;
        result.gradient[direction] = out.eps;
    }
    result
}

/// Value, gradient and Hessian of `field` at `x`
pub fn second_order<F: XcFloat, S: ScalarField<F>>(field: &S, x: &[F]) -> SecondOrder<F> {
    let n = x.len();
    debug_assert!(n > 0 && n <= MAX_VARIABLES);

    let zero = F::zero();
    let mut result = SecondOrder {
        value: zero,
        gradient: [zero; MAX_VARIABLES],
        hessian: [[zero; MAX_VARIABLES]; MAX_VARIABLES],
    };
    let constant = Dual::<F, F>::new(zero, zero);
    let mut seeded = [Dual::<Dual<F, F>, F>::new(constant, constant); MAX_VARIABLES];

    for a in 0..n {
        for b in a..n {
            for (i, &xi) in x.iter().enumerate() {
                let inner = Dual::<F, F>::new(xi, seed(i == a));
                let outer = Dual::<F, F>::new(seed(i == b), zero);
                seeded[i] = Dual::<Dual<F, F>, F>::new(inner, outer);
            }
            let out = field.eval(&seeded[..n]);
            result.value = out.re.re;
            result.gradient[a] = out.re.eps;
            result.gradient[b] = out.eps.re;
            result.hessian[a][b] = out.eps.eps;
            result.hessian[b][a] = out.eps.eps;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// f(x, y) = x³ y + exp(x y)
    struct Polynomial;

    impl ScalarField<f64> for Polynomial {
        fn eval<D: DualNum<f64> + Copy>(&self, v: &[D]) -> D {
            let (x, y) = (v[0], v[1]);
            x.powi(3) * y + (x * y).exp()
        }
    }

    #[test]
    fn test_first_order_matches_analytic_gradient() {
        let (x, y) = (0.7, -1.3);
        let result = first_order(&Polynomial, &[x, y]);
        let exy = f64::exp(x * y);
        assert_relative_eq!(result.value, x.powi(3) * y + exy, max_relative = 1e-14);
        assert_relative_eq!(
            result.gradient[0],
            3.0 * x * x * y + y * exy,
            max_relative = 1e-14
        );
        assert_relative_eq!(result.gradient[1], x.powi(3) + x * exy, max_relative = 1e-14);
        assert_eq!(result.gradient[2], 0.0);
    }

    #[test]
    fn test_second_order_matches_analytic_hessian() {
        let (x, y) = (0.7, -1.3);
        let result = second_order(&Polynomial, &[x, y]);
        let exy = f64::exp(x * y);
        assert_relative_eq!(
            result.hessian[0][0],
            6.0 * x * y + y * y * exy,
            max_relative = 1e-13
        );
        assert_relative_eq!(
            result.hessian[0][1],
            3.0 * x * x + exy + x * y * exy,
            max_relative = 1e-13
        );
        assert_eq!(result.hessian[0][1], result.hessian[1][0]);
        assert_relative_eq!(result.hessian[1][1], x * x * exy, max_relative = 1e-13);

        let first = first_order(&Polynomial, &[x, y]);
        assert_relative_eq!(result.value, first.value, max_relative = 1e-15);
        assert_relative_eq!(result.gradient[0], first.gradient[0], max_relative = 1e-14);
        assert_relative_eq!(result.gradient[1], first.gradient[1], max_relative = 1e-14);
    }
}
