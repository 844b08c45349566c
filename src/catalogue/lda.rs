/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Local density approximation functionals

use crate::functional::{
    Family, Functional, Identifier, Kind, Parameters, PointInput, Result,
};
use crate::utils::constants::{SLATER_EXCHANGE, THOMAS_FERMI, WIGNER_SEITZ};
use crate::utils::XcFloat;
use num_dual::DualNum;
use std::marker::PhantomData;

/// Slater exchange energy density -3/4 (3/π)^(1/3) ρ^(4/3)
#[inline]
pub(crate) fn slater_exchange<F: XcFloat, D: DualNum<F> + Copy>(rho: D) -> D {
    rho * rho.cbrt() * F::constant(SLATER_EXCHANGE)
}

/// Thomas-Fermi kinetic energy density 3/10 (3π²)^(2/3) ρ^(5/3)
#[inline]
pub(crate) fn thomas_fermi<F: XcFloat, D: DualNum<F> + Copy>(rho: D) -> D {
    rho.powf(F::constant(5.0 / 3.0)) * F::constant(THOMAS_FERMI)
}

/// Wigner-Seitz radius (3 / (4πρ))^(1/3)
#[inline]
pub(crate) fn wigner_seitz_radius<F: XcFloat, D: DualNum<F> + Copy>(rho: D) -> D {
    (rho.recip() * F::constant(WIGNER_SEITZ)).cbrt()
}

/// Dirac-Slater exchange (`lda_x`)
#[derive(Debug, Clone, PartialEq)]
pub struct LdaExchange<F> {
    identifier: Identifier,
    _marker: PhantomData<F>,
}

impl<F: XcFloat> LdaExchange<F> {
    pub fn new() -> Self {
        Self {
            identifier: Identifier::from_static("lda_x"),
            _marker: PhantomData,
        }
    }
}

impl<F: XcFloat> Default for LdaExchange<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: XcFloat> Functional<F> for LdaExchange<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Lda
    }

    fn kind(&self) -> Kind {
        Kind::Exchange
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::empty()
    }

    fn rebuild(&self, _parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self {
            identifier,
            _marker: PhantomData,
        })
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        slater_exchange::<F, D>(point.rho)
    }
}

/// Coefficients of the Perdew-Wang 1992 correlation energy per particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pw92Parameters<F> {
    pub a: F,
    pub alpha1: F,
    pub beta1: F,
    pub beta2: F,
    pub beta3: F,
    pub beta4: F,
}

impl<F: XcFloat> Pw92Parameters<F> {
    /// Unpolarized coefficients as used by libxc's `lda_c_pw`
    pub fn unpolarized() -> Self {
        Self {
            a: F::constant(0.031091),
            alpha1: F::constant(0.21370),
            beta1: F::constant(7.5957),
            beta2: F::constant(3.5876),
            beta3: F::constant(1.6382),
            beta4: F::constant(0.49294),
        }
    }

    fn to_parameters(self) -> Parameters<F> {
        Parameters::new([
            ("a", self.a),
            ("alpha1", self.alpha1),
            ("beta1", self.beta1),
            ("beta2", self.beta2),
            ("beta3", self.beta3),
            ("beta4", self.beta4),
        ])
    }

    fn from_parameters(parameters: &Parameters<F>) -> Result<Self> {
        Ok(Self {
            a: parameters.require("a")?,
            alpha1: parameters.require("alpha1")?,
            beta1: parameters.require("beta1")?,
            beta2: parameters.require("beta2")?,
            beta3: parameters.require("beta3")?,
            beta4: parameters.require("beta4")?,
        })
    }
}

/// PW92 correlation energy per particle
///
/// ε_c = -2A (1 + α₁ r_s) ln(1 + 1 / (2A (β₁ r_s^½ + β₂ r_s + β₃ r_s^(3/2) + β₄ r_s²)))
pub(crate) fn pw92_epsilon<F: XcFloat, D: DualNum<F> + Copy>(
    rs: D,
    p: &Pw92Parameters<F>,
) -> D {
    let two_a = p.a * F::constant(2.0);
    let sqrt_rs = rs.sqrt();
    let series = sqrt_rs * p.beta1 + rs * p.beta2 + rs * sqrt_rs * p.beta3 + rs * rs * p.beta4;
    let log = ((series * two_a).recip() + F::one()).ln();
    -((rs * p.alpha1 + F::one()) * log * two_a)
}

/// Perdew-Wang 1992 correlation (`lda_c_pw`)
#[derive(Debug, Clone, PartialEq)]
pub struct LdaCorrelationPw<F> {
    identifier: Identifier,
    coefficients: Pw92Parameters<F>,
}

impl<F: XcFloat> LdaCorrelationPw<F> {
    pub fn new() -> Self {
        Self {
            identifier: Identifier::from_static("lda_c_pw"),
            coefficients: Pw92Parameters::unpolarized(),
        }
    }
}

impl<F: XcFloat> Default for LdaCorrelationPw<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: XcFloat> Functional<F> for LdaCorrelationPw<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Lda
    }

    fn kind(&self) -> Kind {
        Kind::Correlation
    }

    fn parameters(&self) -> Parameters<F> {
        self.coefficients.to_parameters()
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self {
            identifier,
            coefficients: Pw92Parameters::from_parameters(parameters)?,
        })
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let rs = wigner_seitz_radius::<F, D>(point.rho);
        point.rho * pw92_epsilon(rs, &self.coefficients)
    }
}

/// Thomas-Fermi kinetic energy (`lda_k_tf`)
#[derive(Debug, Clone, PartialEq)]
pub struct ThomasFermiKinetic<F> {
    identifier: Identifier,
    _marker: PhantomData<F>,
}

impl<F: XcFloat> ThomasFermiKinetic<F> {
    pub fn new() -> Self {
        Self {
            identifier: Identifier::from_static("lda_k_tf"),
            _marker: PhantomData,
        }
    }
}

impl<F: XcFloat> Default for ThomasFermiKinetic<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: XcFloat> Functional<F> for ThomasFermiKinetic<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Lda
    }

    fn kind(&self) -> Kind {
        Kind::Kinetic
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::empty()
    }

    fn rebuild(&self, _parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        Ok(Self {
            identifier,
            _marker: PhantomData,
        })
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        thomas_fermi::<F, D>(point.rho)
    }
}

/// Goedecker-Teter-Hutter rational fit of exchange-correlation (`lda_xc_teter93`)
///
/// ε_xc = -(a₀ + a₁ r_s + a₂ r_s² + a₃ r_s³) / (b₁ r_s + b₂ r_s² + b₃ r_s³ + b₄ r_s⁴)
#[derive(Debug, Clone, PartialEq)]
pub struct Teter93<F> {
    identifier: Identifier,
    a: [F; 4],
    b: [F; 4],
}

const TETER93_A: [f64; 4] = [
    0.4581652932831429,
    2.217058676663745,
    0.7405551735357053,
    0.01968227878617998,
];
const TETER93_B: [f64; 4] = [
    1.0,
    4.504130959426697,
    1.110667363742916,
    0.02359291751427506,
];
const TETER93_A_NAMES: [&str; 4] = ["a0", "a1", "a2", "a3"];
const TETER93_B_NAMES: [&str; 4] = ["b1", "b2", "b3", "b4"];

impl<F: XcFloat> Teter93<F> {
    pub fn new() -> Self {
        Self {
            identifier: Identifier::from_static("lda_xc_teter93"),
            a: TETER93_A.map(F::constant),
            b: TETER93_B.map(F::constant),
        }
    }
}

impl<F: XcFloat> Default for Teter93<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: XcFloat> Functional<F> for Teter93<F> {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn family(&self) -> Family {
        Family::Lda
    }

    fn kind(&self) -> Kind {
        Kind::ExchangeCorrelation
    }

    fn parameters(&self) -> Parameters<F> {
        Parameters::new(
            TETER93_A_NAMES
                .into_iter()
                .zip(self.a)
                .chain(TETER93_B_NAMES.into_iter().zip(self.b)),
        )
    }

    fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
        let mut a = self.a;
        let mut b = self.b;
        for (slot, name) in a.iter_mut().zip(TETER93_A_NAMES) {
            *slot = parameters.require(name)?;
        }
        for (slot, name) in b.iter_mut().zip(TETER93_B_NAMES) {
            *slot = parameters.require(name)?;
        }
        Ok(Self { identifier, a, b })
    }

    fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
        let rs = wigner_seitz_radius::<F, D>(point.rho);
        let [a0, a1, a2, a3] = self.a;
        let [b1, b2, b3, b4] = self.b;
        let numerator = ((rs * a3 + a2) * rs + a1) * rs + a0;
        let denominator = (((rs * b4 + b3) * rs + b2) * rs + b1) * rs;
        -(point.rho * numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(rho: f64) -> PointInput<f64> {
        PointInput::from_variables(&[rho], 0.0)
    }

    #[test]
    fn test_slater_exchange_value() {
        let e = LdaExchange::<f64>::new().energy(&point(1.0));
        assert_relative_eq!(e, -0.75 * (3.0 / std::f64::consts::PI).cbrt(), max_relative = 1e-14);
    }

    #[test]
    fn test_pw92_reference_values() {
        // ε_c(r_s = 1) and ε_c(r_s = 2) of the unpolarized electron gas
        let functional = LdaCorrelationPw::<f64>::new();
        for (rs, reference) in [(1.0, -0.0597739), (2.0, -0.0447596)] {
            let rho = WIGNER_SEITZ / f64::powi(rs, 3);
            let epsilon = functional.energy(&point(rho)) / rho;
            assert_relative_eq!(epsilon, reference, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_teter93_close_to_slater_plus_pw92() {
        let rho = 0.2;
        let teter = Teter93::<f64>::new().energy(&point(rho));
        let separate = LdaExchange::<f64>::new().energy(&point(rho))
            + LdaCorrelationPw::<f64>::new().energy(&point(rho));
        assert_relative_eq!(teter, separate, max_relative = 5e-3);
    }

    #[test]
    fn test_teter93_parameters_round_trip() {
        let functional = Teter93::<f64>::new();
        let params = functional.parameters();
        assert_eq!(params.len(), 8);
        assert_eq!(params.get("b1"), Some(1.0));
        let rebuilt = functional.change_parameters_keep_identifier(&params).unwrap();
        assert_eq!(rebuilt, functional);
    }

    #[test]
    fn test_thomas_fermi_scaling() {
        let functional = ThomasFermiKinetic::<f64>::new();
        let ratio = functional.energy(&point(2.0)) / functional.energy(&point(1.0));
        assert_relative_eq!(ratio, f64::powf(2.0, 5.0 / 3.0), max_relative = 1e-14);
    }
}
