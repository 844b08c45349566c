/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Concrete functionals and the identifier registry
//!
//! Every preset of the catalogue is reachable by its libxc-style identifier through
//! [`functional_from_identifier`], which returns the closed [`AnyFunctional`] union. The
//! concrete types can also be used directly.

pub mod gga;
pub mod lda;
pub mod mgga;

pub use gga::{
    pbe_beta_from_mu, pbe_mu_from_beta, Lb94Potential, PbeCorrelation, PbeExchange,
    ThomasFermiWeizsaecker,
};
pub use lda::{LdaCorrelationPw, LdaExchange, Pw92Parameters, Teter93, ThomasFermiKinetic};
pub use mgga::{MvsExchange, PgslKinetic};

use crate::evaluation::{FamilyInputs, PotentialTerms};
use crate::functional::{
    Family, Functional, FunctionalError, Identifier, Kind, Parameters, PointInput, Result,
    Thresholds,
};
use crate::utils::constants::THREE_PI_SQUARED_TWO_THIRDS;
use crate::utils::XcFloat;
use log::debug;
use num_dual::DualNum;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Squared reduced gradient s² = σ / (4 (3π²)^(2/3) ρ^(8/3))
#[inline]
pub(crate) fn reduced_gradient_squared<F: XcFloat, D: DualNum<F> + Copy>(rho: D, sigma: D) -> D {
    sigma / (rho.powf(F::constant(8.0 / 3.0)) * F::constant(4.0 * THREE_PI_SQUARED_TWO_THIRDS))
}

/// Reduced Laplacian q = Δρ / (4 (3π²)^(2/3) ρ^(5/3))
#[inline]
pub(crate) fn reduced_laplacian<F: XcFloat, D: DualNum<F> + Copy>(rho: D, lapl: D) -> D {
    lapl / (rho.powf(F::constant(5.0 / 3.0)) * F::constant(4.0 * THREE_PI_SQUARED_TWO_THIRDS))
}

macro_rules! any_functional {
    ($($variant:ident => $preset:ident),* $(,)?) => {
        /// Any functional of the catalogue
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyFunctional<F> {
            $($variant($variant<F>),)*
        }

        $(
            impl<F> From<$variant<F>> for AnyFunctional<F> {
                fn from(functional: $variant<F>) -> Self {
                    AnyFunctional::$variant(functional)
                }
            }
        )*

        impl<F: XcFloat> AnyFunctional<F> {
            /// The same functional with identifier and parameters carried over to `G`
            pub fn cast<G: XcFloat>(&self) -> Result<AnyFunctional<G>> {
                let parameters = self.parameters().cast::<G>();
                let identifier = self.identifier().clone();
                match self {
                    $(AnyFunctional::$variant(_) => $variant::<G>::$preset()
                        .rebuild(&parameters, identifier)
                        .map(AnyFunctional::$variant),)*
                }
            }
        }

        impl<F: XcFloat> Functional<F> for AnyFunctional<F> {
            fn identifier(&self) -> &Identifier {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.identifier(),)*
                }
            }

            fn family(&self) -> Family {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.family(),)*
                }
            }

            fn kind(&self) -> Kind {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.kind(),)*
                }
            }

            fn has_energy(&self) -> bool {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.has_energy(),)*
                }
            }

            fn thresholds(&self) -> Thresholds<F> {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.thresholds(),)*
                }
            }

            fn parameters(&self) -> Parameters<F> {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.parameters(),)*
                }
            }

            fn rebuild(&self, parameters: &Parameters<F>, identifier: Identifier) -> Result<Self> {
                match self {
                    $(AnyFunctional::$variant(functional) => functional
                        .rebuild(parameters, identifier)
                        .map(AnyFunctional::$variant),)*
                }
            }

            fn energy<D: DualNum<F> + Copy>(&self, point: &PointInput<D>) -> D {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.energy(point),)*
                }
            }

            fn custom_potential_terms(
                &self,
                inputs: &FamilyInputs<'_, F>,
            ) -> Option<Result<PotentialTerms<F>>> {
                match self {
                    $(AnyFunctional::$variant(functional) => functional.custom_potential_terms(inputs),)*
                }
            }
        }
    };
}

any_functional!(
    LdaExchange => new,
    LdaCorrelationPw => new,
    ThomasFermiKinetic => new,
    Teter93 => new,
    PbeExchange => pbe,
    PbeCorrelation => pbe,
    ThomasFermiWeizsaecker => tfvw,
    Lb94Potential => new,
    MvsExchange => new,
    PgslKinetic => pgsl025,
);

/// Named parametrizations known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preset {
    LdaX,
    LdaCPw,
    LdaKTf,
    LdaXcTeter93,
    GgaXPbe,
    GgaXPbeSol,
    GgaXRevPbe,
    GgaXApbe,
    GgaXXpbe,
    GgaCPbe,
    GgaCPbeSol,
    GgaKTfvw,
    GgaKGe2,
    GgaXLb,
    MggaXMvs,
    MggaKPgsl025,
}

impl Preset {
    fn build<F: XcFloat>(self) -> AnyFunctional<F> {
        match self {
            Preset::LdaX => LdaExchange::new().into(),
            Preset::LdaCPw => LdaCorrelationPw::new().into(),
            Preset::LdaKTf => ThomasFermiKinetic::new().into(),
            Preset::LdaXcTeter93 => Teter93::new().into(),
            Preset::GgaXPbe => PbeExchange::pbe().into(),
            Preset::GgaXPbeSol => PbeExchange::pbe_sol().into(),
            Preset::GgaXRevPbe => PbeExchange::revpbe().into(),
            Preset::GgaXApbe => PbeExchange::apbe().into(),
            Preset::GgaXXpbe => PbeExchange::xpbe().into(),
            Preset::GgaCPbe => PbeCorrelation::pbe().into(),
            Preset::GgaCPbeSol => PbeCorrelation::pbe_sol().into(),
            Preset::GgaKTfvw => ThomasFermiWeizsaecker::tfvw().into(),
            Preset::GgaKGe2 => ThomasFermiWeizsaecker::ge2().into(),
            Preset::GgaXLb => Lb94Potential::new().into(),
            Preset::MggaXMvs => MvsExchange::new().into(),
            Preset::MggaKPgsl025 => PgslKinetic::pgsl025().into(),
        }
    }
}

static REGISTRY: Lazy<BTreeMap<&'static str, Preset>> = Lazy::new(|| {
    BTreeMap::from([
        ("lda_x", Preset::LdaX),
        ("lda_c_pw", Preset::LdaCPw),
        ("lda_k_tf", Preset::LdaKTf),
        ("lda_xc_teter93", Preset::LdaXcTeter93),
        ("gga_x_pbe", Preset::GgaXPbe),
        ("gga_x_pbe_sol", Preset::GgaXPbeSol),
        ("gga_x_revpbe", Preset::GgaXRevPbe),
        ("gga_x_apbe", Preset::GgaXApbe),
        ("gga_x_xpbe", Preset::GgaXXpbe),
        ("gga_c_pbe", Preset::GgaCPbe),
        ("gga_c_pbe_sol", Preset::GgaCPbeSol),
        ("gga_k_tfvw", Preset::GgaKTfvw),
        ("gga_k_ge2", Preset::GgaKGe2),
        ("gga_x_lb", Preset::GgaXLb),
        ("mgga_x_mvs", Preset::MggaXMvs),
        ("mgga_k_pgsl025", Preset::MggaKPgsl025),
    ])
});

/// Instantiate the preset registered under `name`
pub fn functional_from_identifier<F: XcFloat>(name: &str) -> Result<AnyFunctional<F>> {
    let preset = REGISTRY
        .get(name)
        .ok_or_else(|| FunctionalError::UnknownIdentifier(name.to_string()))?;
    let functional = preset.build::<F>();
    debug!(
        "created '{}' ({} {}, {} parameters)",
        name,
        functional.family(),
        functional.kind(),
        F::NUMERIC_TYPE
    );
    Ok(functional)
}

/// All registered identifiers in lexicographic order
pub fn available_identifiers() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

/// Registered identifiers of one family
pub fn identifiers_of_family(family: Family) -> Vec<&'static str> {
    REGISTRY
        .iter()
        .filter(|(_, preset)| preset.build::<f64>().family() == family)
        .map(|(&name, _)| name)
        .collect()
}
