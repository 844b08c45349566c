/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # dft-functionals
//!
//! Evaluation of density-functional-theory exchange-correlation (and kinetic) energy
//! functionals on batches of grid points.
//!
//! A functional supplies one scalar energy expression per point. The evaluation pipeline
//! selects the inputs its family needs, applies the threshold policy and differentiates the
//! expression with forward-mode dual numbers to produce the potential and kernel terms.
//!
//! ```no_run
//! use dft_functionals::catalogue::functional_from_identifier;
//! use dft_functionals::evaluation::{potential_terms, GridBatch};
//! use ndarray::array;
//!
//! let pbe = functional_from_identifier::<f64>("gga_x_pbe")?;
//! let rho = array![[0.5, 1.0]];
//! let sigma = array![[0.1, 0.0]];
//! let terms = potential_terms(&pbe, &GridBatch::gga(rho.view(), sigma.view()))?;
//! println!("{:?}", terms.v_rho);
//! # Ok::<(), dft_functionals::functional::FunctionalError>(())
//! ```

pub mod catalogue;
pub mod config;
pub mod evaluation;
pub mod functional;
pub mod utils;

pub use catalogue::{available_identifiers, functional_from_identifier, AnyFunctional};
pub use config::EvaluationConfig;
pub use evaluation::{
    kernel_terms, kernel_terms_with, potential_terms, potential_terms_with,
    promoted_kernel_terms, promoted_potential_terms, GridBatch, KernelTerms, PotentialTerms,
};
pub use functional::{
    change_parameters, Family, Functional, FunctionalError, Identifier, Kind, Parameters,
    PointInput, Quantity, Thresholds,
};
pub use utils::{NumericType, Promote, Promoted, XcFloat};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
