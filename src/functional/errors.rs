/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for functional evaluation

use super::classification::{Family, Quantity};
use thiserror::Error;

/// Result type for functional operations
pub type Result<T> = std::result::Result<T, FunctionalError>;

/// Error type for functional construction and evaluation
#[derive(Error, Debug)]
pub enum FunctionalError {
    /// An energy-requiring path was used on a functional without an energy expression
    #[error("Functional '{0}' provides no energy; it must be evaluated through a custom potential implementation")]
    MissingEnergy(String),

    /// The requested evaluation has no implementation yet
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The registry does not know the identifier
    #[error("Unknown functional identifier: {0}")]
    UnknownIdentifier(String),

    /// An input array required by the functional's family was not supplied
    #[error("{family} functionals require the {quantity} input")]
    MissingInput { family: Family, quantity: Quantity },

    /// Input arrays disagree in shape
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A parameter set lacks a value the functional needs
    #[error("Missing parameter '{0}'")]
    MissingParameter(String),
}
