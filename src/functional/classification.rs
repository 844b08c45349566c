/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Family and kind tags of a functional and the physical quantities they imply

use super::errors::{FunctionalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which derivatives of the density a formula depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Local density approximation: ρ
    Lda,
    /// Generalized gradient approximation: ρ, σ
    Gga,
    /// Meta-GGA: ρ, σ, τ
    MetaGga,
    /// Meta-GGA depending on the Laplacian: ρ, σ, τ, Δρ
    MetaGgaLaplacian,
}

/// Role of a functional in the total energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Exchange,
    Correlation,
    Kinetic,
    /// Combined exchange-correlation
    ExchangeCorrelation,
}

/// Physical per-point input of a functional
///
/// The declaration order is the canonical order of the differentiation variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Electron density ρ
    Density,
    /// Squared density gradient σ = ∇ρ·∇ρ
    GradientSquared,
    /// Kinetic-energy density τ
    KineticDensity,
    /// Laplacian of the density Δρ
    Laplacian,
}

const LDA_QUANTITIES: [Quantity; 1] = [Quantity::Density];
const GGA_QUANTITIES: [Quantity; 2] = [Quantity::Density, Quantity::GradientSquared];
const MGGA_QUANTITIES: [Quantity; 3] = [
    Quantity::Density,
    Quantity::GradientSquared,
    Quantity::KineticDensity,
];
const MGGAL_QUANTITIES: [Quantity; 4] = [
    Quantity::Density,
    Quantity::GradientSquared,
    Quantity::KineticDensity,
    Quantity::Laplacian,
];

impl Family {
    /// Whether σ is an input
    pub fn needs_gradient_squared(&self) -> bool {
        matches!(
            self,
            Family::Gga | Family::MetaGga | Family::MetaGgaLaplacian
        )
    }

    /// Whether τ is an input
    pub fn needs_kinetic_density(&self) -> bool {
        matches!(self, Family::MetaGga | Family::MetaGgaLaplacian)
    }

    /// Whether Δρ is an input
    pub fn needs_laplacian(&self) -> bool {
        matches!(self, Family::MetaGgaLaplacian)
    }

    /// Required quantities in differentiation order
    pub fn quantities(&self) -> &'static [Quantity] {
        match self {
            Family::Lda => &LDA_QUANTITIES,
            Family::Gga => &GGA_QUANTITIES,
            Family::MetaGga => &MGGA_QUANTITIES,
            Family::MetaGgaLaplacian => &MGGAL_QUANTITIES,
        }
    }

    /// Whether `quantity` is an input of this family
    pub fn needs(&self, quantity: Quantity) -> bool {
        match quantity {
            Quantity::Density => true,
            Quantity::GradientSquared => self.needs_gradient_squared(),
            Quantity::KineticDensity => self.needs_kinetic_density(),
            Quantity::Laplacian => self.needs_laplacian(),
        }
    }

    /// Short tag used in catalogue identifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Lda => "lda",
            Family::Gga => "gga",
            Family::MetaGga => "mgga",
            Family::MetaGgaLaplacian => "mggal",
        }
    }
}

impl Kind {
    /// Short tag used in catalogue identifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Exchange => "x",
            Kind::Correlation => "c",
            Kind::Kinetic => "k",
            Kind::ExchangeCorrelation => "xc",
        }
    }
}

impl Quantity {
    /// Symbol used in term names (`Vρ`, `Vρσ`, ...)
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::Density => "ρ",
            Quantity::GradientSquared => "σ",
            Quantity::KineticDensity => "τ",
            Quantity::Laplacian => "l",
        }
    }

    /// Position of this quantity among the differentiation variables
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Name of the first-derivative term, e.g. `Vσ`
    pub fn potential_name(&self) -> String {
        format!("V{}", self.symbol())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Family {
    type Err = FunctionalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lda" => Ok(Family::Lda),
            "gga" => Ok(Family::Gga),
            "mgga" | "meta-gga" => Ok(Family::MetaGga),
            "mggal" | "meta-gga-laplacian" => Ok(Family::MetaGgaLaplacian),
            _ => Err(FunctionalError::UnknownIdentifier(format!(
                "unknown functional family: {}",
                s
            ))),
        }
    }
}

impl FromStr for Kind {
    type Err = FunctionalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "x" | "exchange" => Ok(Kind::Exchange),
            "c" | "correlation" => Ok(Kind::Correlation),
            "k" | "kinetic" => Ok(Kind::Kinetic),
            "xc" | "exchange-correlation" => Ok(Kind::ExchangeCorrelation),
            _ => Err(FunctionalError::UnknownIdentifier(format!(
                "unknown functional kind: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_flags() {
        assert!(!Family::Lda.needs_gradient_squared());
        assert!(!Family::Lda.needs_kinetic_density());
        assert!(!Family::Lda.needs_laplacian());

        assert!(Family::Gga.needs_gradient_squared());
        assert!(!Family::Gga.needs_kinetic_density());
        assert!(!Family::Gga.needs_laplacian());

        assert!(Family::MetaGga.needs_gradient_squared());
        assert!(Family::MetaGga.needs_kinetic_density());
        assert!(!Family::MetaGga.needs_laplacian());

        assert!(Family::MetaGgaLaplacian.needs_gradient_squared());
        assert!(Family::MetaGgaLaplacian.needs_kinetic_density());
        assert!(Family::MetaGgaLaplacian.needs_laplacian());
    }

    #[test]
    fn test_quantities_agree_with_flags() {
        for family in [
            Family::Lda,
            Family::Gga,
            Family::MetaGga,
            Family::MetaGgaLaplacian,
        ] {
            let quantities = family.quantities();
            assert_eq!(quantities[0], Quantity::Density);
            for (position, quantity) in quantities.iter().enumerate() {
                assert_eq!(quantity.index(), position);
                assert!(family.needs(*quantity));
            }
            assert_eq!(
                quantities.len(),
                1 + family.needs_gradient_squared() as usize
                    + family.needs_kinetic_density() as usize
                    + family.needs_laplacian() as usize
            );
        }
    }

    #[test]
    fn test_tags_round_trip_through_strings() {
        assert_eq!("gga".parse::<Family>().unwrap(), Family::Gga);
        assert_eq!("MGGA".parse::<Family>().unwrap(), Family::MetaGga);
        assert_eq!("xc".parse::<Kind>().unwrap(), Kind::ExchangeCorrelation);
        assert!("hybrid".parse::<Family>().is_err());
        assert_eq!(Quantity::Laplacian.potential_name(), "Vl");
        assert_eq!(Quantity::Density.potential_name(), "Vρ");
    }
}
