/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Named, ordered parameter sets attached to a functional

use super::errors::{FunctionalError, Result};
use crate::utils::{convert, NumericType, XcFloat};
use serde::{Deserialize, Serialize};

/// Ordered mapping from parameter name to value
///
/// The names are fixed by the functional type; only values vary between instances.
/// Updating a value returns a new container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters<F> {
    entries: Vec<(String, F)>,
}

impl<F: XcFloat> Default for Parameters<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: XcFloat> Parameters<F> {
    /// Create a parameter set from `(name, value)` pairs
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, F)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Empty parameter set, for formulas without adjustable coefficients
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of a parameter by name
    pub fn get(&self, name: &str) -> Option<F> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| *value)
    }

    /// Value of a parameter the caller cannot do without
    pub fn require(&self, name: &str) -> Result<F> {
        self.get(name)
            .ok_or_else(|| FunctionalError::MissingParameter(name.to_string()))
    }

    /// Parameter names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Parameter values in order
    pub fn values(&self) -> Vec<F> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, F)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// Copy of this set with one value replaced (or appended if the name is new)
    pub fn with_value(&self, name: &str, value: F) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|(entry, _)| entry == name) {
            Some(entry) => entry.1 = value,
            None => entries.push((name.to_string(), value)),
        }
        Self { entries }
    }

    /// Element type of the values
    pub fn parameter_type(&self) -> NumericType {
        F::NUMERIC_TYPE
    }

    /// Convert every value to another floating type
    pub fn cast<G: XcFloat>(&self) -> Parameters<G> {
        Parameters {
            entries: self
                .entries
                .iter()
                .map(|(name, value)| (name.clone(), convert::<F, G>(*value)))
                .collect(),
        }
    }
}
