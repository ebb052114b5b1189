//! Input parameter specs, input maps, and named formula results.
//!
//! A `ParamSpec` is the static declaration of one scalar input (unit label,
//! valid range, default). `Inputs` is the immutable name → value mapping for
//! a single evaluation. `FormulaResult` is the ordered set of named outputs
//! an evaluator produces.

use crate::error::{EvalError, EvalResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static declaration of one scalar input.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamSpec {
    pub const fn new(name: &'static str, unit: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            unit,
            min,
            max,
            default,
        }
    }

    /// Validate a supplied value against the declared range.
    pub fn check(&self, value: f64) -> EvalResult<f64> {
        if !value.is_finite() {
            return Err(EvalError::NonFinite {
                what: "parameter value",
                value,
            });
        }
        if value < self.min || value > self.max {
            return Err(EvalError::OutOfRange {
                name: self.name.to_string(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// Immutable name → value mapping for one evaluation.
///
/// BTreeMap keeps iteration deterministic, which matters for logging and
/// repeatable exports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs(BTreeMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> EvalResult<f64> {
        self.0.get(name).copied().ok_or_else(|| EvalError::MissingParam {
            name: name.to_string(),
        })
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.0.get(name).copied().unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One named output with its unit label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultValue {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

/// Ordered named outputs of one evaluation. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    values: Vec<ResultValue>,
}

impl FormulaResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        self.push(name, value, unit);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: f64, unit: impl Into<String>) {
        self.values.push(ResultValue {
            name: name.into(),
            value,
            unit: unit.into(),
        });
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }

    pub fn values(&self) -> &[ResultValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
