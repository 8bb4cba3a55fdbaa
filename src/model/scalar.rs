// src/model/scalar.rs
use indexmap::IndexMap;
use serde::Serialize;

/// A flat record: field name to scalar cell, insertion order preserved.
pub type Record = IndexMap<String, Scalar>;

/// A single flattened cell value.
///
/// The property normalizer only ever produces `Text`, `Number`, or
/// `Null`; `Bool` carries pass-through fields from sources that already
/// speak scalars (GitHub's `locked`, `is_pr`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Renders the cell for CSV output. `Null` is an empty cell, and
    /// whole numbers drop the trailing `.0` so ids and counts read as
    /// integers.
    pub fn csv_field(&self) -> String {
        match self {
            Scalar::Text(text) => text.clone(),
            Scalar::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => String::new(),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<Option<String>> for Scalar {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => Scalar::Text(text),
            None => Scalar::Null,
        }
    }
}
