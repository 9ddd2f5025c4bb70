//! Placeholder Interpolation
//!
//! Rewrites `{name}` placeholders in a message using a parameter map.

use crate::catalog::Catalog;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

/// Value substituted for a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Explicit null; the placeholder is left untouched
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    /// Textual form used for substitution, `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ParamValue::Null => None,
            ParamValue::Bool(b) => Some(b.to_string()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::Float(n) => Some(format_float(*n)),
            ParamValue::String(s) => Some(s.clone()),
        }
    }
}

/// Render a float like JavaScript's `String(number)`: exponent notation
/// below `1e-6` and from `1e21` up, `Infinity` for infinities.
fn format_float(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(n as i64)
    }
}

impl From<usize> for ParamValue {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(ParamValue::Float(n as f64), ParamValue::Int)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Float(n)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Int(i),
                None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ParamValue::String(s),
            other => ParamValue::String(other.to_string()),
        }
    }
}

/// Named parameters for a message.
///
/// # Example
///
/// ```
/// use armature_intl::{Params, interpolate};
///
/// let params = Params::new().with("name", "John").with("count", 3);
/// assert_eq!(interpolate("{name} has {count} items", Some(&params)), "John has 3 items");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, ParamValue>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Params {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Substitute `{name}` placeholders in a single, non-recursive pass.
///
/// Placeholders without a value, or whose value is null, are kept as is.
pub fn interpolate(template: &str, params: Option<&Params>) -> String {
    let Some(params) = params.filter(|p| !p.is_empty()) else {
        return template.to_string();
    };

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            params
                .get(&caps[1])
                .and_then(ParamValue::to_text)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolve a key against a catalog and interpolate it.
///
/// Unresolved keys come back unchanged.
pub fn translate(catalog: &Catalog, key: &str, params: Option<&Params>) -> String {
    interpolate(catalog.resolve(None, key).value(), params)
}
