use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed clinical value. `Unknown` is a first-class state and is never read
/// as zero or false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Number(f64),
    Flag(bool),
    Category(String),
    List(Vec<String>),
    Unknown { reason: Option<String> },
}

impl Value {
    pub fn unknown() -> Self {
        Value::Unknown { reason: None }
    }

    pub fn unknown_because(reason: impl Into<String>) -> Self {
        Value::Unknown {
            reason: Some(reason.into()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Value::Unknown { .. })
    }
}

/// A value the normalizer refused, kept so callers can see why a field reads
/// as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub field: String,
    pub reason: String,
}

/// Normalized findings for one request. Built once by the normalizer and only
/// read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    values: BTreeMap<String, Value>,
    #[serde(default)]
    rejections: Vec<Rejection>,
    #[serde(default)]
    derived: Vec<String>,
}

impl Findings {
    pub(crate) fn from_parts(
        values: BTreeMap<String, Value>,
        rejections: Vec<Rejection>,
        derived: Vec<String>,
    ) -> Self {
        Self {
            values,
            rejections,
            derived,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::is_known)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(Value::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn category(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::Category(c)) => Some(c.as_str()),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.get(name) {
            Some(Value::List(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn derived(&self) -> &[String] {
        &self.derived
    }
}
