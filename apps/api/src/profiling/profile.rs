use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::profiling::schema::{self, TRAIT_SCHEMA};

/// Extracted mapping of trait name to rated, categorical, or descriptive value.
///
/// Returned exactly as the model produced it. `validate` reports how it differs
/// from the schema but never rejects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitProfile(Map<String, Value>);

/// A value that is present but does not match its trait's expected shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitMismatch {
    pub trait_name: String,
    pub expected: String,
    pub found: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Schema traits absent from the profile (or explicitly null).
    pub missing: Vec<String>,
    pub mismatched: Vec<TraitMismatch>,
    /// Keys the schema does not know about.
    pub unknown: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty() && self.unknown.is_empty()
    }
}

impl From<Map<String, Value>> for TraitProfile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TraitProfile {
    /// Integer value of a trait, if it is an integral JSON number.
    #[cfg(test)]
    pub fn scale(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(schema::integral)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Compares the profile against `TRAIT_SCHEMA`.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for spec in TRAIT_SCHEMA {
            match self.0.get(spec.name) {
                None | Some(Value::Null) => report.missing.push(spec.name.to_string()),
                Some(value) if !spec.accepts(value) => report.mismatched.push(TraitMismatch {
                    trait_name: spec.name.to_string(),
                    expected: spec.expected(),
                    found: value.clone(),
                }),
                Some(_) => {}
            }
        }

        report.unknown = self
            .0
            .keys()
            .filter(|key| schema::find(key).is_none())
            .cloned()
            .collect();

        report
    }
}
