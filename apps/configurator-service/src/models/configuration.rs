//! User-selected configuration for one model.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration key holding the selected engine code.
pub const ENGINE: &str = "engine";
/// Configuration key holding the selected drivetrain code.
pub const DRIVETRAIN: &str = "drivetrain";
/// Configuration key holding the selected exterior color code.
pub const EXTERIOR_COLOR: &str = "exterior_color";
/// Configuration key holding the selected wheel code.
pub const WHEELS: &str = "wheels";
/// Configuration key holding the selected interior code.
pub const INTERIOR: &str = "interior";
/// Optional configuration key naming the model.
pub const MODEL: &str = "model";

/// Keys whose values are selection codes rather than flags.
pub const SELECTION_KEYS: [&str; 6] = [ENGINE, DRIVETRAIN, EXTERIOR_COLOR, WHEELS, INTERIOR, MODEL];

/// Ordered mapping from option keys to JSON values.
///
/// Selection keys (`engine`, `drivetrain`, ...) carry a code string; every
/// other key is a package or option flag evaluated by truthiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(BTreeMap<String, Value>);

impl Configuration {
    /// Empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, returning the configuration for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string value for a selection key.
    #[must_use]
    pub fn selection(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Whether the key is present with a truthy value.
    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(is_truthy)
    }

    /// All keys with truthy values, in key order.
    pub fn truthy_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, _)| k.as_str())
    }

    /// Truthy keys as a set.
    #[must_use]
    pub fn truthy_set(&self) -> BTreeSet<&str> {
        self.truthy_keys().collect()
    }

    /// Truthy keys that are flags rather than selection keys.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.truthy_keys().filter(|k| !SELECTION_KEYS.contains(k))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for Configuration {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

/// JSON truthiness: `false`, `null`, `""`, `0` and empty containers are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
