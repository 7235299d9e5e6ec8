//! Opaque parameter bag passed to step execution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named options handed to a step.
///
/// The engine never looks inside; it only stores, clones and forwards the
/// value. An empty bag stands in for "no parameters supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter bag
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add an option
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert an option, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up an option
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up an integer option
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Look up a string option
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Number of options
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no options are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Params {
    type Error = Value;

    /// Only JSON objects become parameters; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_new_is_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params, Params::default());
    }

    #[test]
    fn test_params_with() {
        let params = Params::new().with("x", 1).with("label", "alpha");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get_i64("x"), Some(1));
        assert_eq!(params.get_str("label"), Some("alpha"));
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_params_insert_replaces() {
        let mut params = Params::new().with("a", 1);
        let old = params.insert("a", 2);
        assert_eq!(old, Some(json!(1)));
        assert_eq!(params.get_i64("a"), Some(2));
    }

    #[test]
    fn test_params_try_from_value() {
        let params = Params::try_from(json!({"y": 2})).unwrap();
        assert_eq!(params.get_i64("y"), Some(2));

        let rejected = Params::try_from(json!([1, 2]));
        assert_eq!(rejected, Err(json!([1, 2])));
    }

    #[test]
    fn test_params_serializes_as_plain_object() {
        let params = Params::new().with("y", 2);
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"y": 2}));
    }

    #[test]
    fn test_params_from_iter() {
        let params: Params = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(params.into_value(), json!({"a": 1, "b": 2}));
    }
}
