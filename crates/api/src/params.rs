use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key/value arguments handed to a page right after it is created.
///
/// Values are opaque JSON values; the receiving page decides how to read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationParameters(BTreeMap<String, Value>);

impl NavigationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Reads an integer, accepting numeric strings as well.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Parses a `key=value` assignment as typed on a command line.
    ///
    /// The value is read as JSON when it parses (`id=42`, `active=true`) and
    /// kept as a plain string otherwise (`search=anna`).
    pub fn parse_assignment(input: &str) -> Result<(String, Value), String> {
        let (key, raw) = input
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{input}'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("empty parameter name in '{input}'"));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok((key.to_string(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for NavigationParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
