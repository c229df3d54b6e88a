//! Variable values and the flat variable map used by substitution

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar variable value
///
/// Zero, the empty string, `false` and null are all *defined*; they are only
/// *falsy*. An undefined variable is represented by the absence of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl Value {
    /// Whether the value counts as set when deciding to substitute it
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Null => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Null => Ok(()),
        }
    }
}

/// Shortest decimal form of a number: `42`, `1.5`, `Infinity`
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Also folds negative zero.
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        // Exponent form with an explicit sign, as in `1e+21` or `1.5e-7`.
        let exponent = format!("{:e}", n);
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exponent,
        };
    }
    n.to_string()
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Flat mapping from dotted variable names to optional values
///
/// Keys are stored exactly as written. A key may be present while its value
/// is undefined (`None`), e.g. `contact.email` for a sender without email.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableMap {
    entries: BTreeMap<String, Option<Value>>,
}

impl VariableMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a defined value, replacing any previous entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Set a value that may be undefined, replacing any previous entry
    pub fn insert_optional(&mut self, key: impl Into<String>, value: Option<Value>) {
        self.entries.insert(key.into(), value);
    }

    /// Get the value for an exact key, `None` when undefined
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(|v| v.as_ref())
    }

    /// Whether the key has a value other than undefined
    pub fn is_defined(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the key has a truthy value
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).map(Value::is_truthy).unwrap_or(false)
    }

    /// Whether the key is present at all, even with an undefined value
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Render the value for a key, empty when undefined
    pub fn render(&self, key: &str) -> String {
        self.get(key).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Overlay another map; its entries win on identical keys
    pub fn merge(&mut self, other: VariableMap) {
        self.entries.extend(other.entries);
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = VariableMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for VariableMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::from("a").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from(3.0).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::from(true).is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::from(123456.0).to_string(), "123456");
        assert_eq!(Value::from(0.000001).to_string(), "0.000001");
    }

    #[test]
    fn test_display_exponent_form() {
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(-1.23e22).to_string(), "-1.23e+22");
        assert_eq!(Value::from(1e-7).to_string(), "1e-7");
        assert_eq!(Value::from(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_defined_vs_truthy() {
        let mut map = VariableMap::from([("zero", 0.0)]);
        map.insert("empty", "");
        map.insert_optional("missing", None);

        assert!(map.is_defined("zero"));
        assert!(!map.is_truthy("zero"));
        assert!(map.is_defined("empty"));
        assert!(!map.is_truthy("empty"));
        assert!(map.contains_key("missing"));
        assert!(!map.is_defined("missing"));
        assert!(!map.is_defined("absent"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let map = VariableMap::from([("Contact.Name", "Ann")]);
        assert!(map.is_defined("Contact.Name"));
        assert!(!map.is_defined("contact.name"));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut base = VariableMap::from([("a", "1"), ("b", "2")]);
        base.merge(VariableMap::from([("b", "3")]));
        assert_eq!(base.render("a"), "1");
        assert_eq!(base.render("b"), "3");
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_deserialize_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"["x", 7, true, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::from("x"),
                Value::from(7.0),
                Value::from(true),
                Value::Null
            ]
        );
    }
}
