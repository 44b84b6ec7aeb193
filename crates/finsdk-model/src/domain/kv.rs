use serde::{Deserialize, Serialize};

/// A single configuration entry parsed from the line format.
///
/// Both halves are plain UTF-8 strings kept exactly as they appeared in the
/// source line: no trimming, no type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    /// Text before the first colon of the line.
    key: String,
    /// Text after the first colon of the line.
    value: String,
}

impl KeyValue {
    /// Create a new key–value pair.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume the pair, yielding owned halves.
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl From<(String, String)> for KeyValue {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for KeyValue {
    fn from((key, value): (&str, &str)) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::KeyValue;

    #[test]
    fn new_sets_key_and_value() {
        let kv = KeyValue::new("endpoint", "http://localhost");
        assert_eq!(kv.key(), "endpoint");
        assert_eq!(kv.value(), "http://localhost");
    }

    #[test]
    fn whitespace_is_preserved_verbatim() {
        let kv = KeyValue::new("key ", " value");
        assert_eq!(kv.key(), "key ");
        assert_eq!(kv.value(), " value");
    }

    #[test]
    fn into_parts_returns_owned_halves() {
        let (k, v) = KeyValue::new("a", "1").into_parts();
        assert_eq!(k, "a");
        assert_eq!(v, "1");
    }

    #[test]
    fn from_tuples_create_equal_pairs() {
        let a: KeyValue = ("a", "1").into();
        let b: KeyValue = (String::from("a"), String::from("1")).into();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip_json() {
        let kv = KeyValue::new("mode", "debug");
        let json = serde_json::to_string(&kv).unwrap();
        assert!(json.contains("\"key\":\"mode\""));
        assert!(json.contains("\"value\":\"debug\""));

        let back: KeyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kv);
    }
}
