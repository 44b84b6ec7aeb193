use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::KeyValue;

/// Flat string-to-string configuration map.
///
/// Keys are unique, last write wins, entries are never removed. Populated
/// incrementally via [`ConfigMap::merge_lines`] or [`ConfigMap::insert`].
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap(pub BTreeMap<String, String>);

impl ConfigMap {
    /// Create an empty configuration map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` if no entries are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or overwrite an entry.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), value.into());
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Iterate through all entries as `(&str, &str)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge line-oriented `key:value` text into the map.
    ///
    /// Each line is split at the first colon; the halves are kept untrimmed.
    /// Lines without a colon are skipped. Later entries overwrite earlier
    /// ones, within the input and against existing map contents alike.
    ///
    /// Returns the number of entries merged.
    pub fn merge_lines(&mut self, text: &str) -> usize {
        let mut merged = 0usize;
        let mut skipped = 0usize;

        for line in text.lines() {
            match parse_line(line) {
                Some(kv) => {
                    let (key, value) = kv.into_parts();
                    self.0.insert(key, value);
                    merged += 1;
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            trace!(merged, skipped, "config merge skipped lines without a colon");
        }
        merged
    }
}

/// Parse one `key:value` line.
///
/// Returns `None` for lines that contain no colon. An empty line is also
/// colonless and therefore skipped; `":v"` and `"k:"` are valid entries with
/// an empty key or value.
pub fn parse_line(line: &str) -> Option<KeyValue> {
    line.split_once(':').map(KeyValue::from)
}

#[cfg(test)]
mod tests {
    use super::{ConfigMap, parse_line};

    #[test]
    fn merge_last_write_wins_and_skips_malformed() {
        let mut cfg = ConfigMap::new();
        let merged = cfg.merge_lines("a:1\nb:2\nnoColonHere\na:3");

        assert_eq!(merged, 3);
        assert_eq!(cfg.len(), 2);
        assert_eq!(cfg.get("a"), Some("3"));
        assert_eq!(cfg.get("b"), Some("2"));
    }

    #[test]
    fn merge_splits_at_first_colon_only() {
        let mut cfg = ConfigMap::new();
        cfg.merge_lines("url:http://host:8080/path");
        assert_eq!(cfg.get("url"), Some("http://host:8080/path"));
    }

    #[test]
    fn merge_preserves_whitespace() {
        let mut cfg = ConfigMap::new();
        cfg.merge_lines("key : value ");
        assert_eq!(cfg.get("key "), Some(" value "));
        assert!(cfg.get("key").is_none());
    }

    #[test]
    fn merge_overwrites_existing_entries() {
        let mut cfg = ConfigMap::new();
        cfg.merge_lines("mode:fast");
        cfg.merge_lines("mode:safe");
        assert_eq!(cfg.get("mode"), Some("safe"));
        assert_eq!(cfg.len(), 1);
    }

    #[test]
    fn empty_key_or_value_are_accepted() {
        let mut cfg = ConfigMap::new();
        assert_eq!(cfg.merge_lines(":v\nk:"), 2);
        assert_eq!(cfg.get(""), Some("v"));
        assert_eq!(cfg.get("k"), Some(""));
    }

    #[test]
    fn parse_line_rejects_colonless_input() {
        assert!(parse_line("").is_none());
        assert!(parse_line("no colon here").is_none());
        let kv = parse_line("a:b").unwrap();
        assert_eq!(kv.key(), "a");
        assert_eq!(kv.value(), "b");
    }

    #[test]
    fn serde_transparent_roundtrip() {
        let mut cfg = ConfigMap::new();
        cfg.insert("a", "1");
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"a":"1"}"#);
        let back: ConfigMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
