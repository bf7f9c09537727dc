//! Order Metadata
//!
//! Turns the free-form "Custom Metadata" textarea into the flat key/value
//! mapping attached to a client session. The payment provider uses these keys
//! for scenario control in the sandbox (e.g. `scenario=PAYPAL`).
//!
//! ## Format
//!
//! ```text
//! scenario = PAYPAL      →  "scenario": "PAYPAL"
//! count=3                →  "count": 3
//! ratio=0.25             →  "ratio": 0.25
//! redirect=a=b           →  "redirect": "a=b"
//! bad line               →  (ignored)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single metadata value: numeric-looking input becomes a JSON number
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Number(serde_json::Number),
    Text(String),
}

impl MetadataValue {
    /// Classify a trimmed value
    fn from_trimmed(raw: &str) -> Self {
        let looks_integral = !raw.contains(['.', 'e', 'E']);

        if looks_integral {
            if let Ok(n) = raw.parse::<i64>() {
                return Self::Number(n.into());
            }
        }

        // f64 parsing also accepts "inf" and "NaN", which stay text
        raw.parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or_else(|| Self::Text(raw.to_string()), Self::Number)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            Self::Text(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

/// Flat key/value metadata, serialized as a JSON object
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse newline-delimited `key=value` text into [`Metadata`].
///
/// Each line is split at its first `=`; key and value are trimmed. Lines with
/// no `=`, an empty key or an empty value are skipped. Later duplicates win.
/// Never fails.
pub fn parse_metadata(text: &str) -> Metadata {
    let mut metadata = Metadata::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }

        metadata.insert(key, MetadataValue::from_trimmed(value));
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_lines() {
        let metadata = parse_metadata("scenario=PAYPAL\ncount=3\nbad line");

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("scenario"), Some(&MetadataValue::from("PAYPAL")));
        assert_eq!(metadata.get("count"), Some(&MetadataValue::from(3)));
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            serde_json::json!({ "scenario": "PAYPAL", "count": 3 })
        );
    }

    #[test]
    fn test_trims_keys_and_values() {
        let metadata = parse_metadata("  scenario  =   CARD \r\n");
        assert_eq!(metadata.get("scenario").and_then(MetadataValue::as_str), Some("CARD"));
    }

    #[test]
    fn test_skips_malformed_lines() {
        let metadata = parse_metadata("no separator\n=orphan value\n   = x\nempty=\n\n");
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        let metadata = parse_metadata("int=42\nneg=-7\nfloat=0.25\nexp=1e3\nplus=+5");

        assert_eq!(metadata.get("int").and_then(MetadataValue::as_i64), Some(42));
        assert_eq!(metadata.get("neg").and_then(MetadataValue::as_i64), Some(-7));
        assert_eq!(metadata.get("float").and_then(MetadataValue::as_f64), Some(0.25));
        assert_eq!(metadata.get("exp").and_then(MetadataValue::as_f64), Some(1000.0));
        assert_eq!(metadata.get("plus").and_then(MetadataValue::as_i64), Some(5));
    }

    #[test]
    fn test_non_finite_values_stay_text() {
        let metadata = parse_metadata("a=NaN\nb=inf\nc=12abc");

        assert_eq!(metadata.get("a").and_then(MetadataValue::as_str), Some("NaN"));
        assert_eq!(metadata.get("b").and_then(MetadataValue::as_str), Some("inf"));
        assert_eq!(metadata.get("c").and_then(MetadataValue::as_str), Some("12abc"));
    }

    #[test]
    fn test_value_keeps_text_after_first_separator() {
        let metadata = parse_metadata("redirect=https://example.com/?a=1&b=2");
        assert_eq!(
            metadata.get("redirect").and_then(MetadataValue::as_str),
            Some("https://example.com/?a=1&b=2")
        );
    }

    #[test]
    fn test_last_duplicate_wins() {
        let metadata = parse_metadata("scenario=CARD\nscenario=PAYPAL");
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("scenario").and_then(MetadataValue::as_str), Some("PAYPAL"));
    }

    #[test]
    fn test_empty_text_is_empty_object() {
        let metadata = parse_metadata("");
        assert_eq!(serde_json::to_value(&metadata).unwrap(), serde_json::json!({}));
    }
}
