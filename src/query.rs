//! Query-parameter encoding.
//!
//! Options reach the wire through [`Query`], which names the shape of the
//! input explicitly:
//!
//! - [`Query::Raw`] - caller-supplied text, either a JSON object of string
//!   pairs or an already-encoded `key=value&key=value` string.
//! - [`Query::Record`] - any `Serialize` value, typically an options struct.
//! - [`Query::Map`] - a dynamic key/value map.
//!
//! Records and maps are flattened one level deep: keys are lower-cased,
//! strings pass through verbatim, numbers use their shortest decimal form,
//! and every other value is sent as its JSON text.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use url::form_urlencoded;

use crate::error::{HarborError, Result};

/// An ordered, multi-valued set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    inner: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`, keeping any values already present.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value recorded for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Flattened `(key, value)` pairs; a key with several values repeats.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Merge another set into this one, appending values per key.
    pub fn merge(&mut self, other: QueryParams) {
        for (key, values) in other.inner {
            self.inner.entry(key).or_default().extend(values);
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

/// An options value in one of the shapes the encoder understands.
#[derive(Debug, Clone)]
pub enum Query<'a> {
    /// JSON object text of string pairs, or `key=value&...` text.
    Raw(Cow<'a, str>),
    /// A serialized record. Non-object values encode to an empty set.
    Record(Value),
    /// A dynamic key/value map.
    Map(Map<String, Value>),
}

impl<'a> Query<'a> {
    /// Wrap caller-supplied query text.
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Raw(text.into())
    }

    /// Serialize a record (usually an options struct).
    ///
    /// # Errors
    ///
    /// Returns [`HarborError::EncodeJson`] if the value cannot be serialized.
    pub fn record<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Record)
            .map_err(HarborError::EncodeJson)
    }

    /// Build a dynamic map from key/value entries.
    ///
    /// # Errors
    ///
    /// Returns [`HarborError::EncodeJson`] if a value cannot be serialized.
    pub fn map<K, V, I>(entries: I) -> Result<Self>
    where
        K: Into<String>,
        V: Serialize,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Map::new();
        for (key, value) in entries {
            let value = serde_json::to_value(value).map_err(HarborError::EncodeJson)?;
            map.insert(key.into(), value);
        }
        Ok(Self::Map(map))
    }

    /// Encode into a parameter set. The input is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HarborError::Encode`] if raw text is neither a JSON object
    /// of string pairs nor a well-formed query string.
    pub fn encode(&self) -> Result<QueryParams> {
        match self {
            Self::Raw(text) => encode_raw(text),
            Self::Record(Value::Object(fields)) | Self::Map(fields) => Ok(encode_fields(fields)),
            Self::Record(_) => Ok(QueryParams::new()),
        }
    }
}

impl<'a> From<&'a str> for Query<'a> {
    fn from(text: &'a str) -> Self {
        Self::raw(text)
    }
}

impl From<String> for Query<'static> {
    fn from(text: String) -> Self {
        Self::raw(text)
    }
}

fn encode_fields(fields: &Map<String, Value>) -> QueryParams {
    fields
        .iter()
        .map(|(key, value)| (key.to_lowercase(), field_text(value)))
        .collect()
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

// Integers keep full precision; floats use Rust's shortest round-trip form,
// which never switches to exponent notation.
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

fn encode_raw(text: &str) -> Result<QueryParams> {
    // JSON `null` decodes to an empty set.
    if let Ok(pairs) = serde_json::from_str::<Option<BTreeMap<String, String>>>(text) {
        return Ok(pairs.unwrap_or_default().into_iter().collect());
    }

    validate_query_text(text)?;
    Ok(form_urlencoded::parse(text.as_bytes()).collect())
}

/// Reject text a strict query-string parser would refuse: `;` separators
/// and `%` escapes that are not followed by two hex digits.
fn validate_query_text(text: &str) -> Result<()> {
    for segment in text.split('&') {
        if segment.contains(';') {
            return Err(HarborError::Encode(format!(
                "invalid semicolon separator in query segment {segment:?}"
            )));
        }

        let bytes = segment.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let valid = bytes
                    .get(i + 1..i + 3)
                    .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
                if !valid {
                    return Err(HarborError::Encode(format!(
                        "invalid percent escape in query segment {segment:?}"
                    )));
                }
                i += 3;
            } else {
                i += 1;
            }
        }
    }
    Ok(())
}

/// `serialize_with` helpers rendering timestamps as RFC 3339 with second
/// precision, for option fields that carry times.
pub mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Same as the parent, for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            time: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
