//! Neutral attribute value representation.
//!
//! Mirrors the shape of OTLP's `AnyValue` oneof (string / int / double / bool
//! / array / kvlist / bytes) without depending on `opentelemetry-proto` or
//! `prost` — the core never decodes wire bytes, it is handed already-decoded
//! batches (see [`crate::models::batch`]).

use serde::{Serialize, Serializer};

/// A single attribute value. Ordered maps and arrays preserve insertion
/// order; nothing here is ever re-sorted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    #[default]
    Null,
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    Array(Vec<AttributeValue>),
    Map(Vec<(String, AttributeValue)>),
    Bytes(Vec<u8>),
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            AttributeValue::Null => serializer.serialize_none(),
            AttributeValue::String(s) => serializer.serialize_str(s),
            AttributeValue::Int(i) => serializer.serialize_i64(*i),
            AttributeValue::Double(d) => serializer.serialize_f64(*d),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Array(items) => serializer.collect_seq(items),
            AttributeValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            AttributeValue::Bytes(bytes) => {
                // Base64 would require an extra dependency for a field that's
                // rarely populated; render as an unsigned byte array like
                // serde_json does for raw byte slices.
                serializer.collect_seq(bytes.iter().copied())
            }
        }
    }
}

impl AttributeValue {
    /// Best-effort flattening to a display string, used wherever a plain
    /// attribute value needs to be compared or displayed as text.
    pub fn as_display_string(&self) -> String {
        match self {
            AttributeValue::Null => String::new(),
            AttributeValue::String(s) => s.clone(),
            AttributeValue::Int(i) => i.to_string(),
            AttributeValue::Double(d) => d.to_string(),
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Array(_) | AttributeValue::Map(_) => serde_json::to_string(self)
                .unwrap_or_default(),
            AttributeValue::Bytes(b) => format!("{b:?}"),
        }
    }
}

/// An ordered set of key/value attributes, as carried by resources, scopes,
/// spans, span events, span links, and log records.
pub type AttributeSet = Vec<(String, AttributeValue)>;

pub fn attributes_to_json(attrs: &AttributeSet) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(attrs.len());
    for (k, v) in attrs {
        map.insert(k.clone(), serde_json::to_value(v).unwrap_or(serde_json::Value::Null));
    }
    serde_json::Value::Object(map)
}
