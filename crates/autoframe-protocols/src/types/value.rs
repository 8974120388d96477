//! Host attribute values and the "mixed" sentinel.
//!
//! Hosts report attributes that differ across a composite selection with a
//! special marker instead of a value. Typed attributes carry it as
//! [`Mixed::Mixed`], untyped attribute blobs as [`HostValue::Mixed`]. Neither
//! is allowed past the serialization boundary: [`sanitize`] and
//! [`Mixed::into_option`] turn it into an explicit absence.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// JSON key used by host documents to encode the mixed marker (`{"$mixed": true}`).
pub const MIXED_MARKER: &str = "$mixed";

/// A typed attribute that may be non-uniform across a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mixed<T> {
    Uniform(T),
    Mixed,
}

impl<T> Mixed<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Mixed::Uniform(value) => Some(value),
            Mixed::Mixed => None,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Mixed::Uniform(value) => Some(value),
            Mixed::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Mixed::Mixed)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mixed<U> {
        match self {
            Mixed::Uniform(value) => Mixed::Uniform(f(value)),
            Mixed::Mixed => Mixed::Mixed,
        }
    }
}

impl<T> From<T> for Mixed<T> {
    fn from(value: T) -> Self {
        Mixed::Uniform(value)
    }
}

impl<T: Serialize> Serialize for Mixed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mixed::Uniform(value) => value.serialize(serializer),
            Mixed::Mixed => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(MIXED_MARKER, &true)?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
struct MixedMarker {
    #[serde(rename = "$mixed")]
    #[allow(dead_code)]
    mixed: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MixedRepr<T> {
    Marker(MixedMarker),
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Mixed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match MixedRepr::<T>::deserialize(deserializer)? {
            MixedRepr::Marker(_) => Mixed::Mixed,
            MixedRepr::Value(value) => Mixed::Uniform(value),
        })
    }
}

/// An untyped host attribute value (effects, plugin data, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<HostValue>),
    Object(BTreeMap<String, HostValue>),
    Mixed,
}

impl HostValue {
    /// Returns true if the mixed marker occurs anywhere in this value.
    pub fn contains_mixed(&self) -> bool {
        match self {
            HostValue::Mixed => true,
            HostValue::Array(items) => items.iter().any(HostValue::contains_mixed),
            HostValue::Object(map) => map.values().any(HostValue::contains_mixed),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for HostValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => HostValue::Null,
            Value::Bool(b) => HostValue::Bool(b),
            Value::Number(n) => HostValue::Number(n),
            Value::String(s) => HostValue::String(s),
            Value::Array(items) => HostValue::Array(items.into_iter().map(HostValue::from).collect()),
            Value::Object(map) => {
                if map.len() == 1 && map.contains_key(MIXED_MARKER) {
                    return HostValue::Mixed;
                }
                HostValue::Object(map.into_iter().map(|(k, v)| (k, HostValue::from(v))).collect())
            }
        }
    }
}

impl Serialize for HostValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HostValue::Null => serializer.serialize_unit(),
            HostValue::Bool(b) => serializer.serialize_bool(*b),
            HostValue::Number(n) => n.serialize(serializer),
            HostValue::String(s) => serializer.serialize_str(s),
            HostValue::Array(items) => items.serialize(serializer),
            HostValue::Object(map) => map.serialize(serializer),
            HostValue::Mixed => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(MIXED_MARKER, &true)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for HostValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(HostValue::from)
    }
}

/// Replace every mixed marker with `null`, mapping arrays element-wise and
/// objects key-wise.
pub fn sanitize(value: &HostValue) -> serde_json::Value {
    use serde_json::Value;

    match value {
        HostValue::Null | HostValue::Mixed => Value::Null,
        HostValue::Bool(b) => Value::Bool(*b),
        HostValue::Number(n) => Value::Number(n.clone()),
        HostValue::String(s) => Value::String(s.clone()),
        HostValue::Array(items) => Value::Array(items.iter().map(sanitize).collect()),
        HostValue::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
