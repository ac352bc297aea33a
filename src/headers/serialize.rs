//! Serde support.
//!
//! [`HeaderMultiMap`] serialize as a map of header name to array of values. Deserialization also
//! accept a single value in place of an array, matching the plain object shape
//! `{ "Accept": ["a", "b"], "Host": "c" }`.
//!
//! Numbers and booleans are taken as their text and `null` is skipped, the same as
//! [`HeaderInit::Object`][super::HeaderInit]. Nested arrays and objects are rejected.
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};

use super::{HeaderMultiMap, HeaderName, HeaderValue, Values};

impl Serialize for HeaderName {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for HeaderValue {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HeaderValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Ok(HeaderValue::normalize(&value))
    }
}

impl Serialize for HeaderMultiMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, values) in self.fields() {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderMultiMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor)
    }
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = HeaderMultiMap;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a map of header name to string or array of string")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = HeaderMultiMap::with_capacity(access.size_hint().unwrap_or(0).min(64));
        while let Some((name, values)) = access.next_entry::<String, Values>()? {
            map.append(name, values);
        }
        Ok(map)
    }
}

impl Serialize for Values {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Values::One(value) => serializer.serialize_str(value),
            Values::Many(values) => values.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Values {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValuesVisitor)
    }
}

struct ValuesVisitor;

impl<'de> Visitor<'de> for ValuesVisitor {
    type Value = Values;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a scalar or array of scalar")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Values::One(v.to_owned()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Values::One(v))
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Values::One(v.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Values::One(v.to_string()))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Values::One(v.to_string()))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Values::One(v.to_string()))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Values::Many(Vec::new()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
        while let Some(value) = seq.next_element::<Option<Scalar>>()? {
            if let Some(Scalar(value)) = value {
                values.push(value);
            }
        }
        Ok(Values::Many(values))
    }
}

/// Array element of [`Values`].
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserializer.deserialize_any(ValuesVisitor)? {
            Values::One(value) => Ok(Scalar(value)),
            Values::Many(_) => Err(serde::de::Error::custom("nested array in header values")),
        }
    }
}

// ===== JSON =====

#[cfg(feature = "json")]
pub(crate) fn ingest_object(
    map: &mut HeaderMultiMap,
    object: &serde_json::Map<String, serde_json::Value>,
) {
    use serde_json::Value;
    use std::borrow::Cow;

    use crate::log::debug;

    fn scalar(value: &Value) -> Option<Cow<'_, str>> {
        match value {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    for (name, value) in object {
        let items = match value {
            Value::Array(items) => items.as_slice(),
            value => std::slice::from_ref(value),
        };
        for item in items {
            match scalar(item) {
                Some(value) => map.append(name, &*value),
                None => {
                    debug!("skipping non scalar value of header {name:?}");
                }
            }
        }
    }
}

#[cfg(feature = "json")]
impl<'a> From<&'a serde_json::Map<String, serde_json::Value>> for super::HeaderInit<'a> {
    #[inline]
    fn from(value: &'a serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Object(value)
    }
}
