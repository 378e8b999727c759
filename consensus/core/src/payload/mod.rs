//!
//! Typed representation of decoded operation payloads.
//!
//! Payloads travel as CBOR maps. [`PayloadValue`] mirrors the CBOR data model with text-only map
//! keys, and [`decode`] / [`sanitize`] turn raw envelope bytes into a [`PayloadMap`] that the
//! protocol processes can read without further type juggling.
//!

pub mod decode;
pub mod sanitize;

use crate::errors::payload::{PayloadError, PayloadResult};
use atomicals_core::hex::ToHex;
use ciborium::value::{Integer, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};

pub use decode::{decode_payload, decode_sanitized_payload};
pub use sanitize::{SANITIZED_FIELDS, sanitize_payload};

/// A text keyed map preserving the encoded key order
pub type PayloadMap = IndexMap<String, PayloadValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<PayloadValue>),
    Map(PayloadMap),
    Tagged(u64, Box<PayloadValue>),
}

impl PayloadValue {
    /// Short name of the variant, used in rejection reasons
    pub fn kind(&self) -> &'static str {
        match self {
            PayloadValue::Null => "null",
            PayloadValue::Bool(_) => "bool",
            PayloadValue::Integer(_) => "integer",
            PayloadValue::Float(_) => "float",
            PayloadValue::Text(_) => "text",
            PayloadValue::Bytes(_) => "bytes",
            PayloadValue::Sequence(_) => "sequence",
            PayloadValue::Map(_) => "map",
            PayloadValue::Tagged(..) => "tagged",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PayloadValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PayloadMap> {
        match self {
            PayloadValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[PayloadValue]> {
        match self {
            PayloadValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PayloadValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Reads an integer. Booleans count as the integers 0 and 1.
    pub fn as_int(&self) -> Option<i128> {
        match self {
            PayloadValue::Integer(value) => Some(*value),
            PayloadValue::Bool(value) => Some(*value as i128),
            _ => None,
        }
    }

    /// Whether the value counts as "not provided": null, false, zero, and empty containers or strings
    pub fn is_blank(&self) -> bool {
        match self {
            PayloadValue::Null => true,
            PayloadValue::Bool(value) => !value,
            PayloadValue::Integer(value) => *value == 0,
            PayloadValue::Float(value) => *value == 0.0,
            PayloadValue::Text(text) => text.is_empty(),
            PayloadValue::Bytes(bytes) => bytes.is_empty(),
            PayloadValue::Sequence(items) => items.is_empty(),
            PayloadValue::Map(map) => map.is_empty(),
            PayloadValue::Tagged(..) => false,
        }
    }

    pub fn to_cbor_value(&self) -> PayloadResult<Value> {
        Ok(match self {
            PayloadValue::Null => Value::Null,
            PayloadValue::Bool(value) => Value::Bool(*value),
            PayloadValue::Integer(value) => {
                Value::Integer(Integer::try_from(*value).map_err(|_| PayloadError::Encode(format!("integer {value} out of range")))?)
            }
            PayloadValue::Float(value) => Value::Float(*value),
            PayloadValue::Text(text) => Value::Text(text.clone()),
            PayloadValue::Bytes(bytes) => Value::Bytes(bytes.clone()),
            PayloadValue::Sequence(items) => Value::Array(items.iter().map(|item| item.to_cbor_value()).collect::<PayloadResult<_>>()?),
            PayloadValue::Map(map) => Value::Map(
                map.iter()
                    .map(|(key, value)| Ok((Value::Text(key.clone()), value.to_cbor_value()?)))
                    .collect::<PayloadResult<_>>()?,
            ),
            PayloadValue::Tagged(tag, inner) => Value::Tag(*tag, Box::new(inner.to_cbor_value()?)),
        })
    }

    /// Encodes the value as CBOR
    pub fn to_cbor_bytes(&self) -> PayloadResult<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(&self.to_cbor_value()?, &mut bytes).map_err(|err| PayloadError::Encode(format!("{err:?}")))?;
        Ok(bytes)
    }
}

impl TryFrom<Value> for PayloadValue {
    type Error = PayloadError;

    fn try_from(value: Value) -> PayloadResult<Self> {
        Ok(match value {
            Value::Null => PayloadValue::Null,
            Value::Bool(value) => PayloadValue::Bool(value),
            Value::Integer(value) => PayloadValue::Integer(i128::from(value)),
            Value::Float(value) => PayloadValue::Float(value),
            Value::Text(text) => PayloadValue::Text(text),
            Value::Bytes(bytes) => PayloadValue::Bytes(bytes),
            Value::Array(items) => PayloadValue::Sequence(items.into_iter().map(PayloadValue::try_from).collect::<PayloadResult<_>>()?),
            Value::Map(entries) => {
                let mut map = PayloadMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let Value::Text(key) = key else {
                        return Err(PayloadError::NonTextKey);
                    };
                    // Duplicate keys resolve to the last occurrence
                    map.insert(key, PayloadValue::try_from(value)?);
                }
                PayloadValue::Map(map)
            }
            Value::Tag(tag, inner) => PayloadValue::Tagged(tag, Box::new(PayloadValue::try_from(*inner)?)),
            _ => return Err(PayloadError::Decode("unsupported CBOR value".to_owned())),
        })
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_owned())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Integer(value as i128)
    }
}

impl From<u64> for PayloadValue {
    fn from(value: u64) -> Self {
        PayloadValue::Integer(value as i128)
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        PayloadValue::Float(value)
    }
}

impl From<PayloadMap> for PayloadValue {
    fn from(value: PayloadMap) -> Self {
        PayloadValue::Map(value)
    }
}

impl From<Vec<PayloadValue>> for PayloadValue {
    fn from(value: Vec<PayloadValue>) -> Self {
        PayloadValue::Sequence(value)
    }
}

/// JSON-friendly serialization: bytes become lowercase hex strings and tags are transparent
impl Serialize for PayloadValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PayloadValue::Null => serializer.serialize_unit(),
            PayloadValue::Bool(value) => serializer.serialize_bool(*value),
            PayloadValue::Integer(value) => {
                if let Ok(value) = i64::try_from(*value) {
                    serializer.serialize_i64(value)
                } else if let Ok(value) = u64::try_from(*value) {
                    serializer.serialize_u64(value)
                } else {
                    serializer.serialize_i128(*value)
                }
            }
            PayloadValue::Float(value) => serializer.serialize_f64(*value),
            PayloadValue::Text(text) => serializer.serialize_str(text),
            PayloadValue::Bytes(bytes) => serializer.serialize_str(&bytes.to_hex()),
            PayloadValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PayloadValue::Map(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    ser.serialize_entry(key, value)?;
                }
                ser.end()
            }
            PayloadValue::Tagged(_, inner) => inner.serialize(serializer),
        }
    }
}

/// Builds a [`PayloadMap`] from `key => value` pairs, converting values with `PayloadValue::from`
#[macro_export]
macro_rules! payload_map {
    () => { $crate::payload::PayloadMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::payload::PayloadMap::new();
        $(map.insert(String::from($key), $crate::payload::PayloadValue::from($value));)+
        map
    }};
}
