//! Serialization façade selecting between the JSON and CBOR byte forms.

use std::fmt;

use tracing::trace;

use crate::cbor::{from_cbor_bytes, try_to_cbor_bytes};
use crate::error::Result;
use crate::json::{from_json_bytes, to_json_bytes, JsonOptions};
use crate::value::SmoValue;

/// Wire format of serialized SMO data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializationFormat {
    Json,
    Cbor,
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SerializationFormat::Json => "json",
            SerializationFormat::Cbor => "cbor",
        })
    }
}

const FACADE_JSON: JsonOptions = JsonOptions {
    allow_fragments: true,
};

/// Serializes `value` into bytes of the given format.
///
/// Values nested deeper than the format's reader accepts
/// ([`MAX_JSON_DEPTH`](crate::json::MAX_JSON_DEPTH),
/// [`MAX_CBOR_DEPTH`](crate::cbor::MAX_CBOR_DEPTH)) are refused.
pub fn serialize(value: &SmoValue, format: SerializationFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        SerializationFormat::Json => to_json_bytes(value, &FACADE_JSON)?,
        SerializationFormat::Cbor => try_to_cbor_bytes(value)?,
    };
    trace!(%format, len = bytes.len(), "serialized SMO value");
    Ok(bytes)
}

/// Parses bytes of the given format into an SMO value.
pub fn deserialize(bytes: &[u8], format: SerializationFormat) -> Result<SmoValue> {
    trace!(%format, len = bytes.len(), "deserializing SMO value");
    let value = match format {
        SerializationFormat::Json => from_json_bytes(bytes, &FACADE_JSON)?,
        SerializationFormat::Cbor => from_cbor_bytes(bytes)?,
    };
    Ok(value)
}

impl SmoValue {
    pub fn to_bytes(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        serialize(self, format)
    }

    pub fn from_bytes(bytes: &[u8], format: SerializationFormat) -> Result<Self> {
        deserialize(bytes, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbor::MAX_CBOR_DEPTH;
    use crate::error::{CborBridgeError, Error, JsonError};
    use crate::json::MAX_JSON_DEPTH;

    #[test]
    fn json_facade_allows_fragments() {
        let bytes = serialize(&SmoValue::from("hi"), SerializationFormat::Json).unwrap();
        assert_eq!(bytes, b"\"hi\"");
        assert_eq!(
            deserialize(b"true", SerializationFormat::Json).unwrap(),
            SmoValue::from(true)
        );
    }

    #[test]
    fn errors_keep_their_bridge() {
        assert_eq!(
            serialize(&SmoValue::undefined(), SerializationFormat::Json),
            Err(Error::Json(JsonError::UnsupportedSmoValue))
        );
        assert!(matches!(
            deserialize(&[0xff], SerializationFormat::Cbor),
            Err(Error::Cbor(CborBridgeError::DataCorrupted(_)))
        ));
        assert!(matches!(
            deserialize(&[0xc1, 0x00], SerializationFormat::Cbor),
            Err(Error::Cbor(CborBridgeError::UnsupportedValue(_)))
        ));
    }

    fn nested_arrays(depth: usize) -> SmoValue {
        let mut value = SmoValue::from(1);
        for _ in 0..depth {
            value = SmoValue::Array(vec![value]);
        }
        value
    }

    #[test]
    fn nesting_limits_match_the_readers() {
        let deepest = nested_arrays(MAX_CBOR_DEPTH);
        let bytes = serialize(&deepest, SerializationFormat::Cbor).unwrap();
        assert_eq!(deserialize(&bytes, SerializationFormat::Cbor).unwrap(), deepest);
        assert_eq!(
            serialize(&nested_arrays(300), SerializationFormat::Cbor),
            Err(Error::Cbor(CborBridgeError::NestingTooDeep(MAX_CBOR_DEPTH)))
        );

        let deepest = nested_arrays(MAX_JSON_DEPTH);
        let bytes = serialize(&deepest, SerializationFormat::Json).unwrap();
        assert_eq!(deserialize(&bytes, SerializationFormat::Json).unwrap(), deepest);
        assert_eq!(
            serialize(&nested_arrays(MAX_JSON_DEPTH + 1), SerializationFormat::Json),
            Err(Error::Json(JsonError::NestingTooDeep(MAX_JSON_DEPTH)))
        );
    }

    #[test]
    fn value_helpers_round_trip() {
        let value = SmoValue::from_iter([("n", SmoValue::from(-3)), ("u", SmoValue::undefined())]);
        let bytes = value.to_bytes(SerializationFormat::Cbor).unwrap();
        assert_eq!(
            SmoValue::from_bytes(&bytes, SerializationFormat::Cbor).unwrap(),
            value
        );
    }
}
