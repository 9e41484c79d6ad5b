//! CBOR bridge: [`SmoValue`] ⇄ [`CborItem`], and the CBOR byte helpers.

use smo_cbor::CborItem;

use crate::error::CborBridgeError;
use crate::value::{SmoMap, SmoValue, Symbol};

/// Converts a CBOR item into an SMO value.
pub fn from_cbor(item: &CborItem) -> Result<SmoValue, CborBridgeError> {
    Ok(match item {
        CborItem::UnsignedInt(n) => {
            SmoValue::Integer(i64::try_from(*n).map_err(|_| CborBridgeError::UnsupportedRange)?)
        }
        CborItem::NegativeInt(n) => {
            // The item encodes -1 - n, which is !n in two's complement.
            let value = !*n as i64;
            if value >= 0 {
                return Err(CborBridgeError::UnsupportedRange);
            }
            SmoValue::Integer(value)
        }
        CborItem::ByteString(b) => SmoValue::Bytes(b.clone()),
        CborItem::Utf8String(s) => SmoValue::String(s.clone()),
        CborItem::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(from_cbor(item)?);
            }
            SmoValue::Array(out)
        }
        CborItem::Map(entries) => {
            let mut out = SmoMap::with_capacity(entries.len());
            for (key, value) in entries {
                let CborItem::Utf8String(key) = key else {
                    return Err(CborBridgeError::UnsupportedObjectKey);
                };
                out.insert(key.clone(), from_cbor(value)?);
            }
            SmoValue::Object(out)
        }
        CborItem::Boolean(b) => SmoValue::Symbol(Symbol::from(*b)),
        CborItem::Null => SmoValue::Symbol(Symbol::Null),
        CborItem::Undefined => SmoValue::Symbol(Symbol::Undefined),
        CborItem::Float(f) => SmoValue::Float(f64::from(*f)),
        CborItem::Double(f) => SmoValue::Float(*f),
        CborItem::Tagged(..)
        | CborItem::Simple(_)
        | CborItem::Half(_)
        | CborItem::Break
        | CborItem::Date(_) => return Err(CborBridgeError::UnsupportedValue(item.kind())),
    })
}

/// Converts an SMO value into a CBOR item. Every SMO value has a CBOR form.
pub fn to_cbor(value: &SmoValue) -> CborItem {
    match value {
        SmoValue::Integer(i) if *i >= 0 => CborItem::UnsignedInt(*i as u64),
        SmoValue::Integer(i) => CborItem::NegativeInt(!*i as u64),
        SmoValue::Float(f) => CborItem::Double(*f),
        SmoValue::String(s) => CborItem::Utf8String(s.clone()),
        SmoValue::Bytes(b) => CborItem::ByteString(b.clone()),
        SmoValue::Array(items) => CborItem::Array(items.iter().map(to_cbor).collect()),
        SmoValue::Object(entries) => CborItem::Map(
            entries
                .iter()
                .map(|(k, v)| (CborItem::Utf8String(k.clone()), to_cbor(v)))
                .collect(),
        ),
        SmoValue::Symbol(Symbol::True) => CborItem::Boolean(true),
        SmoValue::Symbol(Symbol::False) => CborItem::Boolean(false),
        SmoValue::Symbol(Symbol::Null) => CborItem::Null,
        SmoValue::Symbol(Symbol::Undefined) => CborItem::Undefined,
    }
}

/// Writes an SMO value as CBOR bytes. Nesting depth is not checked; see
/// [`try_to_cbor_bytes`].
pub fn to_cbor_bytes(value: &SmoValue) -> Vec<u8> {
    smo_cbor::encode(&to_cbor(value))
}

/// Deepest container nesting [`from_cbor_bytes`] accepts.
pub const MAX_CBOR_DEPTH: usize = smo_cbor::MAX_DEPTH;

/// Writes an SMO value as CBOR bytes, refusing values nested deeper than
/// [`MAX_CBOR_DEPTH`].
pub fn try_to_cbor_bytes(value: &SmoValue) -> Result<Vec<u8>, CborBridgeError> {
    if value.depth() > MAX_CBOR_DEPTH {
        return Err(CborBridgeError::NestingTooDeep(MAX_CBOR_DEPTH));
    }
    Ok(to_cbor_bytes(value))
}

/// Parses CBOR bytes into an SMO value.
///
/// Malformed input is reported as [`CborBridgeError::DataCorrupted`].
pub fn from_cbor_bytes(bytes: &[u8]) -> Result<SmoValue, CborBridgeError> {
    let item = smo_cbor::decode(bytes)?;
    from_cbor(&item)
}
