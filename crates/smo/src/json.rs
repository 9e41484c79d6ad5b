//! JSON bridge: [`SmoValue`] ⇄ [`JsonValue`], and the JSON byte codec.
//!
//! The byte codec goes through `serde_json::Value`. Binary blobs have no
//! JSON spelling, so they are written as standard base64 strings and read
//! back as plain strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::error::JsonError;
use crate::value::{SmoMap, SmoValue, Symbol};

/// Numeric subtypes a JSON number can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

/// A dynamically typed JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Blob(Vec<u8>),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// `true` for objects and arrays, the only valid non-fragment top levels.
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }
}

/// Options for the JSON byte codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Accept scalars as the top-level element.
    pub allow_fragments: bool,
}

impl JsonOptions {
    pub fn with_allow_fragments(mut self, allow: bool) -> Self {
        self.allow_fragments = allow;
        self
    }
}

/// Converts a JSON value into an SMO value.
pub fn from_json(json: &JsonValue) -> Result<SmoValue, JsonError> {
    Ok(match json {
        JsonValue::Null => SmoValue::Symbol(Symbol::Null),
        JsonValue::Bool(b) => SmoValue::Symbol(Symbol::from(*b)),
        JsonValue::Number(JsonNumber::Integer(i)) => SmoValue::Integer(*i),
        JsonValue::Number(JsonNumber::Float(f)) => SmoValue::Float(*f),
        JsonValue::Number(JsonNumber::Unsigned(u)) => match i64::try_from(*u) {
            Ok(i) => SmoValue::Integer(i),
            Err(_) => {
                return Err(JsonError::UnsupportedJsonValue(format!(
                    "unsigned integer {u} exceeds the signed 64-bit range"
                )))
            }
        },
        JsonValue::String(s) => SmoValue::String(s.clone()),
        JsonValue::Blob(b) => SmoValue::Bytes(b.clone()),
        JsonValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(from_json(item)?);
            }
            SmoValue::Array(out)
        }
        JsonValue::Object(entries) => {
            let mut out = SmoMap::with_capacity(entries.len());
            for (key, value) in entries {
                out.insert(key.clone(), from_json(value)?);
            }
            SmoValue::Object(out)
        }
    })
}

/// Converts an SMO value into a JSON value.
///
/// Fails if `Undefined` appears anywhere in the tree.
pub fn to_json(value: &SmoValue) -> Result<JsonValue, JsonError> {
    Ok(match value {
        SmoValue::Symbol(Symbol::Null) => JsonValue::Null,
        SmoValue::Symbol(Symbol::True) => JsonValue::Bool(true),
        SmoValue::Symbol(Symbol::False) => JsonValue::Bool(false),
        SmoValue::Symbol(Symbol::Undefined) => return Err(JsonError::UnsupportedSmoValue),
        SmoValue::Integer(i) => JsonValue::Number(JsonNumber::Integer(*i)),
        SmoValue::Float(f) => JsonValue::Number(JsonNumber::Float(*f)),
        SmoValue::String(s) => JsonValue::String(s.clone()),
        SmoValue::Bytes(b) => JsonValue::Blob(b.clone()),
        SmoValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(to_json(item)?);
            }
            JsonValue::Array(out)
        }
        SmoValue::Object(entries) => {
            let mut out = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                out.insert(key.clone(), to_json(value)?);
            }
            JsonValue::Object(out)
        }
    })
}

/// Converts a [`JsonValue`] into a `serde_json::Value` ready for writing.
pub fn json_to_serde(json: &JsonValue) -> Result<Value, JsonError> {
    Ok(match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(JsonNumber::Integer(i)) => Value::Number(Number::from(*i)),
        JsonValue::Number(JsonNumber::Unsigned(u)) => Value::Number(Number::from(*u)),
        JsonValue::Number(JsonNumber::Float(f)) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or(JsonError::NonFiniteNumber(*f))?,
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Blob(b) => Value::String(STANDARD.encode(b)),
        JsonValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(json_to_serde(item)?);
            }
            Value::Array(out)
        }
        JsonValue::Object(entries) => {
            let mut out = Map::new();
            for (key, value) in entries {
                out.insert(key.clone(), json_to_serde(value)?);
            }
            Value::Object(out)
        }
    })
}

/// Converts a parsed `serde_json::Value` into a [`JsonValue`].
///
/// Numbers are read as `i64`, then `u64`, then `f64`.
pub fn serde_to_json(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Number(n) => JsonValue::Number(if let Some(i) = n.as_i64() {
            JsonNumber::Integer(i)
        } else if let Some(u) = n.as_u64() {
            JsonNumber::Unsigned(u)
        } else {
            JsonNumber::Float(n.as_f64().unwrap_or(f64::NAN))
        }),
        Value::String(s) => JsonValue::String(s),
        Value::Array(items) => JsonValue::Array(items.into_iter().map(serde_to_json).collect()),
        Value::Object(entries) => JsonValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k, serde_to_json(v)))
                .collect(),
        ),
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        serde_to_json(value)
    }
}

/// Deepest container nesting [`from_json_bytes`] accepts; serde_json stops
/// at its 128th nested container.
pub const MAX_JSON_DEPTH: usize = 127;

/// Writes an SMO value as compact JSON text.
///
/// Values nested deeper than [`MAX_JSON_DEPTH`] are refused, since they
/// could not be read back.
pub fn to_json_bytes(value: &SmoValue, options: &JsonOptions) -> Result<Vec<u8>, JsonError> {
    let json = to_json(value)?;
    if !options.allow_fragments && !json.is_container() {
        return Err(JsonError::InvalidTopLevelElement);
    }
    if value.depth() > MAX_JSON_DEPTH {
        return Err(JsonError::NestingTooDeep(MAX_JSON_DEPTH));
    }
    Ok(json_to_serde(&json)?.to_string().into_bytes())
}

/// Parses JSON text into an SMO value.
pub fn from_json_bytes(bytes: &[u8], options: &JsonOptions) -> Result<SmoValue, JsonError> {
    let serde: Value =
        serde_json::from_slice(bytes).map_err(|e| JsonError::Syntax(e.to_string()))?;
    let json = serde_to_json(serde);
    if !options.allow_fragments && !json.is_container() {
        return Err(JsonError::InvalidTopLevelElement);
    }
    from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FRAGMENTS: JsonOptions = JsonOptions {
        allow_fragments: true,
    };

    #[test]
    fn booleans_become_symbols() {
        assert_eq!(
            from_json(&JsonValue::Bool(true)).unwrap(),
            SmoValue::Symbol(Symbol::True)
        );
        assert_eq!(from_json(&JsonValue::Null).unwrap(), SmoValue::null());
    }

    #[test]
    fn large_unsigned_is_rejected() {
        let big = JsonValue::Number(JsonNumber::Unsigned(u64::MAX));
        assert!(matches!(
            from_json(&big),
            Err(JsonError::UnsupportedJsonValue(_))
        ));
        let fits = JsonValue::Number(JsonNumber::Unsigned(i64::MAX as u64));
        assert_eq!(from_json(&fits).unwrap(), SmoValue::Integer(i64::MAX));
    }

    #[test]
    fn undefined_fails_at_any_depth() {
        let nested = SmoValue::from_iter([(
            "a",
            SmoValue::from(vec![SmoValue::from(1), SmoValue::undefined()]),
        )]);
        assert_eq!(to_json(&nested), Err(JsonError::UnsupportedSmoValue));
        assert_eq!(
            to_json(&SmoValue::undefined()),
            Err(JsonError::UnsupportedSmoValue)
        );
    }

    #[test]
    fn bytes_are_base64_text() {
        let value = SmoValue::from_iter([("raw", SmoValue::Bytes(vec![0, 1, 2, 255]))]);
        let text = to_json_bytes(&value, &JsonOptions::default()).unwrap();
        assert_eq!(text, br#"{"raw":"AAEC/w=="}"#);
    }

    #[test]
    fn fragments_need_opt_in() {
        let scalar = SmoValue::from(5);
        assert_eq!(
            to_json_bytes(&scalar, &JsonOptions::default()),
            Err(JsonError::InvalidTopLevelElement)
        );
        assert_eq!(to_json_bytes(&scalar, &FRAGMENTS).unwrap(), b"5");
        assert_eq!(
            from_json_bytes(b"\"x\"", &JsonOptions::default()),
            Err(JsonError::InvalidTopLevelElement)
        );
        assert_eq!(
            from_json_bytes(b"\"x\"", &FRAGMENTS).unwrap(),
            SmoValue::from("x")
        );
    }

    #[test]
    fn non_finite_floats_cannot_be_written() {
        let value = SmoValue::from(vec![SmoValue::Float(f64::INFINITY)]);
        assert!(matches!(
            to_json_bytes(&value, &FRAGMENTS),
            Err(JsonError::NonFiniteNumber(f)) if f.is_infinite()
        ));
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(matches!(
            from_json_bytes(b"{\"a\":", &FRAGMENTS),
            Err(JsonError::Syntax(_))
        ));
    }

    #[test]
    fn writing_is_compact_and_never_a_syntax_error() {
        let value = SmoValue::from_iter([
            ("s", SmoValue::from("a\"b\n")),
            ("f", SmoValue::Float(-0.25)),
            ("n", SmoValue::from(vec![SmoValue::null(), SmoValue::from(false)])),
        ]);
        assert_eq!(
            to_json_bytes(&value, &JsonOptions::default()).unwrap(),
            br#"{"s":"a\"b\n","f":-0.25,"n":[null,false]}"#
        );

        let mut deep = SmoValue::Array(vec![]);
        for _ in 0..MAX_JSON_DEPTH {
            deep = SmoValue::Array(vec![deep]);
        }
        assert_eq!(
            to_json_bytes(&deep, &JsonOptions::default()),
            Err(JsonError::NestingTooDeep(MAX_JSON_DEPTH))
        );
    }

    #[test]
    fn serde_numbers_pick_narrowest_subtype() {
        let parsed = serde_to_json(json!([-1, 18446744073709551615u64, 1.5]));
        assert_eq!(
            parsed,
            JsonValue::Array(vec![
                JsonValue::Number(JsonNumber::Integer(-1)),
                JsonValue::Number(JsonNumber::Unsigned(u64::MAX)),
                JsonValue::Number(JsonNumber::Float(1.5)),
            ])
        );
    }

    #[test]
    fn object_order_is_preserved_on_write() {
        let value = from_json_bytes(br#"{"z":1,"a":2,"m":3}"#, &FRAGMENTS).unwrap();
        let text = to_json_bytes(&value, &FRAGMENTS).unwrap();
        assert_eq!(text, br#"{"z":1,"a":2,"m":3}"#);
    }
}
