use std::borrow::Cow;

use super::{Decode, Decoder};
use crate::error::{Error, Result};
use crate::number::{SmoFloat, SmoInteger};
use crate::options::DecodeOptions;
use crate::path::CodingPath;
use crate::value::{SmoValue, Symbol};

/// Reads one scalar, or hands the value to a nested [`Decode`].
#[derive(Debug, Clone, Copy)]
pub struct SingleValueDecoder<'a> {
    value: &'a SmoValue,
    coding_path: &'a CodingPath,
    options: &'a DecodeOptions,
}

macro_rules! decode_integers {
    ($($name:ident => $ty:ty,)*) => {$(
        pub fn $name(&self) -> Result<$ty> {
            self.decode_integer::<$ty>()
        }
    )*};
}

impl<'a> SingleValueDecoder<'a> {
    pub(crate) fn new(
        value: &'a SmoValue,
        coding_path: &'a CodingPath,
        options: &'a DecodeOptions,
    ) -> Self {
        Self {
            value,
            coding_path,
            options,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.coding_path
    }

    pub fn value(&self) -> &'a SmoValue {
        self.value
    }

    /// `true` only for `null`; `undefined` is not nil.
    pub fn decode_nil(&self) -> bool {
        matches!(self.value, SmoValue::Symbol(Symbol::Null))
    }

    pub fn decode_bool(&self) -> Result<bool> {
        match self.value {
            SmoValue::Symbol(Symbol::True) => Ok(true),
            SmoValue::Symbol(Symbol::False) => Ok(false),
            other => Err(self.mismatch("bool", other)),
        }
    }

    pub fn decode_string(&self) -> Result<String> {
        match self.value {
            SmoValue::String(s) => Ok(s.clone()),
            other => Err(self.mismatch("String", other)),
        }
    }

    /// Raw binary data; only `Bytes` qualifies.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        match self.value {
            SmoValue::Bytes(b) => Ok(b.clone()),
            other => Err(self.mismatch("bytes", other)),
        }
    }

    decode_integers! {
        decode_i8 => i8,
        decode_i16 => i16,
        decode_i32 => i32,
        decode_i64 => i64,
        decode_isize => isize,
        decode_u8 => u8,
        decode_u16 => u16,
        decode_u32 => u32,
        decode_u64 => u64,
        decode_usize => usize,
    }

    pub fn decode_f32(&self) -> Result<f32> {
        self.decode_float::<f32>()
    }

    pub fn decode_f64(&self) -> Result<f64> {
        self.decode_float::<f64>()
    }

    /// Integers must fit exactly; floats must be integral and in range.
    pub fn decode_integer<T: SmoInteger>(&self) -> Result<T> {
        let decoded = match self.value {
            SmoValue::Integer(i) => T::from_i64_exact(*i),
            SmoValue::Float(f) => T::from_f64_exact(*f),
            _ => None,
        };
        decoded.ok_or_else(|| self.mismatch(T::TYPE_NAME, self.value))
    }

    /// Non-finite floats always convert; everything else must be exact.
    pub fn decode_float<T: SmoFloat>(&self) -> Result<T> {
        let decoded = match self.value {
            SmoValue::Float(f) => T::from_f64_keeping_non_finite(*f),
            SmoValue::Integer(i) => T::from_i64_exact(*i),
            _ => None,
        };
        decoded.ok_or_else(|| self.mismatch(T::TYPE_NAME, self.value))
    }

    /// Decodes a nested `T` from this value.
    pub fn decode<T: Decode>(&self) -> Result<T> {
        let decoder = Decoder::new(
            Cow::Borrowed(self.value),
            self.coding_path.clone(),
            self.options,
        );
        T::decode(&decoder)
    }

    fn mismatch(&self, expected: &'static str, found: &SmoValue) -> Error {
        Error::type_mismatch(self.coding_path, expected, found.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with<R>(value: SmoValue, f: impl FnOnce(SingleValueDecoder<'_>) -> R) -> R {
        let path = CodingPath::new().appending_key("field");
        let options = DecodeOptions::default();
        f(SingleValueDecoder::new(&value, &path, &options))
    }

    #[test]
    fn booleans_come_only_from_symbols() {
        assert_eq!(with(SmoValue::from(true), |d| d.decode_bool()), Ok(true));
        let err = with(SmoValue::from(1), |d| d.decode_bool()).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                path: CodingPath::new().appending_key("field"),
                expected: "bool",
                found: "an integer",
            }
        );
    }

    #[test]
    fn integers_check_width_and_exactness() {
        assert_eq!(with(SmoValue::from(200), |d| d.decode_u8()), Ok(200));
        assert!(with(SmoValue::from(300), |d| d.decode_u8()).is_err());
        assert!(with(SmoValue::from(-1), |d| d.decode_u64()).is_err());
        assert_eq!(with(SmoValue::Float(42.0), |d| d.decode_i16()), Ok(42));
        assert!(with(SmoValue::Float(42.5), |d| d.decode_i16()).is_err());
        assert_eq!(
            with(SmoValue::Float(9223372036854775808.0), |d| d.decode_u64()),
            Ok(1 << 63)
        );
        assert!(with(SmoValue::from("1"), |d| d.decode_i32()).is_err());
    }

    #[test]
    fn floats_keep_non_finite_values() {
        assert_eq!(
            with(SmoValue::Float(f64::INFINITY), |d| d.decode_f32()),
            Ok(f32::INFINITY)
        );
        assert_eq!(
            with(SmoValue::Float(f64::NEG_INFINITY), |d| d.decode_f32()),
            Ok(f32::NEG_INFINITY)
        );
        let nan = with(SmoValue::Float(-f64::NAN), |d| d.decode_f32()).unwrap();
        assert!(nan.is_nan() && nan.is_sign_negative());
        assert!(with(SmoValue::Float(0.1), |d| d.decode_f32()).is_err());
        assert_eq!(with(SmoValue::from(3), |d| d.decode_f64()), Ok(3.0));
    }

    #[test]
    fn bytes_and_strings_are_distinct() {
        assert_eq!(
            with(SmoValue::Bytes(vec![1, 2]), |d| d.decode_bytes()),
            Ok(vec![1, 2])
        );
        let err = with(SmoValue::from("ab"), |d| d.decode_bytes()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { found: "a string", .. }));
        assert!(with(SmoValue::Bytes(vec![]), |d| d.decode_string()).is_err());
    }

    #[test]
    fn nil_is_null_only() {
        assert!(with(SmoValue::null(), |d| d.decode_nil()));
        assert!(!with(SmoValue::undefined(), |d| d.decode_nil()));
        assert!(!with(SmoValue::from(false), |d| d.decode_nil()));
    }
}
