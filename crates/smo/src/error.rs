//! Error types for the SMO bridges and the encode/decode engines.

use thiserror::Error;

use crate::path::CodingPath;

/// Errors raised by the JSON bridge and the JSON byte codec.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonError {
    #[error("unsupported JSON value: {0}")]
    UnsupportedJsonValue(String),
    #[error("undefined cannot be represented in JSON")]
    UnsupportedSmoValue,
    #[error("top-level JSON element must be an object or an array")]
    InvalidTopLevelElement,
    #[error("non-finite number {0} cannot be written as JSON")]
    NonFiniteNumber(f64),
    #[error("invalid JSON: {0}")]
    Syntax(String),
    #[error("JSON nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
}

/// Errors raised by the CBOR bridge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CborBridgeError {
    #[error("unsupported CBOR item: {0}")]
    UnsupportedValue(&'static str),
    #[error("CBOR map keys must be text strings")]
    UnsupportedObjectKey,
    #[error("CBOR integer does not fit in a signed 64-bit integer")]
    UnsupportedRange,
    #[error("corrupted CBOR data: {0}")]
    DataCorrupted(String),
    #[error("CBOR nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
}

impl From<smo_cbor::CborError> for CborBridgeError {
    fn from(err: smo_cbor::CborError) -> Self {
        CborBridgeError::DataCorrupted(err.to_string())
    }
}

/// Error type for SMO encoding, decoding and (de)serialization.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: CodingPath,
        expected: &'static str,
        found: &'static str,
    },
    #[error("key not found at {path}: {message}")]
    KeyNotFound {
        path: CodingPath,
        key: String,
        message: String,
    },
    #[error("data corrupted at {path}: {message}")]
    DataCorrupted { path: CodingPath, message: String },
    #[error("invalid value {value} at {path}: {message}")]
    InvalidValue {
        path: CodingPath,
        value: String,
        message: String,
    },
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Cbor(#[from] CborBridgeError),
}

impl Error {
    pub fn type_mismatch(path: &CodingPath, expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch {
            path: path.clone(),
            expected,
            found,
        }
    }

    pub fn data_corrupted(path: &CodingPath, message: impl Into<String>) -> Self {
        Error::DataCorrupted {
            path: path.clone(),
            message: message.into(),
        }
    }

    pub fn invalid_value(
        path: &CodingPath,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidValue {
            path: path.clone(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Coding path carried by engine errors; bridge errors have none.
    pub fn path(&self) -> Option<&CodingPath> {
        match self {
            Error::TypeMismatch { path, .. }
            | Error::KeyNotFound { path, .. }
            | Error::DataCorrupted { path, .. }
            | Error::InvalidValue { path, .. } => Some(path),
            Error::Json(_) | Error::Cbor(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
