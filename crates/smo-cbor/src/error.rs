//! CBOR codec error type.

use thiserror::Error;

/// Error type for CBOR decoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CborError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8 in text string")]
    InvalidUtf8,
    #[error("indefinite length is not allowed for major type {0}")]
    InvalidIndefiniteLength(u8),
    #[error("invalid chunk inside indefinite-length string")]
    InvalidChunk,
    #[error("unexpected break marker")]
    UnexpectedBreak,
    #[error("reserved additional information value {0}")]
    ReservedAdditionalInfo(u8),
    #[error("{0} trailing bytes after the top-level item")]
    TrailingBytes(usize),
    #[error("malformed item header at offset {0}")]
    InvalidHeader(usize),
    #[error("nesting exceeds maximum depth")]
    NestingTooDeep,
}
