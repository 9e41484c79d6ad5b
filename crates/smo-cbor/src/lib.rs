//! Generic CBOR (RFC 8949) item model and byte-level codec.
//!
//! The codec does not interpret the data it carries: integers keep their
//! major type, floats keep their width, tags and simple values are
//! surfaced as-is. Mapping items onto an application data model is left to
//! the caller.
//!
//! # Example
//!
//! ```
//! use smo_cbor::{decode, encode, CborItem};
//!
//! let item = CborItem::Array(vec![
//!     CborItem::UnsignedInt(1),
//!     CborItem::UnsignedInt(2),
//!     CborItem::UnsignedInt(3),
//! ]);
//! let bytes = encode(&item);
//! assert_eq!(bytes, [0x83, 0x01, 0x02, 0x03]);
//! assert_eq!(decode(&bytes).unwrap(), item);
//! ```

mod constants;
mod decoder;
mod encoder;
mod error;
mod item;

pub use constants::MAX_DEPTH;
pub use decoder::{decode, decode_with_consumed, CborDecoder};
pub use encoder::CborEncoder;
pub use error::CborError;
pub use item::CborItem;

/// Encodes a single item into a fresh buffer.
pub fn encode(item: &CborItem) -> Vec<u8> {
    CborEncoder::new().encode(item)
}
