//! Smart Message Objects: a tagged-union value model with lossless JSON and
//! CBOR bridges, plus an encode/decode engine that maps Rust types onto it.
//!
//! Types take part by implementing [`Encode`] and [`Decode`] by hand. Each
//! implementation picks one of three container shapes (keyed, unkeyed or
//! single value) and reads or writes its fields through it.
//!
//! # Example
//!
//! ```
//! use smo::{Decode, Decoder, Encode, Encoder, Result, SerializationFormat};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Encode for Person {
//!     fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
//!         let mut keyed = encoder.keyed_container();
//!         keyed.encode("name", &self.name)?;
//!         keyed.encode("age", &self.age)
//!     }
//! }
//!
//! impl Decode for Person {
//!     fn decode(decoder: &Decoder<'_>) -> Result<Self> {
//!         let keyed = decoder.keyed_container()?;
//!         Ok(Person {
//!             name: keyed.decode("name")?,
//!             age: keyed.decode("age")?,
//!         })
//!     }
//! }
//!
//! let ham = Person { name: "Ham".into(), age: 27 };
//! let bytes = smo::to_vec(&ham, SerializationFormat::Cbor)?;
//! let back: Person = smo::from_slice(&bytes, SerializationFormat::Cbor)?;
//! assert_eq!(back, ham);
//! # Ok::<(), smo::Error>(())
//! ```

mod bytes;
mod error;
mod format;
mod number;
mod options;
mod path;
mod value;

pub mod cbor;
pub mod de;
pub mod json;
pub mod key;
pub mod ser;

pub use bytes::ByteBuf;
pub use error::{CborBridgeError, Error, JsonError, Result};
pub use format::{deserialize, serialize, SerializationFormat};
pub use key::{KeyConverter, KeyDecodingStrategy, KeyEncodingStrategy};
pub use number::{SmoFloat, SmoInteger};
pub use options::{DecodeOptions, EncodeOptions, UserInfo};
pub use path::{CodingPath, PathSegment};
pub use value::{SmoKind, SmoMap, SmoValue, Symbol};

pub use de::{
    from_slice, from_value, Decode, Decoder, KeyedDecoder, SingleValueDecoder, SmoDecoder,
    UnkeyedDecoder,
};
pub use ser::{
    to_value, to_vec, Encode, Encoder, KeyedEncoder, SingleValueEncoder, SmoEncoder,
    UnkeyedEncoder,
};

pub use smo_cbor::CborItem;
