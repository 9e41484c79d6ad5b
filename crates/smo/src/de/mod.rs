//! Decode engine: rebuilds typed Rust values from an [`SmoValue`] tree.
//!
//! A type opts in by implementing [`Decode`]. Its implementation asks the
//! [`Decoder`] for exactly the container shape it expects (keyed, unkeyed
//! or single value) and pulls its fields out of it.

mod impls;
mod keyed;
mod single;
mod unkeyed;

use std::borrow::Cow;

use tracing::debug;

pub use keyed::KeyedDecoder;
pub use single::SingleValueDecoder;
pub use unkeyed::UnkeyedDecoder;

use crate::error::Result;
use crate::format::{deserialize, SerializationFormat};
use crate::key::KeyDecodingStrategy;
use crate::options::{DecodeOptions, UserInfo};
use crate::path::CodingPath;
use crate::value::SmoValue;

/// A type that can be rebuilt from an SMO value.
pub trait Decode: Sized {
    fn decode(decoder: &Decoder<'_>) -> Result<Self>;
}

/// Entry point for decoding, holding the options for every call.
#[derive(Debug, Clone, Default)]
pub struct SmoDecoder {
    options: DecodeOptions,
}

impl SmoDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn key_decoding_strategy(&self) -> &KeyDecodingStrategy {
        &self.options.key_decoding_strategy
    }

    pub fn set_key_decoding_strategy(&mut self, strategy: KeyDecodingStrategy) {
        self.options.key_decoding_strategy = strategy;
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.options.user_info
    }

    pub fn user_info_mut(&mut self) -> &mut UserInfo {
        &mut self.options.user_info
    }

    /// Decodes a `T` from an SMO value.
    pub fn decode<T: Decode>(&self, value: &SmoValue) -> Result<T> {
        debug!(kind = ?value.kind(), "decoding top-level value");
        let decoder = Decoder::new(Cow::Borrowed(value), CodingPath::new(), &self.options);
        decoder.single_value_container().decode()
    }

    /// Parses `bytes` in the given format and decodes a `T` from the result.
    pub fn decode_bytes<T: Decode>(&self, bytes: &[u8], format: SerializationFormat) -> Result<T> {
        let value = deserialize(bytes, format)?;
        self.decode(&value)
    }
}

/// The view handed to [`Decode::decode`]: one value plus where it sits.
#[derive(Debug)]
pub struct Decoder<'a> {
    storage: Cow<'a, SmoValue>,
    coding_path: CodingPath,
    options: &'a DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(
        storage: Cow<'a, SmoValue>,
        coding_path: CodingPath,
        options: &'a DecodeOptions,
    ) -> Self {
        Self {
            storage,
            coding_path,
            options,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.options.user_info
    }

    /// The value being decoded.
    pub fn value(&self) -> &SmoValue {
        &self.storage
    }

    pub fn keyed_container(&self) -> Result<KeyedDecoder<'_>> {
        KeyedDecoder::new(&self.storage, self.coding_path.clone(), self.options)
    }

    pub fn unkeyed_container(&self) -> Result<UnkeyedDecoder<'_>> {
        UnkeyedDecoder::new(&self.storage, self.coding_path.clone(), self.options)
    }

    pub fn single_value_container(&self) -> SingleValueDecoder<'_> {
        SingleValueDecoder::new(&self.storage, &self.coding_path, self.options)
    }
}

/// Decodes a `T` from an SMO value with default options.
pub fn from_value<T: Decode>(value: &SmoValue) -> Result<T> {
    SmoDecoder::new().decode(value)
}

/// Parses `bytes` and decodes a `T` with default options.
pub fn from_slice<T: Decode>(bytes: &[u8], format: SerializationFormat) -> Result<T> {
    SmoDecoder::new().decode_bytes(bytes, format)
}
