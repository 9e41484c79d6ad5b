//! Encode engine: flattens typed Rust values into an [`SmoValue`] tree.
//!
//! A type opts in by implementing [`Encode`]. Its implementation turns the
//! [`Encoder`] it is given into exactly one container and writes its
//! fields into it. Containers write into a [`StorageGraph`] that is
//! resolved into a value once the whole top-level value has been walked.

mod impls;
mod keyed;
mod single;
mod storage;
mod unkeyed;

use std::any::type_name;

use tracing::debug;

pub use keyed::KeyedEncoder;
pub use single::SingleValueEncoder;
pub use unkeyed::UnkeyedEncoder;

use storage::{SlotId, StorageGraph};

use crate::error::{Error, Result};
use crate::format::{serialize, SerializationFormat};
use crate::key::KeyEncodingStrategy;
use crate::options::{EncodeOptions, UserInfo};
use crate::path::CodingPath;
use crate::value::SmoValue;

/// A type that can be written as an SMO value.
pub trait Encode {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()>;
}

/// Entry point for encoding, holding the options for every call.
#[derive(Debug, Clone, Default)]
pub struct SmoEncoder {
    options: EncodeOptions,
}

impl SmoEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    pub fn key_encoding_strategy(&self) -> &KeyEncodingStrategy {
        &self.options.key_encoding_strategy
    }

    pub fn set_key_encoding_strategy(&mut self, strategy: KeyEncodingStrategy) {
        self.options.key_encoding_strategy = strategy;
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.options.user_info
    }

    pub fn user_info_mut(&mut self) -> &mut UserInfo {
        &mut self.options.user_info
    }

    /// Encodes `value` into an SMO value.
    ///
    /// Fails with [`Error::InvalidValue`] when `value` wrote nothing.
    pub fn encode<T: Encode + ?Sized>(&self, value: &T) -> Result<SmoValue> {
        debug!(ty = type_name::<T>(), "encoding top-level value");
        let mut graph = StorageGraph::new();
        let root = graph.allocate();
        let coding_path = CodingPath::new();

        SingleValueEncoder::new(&mut graph, root, coding_path.clone(), &self.options)
            .encode(value)?;

        graph.try_unwrap(root).ok_or_else(|| {
            Error::invalid_value(
                &coding_path,
                type_name::<T>(),
                format!("Top-level {} did not encode any values.", type_name::<T>()),
            )
        })
    }

    /// Encodes `value` and serializes it in the given format.
    pub fn encode_bytes<T: Encode + ?Sized>(
        &self,
        value: &T,
        format: SerializationFormat,
    ) -> Result<Vec<u8>> {
        let smo = self.encode(value)?;
        serialize(&smo, format)
    }
}

/// The handle passed to [`Encode::encode`]. It is consumed by choosing the
/// container the value is written into.
#[derive(Debug)]
pub struct Encoder<'a> {
    graph: &'a mut StorageGraph,
    slot: SlotId,
    coding_path: CodingPath,
    options: &'a EncodeOptions,
}

impl<'a> Encoder<'a> {
    fn new(
        graph: &'a mut StorageGraph,
        slot: SlotId,
        coding_path: CodingPath,
        options: &'a EncodeOptions,
    ) -> Self {
        Self {
            graph,
            slot,
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

    pub fn keyed_container(self) -> KeyedEncoder<'a> {
        KeyedEncoder::new(self.graph, self.slot, self.coding_path, self.options)
    }

    pub fn unkeyed_container(self) -> UnkeyedEncoder<'a> {
        UnkeyedEncoder::new(self.graph, self.slot, self.coding_path, self.options)
    }

    pub fn single_value_container(self) -> SingleValueEncoder<'a> {
        SingleValueEncoder::new(self.graph, self.slot, self.coding_path, self.options)
    }
}

/// Encodes `value` into an SMO value with default options.
pub fn to_value<T: Encode + ?Sized>(value: &T) -> Result<SmoValue> {
    SmoEncoder::new().encode(value)
}

/// Encodes and serializes `value` with default options.
pub fn to_vec<T: Encode + ?Sized>(value: &T, format: SerializationFormat) -> Result<Vec<u8>> {
    SmoEncoder::new().encode_bytes(value, format)
}
