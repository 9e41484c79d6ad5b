use super::storage::{SlotId, StorageGraph};
use super::{Encode, Encoder, SingleValueEncoder, UnkeyedEncoder};
use crate::error::Result;
use crate::key::{convert_to_snake_case, KeyEncodingStrategy};
use crate::options::EncodeOptions;
use crate::path::{CodingPath, PathSegment};

/// Writes named fields into an `Object`.
///
/// Every key passes through the key encoding strategy before it is stored.
/// Writing the same key twice keeps the last value.
#[derive(Debug)]
pub struct KeyedEncoder<'a> {
    graph: &'a mut StorageGraph,
    slot: SlotId,
    coding_path: CodingPath,
    options: &'a EncodeOptions,
}

impl<'a> KeyedEncoder<'a> {
    pub(crate) fn new(
        graph: &'a mut StorageGraph,
        slot: SlotId,
        coding_path: CodingPath,
        options: &'a EncodeOptions,
    ) -> Self {
        graph.claim_keyed(slot);
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

    /// Number of distinct keys written so far.
    pub fn count(&self) -> usize {
        self.graph.child_count(self.slot)
    }

    pub fn encode_nil(&mut self, key: &str) -> Result<()> {
        self.single_value_for(key).encode_nil()
    }

    pub fn encode<T: Encode + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.single_value_for(key).encode(value)
    }

    /// Skips the key entirely when `value` is `None`.
    pub fn encode_if_present<T: Encode>(&mut self, key: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    pub fn nested_keyed_container(&mut self, key: &str) -> KeyedEncoder<'_> {
        let (slot, coding_path) = self.insert(key);
        KeyedEncoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    pub fn nested_unkeyed_container(&mut self, key: &str) -> UnkeyedEncoder<'_> {
        let (slot, coding_path) = self.insert(key);
        UnkeyedEncoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    /// Encoder writing under the reserved `"super"` key.
    pub fn super_encoder(&mut self) -> Encoder<'_> {
        self.super_encoder_for_key(PathSegment::SUPER_KEY)
    }

    pub fn super_encoder_for_key(&mut self, key: &str) -> Encoder<'_> {
        let (slot, coding_path) = self.insert(key);
        Encoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    fn single_value_for(&mut self, key: &str) -> SingleValueEncoder<'_> {
        let (slot, coding_path) = self.insert(key);
        SingleValueEncoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    /// Allocates the child slot for `key` under its converted spelling.
    fn insert(&mut self, key: &str) -> (SlotId, CodingPath) {
        let converted = self.convert(key);
        let child = self.graph.insert_child(self.slot, converted);
        (child, self.coding_path.appending_key(key))
    }

    fn convert(&self, key: &str) -> String {
        match &self.options.key_encoding_strategy {
            KeyEncodingStrategy::UseDefaultKeys => key.to_owned(),
            KeyEncodingStrategy::ConvertToSnakeCase => convert_to_snake_case(key),
            KeyEncodingStrategy::Custom(convert) => {
                convert(self.coding_path.appending_key(key).segments())
            }
        }
    }
}
