use super::storage::{SlotId, StorageGraph};
use super::{Encode, Encoder, KeyedEncoder, SingleValueEncoder};
use crate::error::Result;
use crate::options::EncodeOptions;
use crate::path::CodingPath;

/// Appends elements to an `Array`.
#[derive(Debug)]
pub struct UnkeyedEncoder<'a> {
    graph: &'a mut StorageGraph,
    slot: SlotId,
    coding_path: CodingPath,
    options: &'a EncodeOptions,
}

impl<'a> UnkeyedEncoder<'a> {
    pub(crate) fn new(
        graph: &'a mut StorageGraph,
        slot: SlotId,
        coding_path: CodingPath,
        options: &'a EncodeOptions,
    ) -> Self {
        graph.claim_unkeyed(slot);
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

    /// Number of elements appended so far.
    pub fn count(&self) -> usize {
        self.graph.child_count(self.slot)
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.next_single_value().encode_nil()
    }

    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.next_single_value().encode(value)
    }

    pub fn encode_all<'v, T, I>(&mut self, values: I) -> Result<()>
    where
        T: Encode + 'v + ?Sized,
        I: IntoIterator<Item = &'v T>,
    {
        for value in values {
            self.encode(value)?;
        }
        Ok(())
    }

    pub fn nested_keyed_container(&mut self) -> KeyedEncoder<'_> {
        let (slot, coding_path) = self.append();
        KeyedEncoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    pub fn nested_unkeyed_container(&mut self) -> UnkeyedEncoder<'_> {
        let (slot, coding_path) = self.append();
        UnkeyedEncoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    /// Encoder for a new trailing element.
    pub fn super_encoder(&mut self) -> Encoder<'_> {
        let (slot, coding_path) = self.append();
        Encoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    fn next_single_value(&mut self) -> SingleValueEncoder<'_> {
        let (slot, coding_path) = self.append();
        SingleValueEncoder::new(&mut *self.graph, slot, coding_path, self.options)
    }

    /// Appends a child slot; its path index is the length before appending.
    fn append(&mut self) -> (SlotId, CodingPath) {
        let (index, child) = self.graph.push_child(self.slot);
        (child, self.coding_path.appending_index(index))
    }
}
