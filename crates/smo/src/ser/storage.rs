//! Write-once storage graph built up by the encode containers.
//!
//! Every container owns one slot of the graph. A slot is claimed exactly
//! once, by the container created for it, and becomes keyed, unkeyed or
//! single-valued. Children are slots themselves, referenced by id, so
//! nested containers never hold pointers to their parents.

use std::mem;

use indexmap::IndexMap;

use crate::value::{SmoMap, SmoValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

#[derive(Debug, Default)]
enum Slot {
    /// Allocated but not yet claimed by a container.
    #[default]
    Empty,
    Keyed(IndexMap<String, SlotId>),
    Unkeyed(Vec<SlotId>),
    /// Claimed by a single-value container; `None` until a value lands.
    Single(Option<SmoValue>),
}

#[derive(Debug, Default)]
pub(crate) struct StorageGraph {
    slots: Vec<Slot>,
}

impl StorageGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh, unclaimed slot.
    pub(crate) fn allocate(&mut self) -> SlotId {
        self.slots.push(Slot::Empty);
        SlotId(self.slots.len() - 1)
    }

    pub(crate) fn claim_keyed(&mut self, id: SlotId) {
        self.claim(id, Slot::Keyed(IndexMap::new()));
    }

    pub(crate) fn claim_unkeyed(&mut self, id: SlotId) {
        self.claim(id, Slot::Unkeyed(Vec::new()));
    }

    pub(crate) fn claim_single(&mut self, id: SlotId) {
        self.claim(id, Slot::Single(None));
    }

    /// # Panics
    ///
    /// If the slot was already claimed by another container.
    fn claim(&mut self, id: SlotId, storage: Slot) {
        let slot = &mut self.slots[id.0];
        assert!(
            matches!(slot, Slot::Empty),
            "storage slot {} already holds a container",
            id.0
        );
        *slot = storage;
    }

    /// Allocates a child slot under `key`. A later insert under the same key
    /// replaces the earlier child but keeps its position.
    pub(crate) fn insert_child(&mut self, id: SlotId, key: String) -> SlotId {
        let child = self.allocate();
        match &mut self.slots[id.0] {
            Slot::Keyed(children) => {
                children.insert(key, child);
            }
            other => panic!("slot {} is not keyed: {other:?}", id.0),
        }
        child
    }

    /// Appends a child slot, returning its index and id.
    pub(crate) fn push_child(&mut self, id: SlotId) -> (usize, SlotId) {
        let child = self.allocate();
        match &mut self.slots[id.0] {
            Slot::Unkeyed(children) => {
                children.push(child);
                (children.len() - 1, child)
            }
            other => panic!("slot {} is not unkeyed: {other:?}", id.0),
        }
    }

    pub(crate) fn child_count(&self, id: SlotId) -> usize {
        match &self.slots[id.0] {
            Slot::Keyed(children) => children.len(),
            Slot::Unkeyed(children) => children.len(),
            Slot::Empty | Slot::Single(_) => 0,
        }
    }

    /// # Panics
    ///
    /// If the slot is not single-valued or already holds a value.
    pub(crate) fn store(&mut self, id: SlotId, value: SmoValue) {
        match &mut self.slots[id.0] {
            Slot::Single(current @ None) => *current = Some(value),
            Slot::Single(Some(_)) => {
                panic!("single-value slot {} was already written", id.0)
            }
            other => panic!("slot {} is not single-valued: {other:?}", id.0),
        }
    }

    /// Resolves a slot into a value, consuming what it and its children hold.
    ///
    /// `None` when nothing was written. Children that were never written
    /// resolve to `undefined`.
    pub(crate) fn try_unwrap(&mut self, id: SlotId) -> Option<SmoValue> {
        match mem::take(&mut self.slots[id.0]) {
            Slot::Empty => None,
            Slot::Single(value) => value,
            Slot::Keyed(children) => {
                let mut object = SmoMap::with_capacity(children.len());
                for (key, child) in children {
                    object.insert(key, self.unwrap_child(child));
                }
                Some(SmoValue::Object(object))
            }
            Slot::Unkeyed(children) => Some(SmoValue::Array(
                children
                    .into_iter()
                    .map(|child| self.unwrap_child(child))
                    .collect(),
            )),
        }
    }

    fn unwrap_child(&mut self, id: SlotId) -> SmoValue {
        self.try_unwrap(id).unwrap_or_else(SmoValue::undefined)
    }
}
