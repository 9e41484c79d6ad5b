use super::storage::{SlotId, StorageGraph};
use super::{Encode, Encoder};
use crate::error::{Error, Result};
use crate::number::SmoInteger;
use crate::options::EncodeOptions;
use crate::path::CodingPath;
use crate::value::SmoValue;

/// Writes exactly one value into its slot.
///
/// # Panics
///
/// Every `encode_*` method panics if a value was already written.
#[derive(Debug)]
pub struct SingleValueEncoder<'a> {
    graph: &'a mut StorageGraph,
    slot: SlotId,
    coding_path: CodingPath,
    options: &'a EncodeOptions,
}

macro_rules! encode_integers {
    ($($name:ident => $ty:ty,)*) => {$(
        pub fn $name(&mut self, value: $ty) -> Result<()> {
            self.encode_integer(value)
        }
    )*};
}

impl<'a> SingleValueEncoder<'a> {
    pub(crate) fn new(
        graph: &'a mut StorageGraph,
        slot: SlotId,
        coding_path: CodingPath,
        options: &'a EncodeOptions,
    ) -> Self {
        graph.claim_single(slot);
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

    pub fn encode_nil(&mut self) -> Result<()> {
        self.encode_value(SmoValue::null())
    }

    pub fn encode_bool(&mut self, value: bool) -> Result<()> {
        self.encode_value(SmoValue::from(value))
    }

    pub fn encode_str(&mut self, value: &str) -> Result<()> {
        self.encode_value(SmoValue::String(value.to_owned()))
    }

    /// Raw binary data, written as `Bytes`.
    pub fn encode_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.encode_value(SmoValue::Bytes(value.to_vec()))
    }

    encode_integers! {
        encode_i8 => i8,
        encode_i16 => i16,
        encode_i32 => i32,
        encode_i64 => i64,
        encode_isize => isize,
        encode_u8 => u8,
        encode_u16 => u16,
        encode_u32 => u32,
        encode_u64 => u64,
        encode_usize => usize,
    }

    /// Stores an `Integer` when the value fits in 64 signed bits, otherwise
    /// a `Float` when the double is exact.
    pub fn encode_integer<T: SmoInteger>(&mut self, value: T) -> Result<()> {
        if let Some(i) = value.to_i64_exact() {
            return self.encode_value(SmoValue::Integer(i));
        }
        if let Some(f) = value.to_f64_exact() {
            return self.encode_value(SmoValue::Float(f));
        }
        Err(Error::invalid_value(
            &self.coding_path,
            value.to_i128(),
            format!(
                "{} value does not fit in an SMO integer or float.",
                T::TYPE_NAME
            ),
        ))
    }

    pub fn encode_f32(&mut self, value: f32) -> Result<()> {
        self.encode_value(SmoValue::Float(f64::from(value)))
    }

    pub fn encode_f64(&mut self, value: f64) -> Result<()> {
        self.encode_value(SmoValue::Float(value))
    }

    pub fn encode_value(&mut self, value: SmoValue) -> Result<()> {
        self.graph.store(self.slot, value);
        Ok(())
    }

    /// Encodes a nested `T` into a detached slot and stores the result.
    /// If `T` writes nothing, this slot stays empty.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        let detached = self.graph.allocate();
        value.encode(Encoder::new(
            &mut *self.graph,
            detached,
            self.coding_path.clone(),
            self.options,
        ))?;
        match self.graph.try_unwrap(detached) {
            Some(resolved) => self.encode_value(resolved),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_one(
        f: impl FnOnce(&mut SingleValueEncoder<'_>) -> Result<()>,
    ) -> Result<Option<SmoValue>> {
        let mut graph = StorageGraph::new();
        let root = graph.allocate();
        let options = EncodeOptions::default();
        let mut single = SingleValueEncoder::new(&mut graph, root, CodingPath::new(), &options);
        f(&mut single)?;
        Ok(graph.try_unwrap(root))
    }

    #[test]
    fn wide_unsigned_falls_back_to_float() {
        assert_eq!(
            encode_one(|s| s.encode_u64(1 << 63)),
            Ok(Some(SmoValue::Float(9223372036854775808.0)))
        );
        assert_eq!(
            encode_one(|s| s.encode_u64(i64::MAX as u64)),
            Ok(Some(SmoValue::Integer(i64::MAX)))
        );
        assert!(matches!(
            encode_one(|s| s.encode_u64(u64::MAX - 1)),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn scalars_map_to_variants() {
        assert_eq!(encode_one(|s| s.encode_nil()), Ok(Some(SmoValue::null())));
        assert_eq!(encode_one(|s| s.encode_bool(false)), Ok(Some(SmoValue::from(false))));
        assert_eq!(
            encode_one(|s| s.encode_bytes(b"ab")),
            Ok(Some(SmoValue::Bytes(b"ab".to_vec())))
        );
        assert_eq!(encode_one(|s| s.encode_f32(0.5)), Ok(Some(SmoValue::Float(0.5))));
        assert_eq!(encode_one(|_| Ok(())), Ok(None));
    }

    #[test]
    #[should_panic(expected = "already written")]
    fn second_write_panics() {
        let _ = encode_one(|s| {
            s.encode_i8(1)?;
            s.encode_i8(2)
        });
    }
}
