use std::borrow::Cow;

use super::{Decode, Decoder, KeyedDecoder};
use crate::error::{Error, Result};
use crate::options::DecodeOptions;
use crate::path::CodingPath;
use crate::value::{SmoValue, Symbol};

/// Reads elements of an `Array` in order.
///
/// `Bytes` is accepted too and reads as one `Integer` per byte.
#[derive(Debug)]
pub struct UnkeyedDecoder<'a> {
    elements: Vec<Cow<'a, SmoValue>>,
    coding_path: CodingPath,
    options: &'a DecodeOptions,
    current_index: usize,
}

impl<'a> UnkeyedDecoder<'a> {
    pub(crate) fn new(
        value: &'a SmoValue,
        coding_path: CodingPath,
        options: &'a DecodeOptions,
    ) -> Result<Self> {
        let elements = match value {
            SmoValue::Array(items) => items.iter().map(Cow::Borrowed).collect(),
            SmoValue::Bytes(bytes) => bytes
                .iter()
                .map(|b| Cow::Owned(SmoValue::Integer(i64::from(*b))))
                .collect(),
            other => {
                return Err(Error::type_mismatch(
                    &coding_path,
                    "an array",
                    other.description(),
                ))
            }
        };
        Ok(Self {
            elements,
            coding_path,
            options,
            current_index: 0,
        })
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.elements.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether the next element is `null`. The cursor only moves past it
    /// when it is.
    pub fn decode_nil(&mut self) -> Result<bool> {
        let is_null = matches!(self.peek()?, SmoValue::Symbol(Symbol::Null));
        if is_null {
            self.current_index += 1;
        }
        Ok(is_null)
    }

    pub fn decode<T: Decode>(&mut self) -> Result<T> {
        let decoder = self.next_decoder()?;
        T::decode(&decoder)
    }

    /// `None` at the end or on `null`; both consume nothing but the `null`.
    pub fn decode_if_present<T: Decode>(&mut self) -> Result<Option<T>> {
        if self.is_at_end() || self.decode_nil()? {
            return Ok(None);
        }
        self.decode().map(Some)
    }

    pub fn nested_keyed_container(&mut self) -> Result<KeyedDecoder<'a>> {
        let path = self.element_path();
        match self.take_next()? {
            Cow::Borrowed(value) => KeyedDecoder::new(value, path, self.options),
            Cow::Owned(value) => Err(Error::type_mismatch(
                &path,
                "an object",
                value.description(),
            )),
        }
    }

    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedDecoder<'a>> {
        let path = self.element_path();
        match self.take_next()? {
            Cow::Borrowed(value) => UnkeyedDecoder::new(value, path, self.options),
            Cow::Owned(value) => Err(Error::type_mismatch(
                &path,
                "an array",
                value.description(),
            )),
        }
    }

    /// Decoder over the next element.
    pub fn super_decoder(&mut self) -> Result<Decoder<'a>> {
        self.next_decoder()
    }

    fn next_decoder(&mut self) -> Result<Decoder<'a>> {
        let path = self.element_path();
        let storage = self.take_next()?;
        Ok(Decoder::new(storage, path, self.options))
    }

    fn element_path(&self) -> CodingPath {
        self.coding_path.appending_index(self.current_index)
    }

    fn peek(&self) -> Result<&SmoValue> {
        self.elements
            .get(self.current_index)
            .map(|value| &**value)
            .ok_or_else(|| self.end_of_data())
    }

    /// Hands out the current element and advances the cursor.
    fn take_next(&mut self) -> Result<Cow<'a, SmoValue>> {
        let element = self
            .elements
            .get(self.current_index)
            .cloned()
            .ok_or_else(|| self.end_of_data())?;
        self.current_index += 1;
        Ok(element)
    }

    fn end_of_data(&self) -> Error {
        Error::data_corrupted(&self.element_path(), "Unexpected end of data")
    }
}
