use std::borrow::Cow;

use indexmap::IndexMap;

use super::{Decode, Decoder, UnkeyedDecoder};
use crate::error::{Error, Result};
use crate::key::{convert_from_snake_case, convert_to_snake_case, KeyDecodingStrategy};
use crate::options::DecodeOptions;
use crate::path::{CodingPath, PathSegment};
use crate::value::{SmoValue, Symbol};

/// Reads named fields out of an `Object`.
///
/// Keys found in the data are rewritten through the key decoding strategy
/// once, when the container is created; every lookup uses the rewritten
/// spelling. When two keys rewrite to the same spelling the first one wins.
#[derive(Debug)]
pub struct KeyedDecoder<'a> {
    entries: IndexMap<String, &'a SmoValue>,
    coding_path: CodingPath,
    options: &'a DecodeOptions,
}

impl<'a> KeyedDecoder<'a> {
    pub(crate) fn new(
        value: &'a SmoValue,
        coding_path: CodingPath,
        options: &'a DecodeOptions,
    ) -> Result<Self> {
        let SmoValue::Object(object) = value else {
            return Err(Error::type_mismatch(
                &coding_path,
                "an object",
                value.description(),
            ));
        };

        let mut entries = IndexMap::with_capacity(object.len());
        for (key, child) in object {
            let key = match &options.key_decoding_strategy {
                KeyDecodingStrategy::UseDefaultKeys => key.clone(),
                KeyDecodingStrategy::ConvertFromSnakeCase => convert_from_snake_case(key),
                KeyDecodingStrategy::Custom(convert) => {
                    convert(coding_path.appending_key(key).segments())
                }
            };
            entries.entry(key).or_insert(child);
        }

        Ok(Self {
            entries,
            coding_path,
            options,
        })
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// Every key in the container, after rewriting.
    pub fn all_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` holds `null`. A missing key is an error.
    pub fn decode_nil(&self, key: &str) -> Result<bool> {
        let value = self.value_for(key)?;
        Ok(matches!(value, SmoValue::Symbol(Symbol::Null)))
    }

    pub fn decode<T: Decode>(&self, key: &str) -> Result<T> {
        let value = self.value_for(key)?;
        T::decode(&self.child(key, Cow::Borrowed(value)))
    }

    /// `None` when `key` is missing or holds `null`.
    pub fn decode_if_present<T: Decode>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(SmoValue::Symbol(Symbol::Null)) => Ok(None),
            Some(value) => T::decode(&self.child(key, Cow::Borrowed(*value))).map(Some),
        }
    }

    pub fn nested_keyed_container(&self, key: &str) -> Result<KeyedDecoder<'a>> {
        let value = self.value_for(key)?;
        KeyedDecoder::new(value, self.coding_path.appending_key(key), self.options)
    }

    pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedDecoder<'a>> {
        let value = self.value_for(key)?;
        UnkeyedDecoder::new(value, self.coding_path.appending_key(key), self.options)
    }

    /// Decoder for the value under the reserved `"super"` key.
    pub fn super_decoder(&self) -> Decoder<'a> {
        self.super_decoder_for_key(PathSegment::SUPER_KEY)
    }

    /// Decoder for the value under `key`, or for `undefined` when the key is
    /// missing. Never fails.
    pub fn super_decoder_for_key(&self, key: &str) -> Decoder<'a> {
        let storage = match self.entries.get(key) {
            Some(value) => Cow::Borrowed(*value),
            None => Cow::Owned(SmoValue::undefined()),
        };
        self.child(key, storage)
    }

    fn child(&self, key: &str, storage: Cow<'a, SmoValue>) -> Decoder<'a> {
        Decoder::new(storage, self.coding_path.appending_key(key), self.options)
    }

    fn value_for(&self, key: &str) -> Result<&'a SmoValue> {
        self.entries.get(key).copied().ok_or_else(|| Error::KeyNotFound {
            path: self.coding_path.clone(),
            key: key.to_owned(),
            message: format!("No value associated with key {}.", self.describe_key(key)),
        })
    }

    /// Spells out `key` for diagnostics, undoing the snake-case rewrite
    /// when that strategy is active.
    fn describe_key(&self, key: &str) -> String {
        match &self.options.key_decoding_strategy {
            KeyDecodingStrategy::ConvertFromSnakeCase => {
                let original = convert_to_snake_case(key);
                if original == key {
                    format!("{key:?} (\"{key}\")")
                } else {
                    format!("{key:?} (\"{key}\"), converted to {original}")
                }
            }
            KeyDecodingStrategy::UseDefaultKeys | KeyDecodingStrategy::Custom(_) => {
                format!("{key:?} (\"{key}\")")
            }
        }
    }
}
