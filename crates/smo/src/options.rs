//! Options shared by the top-level encoder and decoder.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::key::{KeyDecodingStrategy, KeyEncodingStrategy};

/// Opaque key/value bag handed unchanged to every `Encode`/`Decode` call.
#[derive(Clone, Default)]
pub struct UserInfo {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Arc::new(value));
    }

    /// The value stored under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Options controlling decoding.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub key_decoding_strategy: KeyDecodingStrategy,
    pub user_info: UserInfo,
}

impl DecodeOptions {
    pub fn with_key_decoding_strategy(mut self, strategy: KeyDecodingStrategy) -> Self {
        self.key_decoding_strategy = strategy;
        self
    }

    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = user_info;
        self
    }
}

/// Options controlling encoding.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    pub key_encoding_strategy: KeyEncodingStrategy,
    pub user_info: UserInfo,
}

impl EncodeOptions {
    pub fn with_key_encoding_strategy(mut self, strategy: KeyEncodingStrategy) -> Self {
        self.key_encoding_strategy = strategy;
        self
    }

    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = user_info;
        self
    }
}
