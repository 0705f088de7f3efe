//! Durable key-value storage seam and the single reference-template slot built on it.

use std::collections::BTreeMap;

use crate::assets::decode::SourceImage;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Byte-oriented key-value store that survives sessions.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    /// Store `value` under `key`. On failure the previous value is left untouched.
    fn put(&mut self, key: &str, value: Vec<u8>) -> SpriteResult<()>;
    /// Remove `key`. Returns `true` when it existed.
    fn remove(&mut self, key: &str) -> bool;
}

/// In-memory store with a total byte capacity (keys plus values).
#[derive(Clone, Debug)]
pub struct MemoryStore {
    capacity: usize,
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Store that holds at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: BTreeMap::new(),
        }
    }

    /// Bytes currently used.
    pub fn used(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> SpriteResult<()> {
        let replaced = self.entries.get(key).map_or(0, |v| key.len() + v.len());
        let needed = self.used() - replaced + key.len() + value.len();
        if needed > self.capacity {
            return Err(SpriteError::StorageFull {
                needed,
                capacity: self.capacity,
            });
        }
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

/// One named slot persisting a reference image as PNG.
#[derive(Debug)]
pub struct TemplateSlot<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TemplateSlot<S> {
    /// Default slot name.
    pub const DEFAULT_KEY: &'static str = "template-image";

    /// Slot under [`Self::DEFAULT_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, Self::DEFAULT_KEY)
    }

    /// Slot under an explicit key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Persist `image`, replacing any previous template.
    pub fn save(&mut self, image: &SourceImage) -> SpriteResult<()> {
        let png = image.to_png()?;
        self.store.put(&self.key, png)
    }

    /// Load the stored template, if present.
    pub fn load(&self) -> SpriteResult<Option<SourceImage>> {
        self.store
            .get(&self.key)
            .map(|bytes| SourceImage::decode(&bytes))
            .transpose()
    }

    /// Forget the stored template.
    pub fn clear(&mut self) -> bool {
        self.store.remove(&self.key)
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/storage.rs"]
mod tests;
