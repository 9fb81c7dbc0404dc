use super::identity::Handle;
use crate::core::CanonicalKey;
use std::collections::HashMap;

/// Single-valued secondary index from canonical keys to item handles.
///
/// A reverse `handle -> key` map keeps both directions in sync, so an entry
/// can be evicted by the handle that owns it without recomputing its key.
#[derive(Debug, Clone, Default)]
pub struct SecondaryIndex {
    by_key: HashMap<CanonicalKey, Handle>,
    by_handle: HashMap<Handle, CanonicalKey>,
}

impl SecondaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_key: HashMap::with_capacity(capacity),
            by_handle: HashMap::with_capacity(capacity),
        }
    }

    /// Points `key` at `handle`, overwriting any previous target.
    ///
    /// An absent key is a no-op. Returns the handle that lost the key, if a
    /// different one held it.
    pub fn set(&mut self, key: Option<CanonicalKey>, handle: Handle) -> Option<Handle> {
        let key = key?;

        // The handle may have been indexed under another key before.
        if let Some(old_key) = self.by_handle.remove(&handle)
            && old_key != key
            && self.by_key.get(&old_key) == Some(&handle)
        {
            self.by_key.remove(&old_key);
        }

        let displaced = self.by_key.insert(key.clone(), handle);
        if let Some(previous) = displaced
            && previous != handle
        {
            self.by_handle.remove(&previous);
        }
        self.by_handle.insert(handle, key);

        displaced.filter(|previous| *previous != handle)
    }

    /// Removes the mapping for exactly `key`, whichever handle it points at.
    pub fn unset(&mut self, key: Option<&CanonicalKey>) -> Option<Handle> {
        let handle = self.by_key.remove(key?)?;
        self.by_handle.remove(&handle);
        Some(handle)
    }

    /// Removes the entry owned by `handle`, if the handle still owns one.
    pub fn unset_handle(&mut self, handle: Handle) -> Option<CanonicalKey> {
        let key = self.by_handle.remove(&handle)?;
        self.by_key.remove(&key);
        Some(key)
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<Handle> {
        self.by_key.get(key).copied()
    }

    pub fn key_of(&self, handle: Handle) -> Option<&CanonicalKey> {
        self.by_handle.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_handle.clear();
    }
}
