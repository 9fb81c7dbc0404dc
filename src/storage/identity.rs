use std::collections::{BTreeMap, HashMap, btree_map};
use std::fmt;
use std::sync::Arc;

/// Stable per-item token assigned at first insertion.
///
/// Handles come from a monotonically increasing counter and are never reused
/// within one store, so handle order is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocation address of an `Arc`, used as the identity of an attached item.
///
/// The address stays valid while the store holds its own clone, so it cannot
/// be reused by another allocation for as long as the item is a member.
fn identity_of<T>(item: &Arc<T>) -> usize {
    Arc::as_ptr(item) as *const () as usize
}

/// Insertion-ordered, identity-deduplicated storage of shared items.
pub struct IdentityStore<T> {
    items: BTreeMap<Handle, Arc<T>>,
    handles: HashMap<usize, Handle>,
    next_handle: u64,
}

impl<T> IdentityStore<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            handles: HashMap::new(),
            next_handle: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            handles: HashMap::with_capacity(capacity),
            next_handle: 0,
        }
    }

    /// Inserts `item` unless the same instance is already present.
    ///
    /// Returns the item's handle and whether a new entry was created. An
    /// existing entry keeps its original value and position.
    pub fn insert(&mut self, item: &Arc<T>) -> (Handle, bool) {
        let identity = identity_of(item);
        if let Some(handle) = self.handles.get(&identity) {
            return (*handle, false);
        }

        let handle = Handle(self.next_handle);
        self.next_handle += 1;

        self.handles.insert(identity, handle);
        self.items.insert(handle, Arc::clone(item));
        (handle, true)
    }

    /// Removes `item` and returns the handle it was stored under.
    pub fn remove(&mut self, item: &Arc<T>) -> Option<Handle> {
        let handle = self.handles.remove(&identity_of(item))?;
        self.items.remove(&handle);
        Some(handle)
    }

    pub fn contains(&self, item: &Arc<T>) -> bool {
        self.handles.contains_key(&identity_of(item))
    }

    pub fn handle_of(&self, item: &Arc<T>) -> Option<Handle> {
        self.handles.get(&identity_of(item)).copied()
    }

    pub fn get(&self, handle: Handle) -> Option<&Arc<T>> {
        self.items.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&Arc<T>> {
        self.items.first_key_value().map(|(_, item)| item)
    }

    pub fn last(&self) -> Option<&Arc<T>> {
        self.items.last_key_value().map(|(_, item)| item)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.values(),
        }
    }

    pub fn into_items(self) -> btree_map::IntoValues<Handle, Arc<T>> {
        self.items.into_values()
    }

    /// Drops every entry. The handle counter keeps counting.
    pub fn clear(&mut self) {
        self.items.clear();
        self.handles.clear();
    }
}

/// Insertion-ordered traversal over a store's items.
pub struct Iter<'a, T> {
    inner: btree_map::Values<'a, Handle, Arc<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Arc<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for IdentityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Derive would require `T: Clone`; only the `Arc`s are cloned here.
impl<T> Clone for IdentityStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            handles: self.handles.clone(),
            next_handle: self.next_handle,
        }
    }
}

impl<T> fmt::Debug for IdentityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityStore")
            .field("len", &self.items.len())
            .field("next_handle", &self.next_handle)
            .finish()
    }
}
