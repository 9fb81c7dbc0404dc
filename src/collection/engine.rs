use super::policy::CollectionPolicy;
use crate::config::CollectionConfig;
use crate::core::{CollectionError, ElementType, IndexKey, Result};
use crate::storage::{Handle, IdentityStore, Iter, SecondaryIndex};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};

/// Type-erased item accepted by the `*_any` entry points.
pub type AnyItem = Arc<dyn Any + Send + Sync>;

/// Typed, identity-deduplicated collection with an optional secondary index.
///
/// Items are shared: attaching stores a clone of the caller's `Arc`, detaching
/// drops it. Iteration follows insertion order. The secondary index maps the
/// key derived by `P::index_by` to at most one item; the most recent attach
/// wins a key collision.
pub struct Collection<P: CollectionPolicy> {
    store: IdentityStore<P::Item>,
    index: SecondaryIndex,
    config: CollectionConfig,
    policy: PhantomData<fn() -> P>,
}

impl<P: CollectionPolicy> Collection<P> {
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    pub fn with_config(config: CollectionConfig) -> Self {
        Self {
            store: IdentityStore::with_capacity(config.capacity),
            index: SecondaryIndex::with_capacity(config.capacity),
            config,
            policy: PhantomData,
        }
    }

    /// Builds a collection by attaching `items` in order.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<P::Item>>,
    {
        let mut collection = Self::new();
        for item in items {
            collection.attach(item);
        }
        collection
    }

    /// Builds a collection from type-erased items.
    ///
    /// Fails on the first item that is not a `P::Item`.
    pub fn try_from_any<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = AnyItem>,
    {
        let mut collection = Self::new();
        collection.attach_all_any(items)?;
        Ok(collection)
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn element_type(&self) -> ElementType {
        P::element_type()
    }

    /// Configured label, or the element type name.
    pub fn label(&self) -> &str {
        self.config
            .label
            .as_deref()
            .unwrap_or_else(|| P::element_type().name())
    }

    /// Adds an item, or refreshes its index entry if the same instance is
    /// already attached.
    ///
    /// A repeated attach keeps the originally stored instance and position
    /// but re-derives the item's index key, taking the key over from any
    /// other item that holds it.
    pub fn attach(&mut self, item: impl Into<Arc<P::Item>>) -> Handle {
        let item = item.into();
        let (handle, created) = self.store.insert(&item);

        match P::index_by(&item).and_then(|key| key.canonicalize()) {
            Some(key) => {
                trace!(collection = %self.label(), %handle, %key, created, "attach");
                if let Some(displaced) = self.index.set(Some(key), handle) {
                    debug!(
                        collection = %self.label(),
                        %handle,
                        %displaced,
                        "index key taken over by newer item"
                    );
                }
            }
            None => {
                trace!(collection = %self.label(), %handle, created, "attach without index key");
                self.index.unset_handle(handle);
            }
        }

        handle
    }

    /// Attaches a type-erased item.
    ///
    /// Returns `TypeMismatch` without touching the collection when the item
    /// is not a `P::Item`.
    pub fn attach_any(&mut self, item: AnyItem) -> Result<Handle> {
        let item = item
            .downcast::<P::Item>()
            .map_err(|_| self.type_mismatch())?;
        Ok(self.attach(item))
    }

    /// Attaches type-erased items in order.
    ///
    /// Stops at the first `TypeMismatch`; items before it stay attached.
    pub fn attach_all_any<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = AnyItem>,
    {
        for item in items {
            if let Err(err) = self.attach_any(item) {
                debug!(collection = %self.label(), error = %err, "rejected item");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Removes an item and the index entry it owns.
    ///
    /// The index entry is evicted only if it still points at this item; a key
    /// taken over by a newer item survives. Returns `false` when the item was
    /// not attached.
    pub fn detach(&mut self, item: &Arc<P::Item>) -> bool {
        let Some(handle) = self.store.remove(item) else {
            return false;
        };
        let evicted = self.index.unset_handle(handle);
        trace!(
            collection = %self.label(),
            %handle,
            evicted = evicted.is_some(),
            "detach"
        );
        true
    }

    /// Attaches every item of `other` in its iteration order.
    pub fn merge<Q>(&mut self, other: &Collection<Q>)
    where
        Q: CollectionPolicy<Item = P::Item>,
    {
        let before = self.len();
        for item in other.iter() {
            self.attach(Arc::clone(item));
        }
        debug!(
            collection = %self.label(),
            source = %other.label(),
            added = self.len() - before,
            "merge"
        );
    }

    /// Merges type-erased items, as [`Collection::attach_all_any`] does.
    pub fn merge_any<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = AnyItem>,
    {
        let before = self.len();
        let result = self.attach_all_any(items);
        debug!(collection = %self.label(), added = self.len() - before, "merge");
        result
    }

    pub fn contains(&self, item: &Arc<P::Item>) -> bool {
        self.store.contains(item)
    }

    /// Handle the item is stored under, if attached.
    pub fn handle_of(&self, item: &Arc<P::Item>) -> Option<Handle> {
        self.store.handle_of(item)
    }

    /// Looks an item up by its index key.
    ///
    /// Accepts anything convertible to an [`IndexKey`]: integers, strings,
    /// tuples of those for composite keys.
    pub fn get(&self, key: impl Into<IndexKey>) -> Option<&Arc<P::Item>> {
        let key = key.into().canonicalize()?;
        let handle = self.index.get(&key)?;
        self.store.get(handle)
    }

    pub fn first(&self) -> Result<&Arc<P::Item>> {
        self.store.first().ok_or_else(|| self.out_of_range("first"))
    }

    pub fn last(&self) -> Result<&Arc<P::Item>> {
        self.store.last().ok_or_else(|| self.out_of_range("last"))
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of keys currently resolvable through `get`.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn clear(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        self.index.clear();
        debug!(collection = %self.label(), dropped, "clear");
    }

    pub fn iter(&self) -> Iter<'_, P::Item> {
        self.store.iter()
    }

    pub fn to_vec(&self) -> Vec<Arc<P::Item>> {
        self.store.iter().cloned().collect()
    }

    /// Independent structural clone: same items, order and index.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// New collection holding the items for which `predicate` holds.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&P::Item) -> bool,
    {
        self.rebuild(self.store.iter().filter(|item| predicate(item)).cloned())
    }

    /// New collection ordered by `compare`.
    ///
    /// The sort is stable: equal items keep their relative order.
    pub fn sort_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&P::Item, &P::Item) -> Ordering,
    {
        let mut items = self.to_vec();
        items.sort_by(|a, b| compare(a, b));
        self.rebuild(items)
    }

    fn rebuild<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = Arc<P::Item>>,
    {
        let mut collection = Self::with_config(self.config.clone());
        for item in items {
            collection.attach(item);
        }
        collection
    }

    fn out_of_range(&self, position: &str) -> CollectionError {
        CollectionError::OutOfRange(format!(
            "cannot take the {} item of empty collection '{}'",
            position,
            self.label()
        ))
    }

    fn type_mismatch(&self) -> CollectionError {
        CollectionError::TypeMismatch {
            expected: P::element_type().name(),
            collection: self.label().to_string(),
        }
    }
}

impl<P: CollectionPolicy> Default for Collection<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CollectionPolicy> Clone for Collection<P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            index: self.index.clone(),
            config: self.config.clone(),
            policy: PhantomData,
        }
    }
}

/// Two collections are equal when they hold the same instances in the same
/// order.
impl<P: CollectionPolicy> PartialEq for Collection<P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl<P: CollectionPolicy> Eq for Collection<P> {}

impl<P> fmt::Debug for Collection<P>
where
    P: CollectionPolicy,
    P::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<P: CollectionPolicy> FromIterator<Arc<P::Item>> for Collection<P> {
    fn from_iter<I: IntoIterator<Item = Arc<P::Item>>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<P: CollectionPolicy> Extend<Arc<P::Item>> for Collection<P> {
    fn extend<I: IntoIterator<Item = Arc<P::Item>>>(&mut self, iter: I) {
        for item in iter {
            self.attach(item);
        }
    }
}

impl<'a, P: CollectionPolicy> IntoIterator for &'a Collection<P> {
    type Item = &'a Arc<P::Item>;
    type IntoIter = Iter<'a, P::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: CollectionPolicy> IntoIterator for Collection<P> {
    type Item = Arc<P::Item>;
    type IntoIter = std::collections::btree_map::IntoValues<Handle, Arc<P::Item>>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_items()
    }
}
