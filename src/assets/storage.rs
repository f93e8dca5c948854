use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};

// Internal data structure, protected by a lock.
pub struct StorageInner<H: Key, T> {
    pub map: SlotMap<H, Arc<T>>,
    pub lookup: FxHashMap<String, H>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
        }
    }
}

/// Thread-safe asset container handing out typed handles.
///
/// Named insertion deduplicates by name with first-registration-wins
/// semantics, so re-loading a model under the same name returns the
/// already stored document.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// [Write] Adds an anonymous resource and returns its handle.
    pub fn add(&self, asset: impl Into<T>) -> H {
        let mut guard = self.inner.write();
        guard.map.insert(Arc::new(asset.into()))
    }

    /// [Write] Adds a resource under `name`, deduplicating by name.
    /// Returns the handle and the stored value (the first-registered one
    /// when the name was already taken).
    pub fn add_named(&self, name: &str, asset: impl Into<T>) -> (H, Arc<T>) {
        let mut guard = self.inner.write();
        if let Some(&handle) = guard.lookup.get(name) {
            if let Some(existing) = guard.map.get(handle) {
                return (handle, Arc::clone(existing));
            }
        }
        let stored = Arc::new(asset.into());
        let handle = guard.map.insert(Arc::clone(&stored));
        guard.lookup.insert(name.to_owned(), handle);
        (handle, stored)
    }

    /// [Read] Gets a single resource.
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        let guard = self.inner.read();
        guard.map.get(handle).cloned()
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<T>> {
        let guard = self.inner.read();
        let handle = guard.lookup.get(name)?;
        guard.map.get(*handle).cloned()
    }

    // Gets a handle by name (when only the name is known).
    pub fn get_handle(&self, name: &str) -> Option<H> {
        let guard = self.inner.read();
        guard.lookup.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }

    /// [Read - Advanced] Acquires a read-lock guard for batch access.
    pub fn read_lock(&self) -> RwLockReadGuard<'_, StorageInner<H, T>> {
        self.inner.read()
    }
}
