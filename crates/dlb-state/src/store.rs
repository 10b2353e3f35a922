//! # Generic In-Memory Store
//!
//! Thread-safe, cloneable record collection shared by the bookmark and
//! annotation stores. Records keep insertion order so listings are stable.
//!
//! All operations are synchronous. The lock is `parking_lot::RwLock`,
//! which is never held across an `.await` and does not poison.

use std::sync::Arc;

use parking_lot::RwLock;

/// A record with a stable identifier.
pub trait Record: Clone + Send + Sync {
    type Id: PartialEq + Clone + Send + Sync;

    fn id(&self) -> &Self::Id;
}

impl Record for dlb_core::Bookmark {
    type Id = dlb_core::BookmarkId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for dlb_core::Annotation {
    type Id = dlb_core::AnnotationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Insertion-ordered collection of records behind a shared lock.
#[derive(Debug)]
pub struct Store<T: Record> {
    data: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Record> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            data: Arc::new(RwLock::new(records)),
        }
    }

    /// Append a record.
    pub fn insert(&self, value: T) {
        self.data.write().push(value);
    }

    /// Retrieve a record by id.
    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.data.read().iter().find(|r| r.id() == id).cloned()
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().clone()
    }

    /// Records matching `pred`, in insertion order.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.data.read().iter().filter(|r| pred(r)).cloned().collect()
    }

    /// First record matching `pred`.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().iter().find(|r| pred(r)).cloned()
    }

    /// Whether any record matches `pred`.
    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.data.read().iter().any(pred)
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure may inspect the record, reject the change with `Err`, or
    /// mutate it and return `Ok`. The whole operation runs under one write
    /// lock. Returns `None` if the record doesn't exist.
    pub fn try_update<R, E>(
        &self,
        id: &T::Id,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().iter_mut().find(|r| r.id() == id).map(f)
    }

    /// Remove a record after `check` approves it, under one write lock.
    ///
    /// Returns `None` if the record doesn't exist.
    pub fn try_remove<E>(
        &self,
        id: &T::Id,
        check: impl FnOnce(&T) -> Result<(), E>,
    ) -> Option<Result<T, E>> {
        let mut guard = self.data.write();
        let pos = guard.iter().position(|r| r.id() == id)?;
        Some(check(&guard[pos]).map(|()| guard.remove(pos)))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}
