//! Reactive cell primitive.
//!
//! [`Cell<T>`] is a thin handle over `futures_signals::signal::Mutable<T>`:
//! an observable value slot with subscribe-on-change semantics. It exists so
//! the rest of the crate (and embedding code) can talk about "cells" without
//! committing call sites to the underlying signal machinery.
//!
//! Clones share state: writing through any clone is observed by every signal
//! taken from any other clone.

use std::fmt;

use futures_signals::signal::{Mutable, MutableSignalCloned};

/// A reactive holder of a value of type `T`.
///
/// `Cell<T>` provides:
/// - `get()`: read a clone of the current value
/// - `set()` / `set_neq()`: write the value, notifying subscribers
/// - `update()`: read-modify-write under the cell's lock
/// - `signal()`: subscribe to changes
pub struct Cell<T> {
    inner: Mutable<T>,
}

impl<T: Clone + Send + Sync + 'static> Cell<T> {
    /// Create a new cell with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutable::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.get_cloned()
    }

    /// Set a new value, notifying subscribers.
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }

    /// Set a new value only if it differs from the current one.
    pub fn set_neq(&self, value: T)
    where
        T: PartialEq,
    {
        self.inner.set_neq(value);
    }

    /// Update the value using a function.
    ///
    /// The read and write happen under the cell's lock; subscribers are
    /// notified once, with the new value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let mut guard = self.inner.lock_mut();
        let next = f((*guard).clone());
        *guard = next;
    }

    /// Subscribe to changes.
    ///
    /// The signal yields the current value first, then every subsequent
    /// write. Rapid writes may be coalesced to the latest value.
    pub fn signal(&self) -> MutableSignalCloned<T> {
        self.inner.signal_cloned()
    }
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Cell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("value", &*self.inner.lock_ref())
            .finish()
    }
}
