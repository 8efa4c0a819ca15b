// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Signal: observable cells and memoized derivations.
//!
//! Headless widget state is mostly *derived*: tab indices, the first focusable
//! item, a filtered option list. This crate provides the two pieces needed to
//! derive such state lazily without a reactive runtime:
//!
//! - [`Signal`]: an owned value paired with a [`Version`] that advances on every
//!   write.
//! - [`Memo`]: a cached derivation that records the versions of its inputs when
//!   it was computed and recomputes on read only if any of them moved since.
//!
//! There is no global dependency graph. A derivation names its inputs explicitly
//! by passing their versions to [`Memo::get`], which keeps borrows local and the
//! recomputation rule trivial to audit.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_signal::{Memo, Signal};
//!
//! let mut items = Signal::new(vec!["apple", "banana", "avocado"]);
//! let query = Signal::new(String::from("a"));
//! let filtered: Memo<Vec<&str>> = Memo::new();
//!
//! let compute = |items: &Signal<Vec<&'static str>>, query: &Signal<String>| {
//!     filtered.get(&[items.version(), query.version()], || {
//!         items
//!             .get()
//!             .iter()
//!             .copied()
//!             .filter(|s| s.starts_with(query.get().as_str()))
//!             .collect()
//!     })
//! };
//!
//! assert_eq!(compute(&items, &query), vec!["apple", "avocado"]);
//!
//! // Writing an input marks the derivation dirty; the next read recomputes.
//! items.update(|v| v.push("apricot"));
//! assert_eq!(compute(&items, &query), vec!["apple", "avocado", "apricot"]);
//! ```
//!
//! All state is single-threaded; [`Memo`] uses interior mutability so that
//! derived values can be read through `&self` accessors.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

/// Monotonic write counter of a [`Signal`].
///
/// Versions are only meaningful relative to the same signal: a derivation
/// compares the versions it recorded against the current ones position by
/// position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// Version of a freshly created signal.
    pub const INITIAL: Self = Self(0);

    /// The version following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A mutable cell whose writes are observable through its [`Version`].
#[derive(Clone, Default)]
pub struct Signal<T> {
    value: T,
    version: Version,
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("version", &self.version.0)
            .finish()
    }
}

impl<T> Signal<T> {
    /// Create a signal at [`Version::INITIAL`].
    pub const fn new(value: T) -> Self {
        Self {
            value,
            version: Version::INITIAL,
        }
    }

    /// Borrow the current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Current version.
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Replace the value and advance the version.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.version = self.version.next();
    }

    /// Mutate the value in place and advance the version.
    ///
    /// The version advances even if `f` leaves the value untouched; use
    /// [`Signal::set_if_changed`] when spurious recomputation matters.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let r = f(&mut self.value);
        self.version = self.version.next();
        r
    }

    /// Consume the signal, returning the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: PartialEq> Signal<T> {
    /// Replace the value only if it differs from the current one.
    ///
    /// Returns `true` if the value (and therefore the version) changed.
    pub fn set_if_changed(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.set(value);
        true
    }
}

#[derive(Clone, Debug)]
struct Cached<T> {
    deps: SmallVec<[Version; 4]>,
    value: T,
}

/// A memoized pure derivation over one or more [`Signal`]s.
///
/// The memo stores the value computed for a particular snapshot of input
/// versions. Reads supply the current versions; if they match the snapshot the
/// cached value is returned, otherwise the derivation is recomputed.
///
/// The `compute` closure must be pure over the inputs whose versions are
/// passed alongside it, or the cache may serve stale values.
pub struct Memo<T> {
    cache: RefCell<Option<Cached<T>>>,
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("Memo")
            .field("value", &cache.as_ref().map(|c| &c.value))
            .finish_non_exhaustive()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            cache: RefCell::new(self.cache.borrow().clone()),
        }
    }
}

impl<T> Memo<T> {
    /// Create an empty memo; the first read always computes.
    pub const fn new() -> Self {
        Self {
            cache: RefCell::new(None),
        }
    }

    /// Returns `true` if a read with `deps` would recompute.
    pub fn is_dirty(&self, deps: &[Version]) -> bool {
        match &*self.cache.borrow() {
            Some(cached) => cached.deps.as_slice() != deps,
            None => true,
        }
    }

    /// Drop the cached value so the next read recomputes.
    pub fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }

    /// Read the derivation through a borrow, recomputing first if dirty.
    ///
    /// Neither `compute` nor `read` may access this memo.
    pub fn with<R>(
        &self,
        deps: &[Version],
        compute: impl FnOnce() -> T,
        read: impl FnOnce(&T) -> R,
    ) -> R {
        let mut slot = self.cache.borrow_mut();
        let cached = match &mut *slot {
            Some(cached) if cached.deps.as_slice() == deps => cached,
            stale => stale.insert(Cached {
                deps: deps.iter().copied().collect(),
                value: compute(),
            }),
        };
        read(&cached.value)
    }
}

impl<T: Clone> Memo<T> {
    /// Read the derivation, recomputing first if any dependency version moved.
    pub fn get(&self, deps: &[Version], compute: impl FnOnce() -> T) -> T {
        self.with(deps, compute, T::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn signal_versions_advance_on_write() {
        let mut s = Signal::new(1_u32);
        assert_eq!(s.version(), Version::INITIAL);
        s.set(2);
        assert_eq!(s.version().get(), 1);
        s.update(|v| *v += 1);
        assert_eq!(*s.get(), 3);
        assert_eq!(s.version().get(), 2);
    }

    #[test]
    fn set_if_changed_skips_equal_values() {
        let mut s = Signal::new(5_u32);
        assert!(!s.set_if_changed(5));
        assert_eq!(s.version(), Version::INITIAL);
        assert!(s.set_if_changed(6));
        assert_eq!(s.version().get(), 1);
    }

    #[test]
    fn memo_recomputes_only_when_dirty() {
        let mut a = Signal::new(2_u32);
        let b = Signal::new(3_u32);
        let runs = Cell::new(0);
        let memo: Memo<u32> = Memo::new();

        let read = |a: &Signal<u32>, b: &Signal<u32>| {
            memo.get(&[a.version(), b.version()], || {
                runs.set(runs.get() + 1);
                a.get() * b.get()
            })
        };

        assert_eq!(read(&a, &b), 6);
        assert_eq!(read(&a, &b), 6);
        assert_eq!(runs.get(), 1);

        a.set(4);
        assert_eq!(read(&a, &b), 12);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let s = Signal::new(1_u32);
        let runs = Cell::new(0);
        let memo: Memo<u32> = Memo::new();
        let read = || {
            memo.get(&[s.version()], || {
                runs.set(runs.get() + 1);
                *s.get()
            })
        };
        read();
        memo.invalidate();
        read();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn with_reads_without_cloning() {
        let s = Signal::new(alloc::vec![1_u32, 2, 3]);
        let memo: Memo<alloc::vec::Vec<u32>> = Memo::new();
        let total: u32 = memo.with(
            &[s.version()],
            || s.get().iter().map(|v| v * 10).collect(),
            |v| v.iter().sum(),
        );
        assert_eq!(total, 60);
        assert!(!memo.is_dirty(&[s.version()]));
    }
}
