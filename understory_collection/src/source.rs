// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered item sources with revision-based change notification.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

/// An item with a stable identity.
///
/// Identities key the layout cache, so two items presented in the same source
/// must not share an id.
pub trait Identified {
    /// The identity type.
    type Id: Clone + Eq + Hash;

    /// Returns this item's identity.
    fn id(&self) -> Self::Id;
}

macro_rules! impl_identified_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                type Id = Self;

                fn id(&self) -> Self::Id {
                    *self
                }
            }
        )*
    };
}

impl_identified_by_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, &'static str);

impl Identified for String {
    type Id = Self;

    fn id(&self) -> Self::Id {
        self.clone()
    }
}

/// An ordered sequence of identified items.
///
/// The revision is the change notification: whenever the sequence changes in
/// any way (insertion, removal, reordering, item replacement) the revision
/// must change too. Consumers only compare it for equality and never learn
/// what changed.
pub trait ItemSource {
    /// The item type.
    type Item: Identified;

    /// Returns the items in presentation order.
    fn items(&self) -> &[Self::Item];

    /// Returns the current revision.
    fn revision(&self) -> u64;
}

/// A `Vec`-backed [`ItemSource`].
///
/// Every mutation that actually changes the sequence bumps the revision;
/// no-ops (removing out of range, swapping an index with itself, clearing an
/// empty source) leave it unchanged.
#[derive(Clone, Debug, Default)]
pub struct VecSource<T> {
    items: Vec<T>,
    revision: u64,
}

impl<T> VecSource<T> {
    /// Creates an empty source.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Appends an item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.bump_revision();
    }

    /// Inserts an item at `index`, clamped to the current length.
    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.bump_revision();
    }

    /// Removes and returns the item at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.bump_revision();
        Some(item)
    }

    /// Keeps only the items for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        let before = self.items.len();
        self.items.retain(keep);
        if self.items.len() != before {
            self.bump_revision();
        }
    }

    /// Swaps the items at `a` and `b`.
    ///
    /// Returns `false` without changing anything if either index is out of
    /// range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        let len = self.items.len();
        if a >= len || b >= len {
            return false;
        }
        if a != b {
            self.items.swap(a, b);
            self.bump_revision();
        }
        true
    }

    /// Moves the item at `from` so that it ends up at index `to`.
    ///
    /// Returns `false` without changing anything if either index is out of
    /// range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            self.bump_revision();
        }
        true
    }

    /// Replaces every item with the contents of `items`.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.items.extend(items);
        self.bump_revision();
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.bump_revision();
    }

    /// Mutates the item at `index` in place and returns the closure's result.
    ///
    /// The revision is bumped whenever the closure runs, since the change
    /// cannot be observed from here.
    pub fn update<R>(&mut self, index: usize, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let item = self.items.get_mut(index)?;
        let result = f(item);
        self.bump_revision();
        Some(result)
    }

    /// Returns the current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T: Identified> VecSource<T> {
    /// Returns the index of the item identified by `id`.
    #[must_use]
    pub fn position_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == *id)
    }
}

impl<T> From<Vec<T>> for VecSource<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items, revision: 0 }
    }
}

impl<T> FromIterator<T> for VecSource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Identified> ItemSource for VecSource<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
