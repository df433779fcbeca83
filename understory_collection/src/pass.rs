// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Results of one layout pass.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Rect, Size};
use understory_flow::LayoutAttributes;

use crate::ScrollAxis;

/// One item as positioned by a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem<K, C> {
    /// The item's identity.
    pub id: K,
    /// The content produced for the item by the view provider.
    pub content: C,
    /// Where the layout put it.
    pub attributes: LayoutAttributes,
}

/// Every item of a collection, positioned for one container size.
///
/// Items are kept in presentation order.
#[derive(Clone, Debug)]
pub struct LayoutPass<K, C> {
    items: Vec<PlacedItem<K, C>>,
    index: HashMap<K, usize>,
    container: Size,
    content_size: Size,
    scroll_axis: ScrollAxis,
    skipped_duplicates: usize,
}

impl<K, C> LayoutPass<K, C>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new(container: Size, scroll_axis: ScrollAxis, capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            container,
            content_size: Size::ZERO,
            scroll_axis,
            skipped_duplicates: 0,
        }
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    pub(crate) fn push(&mut self, item: PlacedItem<K, C>) {
        let previous = self.index.insert(item.id.clone(), self.items.len());
        debug_assert!(previous.is_none(), "duplicate ids must be skipped before push");
        self.items.push(item);
    }

    pub(crate) fn skip_duplicate(&mut self) {
        self.skipped_duplicates += 1;
    }

    pub(crate) fn set_content_size(&mut self, content_size: Size) {
        self.content_size = content_size;
    }

    /// Returns the number of placed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the placed items in presentation order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem<K, C>] {
        &self.items
    }

    /// Iterates over the placed items in presentation order.
    pub fn iter(&self) -> core::slice::Iter<'_, PlacedItem<K, C>> {
        self.items.iter()
    }

    /// Returns the placed item identified by `id`.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&PlacedItem<K, C>> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    /// Returns the container size the pass was run with.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Returns the total content size reported by the layout.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns how many items were left out because their id was already
    /// placed earlier in the pass.
    #[must_use]
    pub fn skipped_duplicates(&self) -> usize {
        self.skipped_duplicates
    }

    /// Returns the axis the host should make scrollable.
    #[must_use]
    pub fn scroll_axis(&self) -> ScrollAxis {
        self.scroll_axis
    }

    /// Iterates over the items placed on `page`.
    pub fn on_page(&self, page: usize) -> impl Iterator<Item = &PlacedItem<K, C>> + '_ {
        self.items
            .iter()
            .filter(move |item| item.attributes.page == page)
    }

    /// Iterates over the items whose rectangle overlaps `viewport`, given in
    /// content coordinates.
    ///
    /// Items that merely touch the viewport edge are not included.
    pub fn visible(&self, viewport: Rect) -> impl Iterator<Item = &PlacedItem<K, C>> + '_ {
        self.items
            .iter()
            .filter(move |item| item.attributes.rect().intersect(viewport).area() > 0.0)
    }
}

impl<'a, K, C> IntoIterator for &'a LayoutPass<K, C> {
    type Item = &'a PlacedItem<K, C>;
    type IntoIter = core::slice::Iter<'a, PlacedItem<K, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
