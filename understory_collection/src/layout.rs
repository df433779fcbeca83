// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;

use kurbo::Size;
use understory_flow::{FlowLayout, LayoutAttributes, PlaceError};

/// Axis along which a collection's content scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollAxis {
    /// Content extends to the right.
    #[default]
    Horizontal,
    /// Content extends downwards.
    Vertical,
}

/// A layout that can position the items of a collection.
///
/// Implementations are driven once per item per layout pass, in presentation
/// order, and are told to forget everything when the item sequence changes.
pub trait CollectionLayout {
    /// The item identity type this layout is keyed by.
    type Key;

    /// The axis a host should make scrollable.
    fn scroll_axis(&self) -> ScrollAxis;

    /// Places one measured item inside a container.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaceError`] for unusable geometry.
    fn place(
        &mut self,
        key: Self::Key,
        measured: Size,
        container: Size,
    ) -> Result<LayoutAttributes, PlaceError>;

    /// Drops all cached placement state.
    fn invalidate(&mut self);

    /// Total size of the laid-out content.
    fn content_size(&self) -> Size;

    /// Counter that changes whenever the layout drops placements on its own
    /// initiative, for example because an item was re-measured.
    ///
    /// [`crate::CollectionView::layout_pass`] compares it around each
    /// placement and starts the pass over when it moves. Layouts that only
    /// forget state in [`CollectionLayout::invalidate`] can keep the default.
    fn generation(&self) -> u64 {
        0
    }
}

impl<K> CollectionLayout for FlowLayout<K>
where
    K: Clone + Eq + Hash,
{
    type Key = K;

    fn scroll_axis(&self) -> ScrollAxis {
        ScrollAxis::Horizontal
    }

    fn place(
        &mut self,
        key: K,
        measured: Size,
        container: Size,
    ) -> Result<LayoutAttributes, PlaceError> {
        Self::place(self, key, measured, container)
    }

    fn invalidate(&mut self) {
        Self::invalidate(self);
    }

    fn content_size(&self) -> Size {
        Self::content_size(self)
    }

    fn generation(&self) -> u64 {
        Self::generation(self)
    }
}
