// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The incremental flow layout engine.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::error::PlaceError;
use crate::modes::{FlowConfig, InvalidSizeHandling, MeasurementChange, PageAdvance};
use crate::trace::{InvalidationReason, PlacementKind, PlacementTrace};
use crate::LayoutAttributes;

/// Incremental left-to-right, top-to-bottom flow layout with horizontal pages.
///
/// Items are placed one at a time, in presentation order, as the host
/// measures them. Each placement continues from the previously placed item:
///
/// - If the item fits on the previous item's row (its right edge stays within
///   the current page), it is placed directly after it.
/// - Otherwise it starts a new row below everything already on the page, or,
///   when that does not fit vertically either, the top-left corner of the next
///   page. See [`PageAdvance`] for the alternative policy.
///
/// Results are cached per key. Asking again for a cached key with the same
/// container size returns the cached attributes and makes that item the
/// continuation point for the next uncached item. Any change of container size
/// drops the whole cache; positions are never partially revalidated.
///
/// The engine assumes keys are presented in order. Keys placed out of order are
/// packed in the order actually seen, which is generally not the intended one.
#[derive(Clone, Debug)]
pub struct FlowLayout<K> {
    config: FlowConfig,
    attributes: HashMap<K, LayoutAttributes>,
    previous: Option<LayoutAttributes>,
    /// Container size every cached entry was computed with.
    container: Option<Size>,
    /// Greatest bottom edge per page, indexed by page.
    page_bottoms: SmallVec<[f64; 8]>,
    generation: u64,
}

impl<K> Default for FlowLayout<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FlowLayout<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty layout with the default [`FlowConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FlowConfig::new())
    }

    /// Creates an empty layout with the given policies.
    #[must_use]
    pub fn with_config(config: FlowConfig) -> Self {
        Self {
            config,
            attributes: HashMap::new(),
            previous: None,
            container: None,
            page_bottoms: SmallVec::new(),
            generation: 0,
        }
    }

    /// Returns the active policies.
    #[must_use]
    pub fn config(&self) -> FlowConfig {
        self.config
    }

    /// Replaces the active policies.
    ///
    /// Only the page advance policy decides where items go, so changing it
    /// invalidates the layout. The size handling and measurement change
    /// policies apply to later placements and keep what is cached.
    pub fn set_config(&mut self, config: FlowConfig) {
        let repage = self.config.page_advance != config.page_advance;
        self.config = config;
        if repage {
            self.clear(InvalidationReason::ConfigChanged, &mut ());
        }
    }

    /// Places `key` with its measured size inside a container of size
    /// `container`, returning its attributes.
    ///
    /// See [`FlowLayout::place_traced`] for a variant that explains each step.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::InvalidContainerSize`] when `container` is not
    /// finite or has a negative extent, and [`PlaceError::InvalidItemSize`]
    /// when `measured` is not finite, or has a non-positive extent and the
    /// config does not clamp it. A rejected placement leaves the layout
    /// untouched.
    pub fn place(
        &mut self,
        key: K,
        measured: Size,
        container: Size,
    ) -> Result<LayoutAttributes, PlaceError> {
        self.place_traced(key, measured, container, &mut ())
    }

    /// Like [`FlowLayout::place`], reporting the placement and any cache
    /// invalidation it triggers to `trace`.
    ///
    /// # Errors
    ///
    /// Same as [`FlowLayout::place`].
    pub fn place_traced<T>(
        &mut self,
        key: K,
        measured: Size,
        container: Size,
        trace: &mut T,
    ) -> Result<LayoutAttributes, PlaceError>
    where
        T: PlacementTrace<K> + ?Sized,
    {
        if !container.is_finite() || container.width < 0.0 || container.height < 0.0 {
            return Err(PlaceError::InvalidContainerSize { size: container });
        }
        let (measured, clamped_from) = self.sanitize(measured)?;

        if self.container.is_some_and(|cached| cached != container) {
            self.clear(InvalidationReason::ContainerResized, trace);
        }

        if let Some(cached) = self.attributes.get(&key).copied() {
            let remeasured = cached.size != measured
                && self.config.measurement_change == MeasurementChange::Relayout;
            if !remeasured {
                self.previous = Some(cached);
                trace.placed(&key, &cached, PlacementKind::Cached);
                return Ok(cached);
            }
            self.clear(InvalidationReason::ItemResized, trace);
        }

        if let Some(original) = clamped_from {
            log::warn!(
                "FlowLayout: clamped item size {}x{} to {}x{}",
                original.width,
                original.height,
                measured.width,
                measured.height
            );
        }

        let (attributes, kind) = match self.previous {
            None => (
                LayoutAttributes::first(measured, container),
                PlacementKind::First,
            ),
            Some(previous) => self.continue_after(&previous, measured, container),
        };

        self.container = Some(container);
        self.previous = Some(attributes);
        self.extend_page_bottom(&attributes);
        trace.placed(&key, &attributes, kind);
        self.attributes.insert(key, attributes);
        Ok(attributes)
    }

    /// Drops every cached position and the continuation point.
    ///
    /// Call this whenever the item sequence changes (insertions, removals,
    /// reordering): positions depend on everything placed before them.
    pub fn invalidate(&mut self) {
        self.clear(InvalidationReason::Explicit, &mut ());
    }

    /// Like [`FlowLayout::invalidate`], reporting to `trace`.
    pub fn invalidate_traced<T>(&mut self, trace: &mut T)
    where
        T: PlacementTrace<K> + ?Sized,
    {
        self.clear(InvalidationReason::Explicit, trace);
    }

    /// Returns the cached attributes for `key`, if it has been placed.
    #[must_use]
    pub fn attributes(&self, key: &K) -> Option<&LayoutAttributes> {
        self.attributes.get(key)
    }

    /// Returns the attributes of the most recently placed (or re-queried) item.
    #[must_use]
    pub fn previous(&self) -> Option<&LayoutAttributes> {
        self.previous.as_ref()
    }

    /// Returns the number of cached placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the container size the cache was built for, if any.
    #[must_use]
    pub fn container_size(&self) -> Option<Size> {
        self.container
    }

    /// Returns the number of pages that hold at least one item.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_bottoms.len()
    }

    /// Returns the greatest bottom edge among items on `page`.
    #[must_use]
    pub fn page_bottom(&self, page: usize) -> Option<f64> {
        self.page_bottoms.get(page).copied()
    }

    /// Returns the scrollable content size: one container width per page by
    /// one container height.
    ///
    /// This is [`Size::ZERO`] while nothing is cached.
    #[must_use]
    pub fn content_size(&self) -> Size {
        match self.container {
            Some(container) => Size::new(
                container.width * self.page_count() as f64,
                container.height,
            ),
            None => Size::ZERO,
        }
    }

    /// Iterates over all cached placements in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &LayoutAttributes)> + '_ {
        self.attributes.iter()
    }

    /// Iterates over the cached placements on `page` in arbitrary order.
    pub fn items_on_page(
        &self,
        page: usize,
    ) -> impl Iterator<Item = (&K, &LayoutAttributes)> + '_ {
        self.attributes
            .iter()
            .filter(move |(_, attributes)| attributes.page == page)
    }

    /// Returns the invalidation generation.
    ///
    /// The counter increases every time a non-empty cache is dropped, so hosts
    /// can cheaply detect that previously returned positions are stale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn continue_after(
        &self,
        previous: &LayoutAttributes,
        measured: Size,
        container: Size,
    ) -> (LayoutAttributes, PlacementKind) {
        let page_end = container.width * (previous.page + 1) as f64;
        let candidate_x = previous.right();

        if candidate_x + measured.width <= page_end {
            let attributes = LayoutAttributes {
                origin: Point::new(candidate_x, previous.y()),
                page: previous.page,
                size: measured,
                container,
            };
            return (attributes, PlacementKind::SameRow);
        }

        let (page, y, kind) = match self.config.page_advance {
            PageAdvance::WhenHorizontalSpaceExhausted => {
                (previous.page + 1, 0.0, PlacementKind::NewPage)
            }
            PageAdvance::WhenVerticalSpaceExhausted => {
                let max_y = self.page_bottom(previous.page).unwrap_or(0.0);
                if max_y + measured.height > container.height {
                    (previous.page + 1, 0.0, PlacementKind::NewPage)
                } else {
                    (previous.page, max_y, PlacementKind::NewRow)
                }
            }
        };

        let attributes = LayoutAttributes {
            origin: Point::new(page as f64 * container.width, y),
            page,
            size: measured,
            container,
        };
        (attributes, kind)
    }

    fn extend_page_bottom(&mut self, attributes: &LayoutAttributes) {
        if attributes.page >= self.page_bottoms.len() {
            self.page_bottoms.resize(attributes.page + 1, 0.0);
        }
        let bottom = &mut self.page_bottoms[attributes.page];
        *bottom = bottom.max(attributes.bottom());
    }

    /// Returns the size to lay out, plus the original size if it was clamped.
    fn sanitize(&self, measured: Size) -> Result<(Size, Option<Size>), PlaceError> {
        if !measured.is_finite() {
            return Err(PlaceError::InvalidItemSize { size: measured });
        }
        if measured.width > 0.0 && measured.height > 0.0 {
            return Ok((measured, None));
        }
        match self.config.invalid_size {
            InvalidSizeHandling::Reject => Err(PlaceError::InvalidItemSize { size: measured }),
            InvalidSizeHandling::Clamp { min_extent } => {
                let clamped = Size::new(
                    measured.width.max(min_extent),
                    measured.height.max(min_extent),
                );
                if !(clamped.width > 0.0 && clamped.height > 0.0) {
                    return Err(PlaceError::InvalidItemSize { size: measured });
                }
                Ok((clamped, Some(measured)))
            }
        }
    }

    fn clear<T>(&mut self, reason: InvalidationReason, trace: &mut T)
    where
        T: PlacementTrace<K> + ?Sized,
    {
        let dropped = self.attributes.len();
        self.attributes.clear();
        self.previous = None;
        self.container = None;
        self.page_bottoms.clear();
        if dropped > 0 {
            self.generation += 1;
            log::debug!("FlowLayout: dropped {dropped} cached placements ({reason:?})");
        }
        trace.invalidated(reason, dropped);
    }
}
