// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for flow placement.
//!
//! [`FlowLayout::place`](crate::FlowLayout::place) only returns the final
//! attributes. When debugging a layout it is often more useful to know *why*
//! an item ended up where it did, and when the cache was thrown away.
//! [`FlowLayout::place_traced`](crate::FlowLayout::place_traced) reports both
//! to a [`PlacementTrace`] sink; [`PlacementRecorder`] is a small sink that
//! simply keeps every event.

use alloc::vec::Vec;

use crate::LayoutAttributes;

/// How a placement was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// No previous item: pinned at the origin of page 0.
    First,
    /// Returned from the cache without recomputation.
    Cached,
    /// Continued the previous item's row.
    SameRow,
    /// Started a new row on the previous item's page.
    NewRow,
    /// Moved to the next page.
    NewPage,
}

/// Why the whole cache was dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidationReason {
    /// [`FlowLayout::invalidate`](crate::FlowLayout::invalidate) was called.
    Explicit,
    /// A placement arrived with a different container size.
    ContainerResized,
    /// A cached item was re-measured with a different size under
    /// [`MeasurementChange::Relayout`](crate::MeasurementChange::Relayout).
    ItemResized,
    /// The layout's [`PageAdvance`](crate::PageAdvance) policy changed.
    ConfigChanged,
}

/// A callback sink for placement tracing.
pub trait PlacementTrace<K> {
    /// Called once per placement, including cache hits.
    fn placed(&mut self, key: &K, attributes: &LayoutAttributes, kind: PlacementKind);

    /// Called when the cache is cleared; `dropped` is the number of entries
    /// that were discarded.
    fn invalidated(&mut self, reason: InvalidationReason, dropped: usize);
}

impl<K> PlacementTrace<K> for () {
    fn placed(&mut self, _key: &K, _attributes: &LayoutAttributes, _kind: PlacementKind) {}

    fn invalidated(&mut self, _reason: InvalidationReason, _dropped: usize) {}
}

/// A single recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent<K> {
    /// See [`PlacementTrace::placed`].
    Placed {
        /// Key of the placed item.
        key: K,
        /// Resulting attributes.
        attributes: LayoutAttributes,
        /// How they were produced.
        kind: PlacementKind,
    },
    /// See [`PlacementTrace::invalidated`].
    Invalidated {
        /// Why the cache was cleared.
        reason: InvalidationReason,
        /// How many entries were dropped.
        dropped: usize,
    },
}

/// Records every trace event in order.
#[derive(Clone, Debug)]
pub struct PlacementRecorder<K> {
    events: Vec<TraceEvent<K>>,
}

impl<K> Default for PlacementRecorder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PlacementRecorder<K> {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Returns all recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent<K>] {
        &self.events
    }

    /// Returns the recorded placement kind for every placement, oldest first.
    pub fn kinds(&self) -> impl Iterator<Item = PlacementKind> + '_ {
        self.events.iter().filter_map(|event| match event {
            TraceEvent::Placed { kind, .. } => Some(*kind),
            TraceEvent::Invalidated { .. } => None,
        })
    }

    /// Forgets all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<K: Clone> PlacementTrace<K> for PlacementRecorder<K> {
    fn placed(&mut self, key: &K, attributes: &LayoutAttributes, kind: PlacementKind) {
        self.events.push(TraceEvent::Placed {
            key: key.clone(),
            attributes: *attributes,
            kind,
        });
    }

    fn invalidated(&mut self, reason: InvalidationReason, dropped: usize) {
        self.events.push(TraceEvent::Invalidated { reason, dropped });
    }
}
