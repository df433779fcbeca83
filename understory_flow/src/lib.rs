// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flow: incremental flow layout with horizontal pagination.
//!
//! This crate packs keyed, variably sized items left-to-right and
//! top-to-bottom into pages the size of a container, with pages laid out side
//! by side along a horizontally scrolling axis. It is designed for hosts whose
//! measurement pass reveals item sizes one at a time:
//!
//! - The host measures an item and calls [`FlowLayout::place`] with its key,
//!   its measured size, and the current container size.
//! - The engine continues the flow from the previously placed item and caches
//!   the resulting [`LayoutAttributes`] under the key.
//! - Subsequent passes with the same container size hit the cache; a new
//!   container size drops the whole cache and the flow restarts at the origin.
//! - When the item sequence itself changes, the host calls
//!   [`FlowLayout::invalidate`].
//!
//! It does **not** know about widgets, view trees, or scroll views. See
//! `understory_collection` for a driver that pairs the engine with an item
//! source.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_flow::FlowLayout;
//!
//! let container = Size::new(300.0, 100.0);
//! let mut layout = FlowLayout::new();
//!
//! let a = layout.place("a", Size::new(100.0, 50.0), container).unwrap();
//! let b = layout.place("b", Size::new(100.0, 50.0), container).unwrap();
//! // Does not fit after `b`, so it starts a new row on page 0.
//! let c = layout.place("c", Size::new(150.0, 50.0), container).unwrap();
//!
//! assert_eq!(a.origin, Point::new(0.0, 0.0));
//! assert_eq!(b.origin, Point::new(100.0, 0.0));
//! assert_eq!((c.origin, c.page), (Point::new(0.0, 50.0), 0));
//!
//! // Page 0 is full: the next item goes to page 1, one container width over.
//! let d = layout.place("d", Size::new(200.0, 80.0), container).unwrap();
//! assert_eq!((d.origin, d.page), (Point::new(300.0, 0.0), 1));
//! ```
//!
//! ## Policies
//!
//! [`FlowConfig`] selects between two page advance policies ([`PageAdvance`]),
//! how zero or negative measured sizes are treated ([`InvalidSizeHandling`]),
//! and whether re-measuring a cached item with a new size forces a relayout
//! ([`MeasurementChange`]).
//!
//! ## Tracing
//!
//! [`FlowLayout::place_traced`] reports how each placement was produced and
//! why the cache was dropped to a [`PlacementTrace`] sink. Invalidations and
//! clamped sizes are also logged through the `log` facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod error;
mod layout;
mod modes;
pub mod trace;

pub use attributes::LayoutAttributes;
pub use error::PlaceError;
pub use layout::FlowLayout;
pub use modes::{FlowConfig, InvalidSizeHandling, MeasurementChange, PageAdvance};
pub use trace::{
    InvalidationReason, PlacementKind, PlacementRecorder, PlacementTrace, TraceEvent,
};
