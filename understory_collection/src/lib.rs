// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Collection: collection view plumbing.
//!
//! This crate connects three collaborators around a layout engine:
//!
//! - an [`ItemSource`]: an ordered sequence of [`Identified`] items plus a
//!   revision counter that changes whenever the sequence does,
//! - an [`ItemViewProvider`]: maps an item to the content the host renders,
//! - a [`CollectionLayout`]: positions measured items one at a time, for
//!   example an [`understory_flow::FlowLayout`].
//!
//! [`CollectionView`] owns all three. Each render pass, the host calls
//! [`CollectionView::layout_pass`] with the container size and a measurement
//! callback, and gets back a [`LayoutPass`] with every item's content and
//! position. Source changes are picked up through the revision, or pushed
//! explicitly with [`CollectionView::update_source`] and
//! [`CollectionView::notify_changed`]; either way the layout is invalidated
//! before the next item is placed.
//!
//! It does **not** render anything or own a scroll view.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_collection::{CollectionView, ItemViewProvider, VecSource};
//! use understory_flow::FlowLayout;
//!
//! /// Renders each id as a label whose width grows with its length.
//! struct Labels;
//!
//! impl ItemViewProvider for Labels {
//!     type Item = &'static str;
//!     type Content = String;
//!
//!     fn content(&mut self, item: &&'static str) -> String {
//!         item.to_uppercase()
//!     }
//! }
//!
//! let source: VecSource<&'static str> = ["one", "three", "eleven"].into_iter().collect();
//! let mut collection = CollectionView::new(source, Labels, FlowLayout::new());
//!
//! let container = Size::new(120.0, 40.0);
//! let measure = |label: &String| Size::new(10.0 * label.len() as f64, 20.0);
//!
//! let pass = collection.layout_pass(container, measure).unwrap();
//! assert_eq!(pass.get(&"three").unwrap().attributes.origin, Point::new(30.0, 0.0));
//! assert_eq!(pass.get(&"eleven").unwrap().attributes.origin, Point::new(0.0, 20.0));
//!
//! // Removing an item invalidates the layout; the next pass starts over.
//! collection.update_source(|source| source.remove(0));
//! let pass = collection.layout_pass(container, measure).unwrap();
//! assert_eq!(pass.get(&"three").unwrap().attributes.origin, Point::ORIGIN);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layout;
mod pass;
mod source;
mod view;

pub use layout::{CollectionLayout, ScrollAxis};
pub use pass::{LayoutPass, PlacedItem};
pub use source::{Identified, ItemSource, VecSource};
pub use view::{CollectionView, ItemViewProvider};
