// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// The computed position of one item for one container size.
///
/// `origin` is expressed in content coordinates of the horizontally scrolling
/// container, so its x already includes the `page * container.width` offset.
/// Use [`LayoutAttributes::page_origin`] for coordinates relative to the page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutAttributes {
    /// Top-left corner in content coordinates.
    pub origin: Point,
    /// Zero-based page index.
    pub page: usize,
    /// Measured size the item was placed with.
    pub size: Size,
    /// Container size in effect when these attributes were computed.
    pub container: Size,
}

impl LayoutAttributes {
    /// Attributes for the first item of a flow: pinned at the origin of page 0.
    #[must_use]
    pub fn first(size: Size, container: Size) -> Self {
        Self {
            origin: Point::ORIGIN,
            page: 0,
            size,
            container,
        }
    }

    /// Horizontal position in content coordinates.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    /// Vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    /// Right edge, where the next item on the same row would start.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Occupied rectangle in content coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Top-left corner relative to the start of the item's page.
    #[must_use]
    pub fn page_origin(&self) -> Point {
        let page_start = self.page as f64 * self.container.width;
        Point::new(self.origin.x - page_start, self.origin.y)
    }

    /// Leading/top alignment offsets for hosts that stack every item at the
    /// top-leading corner of the container and shift it into place.
    ///
    /// Both components are the negated origin.
    #[must_use]
    pub fn alignment_offsets(&self) -> Vec2 {
        -self.origin.to_vec2()
    }
}
