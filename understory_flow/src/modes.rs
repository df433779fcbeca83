// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// When an item that does not fit horizontally moves to the next page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PageAdvance {
    /// Start a new row on the current page, below everything already placed
    /// there, and only advance to the next page when that row would not fit
    /// vertically.
    #[default]
    WhenVerticalSpaceExhausted,
    /// Advance to the next page as soon as an item overflows the current
    /// page horizontally. Every page then holds a single row.
    WhenHorizontalSpaceExhausted,
}

/// What to do with measured item sizes that have a zero or negative extent.
///
/// Non-finite sizes are rejected regardless of this setting.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum InvalidSizeHandling {
    /// Return [`PlaceError::InvalidItemSize`](crate::PlaceError::InvalidItemSize).
    #[default]
    Reject,
    /// Raise each non-positive extent to `min_extent` and log a warning.
    Clamp {
        /// The smallest width or height an item is placed with.
        min_extent: f64,
    },
}

/// How a cached item reacts when the host reports a different measured size
/// for it under the same container size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MeasurementChange {
    /// Return the cached attributes unchanged.
    #[default]
    KeepCached,
    /// Treat the whole cache as stale and lay out from scratch.
    Relayout,
}

/// Policy bundle for a [`FlowLayout`](crate::FlowLayout).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FlowConfig {
    /// Page advance policy.
    pub page_advance: PageAdvance,
    /// Handling of non-positive item extents.
    pub invalid_size: InvalidSizeHandling,
    /// Handling of re-measured cached items.
    pub measurement_change: MeasurementChange,
}

impl FlowConfig {
    /// Creates a config with every policy at its default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_advance: PageAdvance::WhenVerticalSpaceExhausted,
            invalid_size: InvalidSizeHandling::Reject,
            measurement_change: MeasurementChange::KeepCached,
        }
    }

    /// Returns this config with `page_advance` replaced.
    #[must_use]
    pub const fn with_page_advance(mut self, page_advance: PageAdvance) -> Self {
        self.page_advance = page_advance;
        self
    }

    /// Returns this config with `invalid_size` replaced.
    #[must_use]
    pub const fn with_invalid_size(mut self, invalid_size: InvalidSizeHandling) -> Self {
        self.invalid_size = invalid_size;
        self
    }

    /// Returns this config with `measurement_change` replaced.
    #[must_use]
    pub const fn with_measurement_change(mut self, measurement_change: MeasurementChange) -> Self {
        self.measurement_change = measurement_change;
        self
    }
}
