// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Size;

/// Error returned when a placement request carries unusable geometry.
///
/// The engine never fails for cache reasons: stale or missing entries always
/// degrade to a relayout. Only malformed sizes are reported.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlaceError {
    /// The measured item size was non-finite, or non-positive while
    /// [`InvalidSizeHandling::Reject`](crate::InvalidSizeHandling::Reject) was in effect.
    InvalidItemSize {
        /// The size as reported by the host.
        size: Size,
    },
    /// The container size was non-finite or negative.
    InvalidContainerSize {
        /// The size as reported by the host.
        size: Size,
    },
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItemSize { size } => write!(
                f,
                "item size {}x{} must be finite with positive width and height",
                size.width, size.height
            ),
            Self::InvalidContainerSize { size } => write!(
                f,
                "container size {}x{} must be finite and non-negative",
                size.width, size.height
            ),
        }
    }
}

impl core::error::Error for PlaceError {}
