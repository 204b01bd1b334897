//! Geometry probe: plain rect/viewport types and the pure offset math built on
//! them. Dimension reads go through [`Host`]; a zero reading is reported as
//! `GeometryUnavailable` so callers can defer instead of animating over an
//! empty range.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollFxError};
use crate::host::Host;
use crate::ids::NodeId;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Center in the rect's own coordinate space (origin at its top-left).
    #[inline]
    pub fn local_center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Horizontal offset that centers an element inside its parent row.
#[inline]
pub fn centering_offset(parent_width: f64, elem_width: f64) -> f64 {
    (parent_width - elem_width) / 2.0
}

/// Hero spread: even rows align left, odd rows align right.
#[inline]
pub fn spread_offset(index: usize, parent_width: f64, elem_width: f64) -> f64 {
    if index % 2 == 0 {
        0.0
    } else {
        parent_width - elem_width
    }
}

/// Distance content overflows the viewport horizontally, never negative.
#[inline]
pub fn horizontal_overflow(scroll_width: f64, viewport_width: f64) -> f64 {
    (scroll_width - viewport_width).max(0.0)
}

/// Rendered width of `node`, or `GeometryUnavailable` when it reads as zero.
pub fn measure_width<H: Host + ?Sized>(host: &H, node: NodeId, what: &str) -> Result<f64> {
    let width = host.rect(node).width;
    if width > 0.0 && width.is_finite() {
        Ok(width)
    } else {
        Err(ScrollFxError::geometry(what))
    }
}

/// Full scrollable width of `node`, or `GeometryUnavailable` when zero.
pub fn measure_scroll_width<H: Host + ?Sized>(host: &H, node: NodeId, what: &str) -> Result<f64> {
    let width = host.scroll_width(node);
    if width > 0.0 && width.is_finite() {
        Ok(width)
    } else {
        Err(ScrollFxError::geometry(what))
    }
}
