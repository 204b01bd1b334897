//! Structured trigger boundaries.
//!
//! A boundary names an edge of the region and a line in the viewport; the
//! scroll offset where the two meet is the boundary's position. End
//! boundaries may instead be a distance past the start. Expressions such as
//! `"top 80%"`, `"bottom top"`, `"top 61px"` or `"+=150%"` are parsed once at
//! registration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollFxError};
use crate::geometry::{Rect, Viewport};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
}

/// A horizontal line in the viewport, measured from its top.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    ViewportFraction(f64),
    Pixels(f64),
}

/// A scroll distance; fractions are of the viewport height.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    ViewportFraction(f64),
    Pixels(f64),
}

impl Anchor {
    #[inline]
    pub fn to_px(&self, viewport: Viewport) -> f64 {
        match *self {
            Anchor::ViewportFraction(f) => f * viewport.height,
            Anchor::Pixels(px) => px,
        }
    }
}

impl Distance {
    #[inline]
    pub fn to_px(&self, viewport: Viewport) -> f64 {
        match *self {
            Distance::ViewportFraction(f) => f * viewport.height,
            Distance::Pixels(px) => px,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub reference: Edge,
    pub anchor: Anchor,
    /// When set, the boundary sits this far past the trigger's start and
    /// `reference`/`anchor` are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_distance: Option<Distance>,
}

impl Boundary {
    pub fn new(reference: Edge, anchor: Anchor) -> Self {
        Self {
            reference,
            anchor,
            relative_distance: None,
        }
    }

    /// Boundary `distance` past the start boundary.
    pub fn after(distance: Distance) -> Self {
        Self {
            reference: Edge::Top,
            anchor: Anchor::ViewportFraction(0.0),
            relative_distance: Some(distance),
        }
    }

    /// `"top <pos>"`, the form used by every reveal trigger.
    pub fn top_at(fraction: f64) -> Self {
        Self::new(Edge::Top, Anchor::ViewportFraction(fraction))
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        self.relative_distance.is_some()
    }

    pub fn parse(expr: &str) -> Result<Self> {
        let invalid = |reason: &str| ScrollFxError::InvalidBoundary {
            expr: expr.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = expr.trim();
        if let Some(rest) = trimmed.strip_prefix("+=") {
            let distance = match parse_length(rest.trim()) {
                Some(Length::Percent(p)) => Distance::ViewportFraction(p / 100.0),
                Some(Length::Pixels(px)) => Distance::Pixels(px),
                None => return Err(invalid("relative distance must be a number, px or %")),
            };
            return Ok(Self::after(distance));
        }

        let mut parts = trimmed.split_whitespace();
        let edge = match parts.next() {
            Some("top") => Edge::Top,
            Some("bottom") => Edge::Bottom,
            Some(_) => return Err(invalid("region edge must be `top` or `bottom`")),
            None => return Err(invalid("empty expression")),
        };
        let anchor = match parts.next() {
            Some("top") => Anchor::ViewportFraction(0.0),
            Some("center") => Anchor::ViewportFraction(0.5),
            Some("bottom") => Anchor::ViewportFraction(1.0),
            Some(token) => match parse_length(token) {
                Some(Length::Percent(p)) => Anchor::ViewportFraction(p / 100.0),
                Some(Length::Pixels(px)) => Anchor::Pixels(px),
                None => return Err(invalid("viewport anchor must be a keyword, px or %")),
            },
            None => return Err(invalid("missing viewport anchor")),
        };
        if parts.next().is_some() {
            return Err(invalid("trailing tokens"));
        }
        Ok(Self::new(edge, anchor))
    }

    /// Scroll offset for an absolute boundary against `region` (document
    /// coordinates). Relative boundaries resolve to `start + distance`.
    pub fn resolve(&self, region: Rect, viewport: Viewport, start: f64) -> f64 {
        if let Some(distance) = self.relative_distance {
            return start + distance.to_px(viewport);
        }
        let edge_y = match self.reference {
            Edge::Top => region.top,
            Edge::Bottom => region.bottom(),
        };
        edge_y - self.anchor.to_px(viewport)
    }
}

enum Length {
    Percent(f64),
    Pixels(f64),
}

fn parse_length(token: &str) -> Option<Length> {
    let (num, percent) = if let Some(n) = token.strip_suffix('%') {
        (n, true)
    } else if let Some(n) = token.strip_suffix("px") {
        (n, false)
    } else {
        (token, false)
    };
    let value = num.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if percent {
        Length::Percent(value)
    } else {
        Length::Pixels(value)
    })
}
