//! Core configuration for scrollfx.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollFxError};

/// Engine tuning plus the page-level constants the orchestrator needs.
/// Every field has a default so hosts can pass a partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trailing-edge quiet window for resize recomputation.
    pub resize_debounce_ms: f64,
    /// Scrub triggers outside `lookahead_viewports * viewport height` of their
    /// range are not re-seeked (crossings are still tracked).
    pub lookahead_viewports: f64,
    /// Delay before scrolling to a hash present at load.
    pub hash_settle_ms: f64,
    /// Delay before the animated title text reveal is registered.
    pub animated_title_text_delay_ms: f64,
    pub cursor: CursorConfig,
    pub balls: BallsConfig,
    pub header: HeaderConfig,
    pub breakpoints: Breakpoints,
    pub smooth_scroll: SmoothScrollConfig,
    pub tickers: TickerSpeeds,
}

/// Cursor follower tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Low-pass factor applied every frame to the spotlight position.
    pub easing_factor: f64,
    /// Tween duration (seconds) for the tight pointer dot.
    pub dot_duration: f64,
    /// Tween duration (seconds) for the loose pointer ring.
    pub ring_duration: f64,
}

/// Geometry constants for the balls/slides region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallsConfig {
    /// Horizontal gap on each side of a ball, added twice to the measured width.
    pub spacing_px: f64,
    pub min_fillers: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Fixed header height; the balls region pins this far from the top.
    pub height_px: f64,
    /// Native scrolling: compact once scrollY exceeds this.
    pub compact_threshold_px: f64,
    /// Smooth scrolling: compact once the container top is above `-offset`.
    pub compact_container_offset_px: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Parallax columns switch to horizontal motion below this width.
    pub narrow_below_px: f64,
    /// Touch tuning for the virtual scroller applies at or below this width.
    pub touch_max_px: f64,
    /// Desktop layout starts at this width.
    pub desktop_min_px: f64,
}

/// Virtual-scroll tuning forwarded to the scroll engine at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub lerp: f64,
    pub multiplier: f64,
    pub touch_lerp: f64,
    pub touch_scroll_multiplier: f64,
    pub touch_multiplier: f64,
    pub firefox_multiplier: f64,
}

/// Ticker speeds in pixels per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerSpeeds {
    pub balls: f64,
    pub title_and_text: f64,
    pub content_titles: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 200.0,
            lookahead_viewports: 1.0,
            hash_settle_ms: 1000.0,
            animated_title_text_delay_ms: 2000.0,
            cursor: CursorConfig::default(),
            balls: BallsConfig::default(),
            header: HeaderConfig::default(),
            breakpoints: Breakpoints::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            tickers: TickerSpeeds::default(),
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            easing_factor: 0.1,
            dot_duration: 0.25,
            ring_duration: 0.37,
        }
    }
}

impl Default for BallsConfig {
    fn default() -> Self {
        Self {
            spacing_px: 6.0,
            min_fillers: 3,
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            height_px: 61.0,
            compact_threshold_px: 30.0,
            compact_container_offset_px: 100.0,
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow_below_px: 768.0,
            touch_max_px: 992.0,
            desktop_min_px: 992.0,
        }
    }
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.05,
            multiplier: 0.9,
            touch_lerp: 0.07,
            touch_scroll_multiplier: 2.0,
            touch_multiplier: 1.5,
            firefox_multiplier: 100.0,
        }
    }
}

impl Default for TickerSpeeds {
    fn default() -> Self {
        Self {
            balls: 60.0,
            title_and_text: 65.0,
            content_titles: 60.0,
        }
    }
}

impl Config {
    /// Reject values that would produce degenerate animation ranges.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(ScrollFxError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if !self.resize_debounce_ms.is_finite() || self.resize_debounce_ms < 0.0 {
            return invalid("resize_debounce_ms must be a finite, non-negative number");
        }
        if !(self.cursor.easing_factor > 0.0 && self.cursor.easing_factor <= 1.0) {
            return invalid("cursor.easing_factor must be in (0, 1]");
        }
        if self.balls.min_fillers == 0 {
            return invalid("balls.min_fillers must be at least 1");
        }
        for (name, speed) in [
            ("tickers.balls", self.tickers.balls),
            ("tickers.title_and_text", self.tickers.title_and_text),
            ("tickers.content_titles", self.tickers.content_titles),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(ScrollFxError::InvalidConfig {
                    reason: format!("{name} must be a positive speed in px/s"),
                });
            }
        }
        Ok(())
    }
}
