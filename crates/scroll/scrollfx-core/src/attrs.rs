//! Numeric data attributes carried by regions (`data-delay`, `data-scrub`,
//! `data-speed`).

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollFxError};
use crate::host::Host;
use crate::ids::NodeId;

pub const DATA_DELAY: &str = "data-delay";
pub const DATA_SCRUB: &str = "data-scrub";
pub const DATA_SPEED: &str = "data-speed";

/// Parse an optional attribute value. Absent or blank yields `Ok(None)`.
pub fn parse_number(name: &str, raw: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ScrollFxError::MalformedAttribute {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Read `name` from `node`, falling back to `default` when absent or malformed.
pub fn number_or<H: Host + ?Sized>(host: &H, node: NodeId, name: &str, default: f64) -> f64 {
    let raw = host.attribute(node, name);
    match parse_number(name, raw.as_deref()) {
        Ok(Some(v)) => v,
        Ok(None) => default,
        Err(err) => {
            log::warn!("{err}; using default {default}");
            default
        }
    }
}

/// Per-region attributes with their documented defaults applied.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionAttrs {
    /// Seconds.
    pub delay: f64,
    pub scrub: f64,
    pub speed: f64,
}

impl Default for RegionAttrs {
    fn default() -> Self {
        Self {
            delay: 0.0,
            scrub: 1.0,
            speed: 1.0,
        }
    }
}

impl RegionAttrs {
    pub fn read<H: Host + ?Sized>(host: &H, node: NodeId) -> Self {
        let d = Self::default();
        Self {
            delay: number_or(host, node, DATA_DELAY, d.delay),
            scrub: number_or(host, node, DATA_SCRUB, d.scrub),
            speed: number_or(host, node, DATA_SPEED, d.speed),
        }
    }
}
