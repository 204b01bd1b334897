//! Error taxonomy for the scroll core.
//!
//! Only `InvalidConfig` is meant to reach a caller. The other variants are
//! produced by local guards, logged, and turned into a skipped region or a
//! documented default.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScrollFxError {
    /// A node a region needs is absent from the document.
    #[error("Missing element: {selector}")]
    MissingElement { selector: String },

    /// A numeric data attribute failed to parse.
    #[error("Malformed attribute {name}={value:?}")]
    MalformedAttribute { name: String, value: String },

    /// A dimension read returned zero (element not laid out yet).
    #[error("Geometry unavailable: {what}")]
    GeometryUnavailable { what: String },

    /// A boundary expression could not be parsed.
    #[error("Invalid boundary {expr:?}: {reason}")]
    InvalidBoundary { expr: String, reason: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl ScrollFxError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    pub fn geometry(what: impl Into<String>) -> Self {
        Self::GeometryUnavailable { what: what.into() }
    }

    /// Errors a region guard recovers from locally.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingElement { .. }
                | Self::MalformedAttribute { .. }
                | Self::GeometryUnavailable { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, ScrollFxError>;
