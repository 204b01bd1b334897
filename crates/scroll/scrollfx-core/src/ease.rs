//! Easing identifiers.
//!
//! The animation engine owns the easing math; the core only names curves so
//! timelines stay serializable and deterministic.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear; required for scrubbed and looping motion.
    None,
    Power2Out,
    Power2InOut,
    CircOut,
    /// Back-out with the given overshoot.
    Back(f64),
}

impl Default for Ease {
    fn default() -> Self {
        Ease::None
    }
}

impl Ease {
    /// Name in the animation engine's easing registry.
    pub fn registry_name(&self) -> String {
        match self {
            Ease::None => "none".to_string(),
            Ease::Power2Out => "power2.out".to_string(),
            Ease::Power2InOut => "power2.inOut".to_string(),
            Ease::CircOut => "circ.out".to_string(),
            Ease::Back(overshoot) => format!("back({overshoot})"),
        }
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Ease::None)
    }
}
