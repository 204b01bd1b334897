//! Output contracts from the core.
//!
//! Each entry point fills an [`Outputs`] with what the host must do this
//! tick: timeline commands for the animation engine, class/property writes
//! for the DOM, commands for the virtual scroller, and semantic events.
//! Adapters apply them in that order.

use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, RegionId, TickerId, TimelineId, TriggerId};
use crate::timeline::{Timeline, Tween};
use crate::trigger::Crossing;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TimelineCommand {
    Create {
        id: TimelineId,
        timeline: Timeline,
    },
    Play {
        id: TimelineId,
    },
    Pause {
        id: TimelineId,
    },
    Seek {
        id: TimelineId,
        progress: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        smoothing: Option<f64>,
    },
    Kill {
        id: TimelineId,
        clear_props: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        targets: Vec<NodeId>,
    },
    /// Standalone tween that overwrites any running tween on the same
    /// properties (pointer following).
    Tween {
        tween: Tween,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StyleWrite {
    AddClass {
        node: NodeId,
        class: String,
    },
    RemoveClass {
        node: NodeId,
        class: String,
    },
    /// Inline style or CSS custom property.
    SetProperty {
        node: NodeId,
        name: String,
        value: String,
    },
}

/// Settings forwarded to the virtual-scroll engine at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothScrollSettings {
    pub smooth: bool,
    pub lerp: f64,
    pub multiplier: f64,
    pub touch_multiplier: f64,
    pub firefox_multiplier: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScrollCommand {
    Configure(SmoothScrollSettings),
    ScrollTo { target: NodeId },
    /// Suspend scroll virtualization (preloader running).
    Stop,
    Start,
    /// Re-measure the scroll container after a refresh.
    Update,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CoreEvent {
    /// A region finished a transition and received its state class.
    RegionReady {
        region: Option<RegionId>,
        node: NodeId,
        class: String,
    },
    Crossing {
        trigger: TriggerId,
        crossing: Crossing,
    },
    TickerChanged {
        ticker: TickerId,
        playing: bool,
    },
    SlideActivated {
        trigger: TriggerId,
        index: usize,
    },
    RegionSkipped {
        region: String,
        reason: String,
    },
    /// Pixel-space boundaries were recomputed.
    RefreshRequested,
    /// Scroll range over which `node` must be held fixed.
    PinRange {
        trigger: TriggerId,
        node: NodeId,
        start: f64,
        end: f64,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub commands: Vec<TimelineCommand>,
    #[serde(default)]
    pub writes: Vec<StyleWrite>,
    #[serde(default)]
    pub scroll: Vec<ScrollCommand>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.writes.clear();
        self.scroll.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_command(&mut self, command: TimelineCommand) {
        self.commands.push(command);
    }

    #[inline]
    pub fn push_write(&mut self, write: StyleWrite) {
        self.writes.push(write);
    }

    #[inline]
    pub fn push_scroll(&mut self, command: ScrollCommand) {
        self.scroll.push(command);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.push_write(StyleWrite::AddClass {
            node,
            class: class.to_string(),
        });
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.push_write(StyleWrite::RemoveClass {
            node,
            class: class.to_string(),
        });
    }

    pub fn set_property(&mut self, node: NodeId, name: &str, value: String) {
        self.push_write(StyleWrite::SetProperty {
            node,
            name: name.to_string(),
            value,
        });
    }

    /// Move everything from `other` onto the end of `self`.
    pub fn append(&mut self, other: &mut Outputs) {
        self.commands.append(&mut other.commands);
        self.writes.append(&mut other.writes);
        self.scroll.append(&mut other.scroll);
        self.events.append(&mut other.events);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
            && self.writes.is_empty()
            && self.scroll.is_empty()
            && self.events.is_empty()
    }
}
