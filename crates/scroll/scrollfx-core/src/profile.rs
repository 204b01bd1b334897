//! Timeline factory and the motion-profile catalogue.
//!
//! A [`MotionProfile`] describes one kind of movement (what to animate, from
//! where, how long, how staggered, which curve). [`build`] turns a node set
//! and a profile into a single-tween [`Timeline`]; [`TimelineBuilder`] chains
//! several tweens with absolute or end-relative positions. Building is
//! deterministic: identical inputs give identical keyframes.

use serde::{Deserialize, Serialize};

use crate::ease::Ease;
use crate::error::{Result, ScrollFxError};
use crate::geometry::{centering_offset, spread_offset};
use crate::host::Host;
use crate::ids::NodeId;
use crate::timeline::{
    Discipline, PropValue, Property, PropertyValue, Repeat, Timeline, Tween,
};

/// Animation engine default tween length.
pub const DEFAULT_DURATION: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    #[serde(default)]
    pub from: Vec<PropertyValue>,
    pub to: Vec<PropertyValue>,
    pub duration: f64,
    #[serde(default)]
    pub stagger: f64,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub delay: f64,
}

fn rest(property: Property) -> PropertyValue {
    PropertyValue::uniform(property, PropValue::Number(0.0))
}

fn opaque() -> PropertyValue {
    PropertyValue::uniform(Property::Opacity, PropValue::Number(1.0))
}

impl MotionProfile {
    /// Animate towards `to` with engine defaults.
    pub fn to(to: Vec<PropertyValue>) -> Self {
        Self {
            from: Vec::new(),
            to,
            duration: DEFAULT_DURATION,
            stagger: 0.0,
            ease: Ease::None,
            delay: 0.0,
        }
    }

    pub fn initial(mut self, from: Vec<PropertyValue>) -> Self {
        self.from = from;
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    /// Split-letter titles: hidden 50px low, bounce up into place.
    pub fn title_reveal(stagger: f64) -> Self {
        Self::to(vec![rest(Property::Y), opaque()])
            .initial(vec![
                PropertyValue::uniform(Property::Opacity, PropValue::Number(0.0)),
                PropertyValue::uniform(Property::Y, PropValue::Px(50.0)),
            ])
            .ease(Ease::Back(4.0))
            .stagger(stagger)
    }

    /// Split text lines relaxing from their stylesheet offset/rotation.
    pub fn text_reveal() -> Self {
        Self::to(vec![
            rest(Property::TranslateY),
            rest(Property::TranslateX),
            rest(Property::Rotation),
        ])
        .duration(0.7)
        .ease(Ease::CircOut)
        .stagger(0.03)
    }

    pub fn fade_in() -> Self {
        Self::to(vec![opaque()]).duration(1.0).ease(Ease::Power2InOut)
    }

    /// Vertical rise to rest while fading in.
    pub fn rise_in(duration: f64) -> Self {
        Self::to(vec![rest(Property::TranslateY), opaque()])
            .duration(duration)
            .ease(Ease::Power2Out)
    }

    /// Horizontal slide to rest while fading in.
    pub fn slide_in(duration: f64) -> Self {
        Self::to(vec![rest(Property::TranslateX), opaque()])
            .duration(duration)
            .ease(Ease::Power2Out)
    }

    /// Vertical rise to rest without touching opacity.
    pub fn rows_up(duration: f64, stagger: f64) -> Self {
        Self::to(vec![rest(Property::TranslateY)])
            .duration(duration)
            .stagger(stagger)
            .ease(Ease::Power2Out)
    }

    /// Scrubbed horizontal drift by a percentage of the target's width.
    pub fn drift(x_percent: f64) -> Self {
        Self::to(vec![PropertyValue::uniform(
            Property::XPercent,
            PropValue::Number(x_percent),
        )])
    }

    /// Scrubbed horizontal pan by a fixed pixel distance.
    pub fn pan_x(px: f64) -> Self {
        Self::to(vec![PropertyValue::uniform(Property::X, PropValue::Px(px))])
    }

    /// Parallax column shift relative to its own size.
    pub fn parallax(property: Property, percent: f64) -> Self {
        Self::to(vec![PropertyValue::uniform(
            property,
            PropValue::RelativePercent(percent),
        )])
    }

    /// Instant color set, staggered across letters.
    pub fn tint(color: &str, stagger: f64) -> Self {
        Self::to(vec![PropertyValue::uniform(
            Property::Color,
            PropValue::Text(color.to_string()),
        )])
        .duration(0.0)
        .stagger(stagger)
    }

    /// Hero rows start at their centering offsets and rise into place.
    pub fn hero_intro(offsets: Vec<f64>) -> Self {
        Self::to(vec![rest(Property::Y)])
            .initial(vec![PropertyValue::per_target(
                Property::X,
                offsets.into_iter().map(PropValue::Px).collect(),
            )])
            .duration(0.9)
            .stagger(0.2)
            .ease(Ease::Power2Out)
    }

    /// Hero rows fan out to alternating edges.
    pub fn hero_spread(offsets: Vec<f64>) -> Self {
        Self::to(vec![PropertyValue::per_target(
            Property::X,
            offsets.into_iter().map(PropValue::Px).collect(),
        )])
        .duration(1.1)
        .ease(Ease::Power2InOut)
    }

    /// Preloader image docking into the header logo slot.
    pub fn dock(left: f64, top: f64, width: f64) -> Self {
        Self::to(vec![
            PropertyValue::uniform(Property::Left, PropValue::Px(left)),
            PropertyValue::uniform(Property::Top, PropValue::Px(top)),
            PropertyValue::uniform(Property::Width, PropValue::Px(width)),
        ])
        .duration(1.0)
        .ease(Ease::Power2Out)
    }

    /// Pointer chaser moving to client coordinates.
    pub fn chase(x: f64, y: f64, duration: f64) -> Self {
        Self::to(vec![
            PropertyValue::uniform(Property::Left, PropValue::Px(x)),
            PropertyValue::uniform(Property::Top, PropValue::Px(y)),
        ])
        .duration(duration)
    }

    /// Seamless marquee leg: translate by `-width` linearly.
    pub fn ticker_leg(width: f64, duration: f64) -> Self {
        Self::to(vec![PropertyValue::uniform(Property::X, PropValue::Px(-width))])
            .duration(duration)
            .ease(Ease::None)
    }

    /// Apply to `targets` at timeline position `at`.
    pub fn tween(&self, targets: Vec<NodeId>, at: f64) -> Tween {
        Tween {
            targets,
            from: self.from.clone(),
            to: self.to.clone(),
            duration: self.duration,
            stagger: self.stagger,
            ease: self.ease,
            at,
            delay: self.delay,
        }
    }
}

/// Where a tween lands on its timeline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Position {
    /// Absolute seconds.
    At(f64),
    /// Relative to the current end of the timeline (`"+=0.1"`, `"-=.9"`).
    AfterEnd(f64),
}

/// One-tween fire-and-forget timeline, created paused.
pub fn build(nodes: Vec<NodeId>, profile: &MotionProfile) -> Timeline {
    TimelineBuilder::new().add(nodes, profile, Position::At(0.0)).build()
}

#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    timeline: Timeline,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {
            timeline: Timeline {
                tweens: Vec::new(),
                delay: 0.0,
                repeat: Repeat::Once,
                discipline: Discipline::FireAndForget,
                paused: true,
            },
        }
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.timeline.delay = seconds.max(0.0);
        self
    }

    pub fn scrubbed(mut self, smoothing: Option<f64>) -> Self {
        self.timeline.discipline = Discipline::Scrubbed { smoothing };
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.timeline.repeat = Repeat::Infinite;
        self
    }

    /// Start playing as soon as the engine receives the timeline.
    pub fn autoplay(mut self) -> Self {
        self.timeline.paused = false;
        self
    }

    pub fn add(mut self, nodes: Vec<NodeId>, profile: &MotionProfile, position: Position) -> Self {
        let at = match position {
            Position::At(t) => t,
            Position::AfterEnd(offset) => (self.timeline.duration() + offset).max(0.0),
        };
        self.timeline.tweens.push(profile.tween(nodes, at));
        self
    }

    pub fn build(self) -> Timeline {
        self.timeline
    }
}

/// Offsets that center each node inside its closest `row_selector` ancestor.
pub fn centering_offsets<H: Host + ?Sized>(
    host: &H,
    nodes: &[NodeId],
    row_selector: &str,
) -> Result<Vec<f64>> {
    row_offsets(host, nodes, row_selector, |_, parent, elem| {
        centering_offset(parent, elem)
    })
}

/// Offsets pushing even rows left and odd rows right inside their row.
pub fn spread_offsets<H: Host + ?Sized>(
    host: &H,
    nodes: &[NodeId],
    row_selector: &str,
) -> Result<Vec<f64>> {
    row_offsets(host, nodes, row_selector, spread_offset)
}

fn row_offsets<H: Host + ?Sized>(
    host: &H,
    nodes: &[NodeId],
    row_selector: &str,
    f: impl Fn(usize, f64, f64) -> f64,
) -> Result<Vec<f64>> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, &node)| {
            let row = host
                .closest(node, row_selector)
                .ok_or_else(|| ScrollFxError::missing(row_selector))?;
            let parent_width = host.rect(row).width;
            if parent_width <= 0.0 {
                return Err(ScrollFxError::geometry(row_selector));
            }
            Ok(f(index, parent_width, host.rect(node).width))
        })
        .collect()
}
