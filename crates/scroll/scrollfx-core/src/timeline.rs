//! Timeline model and playback store.
//!
//! A [`Timeline`] is pure data: tweens over node sets with from/to property
//! values, durations, stagger and easing identifiers. [`TimelineSet`] owns
//! every timeline built by triggers and tickers, tracks its playback state and
//! applied position, and records each transition as a
//! [`TimelineCommand`](crate::outputs::TimelineCommand) for the animation
//! engine to execute.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ease::Ease;
use crate::ids::{IdAllocator, NodeId, TimelineId};
use crate::outputs::{Outputs, TimelineCommand};

/// Animatable properties understood by the animation engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    X,
    Y,
    XPercent,
    TranslateX,
    TranslateY,
    Opacity,
    Rotation,
    Color,
    Left,
    Top,
    Width,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropValue {
    Number(f64),
    Px(f64),
    Percent(f64),
    /// Offset from the current value, as a percentage of the target's size.
    RelativePercent(f64),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Values {
    Uniform(PropValue),
    /// One value per target, in target order.
    PerTarget(Vec<PropValue>),
}

impl Values {
    /// Value applied to the target at `index`.
    pub fn for_target(&self, index: usize) -> Option<&PropValue> {
        match self {
            Values::Uniform(v) => Some(v),
            Values::PerTarget(vs) => vs.get(index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub property: Property,
    pub values: Values,
}

impl PropertyValue {
    pub fn uniform(property: Property, value: PropValue) -> Self {
        Self {
            property,
            values: Values::Uniform(value),
        }
    }

    pub fn per_target(property: Property, values: Vec<PropValue>) -> Self {
        Self {
            property,
            values: Values::PerTarget(values),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub targets: Vec<NodeId>,
    /// Initial (hidden) state set before the tween runs; empty means "from
    /// current".
    #[serde(default)]
    pub from: Vec<PropertyValue>,
    /// Rest state.
    pub to: Vec<PropertyValue>,
    /// Seconds.
    pub duration: f64,
    /// Seconds between consecutive targets.
    #[serde(default)]
    pub stagger: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Absolute start on the parent timeline, in seconds.
    #[serde(default)]
    pub at: f64,
    /// Extra per-tween delay, in seconds.
    #[serde(default)]
    pub delay: f64,
}

impl Tween {
    /// Seconds from `at` until the last target finishes.
    pub fn span(&self) -> f64 {
        let staggered = self.targets.len().saturating_sub(1) as f64 * self.stagger;
        self.delay + staggered + self.duration
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    Once,
    Infinite,
}

/// How a timeline is driven.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// Position mapped directly from progress; reversible. `smoothing` is the
    /// catch-up time in seconds the engine may take to reach a new position.
    Scrubbed { smoothing: Option<f64> },
    /// Played forward once.
    FireAndForget,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub tweens: Vec<Tween>,
    /// Seconds before the first tween, honored when played.
    #[serde(default)]
    pub delay: f64,
    pub repeat: Repeat,
    pub discipline: Discipline,
    /// Created paused; nothing runs until the owner plays or seeks it.
    pub paused: bool,
}

impl Timeline {
    /// Total length of one iteration in seconds (excluding `delay`).
    pub fn duration(&self) -> f64 {
        self.tweens
            .iter()
            .map(|t| t.at + t.span())
            .fold(0.0, f64::max)
    }

    /// Every node the timeline writes to, first appearance order, deduplicated.
    pub fn targets(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        for t in &self.tweens {
            for n in &t.targets {
                if !out.contains(n) {
                    out.push(*n);
                }
            }
        }
        out
    }

    #[inline]
    pub fn is_scrubbed(&self) -> bool {
        matches!(self.discipline, Discipline::Scrubbed { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Playing,
    Paused,
    Completed,
}

#[derive(Debug)]
struct Entry {
    timeline: Timeline,
    state: PlaybackState,
    position: f64,
    plays: u32,
}

/// Owner of all live timelines.
#[derive(Debug, Default)]
pub struct TimelineSet {
    ids: IdAllocator,
    entries: HashMap<TimelineId, Entry>,
}

impl TimelineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `timeline` and emit its creation.
    pub fn create(&mut self, timeline: Timeline, out: &mut Outputs) -> TimelineId {
        let id = self.ids.alloc_timeline();
        let state = if timeline.paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        };
        out.push_command(TimelineCommand::Create {
            id,
            timeline: timeline.clone(),
        });
        self.entries.insert(
            id,
            Entry {
                plays: u32::from(state == PlaybackState::Playing),
                timeline,
                state,
                position: 0.0,
            },
        );
        id
    }

    /// Play forward. Completed fire-and-forget timelines and killed ones stay put.
    pub fn play(&mut self, id: TimelineId, out: &mut Outputs) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        match entry.state {
            PlaybackState::Playing => false,
            PlaybackState::Completed
                if entry.timeline.discipline == Discipline::FireAndForget =>
            {
                false
            }
            _ => {
                entry.state = PlaybackState::Playing;
                entry.plays += 1;
                out.push_command(TimelineCommand::Play { id });
                true
            }
        }
    }

    pub fn pause(&mut self, id: TimelineId, out: &mut Outputs) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if entry.state != PlaybackState::Playing {
            return false;
        }
        entry.state = PlaybackState::Paused;
        out.push_command(TimelineCommand::Pause { id });
        true
    }

    /// Set the normalized position. The applied value is exactly `clamp(p, 0, 1)`.
    pub fn seek(&mut self, id: TimelineId, progress: f64, out: &mut Outputs) -> Option<f64> {
        let entry = self.entries.get_mut(&id)?;
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if entry.position == p {
            return Some(p);
        }
        entry.position = p;
        let smoothing = match entry.timeline.discipline {
            Discipline::Scrubbed { smoothing } => smoothing,
            Discipline::FireAndForget => None,
        };
        out.push_command(TimelineCommand::Seek {
            id,
            progress: p,
            smoothing,
        });
        Some(p)
    }

    /// Halt and discard. With `clear_props`, inline styles the timeline wrote
    /// are removed so a rebuilt timeline starts from the stylesheet state.
    /// The id is unknown afterwards.
    pub fn kill(&mut self, id: TimelineId, clear_props: bool, out: &mut Outputs) -> bool {
        let Some(entry) = self.entries.remove(&id) else {
            return false;
        };
        let targets = if clear_props {
            entry.timeline.targets()
        } else {
            Vec::new()
        };
        out.push_command(TimelineCommand::Kill { id, clear_props, targets });
        true
    }

    /// The engine reported the timeline finished.
    pub fn complete(&mut self, id: TimelineId) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry)
                if entry.state == PlaybackState::Playing
                    && entry.timeline.repeat == Repeat::Once =>
            {
                entry.state = PlaybackState::Completed;
                entry.position = 1.0;
                true
            }
            _ => false,
        }
    }

    /// Kill every timeline, in creation order.
    pub fn kill_all(&mut self, out: &mut Outputs) {
        let mut ids: Vec<TimelineId> = self.entries.keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        for id in ids {
            self.kill(id, false, out);
        }
    }

    pub fn get(&self, id: TimelineId) -> Option<&Timeline> {
        self.entries.get(&id).map(|e| &e.timeline)
    }

    pub fn state(&self, id: TimelineId) -> Option<PlaybackState> {
        self.entries.get(&id).map(|e| e.state)
    }

    pub fn position(&self, id: TimelineId) -> Option<f64> {
        self.entries.get(&id).map(|e| e.position)
    }

    /// Number of times the timeline was started forward.
    pub fn play_count(&self, id: TimelineId) -> u32 {
        self.entries.get(&id).map(|e| e.plays).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(targets: Vec<NodeId>, discipline: Discipline) -> Timeline {
        Timeline {
            tweens: vec![Tween {
                targets,
                from: vec![],
                to: vec![PropertyValue::uniform(
                    Property::Opacity,
                    PropValue::Number(1.0),
                )],
                duration: 1.0,
                stagger: 0.2,
                ease: Ease::Power2Out,
                at: 0.5,
                delay: 0.0,
            }],
            delay: 0.0,
            repeat: Repeat::Once,
            discipline,
            paused: true,
        }
    }

    #[test]
    fn duration_includes_stagger_and_position() {
        let tl = fade(vec![NodeId(1), NodeId(2), NodeId(3)], Discipline::FireAndForget);
        assert!((tl.duration() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn fire_and_forget_does_not_replay_after_completion() {
        let mut set = TimelineSet::new();
        let mut out = Outputs::default();
        let id = set.create(fade(vec![NodeId(1)], Discipline::FireAndForget), &mut out);
        assert_eq!(set.state(id), Some(PlaybackState::Paused));
        assert!(set.play(id, &mut out));
        assert!(!set.play(id, &mut out));
        assert!(set.complete(id));
        assert!(!set.play(id, &mut out));
        assert_eq!(set.play_count(id), 1);
    }

    #[test]
    fn seek_clamps_and_dedups() {
        let mut set = TimelineSet::new();
        let mut out = Outputs::default();
        let id = set.create(
            fade(vec![NodeId(1)], Discipline::Scrubbed { smoothing: Some(0.8) }),
            &mut out,
        );
        out.clear();
        assert_eq!(set.seek(id, 1.7, &mut out), Some(1.0));
        assert_eq!(set.seek(id, 1.0, &mut out), Some(1.0));
        assert_eq!(set.seek(id, -3.0, &mut out), Some(0.0));
        assert_eq!(out.commands.len(), 2);
        assert!(matches!(
            out.commands[0],
            TimelineCommand::Seek { progress, smoothing: Some(s), .. } if progress == 1.0 && s == 0.8
        ));
    }

    #[test]
    fn kill_with_clear_lists_targets_and_is_terminal() {
        let mut set = TimelineSet::new();
        let mut out = Outputs::default();
        let id = set.create(fade(vec![NodeId(4), NodeId(5)], Discipline::FireAndForget), &mut out);
        out.clear();
        assert!(set.kill(id, true, &mut out));
        assert!(!set.kill(id, true, &mut out));
        assert!(!set.play(id, &mut out));
        assert_eq!(set.seek(id, 0.5, &mut out), None);
        assert_eq!(set.state(id), None);
        assert!(set.is_empty());
        match &out.commands[..] {
            [TimelineCommand::Kill { targets, clear_props: true, .. }] => {
                assert_eq!(targets, &vec![NodeId(4), NodeId(5)]);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }
}
