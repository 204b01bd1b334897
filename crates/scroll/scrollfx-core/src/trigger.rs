//! Trigger registry: regions bound to viewport-crossing rules.
//!
//! Every registered trigger resolves its start/end [`Boundary`] to pixel
//! scroll offsets (on registration and on every refresh). On each scroll tick
//! the registry walks triggers in registration order, detects directional
//! crossings, and drives the attached timeline according to the mode:
//!
//! - `OneShot`: the first activation (either direction) plays the timeline
//!   forward once; the trigger is never evaluated again.
//! - `Scrub`: timeline position is `clamp((scroll - start) / (end - start))`.
//! - `Pinned`: scrubbed over the region's overflow distance, optionally
//!   marking the active slide.

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::Result;
use crate::geometry::Viewport;
use crate::host::Host;
use crate::ids::{IdAllocator, NodeId, RegionId, TickerId, TimelineId, TriggerId};
use crate::outputs::{CoreEvent, Outputs};
use crate::ticker::TickerSet;
use crate::timeline::TimelineSet;

pub const ACTIVE_CLASS: &str = "--active";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    OneShot,
    Scrub,
    Pinned,
}

/// Side effects a trigger can run on a crossing or progress mark.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PlayTicker(TickerId),
    PauseTicker(TickerId),
    PlayTimeline(TimelineId),
    AddClass {
        node: NodeId,
        class: String,
    },
    RemoveClass {
        node: NodeId,
        class: String,
    },
    /// Add the state class and report the region as ready.
    Ready {
        region: Option<RegionId>,
        node: NodeId,
        class: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerActions {
    #[serde(default)]
    pub on_enter: Vec<Action>,
    #[serde(default)]
    pub on_leave: Vec<Action>,
    #[serde(default)]
    pub on_enter_back: Vec<Action>,
    #[serde(default)]
    pub on_leave_back: Vec<Action>,
}

impl TriggerActions {
    /// Play `ticker` while the region is in range, pause it outside.
    pub fn follow_ticker(ticker: TickerId) -> Self {
        Self {
            on_enter: vec![Action::PlayTicker(ticker)],
            on_leave: vec![Action::PauseTicker(ticker)],
            on_enter_back: vec![Action::PlayTicker(ticker)],
            on_leave_back: vec![Action::PauseTicker(ticker)],
        }
    }

    fn for_crossing(&self, crossing: Crossing) -> &[Action] {
        match crossing {
            Crossing::Enter => &self.on_enter,
            Crossing::Leave => &self.on_leave,
            Crossing::EnterBack => &self.on_enter_back,
            Crossing::LeaveBack => &self.on_leave_back,
        }
    }
}

/// One-time actions fired when progress first reaches `at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressMark {
    pub at: f64,
    pub actions: Vec<Action>,
}

/// Slides whose active marker follows a pinned trigger's progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideBinding {
    pub slides: Vec<NodeId>,
    /// Ball containers animated by the pin; the index spans `ball_count - 1`.
    pub ball_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    #[serde(default)]
    pub region: Option<RegionId>,
    pub node: NodeId,
    pub start: Boundary,
    pub end: Boundary,
    pub mode: Mode,
    #[serde(default)]
    pub timeline: Option<TimelineId>,
    #[serde(default)]
    pub actions: TriggerActions,
    #[serde(default)]
    pub marks: Vec<ProgressMark>,
    #[serde(default)]
    pub slides: Option<SlideBinding>,
}

impl TriggerSpec {
    pub fn new(node: NodeId, start: Boundary, end: Boundary, mode: Mode) -> Self {
        Self {
            region: None,
            node,
            start,
            end,
            mode,
            timeline: None,
            actions: TriggerActions::default(),
            marks: Vec::new(),
            slides: None,
        }
    }

    /// Parse both boundary expressions up front.
    pub fn parse(node: NodeId, start: &str, end: &str, mode: Mode) -> Result<Self> {
        Ok(Self::new(node, Boundary::parse(start)?, Boundary::parse(end)?, mode))
    }

    pub fn region(mut self, region: RegionId) -> Self {
        self.region = Some(region);
        self
    }

    pub fn timeline(mut self, timeline: TimelineId) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn actions(mut self, actions: TriggerActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn mark(mut self, at: f64, actions: Vec<Action>) -> Self {
        self.marks.push(ProgressMark { at, actions });
        self
    }

    pub fn slides(mut self, binding: SlideBinding) -> Self {
        self.slides = Some(binding);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Active,
    After,
}

fn crossings(prev: Zone, next: Zone) -> &'static [Crossing] {
    use Crossing::*;
    match (prev, next) {
        (Zone::Before, Zone::Active) => &[Enter],
        (Zone::Before, Zone::After) => &[Enter, Leave],
        (Zone::Active, Zone::After) => &[Leave],
        (Zone::Active, Zone::Before) => &[LeaveBack],
        (Zone::After, Zone::Active) => &[EnterBack],
        (Zone::After, Zone::Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

/// `floor(progress * (ball_count - 1))`, kept inside `slide_count`.
pub fn slide_index(progress: f64, ball_count: usize, slide_count: usize) -> usize {
    let span = ball_count.saturating_sub(1) as f64;
    let raw = (progress.clamp(0.0, 1.0) * span).floor() as usize;
    raw.min(slide_count.saturating_sub(1))
}

/// Parallax column shift in percent of the column's size: even columns move
/// `+`, odd `-`, scaled by `speed`; narrow viewports add a 50% fan-out.
pub fn parallax_shift(index: usize, speed: f64, narrow: bool) -> f64 {
    let base = 100.0 * speed + if narrow { 50.0 } else { 0.0 };
    if index % 2 == 0 {
        base
    } else {
        -base
    }
}

#[derive(Debug)]
struct Trigger {
    id: TriggerId,
    spec: TriggerSpec,
    start_px: f64,
    end_px: f64,
    resolved: bool,
    zone: Zone,
    fired: bool,
    progress: f64,
    marks_fired: Vec<bool>,
    active_slide: Option<usize>,
}

impl Trigger {
    fn zone_at(&self, scroll: f64) -> Zone {
        if scroll < self.start_px {
            Zone::Before
        } else if scroll > self.end_px {
            Zone::After
        } else {
            Zone::Active
        }
    }

    fn progress_at(&self, scroll: f64) -> f64 {
        let span = self.end_px - self.start_px;
        if span <= 0.0 {
            return if scroll >= self.start_px { 1.0 } else { 0.0 };
        }
        ((scroll - self.start_px) / span).clamp(0.0, 1.0)
    }
}

/// Mutable collaborators a trigger drives while evaluating.
pub struct Drive<'a> {
    pub timelines: &'a mut TimelineSet,
    pub tickers: &'a mut TickerSet,
    pub out: &'a mut Outputs,
}

impl Drive<'_> {
    pub fn run(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::PlayTicker(t) => {
                    self.tickers.play(*t, self.timelines, self.out);
                }
                Action::PauseTicker(t) => {
                    self.tickers.pause(*t, self.timelines, self.out);
                }
                Action::PlayTimeline(tl) => {
                    self.timelines.play(*tl, self.out);
                }
                Action::AddClass { node, class } => self.out.add_class(*node, class),
                Action::RemoveClass { node, class } => self.out.remove_class(*node, class),
                Action::Ready {
                    region,
                    node,
                    class,
                } => {
                    self.out.add_class(*node, class);
                    self.out.push_event(CoreEvent::RegionReady {
                        region: *region,
                        node: *node,
                        class: class.clone(),
                    });
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct TriggerRegistry {
    ids: IdAllocator,
    triggers: Vec<Trigger>,
    lookahead_viewports: f64,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TriggerRegistry {
    pub fn new(lookahead_viewports: f64) -> Self {
        Self {
            ids: IdAllocator::new(),
            triggers: Vec::new(),
            lookahead_viewports: lookahead_viewports.max(0.0),
        }
    }

    /// Add a trigger and resolve its range against current geometry.
    pub fn register<H: Host + ?Sized>(&mut self, host: &H, spec: TriggerSpec) -> TriggerId {
        let id = self.ids.alloc_trigger();
        let mut trigger = Trigger {
            id,
            marks_fired: vec![false; spec.marks.len()],
            spec,
            start_px: 0.0,
            end_px: 0.0,
            resolved: false,
            zone: Zone::Before,
            fired: false,
            progress: 0.0,
            active_slide: None,
        };
        Self::resolve(host, &mut trigger);
        self.triggers.push(trigger);
        id
    }

    fn resolve<H: Host + ?Sized>(host: &H, trigger: &mut Trigger) -> bool {
        let rect = host.rect(trigger.spec.node);
        if rect.is_empty() {
            log::debug!(
                "trigger {:?}: region {:?} has no layout yet; keeping previous range",
                trigger.id,
                trigger.spec.node
            );
            return false;
        }
        let viewport = host.viewport();
        let start = trigger.spec.start.resolve(rect, viewport, 0.0);
        let end = trigger.spec.end.resolve(rect, viewport, start);
        trigger.start_px = start;
        trigger.end_px = end.max(start);
        trigger.resolved = true;
        true
    }

    /// Re-resolve every pixel range (after layout changes).
    pub fn refresh<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        for trigger in &mut self.triggers {
            if Self::resolve(host, trigger) && trigger.spec.mode == Mode::Pinned {
                out.push_event(CoreEvent::PinRange {
                    trigger: trigger.id,
                    node: trigger.spec.node,
                    start: trigger.start_px,
                    end: trigger.end_px,
                });
            }
        }
    }

    /// Replace a trigger's end boundary (pinned distance changed) and re-resolve.
    pub fn set_end<H: Host + ?Sized>(&mut self, host: &H, id: TriggerId, end: Boundary) -> bool {
        match self.triggers.iter_mut().find(|t| t.id == id) {
            Some(trigger) => {
                trigger.spec.end = end;
                Self::resolve(host, trigger)
            }
            None => false,
        }
    }

    /// Swap the driven timeline (after a rebuild killed the old one).
    pub fn set_timeline(&mut self, id: TriggerId, timeline: Option<TimelineId>) -> bool {
        match self.triggers.iter_mut().find(|t| t.id == id) {
            Some(trigger) => {
                trigger.spec.timeline = timeline;
                true
            }
            None => false,
        }
    }

    /// Evaluate all triggers for the current scroll offset.
    pub fn evaluate(&mut self, scroll: f64, viewport: Viewport, drive: &mut Drive<'_>) {
        let margin = self.lookahead_viewports * viewport.height;
        for trigger in &mut self.triggers {
            if !trigger.resolved || (trigger.spec.mode == Mode::OneShot && trigger.fired) {
                continue;
            }
            let next = trigger.zone_at(scroll);
            let happened = crossings(trigger.zone, next);
            trigger.zone = next;
            for &crossing in happened {
                drive.out.push_event(CoreEvent::Crossing {
                    trigger: trigger.id,
                    crossing,
                });
            }

            match trigger.spec.mode {
                Mode::OneShot => {
                    let activated = happened
                        .iter()
                        .any(|c| matches!(c, Crossing::Enter | Crossing::EnterBack));
                    if activated {
                        trigger.fired = true;
                        trigger.progress = 1.0;
                        if let Some(tl) = trigger.spec.timeline {
                            drive.timelines.play(tl, drive.out);
                        }
                        for &crossing in happened {
                            drive.run(trigger.spec.actions.for_crossing(crossing));
                        }
                    }
                }
                Mode::Scrub | Mode::Pinned => {
                    for &crossing in happened {
                        drive.run(trigger.spec.actions.for_crossing(crossing));
                    }
                    let near = scroll >= trigger.start_px - margin
                        && scroll <= trigger.end_px + margin;
                    if !near && happened.is_empty() {
                        continue;
                    }
                    let progress = trigger.progress_at(scroll);
                    trigger.progress = progress;
                    if let Some(tl) = trigger.spec.timeline {
                        drive.timelines.seek(tl, progress, drive.out);
                    }
                    for (mark, fired) in trigger.spec.marks.iter().zip(trigger.marks_fired.iter_mut()) {
                        if !*fired && progress >= mark.at {
                            *fired = true;
                            drive.run(&mark.actions);
                        }
                    }
                    if let Some(binding) = &trigger.spec.slides {
                        if binding.slides.is_empty() {
                            continue;
                        }
                        let index = slide_index(progress, binding.ball_count, binding.slides.len());
                        for slide in &binding.slides {
                            drive.out.remove_class(*slide, ACTIVE_CLASS);
                        }
                        drive.out.add_class(binding.slides[index], ACTIVE_CLASS);
                        if trigger.active_slide != Some(index) {
                            trigger.active_slide = Some(index);
                            drive.out.push_event(CoreEvent::SlideActivated {
                                trigger: trigger.id,
                                index,
                            });
                        }
                    }
                }
            }
        }
    }

    pub fn is_fired(&self, id: TriggerId) -> bool {
        self.find(id).map(|t| t.fired).unwrap_or(false)
    }

    pub fn progress(&self, id: TriggerId) -> Option<f64> {
        self.find(id).map(|t| t.progress)
    }

    /// Resolved `(start, end)` scroll offsets.
    pub fn range(&self, id: TriggerId) -> Option<(f64, f64)> {
        self.find(id)
            .filter(|t| t.resolved)
            .map(|t| (t.start_px, t.end_px))
    }

    pub fn active_slide(&self, id: TriggerId) -> Option<usize> {
        self.find(id).and_then(|t| t.active_slide)
    }

    pub fn timeline(&self, id: TriggerId) -> Option<TimelineId> {
        self.find(id).and_then(|t| t.spec.timeline)
    }

    fn find(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
