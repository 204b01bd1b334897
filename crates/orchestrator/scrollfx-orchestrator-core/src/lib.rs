//! scrollfx-orchestrator
//!
//! Composition root for a scroll-animated page. [`Orchestrator::initialize`]
//! discovers the page's regions through a [`Host`], registers their triggers,
//! timelines and tickers, and returns an explicit handle; every later event
//! (scroll, resize, frame, pointer, timeline completion, anchor navigation)
//! is an entry point on that handle returning a [`Frame`] of outputs.

pub mod catalogue;
pub mod chrome;
pub mod resize;
pub mod tasks;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::Serialize;

use scrollfx_core::{
    Config, CoreEvent, Debounce, Drive, Host, IdAllocator, NodeId, Outputs, PointerFollower,
    RegionId, ScrollCommand, ScrollFxError, Spotlight, TickerId, TickerSet, TimelineId,
    TimelineSet, TimerQueue, TriggerId, TriggerRegistry,
};

use crate::catalogue::{BallsInfo, Hero, ServicesPan};
use crate::chrome::Header;
use crate::tasks::{FollowUp, Task};

/// State class marking a finished transition.
pub const READY: &str = "--ready";

/// Outputs produced by one entry-point call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub epoch: u64,
    pub outputs: Outputs,
}

/// What was wired for one page region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    pub name: String,
    pub node: NodeId,
    pub triggers: Vec<TriggerId>,
    pub timelines: Vec<TimelineId>,
    pub tickers: Vec<TickerId>,
}

impl RegionRecord {
    fn new(name: &str, node: NodeId) -> Self {
        Self {
            name: name.to_string(),
            node,
            triggers: Vec::new(),
            timelines: Vec::new(),
            tickers: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    pub config: Config,
    pub epoch: u64,
    pub(crate) timelines: TimelineSet,
    pub(crate) tickers: TickerSet,
    pub(crate) triggers: TriggerRegistry,
    pub(crate) ids: IdAllocator,
    /// Wired regions in registration order.
    pub(crate) regions: IndexMap<RegionId, RegionRecord>,
    pub(crate) timers: TimerQueue<Task>,
    pub(crate) follow_ups: HashMap<TimelineId, FollowUp>,
    pub(crate) resize: Debounce,
    pub(crate) header: Option<Header>,
    pub(crate) smooth: bool,
    pub(crate) scroll: f64,
    pub(crate) hero: Option<Hero>,
    pub(crate) balls: Option<BallsInfo>,
    pub(crate) services_pan: Option<ServicesPan>,
    pub(crate) spotlight: Option<Spotlight>,
    pub(crate) pointer: PointerFollower,
    pub(crate) disposed: bool,
}

impl Orchestrator {
    /// Wire every region found in `host` and return the handle together with
    /// the startup outputs. Only an invalid `config` fails; missing or
    /// malformed regions are skipped and reported as events.
    pub fn initialize<H: Host + ?Sized>(host: &mut H, config: Config, now: f64) -> Result<(Self, Frame)> {
        config.validate().context("invalid scrollfx configuration")?;

        let smooth = host
            .query(None, "body")
            .map(|body| !host.has_class(body, "single"))
            .unwrap_or(true);
        let mut orch = Self {
            triggers: TriggerRegistry::new(config.lookahead_viewports),
            resize: Debounce::new(config.resize_debounce_ms),
            pointer: PointerFollower::new(None, None, &config.cursor),
            config,
            epoch: 0,
            timelines: TimelineSet::new(),
            tickers: TickerSet::new(),
            ids: IdAllocator::new(),
            regions: IndexMap::new(),
            timers: TimerQueue::new(),
            follow_ups: HashMap::new(),
            header: None,
            smooth,
            scroll: 0.0,
            hero: None,
            balls: None,
            services_pan: None,
            spotlight: None,
            disposed: false,
        };

        let mut out = Outputs::default();
        out.push_scroll(ScrollCommand::Configure(chrome::smooth_settings(
            &orch.config,
            smooth,
            host.viewport(),
        )));
        orch.header = host
            .query(None, chrome::HEADER)
            .map(|node| Header { node, compact: false });
        orch.wire_preloader(&*host, &mut out);
        orch.wire_page(host, &mut out, now);
        orch.pointer = PointerFollower::new(
            host.query(None, catalogue::POINTER_DOT),
            host.query(None, catalogue::POINTER_RING),
            &orch.config.cursor,
        );
        orch.refresh(&*host, &mut out);
        orch.update_header(&mut out);
        orch.run_due(&*host, &mut out, now);
        log::debug!(
            "scrollfx initialized: {} regions, {} triggers, {} tickers",
            orch.regions.len(),
            orch.triggers.len(),
            orch.tickers.len()
        );
        let frame = orch.frame(out);
        Ok((orch, frame))
    }

    fn frame(&mut self, outputs: Outputs) -> Frame {
        self.epoch = self.epoch.wrapping_add(1);
        Frame {
            epoch: self.epoch,
            outputs,
        }
    }

    /// Scroll offset from the virtual scroller (or native scrollY).
    pub fn on_scroll<H: Host + ?Sized>(&mut self, host: &H, offset: f64) -> Frame {
        let mut out = Outputs::default();
        if !self.disposed {
            self.scroll = offset;
            self.update_header(&mut out);
            self.evaluate(host, &mut out);
        }
        self.frame(out)
    }

    /// Window resize. Recomputation happens on a later [`on_frame`](Self::on_frame)
    /// once the quiet window has passed.
    pub fn on_resize(&mut self, now: f64) -> Frame {
        if !self.disposed {
            self.resize.trigger(now);
        }
        self.frame(Outputs::default())
    }

    /// Scroll container changed size: re-resolve every boundary immediately.
    pub fn on_content_resize<H: Host + ?Sized>(&mut self, host: &H) -> Frame {
        let mut out = Outputs::default();
        if !self.disposed {
            self.refresh(host, &mut out);
        }
        self.frame(out)
    }

    /// Animation frame: debounced resize work, due timers, spotlight easing.
    pub fn on_frame<H: Host + ?Sized>(&mut self, host: &mut H, now: f64) -> Frame {
        let mut out = Outputs::default();
        if !self.disposed {
            if self.resize.poll(now) {
                self.recompute(host, &mut out);
            }
            self.run_due(&*host, &mut out, now);
            if let Some(spotlight) = self.spotlight.as_mut() {
                spotlight.tick(&mut out);
            }
        }
        self.frame(out)
    }

    /// Pointer anywhere on the page (viewport coordinates).
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Frame {
        let mut out = Outputs::default();
        if !self.disposed {
            self.pointer.pointer_move(client_x, client_y, &mut out);
        }
        self.frame(out)
    }

    /// Pointer over the spotlight image.
    pub fn on_spotlight_move<H: Host + ?Sized>(&mut self, host: &H, client_x: f64, client_y: f64) -> Frame {
        if let Some(spotlight) = self.spotlight.as_mut() {
            spotlight.pointer_move(host, client_x, client_y);
        }
        self.frame(Outputs::default())
    }

    pub fn on_spotlight_leave(&mut self) -> Frame {
        if let Some(spotlight) = self.spotlight.as_mut() {
            spotlight.pointer_leave();
        }
        self.frame(Outputs::default())
    }

    /// The animation engine finished a timeline.
    pub fn on_timeline_complete<H: Host + ?Sized>(&mut self, host: &H, id: TimelineId) -> Frame {
        let mut out = Outputs::default();
        if self.disposed {
            return self.frame(out);
        }
        if self.timelines.get(id).is_none() {
            log::warn!("completion reported for unknown timeline {id:?}");
        }
        self.timelines.complete(id);
        match self.follow_ups.remove(&id) {
            Some(FollowUp::HeroText) => {
                let reveal = match self.hero.as_mut() {
                    Some(hero) if !hero.text_revealed => {
                        hero.text_revealed = true;
                        true
                    }
                    _ => false,
                };
                if reveal {
                    self.text_reveal(host, &mut out, catalogue::HERO, 0.9);
                    self.evaluate(host, &mut out);
                }
            }
            Some(FollowUp::Preloader { region, node }) => self.finish_preloader(&mut out, region, node),
            None => {}
        }
        self.frame(out)
    }

    /// In-page anchor click. `None` when no element matches `hash`, leaving
    /// the native jump to the browser.
    pub fn on_anchor_click<H: Host + ?Sized>(&mut self, host: &H, hash: &str) -> Option<Frame> {
        if self.disposed {
            return None;
        }
        let target = hash_target(host, hash)?;
        let mut out = Outputs::default();
        out.push_scroll(ScrollCommand::ScrollTo { target });
        Some(self.frame(out))
    }

    /// Location hash present at load: scroll there once the page has settled.
    pub fn on_load_hash<H: Host + ?Sized>(&mut self, host: &H, hash: &str, now: f64) -> Frame {
        if !self.disposed {
            match hash_target(host, hash) {
                Some(target) => self
                    .timers
                    .schedule(now + self.config.hash_settle_ms, Task::ScrollTo { target }),
                None => log::debug!("load hash {hash:?} matches no element"),
            }
        }
        self.frame(Outputs::default())
    }

    /// Kill every timeline and drop pending work. Later calls are no-ops.
    pub fn dispose(&mut self) -> Frame {
        let mut out = Outputs::default();
        if !self.disposed {
            self.timelines.kill_all(&mut out);
            self.timers.clear();
            self.resize.cancel();
            self.follow_ups.clear();
            self.disposed = true;
        }
        self.frame(out)
    }

    pub(crate) fn evaluate<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let viewport = host.viewport();
        let mut drive = Drive {
            timelines: &mut self.timelines,
            tickers: &mut self.tickers,
            out,
        };
        self.triggers.evaluate(self.scroll, viewport, &mut drive);
    }

    /// Re-resolve pixel boundaries, tell the scroller to re-measure, and
    /// re-evaluate at the current offset.
    pub(crate) fn refresh<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        self.triggers.refresh(host, out);
        out.push_scroll(ScrollCommand::Update);
        out.push_event(CoreEvent::RefreshRequested);
        self.evaluate(host, out);
    }

    fn run_due<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs, now: f64) {
        let due = self.timers.due(now);
        if due.is_empty() {
            return;
        }
        for task in due {
            match task {
                Task::TextReveal { selector, start } => {
                    self.text_reveal(host, out, selector, start);
                }
                Task::Ready { region, node } => self.ready(out, Some(region), node),
                Task::Horizontal { node, name } => self.wire_horizontal(host, out, node, &name),
                Task::ScrollTo { target } => out.push_scroll(ScrollCommand::ScrollTo { target }),
            }
        }
        self.evaluate(host, out);
    }

    pub(crate) fn record(&mut self, region: RegionId, name: &str, node: NodeId) -> &mut RegionRecord {
        self.regions
            .entry(region)
            .or_insert_with(|| RegionRecord::new(name, node))
    }

    /// Report a region (or part of one) that could not be wired.
    pub(crate) fn skip(&self, out: &mut Outputs, region: &str, err: ScrollFxError) {
        log::debug!("skipping {region}: {err}");
        out.push_event(CoreEvent::RegionSkipped {
            region: region.to_string(),
            reason: err.to_string(),
        });
    }

    pub(crate) fn ready(&self, out: &mut Outputs, region: Option<RegionId>, node: NodeId) {
        out.add_class(node, READY);
        out.push_event(CoreEvent::RegionReady {
            region,
            node,
            class: READY.to_string(),
        });
    }

    pub fn timelines(&self) -> &TimelineSet {
        &self.timelines
    }

    pub fn tickers(&self) -> &TickerSet {
        &self.tickers
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &RegionRecord)> {
        self.regions.iter().map(|(id, record)| (*id, record))
    }

    /// First region wired under `name`.
    pub fn region(&self, name: &str) -> Option<&RegionRecord> {
        self.regions.values().find(|r| r.name == name)
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn hero_timeline(&self) -> Option<TimelineId> {
        self.hero.as_ref().and_then(|h| h.timeline)
    }

    pub fn spotlight_position(&self) -> Option<(f64, f64)> {
        self.spotlight.as_ref().map(Spotlight::position)
    }
}

/// Element targeted by `#id`, if any.
pub fn hash_target<H: Host + ?Sized>(host: &H, hash: &str) -> Option<NodeId> {
    let id = hash.trim().strip_prefix('#')?;
    if id.is_empty() || id.contains(char::is_whitespace) {
        return None;
    }
    host.query(None, &format!("#{id}"))
}
