//! Ticker loops: seamless horizontal marquees.
//!
//! The wrapper's single `.js-ticker-row` is cloned once so the strip is twice
//! as wide as its content; an infinite linear timeline then translates the
//! wrapper by the clone's width. Loop duration is `clone width / speed`, so
//! the perceived speed stays constant whatever the content width, and a
//! rebuild after resize re-derives it from the new width.

use serde::{Deserialize, Serialize};

use crate::geometry::measure_width;
use crate::host::Host;
use crate::ids::{IdAllocator, NodeId, TickerId, TimelineId};
use crate::outputs::{CoreEvent, Outputs};
use crate::profile::{MotionProfile, Position, TimelineBuilder};
use crate::timeline::TimelineSet;

pub const TICKER_ROW: &str = ".js-ticker-row";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerState {
    Paused,
    Playing,
}

/// Handle returned by [`TickerSet::create`]. An inert handle (wrapper or row
/// missing) turns play/pause into no-ops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickerHandle(Option<TickerId>);

impl TickerHandle {
    pub fn inert() -> Self {
        Self(None)
    }

    pub fn id(&self) -> Option<TickerId> {
        self.0
    }

    pub fn is_inert(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug)]
struct Ticker {
    id: TickerId,
    wrapper: NodeId,
    clone: NodeId,
    /// Pixels per second.
    speed: f64,
    width: f64,
    timeline: Option<TimelineId>,
    state: TickerState,
}

#[derive(Debug, Default)]
pub struct TickerSet {
    ids: IdAllocator,
    tickers: Vec<Ticker>,
}

impl TickerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate the wrapper's row and build its paused loop.
    pub fn create<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        timelines: &mut TimelineSet,
        out: &mut Outputs,
        speed: f64,
        wrapper: Option<NodeId>,
    ) -> TickerHandle {
        let Some(wrapper) = wrapper else {
            log::debug!("ticker: wrapper missing, returning inert handle");
            return TickerHandle::inert();
        };
        let Some(row) = host.query(Some(wrapper), TICKER_ROW) else {
            log::debug!("ticker: {TICKER_ROW} missing in {wrapper:?}, returning inert handle");
            return TickerHandle::inert();
        };
        let Some(clone) = host.clone_append(row, wrapper) else {
            log::warn!("ticker: host refused to clone {row:?}");
            return TickerHandle::inert();
        };
        let mut ticker = Ticker {
            id: self.ids.alloc_ticker(),
            wrapper,
            clone,
            speed,
            width: 0.0,
            timeline: None,
            state: TickerState::Paused,
        };
        Self::build_timeline(host, &mut ticker, timelines, out);
        let handle = TickerHandle(Some(ticker.id));
        self.tickers.push(ticker);
        handle
    }

    fn build_timeline<H: Host + ?Sized>(
        host: &H,
        ticker: &mut Ticker,
        timelines: &mut TimelineSet,
        out: &mut Outputs,
    ) {
        if let Some(old) = ticker.timeline.take() {
            timelines.kill(old, true, out);
        }
        let width = match measure_width(host, ticker.clone, "ticker row clone") {
            Ok(w) => w,
            Err(err) => {
                log::debug!("ticker {:?}: {err}; deferring loop until next rebuild", ticker.id);
                ticker.width = 0.0;
                return;
            }
        };
        ticker.width = width;
        let duration = width / ticker.speed;
        let timeline = TimelineBuilder::new()
            .repeat_forever()
            .add(
                vec![ticker.wrapper],
                &MotionProfile::ticker_leg(width, duration),
                Position::At(0.0),
            )
            .build();
        let id = timelines.create(timeline, out);
        ticker.timeline = Some(id);
        if ticker.state == TickerState::Playing {
            timelines.play(id, out);
        }
    }

    fn find_mut(&mut self, id: TickerId) -> Option<&mut Ticker> {
        self.tickers.iter_mut().find(|t| t.id == id)
    }

    fn find(&self, id: TickerId) -> Option<&Ticker> {
        self.tickers.iter().find(|t| t.id == id)
    }

    pub fn play(&mut self, id: TickerId, timelines: &mut TimelineSet, out: &mut Outputs) -> bool {
        self.set_state(id, TickerState::Playing, timelines, out)
    }

    pub fn pause(&mut self, id: TickerId, timelines: &mut TimelineSet, out: &mut Outputs) -> bool {
        self.set_state(id, TickerState::Paused, timelines, out)
    }

    fn set_state(
        &mut self,
        id: TickerId,
        state: TickerState,
        timelines: &mut TimelineSet,
        out: &mut Outputs,
    ) -> bool {
        let Some(ticker) = self.find_mut(id) else {
            return false;
        };
        if ticker.state == state {
            return false;
        }
        ticker.state = state;
        if let Some(tl) = ticker.timeline {
            match state {
                TickerState::Playing => timelines.play(tl, out),
                TickerState::Paused => timelines.pause(tl, out),
            };
        }
        out.push_event(CoreEvent::TickerChanged {
            ticker: id,
            playing: state == TickerState::Playing,
        });
        true
    }

    /// Re-measure every ticker and rebuild its loop, preserving play state.
    /// The row is never cloned again.
    pub fn rebuild<H: Host + ?Sized>(
        &mut self,
        host: &H,
        timelines: &mut TimelineSet,
        out: &mut Outputs,
    ) {
        for ticker in &mut self.tickers {
            Self::build_timeline(host, ticker, timelines, out);
        }
    }

    pub fn state(&self, id: TickerId) -> Option<TickerState> {
        self.find(id).map(|t| t.state)
    }

    /// Loop duration in seconds, `None` while geometry is unavailable.
    pub fn loop_duration(&self, id: TickerId) -> Option<f64> {
        self.find(id)
            .filter(|t| t.timeline.is_some())
            .map(|t| t.width / t.speed)
    }

    pub fn timeline(&self, id: TickerId) -> Option<TimelineId> {
        self.find(id).and_then(|t| t.timeline)
    }

    pub fn clone_node(&self, id: TickerId) -> Option<NodeId> {
        self.find(id).map(|t| t.clone)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}
