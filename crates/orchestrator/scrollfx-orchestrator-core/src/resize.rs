//! Debounced geometry recomputation.

use scrollfx_core::responsive::append_fillers;
use scrollfx_core::{Host, Outputs};

use crate::Orchestrator;

impl Orchestrator {
    /// Runs once per settled resize burst: hero intro, filler balls, ticker
    /// loops and the pinned ball range follow the new viewport, a deferred
    /// services pan gets another chance, then every trigger boundary is
    /// re-resolved.
    pub(crate) fn recompute<H: Host + ?Sized>(&mut self, host: &mut H, out: &mut Outputs) {
        log::debug!("resize settled at {:?}; recomputing", host.viewport());
        self.build_hero(&*host, out, 0.0);
        self.top_up_fillers(host);
        self.tickers.rebuild(&*host, &mut self.timelines, out);
        self.pin_balls(&*host, out);
        if let Some(pan) = self.services_pan.take() {
            if !self.pan_our_services(&*host, out, pan) {
                self.services_pan = Some(pan);
            }
        }
        self.refresh(&*host, out);
    }

    /// Containers never lose fillers; a wider viewport appends the shortfall
    /// to every container.
    fn top_up_fillers<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(balls) = self.balls.as_ref() else {
            return;
        };
        let needed = match self.filler_target(&*host, balls.empty_ball, balls.filled_ball) {
            Ok(count) => count,
            Err(err) => {
                log::debug!("block-with-balls-and-info: {err}; fillers unchanged");
                return;
            }
        };
        if needed <= balls.fillers {
            return;
        }
        let extra = needed - balls.fillers;
        let containers = balls.containers.clone();
        append_fillers(host, &containers, extra);
        if let Some(balls) = self.balls.as_mut() {
            balls.fillers = needed;
        }
    }

    pub fn balls_fillers(&self) -> Option<usize> {
        self.balls.as_ref().map(|b| b.fillers)
    }

    /// Pinned ball trigger, once the content could be measured.
    pub fn balls_trigger(&self) -> Option<scrollfx_core::TriggerId> {
        self.balls.as_ref().and_then(|b| b.pin).map(|pin| pin.trigger)
    }
}
