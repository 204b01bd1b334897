//! Deferred work: timer tasks and timeline-completion follow-ups.

use scrollfx_core::{NodeId, RegionId};

/// Work scheduled on the orchestrator's timer queue.
#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    /// Register a OneShot text reveal for the region at `selector`.
    TextReveal { selector: &'static str, start: f64 },
    /// Add `--ready` to `node` and report the region.
    Ready { region: RegionId, node: NodeId },
    /// Wire the `.js-fade-left`/`.js-fade-right` children of `node`.
    Horizontal { node: NodeId, name: String },
    ScrollTo { target: NodeId },
}

/// What happens when the engine reports a timeline finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Hero intro done: reveal the hero paragraph.
    HeroText,
    /// Preloader image docked: mark the preloader ready and resume scrolling.
    Preloader { region: RegionId, node: NodeId },
}
