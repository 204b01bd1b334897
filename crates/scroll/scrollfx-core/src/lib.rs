//! ScrollFx Core (engine-agnostic)
//!
//! Scroll-synchronized animation primitives: boundary descriptors, a trigger
//! registry, a timeline store and factory, ticker loops, resize math and
//! cursor followers. DOM reads go through the [`Host`] trait; everything the
//! page must do is emitted as [`Outputs`] for an adapter to apply.

pub mod attrs;
pub mod boundary;
pub mod config;
pub mod cursor;
pub mod debounce;
pub mod dom;
pub mod ease;
pub mod error;
pub mod geometry;
pub mod host;
pub mod ids;
pub mod outputs;
pub mod profile;
pub mod responsive;
pub mod ticker;
pub mod timeline;
pub mod timer;
pub mod trigger;

// Re-exports for consumers (orchestrator, adapters)
pub use attrs::RegionAttrs;
pub use boundary::{Anchor, Boundary, Distance, Edge};
pub use config::Config;
pub use cursor::{PointerFollower, Spotlight};
pub use debounce::Debounce;
pub use dom::{MemoryDom, NodeSpec, PageSpec};
pub use ease::Ease;
pub use error::{Result, ScrollFxError};
pub use geometry::{Rect, Viewport};
pub use host::Host;
pub use ids::{IdAllocator, NodeId, RegionId, TickerId, TimelineId, TriggerId};
pub use outputs::{
    CoreEvent, Outputs, ScrollCommand, SmoothScrollSettings, StyleWrite, TimelineCommand,
};
pub use profile::{build, MotionProfile, Position, TimelineBuilder};
pub use responsive::filler_count;
pub use ticker::{TickerHandle, TickerSet, TickerState};
pub use timeline::{PlaybackState, Timeline, TimelineSet, Tween};
pub use timer::TimerQueue;
pub use trigger::{
    parallax_shift, slide_index, Action, Crossing, Drive, Mode, SlideBinding, TriggerActions,
    TriggerRegistry, TriggerSpec,
};
