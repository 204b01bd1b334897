//! Page chrome: virtual-scroll settings, compact header, preloader.

use scrollfx_core::config::{Breakpoints, Config};
use scrollfx_core::{
    Host, MotionProfile, NodeId, Outputs, Position, RegionId, ScrollCommand, ScrollFxError,
    SmoothScrollSettings, TimelineBuilder, Viewport,
};

use crate::tasks::FollowUp;
use crate::Orchestrator;

pub const HEADER: &str = "#header";
pub const COMPACT: &str = "--compact";
pub const PRELOADER: &str = ".preloader";
pub const PRELOADER_IMG: &str = ".preloader__img";

/// Settings for the virtual scroller. Touch-sized viewports get a snappier
/// lerp and a larger wheel multiplier.
pub fn smooth_settings(config: &Config, smooth: bool, viewport: Viewport) -> SmoothScrollSettings {
    let s = &config.smooth_scroll;
    let touch = viewport.width <= config.breakpoints.touch_max_px;
    SmoothScrollSettings {
        smooth,
        lerp: if touch { s.touch_lerp } else { s.lerp },
        multiplier: if touch {
            s.touch_scroll_multiplier
        } else {
            s.multiplier
        },
        touch_multiplier: s.touch_multiplier,
        firefox_multiplier: s.firefox_multiplier,
    }
}

/// `(left, top, width)` in px where the preloader image docks.
pub fn preloader_dock(viewport_width: f64, breakpoints: &Breakpoints) -> (f64, f64, f64) {
    if viewport_width >= breakpoints.desktop_min_px {
        (40.0, 32.0, 214.0)
    } else if viewport_width >= breakpoints.narrow_below_px {
        (16.0, 24.0, 180.0)
    } else {
        (16.0, 24.0, 142.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Header {
    pub node: NodeId,
    pub compact: bool,
}

impl Orchestrator {
    /// Toggle `--compact` on the header when the threshold is crossed.
    pub(crate) fn update_header(&mut self, out: &mut Outputs) {
        let Some(header) = self.header.as_mut() else {
            return;
        };
        let compact = if self.smooth {
            self.scroll > self.config.header.compact_container_offset_px
        } else {
            self.scroll > self.config.header.compact_threshold_px
        };
        if compact == header.compact {
            return;
        }
        header.compact = compact;
        if compact {
            out.add_class(header.node, COMPACT);
        } else {
            out.remove_class(header.node, COMPACT);
        }
    }

    pub(crate) fn wire_preloader<H: Host + ?Sized>(&mut self, host: &H, out: &mut Outputs) {
        let Some(preloader) = host.query(None, PRELOADER) else {
            return;
        };
        out.push_scroll(ScrollCommand::Stop);
        let region = self.ids.alloc_region();
        self.record(region, "preloader", preloader);

        let Some(img) = host.query(None, PRELOADER_IMG) else {
            self.skip(out, "preloader", ScrollFxError::missing(PRELOADER_IMG));
            self.ready(out, Some(region), preloader);
            out.push_scroll(ScrollCommand::Start);
            return;
        };
        let (left, top, width) = preloader_dock(host.viewport().width, &self.config.breakpoints);
        let timeline = TimelineBuilder::new()
            .autoplay()
            .add(vec![img], &MotionProfile::dock(left, top, width), Position::At(0.0))
            .build();
        let tl = self.timelines.create(timeline, out);
        self.follow_ups.insert(
            tl,
            FollowUp::Preloader {
                region,
                node: preloader,
            },
        );
        self.record(region, "preloader", preloader).timelines.push(tl);
    }

    pub(crate) fn finish_preloader(
        &mut self,
        out: &mut Outputs,
        region: RegionId,
        node: NodeId,
    ) {
        self.ready(out, Some(region), node);
        out.push_scroll(ScrollCommand::Start);
    }
}
