//! Cursor followers.
//!
//! [`Spotlight`] eases a point towards the pointer inside a bounded element
//! every frame and writes it as `--mouse-x`/`--mouse-y`. [`PointerFollower`]
//! chases the pointer with two elements whose lag differs by tween length.

use crate::config::CursorConfig;
use crate::host::Host;
use crate::ids::NodeId;
use crate::outputs::{Outputs, TimelineCommand};
use crate::profile::MotionProfile;

pub const MOUSE_X: &str = "--mouse-x";
pub const MOUSE_Y: &str = "--mouse-y";

#[derive(Clone, Debug, PartialEq)]
pub struct Spotlight {
    area: NodeId,
    mask: NodeId,
    easing: f64,
    center: (f64, f64),
    current: (f64, f64),
    target: (f64, f64),
}

impl Spotlight {
    /// Start at the center of `area`; frames write to `mask`.
    pub fn new<H: Host + ?Sized>(host: &H, area: NodeId, mask: NodeId, easing: f64) -> Self {
        let center = host.client_rect(area).local_center();
        Self {
            area,
            mask,
            easing,
            center,
            current: center,
            target: center,
        }
    }

    #[inline]
    pub fn area(&self) -> NodeId {
        self.area
    }

    /// Pointer at viewport coordinates `(client_x, client_y)`.
    pub fn pointer_move<H: Host + ?Sized>(&mut self, host: &H, client_x: f64, client_y: f64) {
        let rect = host.client_rect(self.area);
        self.target = (client_x - rect.left, client_y - rect.top);
    }

    pub fn pointer_leave(&mut self) {
        self.target = self.center;
    }

    /// Advance one frame and write the interpolated position.
    pub fn tick(&mut self, out: &mut Outputs) {
        let (cx, cy) = self.current;
        let (tx, ty) = self.target;
        self.current = (cx + (tx - cx) * self.easing, cy + (ty - cy) * self.easing);
        out.set_property(self.mask, MOUSE_X, format!("{}px", self.current.0));
        out.set_property(self.mask, MOUSE_Y, format!("{}px", self.current.1));
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.current
    }

    #[inline]
    pub fn target(&self) -> (f64, f64) {
        self.target
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerFollower {
    dot: Option<NodeId>,
    ring: Option<NodeId>,
    dot_duration: f64,
    ring_duration: f64,
}

impl PointerFollower {
    pub fn new(dot: Option<NodeId>, ring: Option<NodeId>, config: &CursorConfig) -> Self {
        Self {
            dot,
            ring,
            dot_duration: config.dot_duration,
            ring_duration: config.ring_duration,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.dot.is_none() && self.ring.is_none()
    }

    pub fn pointer_move(&self, client_x: f64, client_y: f64, out: &mut Outputs) {
        for (node, duration) in [(self.dot, self.dot_duration), (self.ring, self.ring_duration)] {
            if let Some(node) = node {
                let tween = MotionProfile::chase(client_x, client_y, duration).tween(vec![node], 0.0);
                out.push_command(TimelineCommand::Tween { tween });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Viewport};

    struct Area;

    impl Host for Area {
        fn query(&self, _: Option<NodeId>, _: &str) -> Option<NodeId> {
            None
        }
        fn query_all(&self, _: Option<NodeId>, _: &str) -> Vec<NodeId> {
            Vec::new()
        }
        fn closest(&self, _: NodeId, _: &str) -> Option<NodeId> {
            None
        }
        fn children(&self, _: NodeId) -> Vec<NodeId> {
            Vec::new()
        }
        fn attribute(&self, _: NodeId, _: &str) -> Option<String> {
            None
        }
        fn has_class(&self, _: NodeId, _: &str) -> bool {
            false
        }
        fn rect(&self, _: NodeId) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 200.0)
        }
        fn client_rect(&self, _: NodeId) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 200.0)
        }
        fn scroll_width(&self, _: NodeId) -> f64 {
            400.0
        }
        fn viewport(&self) -> Viewport {
            Viewport::default()
        }
        fn clone_append(&mut self, _: NodeId, _: NodeId) -> Option<NodeId> {
            None
        }
        fn append_element(&mut self, _: NodeId, _: &str) -> Option<NodeId> {
            None
        }
    }

    #[test]
    fn one_frame_moves_a_tenth_of_the_way() {
        let mut spot = Spotlight::new(&Area, NodeId(1), NodeId(2), 0.1);
        assert_eq!(spot.position(), (200.0, 100.0));
        spot.pointer_move(&Area, 300.0, 150.0);
        let mut out = Outputs::default();
        spot.tick(&mut out);
        let (x, y) = spot.position();
        assert!((x - 210.0).abs() < 1e-9);
        assert!((y - 105.0).abs() < 1e-9);
        assert_eq!(out.writes.len(), 2);
    }

    #[test]
    fn leave_returns_to_center() {
        let mut spot = Spotlight::new(&Area, NodeId(1), NodeId(2), 0.1);
        spot.pointer_move(&Area, 10.0, 10.0);
        spot.pointer_leave();
        assert_eq!(spot.target(), (200.0, 100.0));
    }

    #[test]
    fn follower_tweens_dot_and_ring() {
        let follower = PointerFollower::new(Some(NodeId(1)), Some(NodeId(2)), &CursorConfig::default());
        let mut out = Outputs::default();
        follower.pointer_move(40.0, 60.0, &mut out);
        let durations: Vec<f64> = out
            .commands
            .iter()
            .map(|c| match c {
                TimelineCommand::Tween { tween } => tween.duration,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(durations, vec![0.25, 0.37]);
    }
}
