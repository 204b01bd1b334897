//! Host contract: the DOM reads and structural mutations the core needs.
//!
//! Style and class changes are not made through the host; they are emitted as
//! [`StyleWrite`](crate::outputs::StyleWrite)s so adapters can batch them and
//! tests can assert on them. Only mutations whose result must be measured
//! immediately (cloning a ticker row, appending filler balls) go through here.

use crate::geometry::{Rect, Viewport};
use crate::ids::NodeId;

pub trait Host {
    /// First match for `selector` under `scope` (document when `None`).
    fn query(&self, scope: Option<NodeId>, selector: &str) -> Option<NodeId>;

    /// All matches for `selector` under `scope`, in document order.
    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Vec<NodeId>;

    /// Nearest ancestor-or-self of `node` matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Layout box in document (scroll content) coordinates.
    fn rect(&self, node: NodeId) -> Rect;

    /// Bounding box relative to the viewport.
    fn client_rect(&self, node: NodeId) -> Rect;

    fn scroll_width(&self, node: NodeId) -> f64;

    fn viewport(&self) -> Viewport;

    /// Deep-clone `node` and append the clone to `parent`.
    fn clone_append(&mut self, node: NodeId, parent: NodeId) -> Option<NodeId>;

    /// Create an empty `div` carrying `class` and append it to `parent`.
    fn append_element(&mut self, parent: NodeId, class: &str) -> Option<NodeId>;
}
