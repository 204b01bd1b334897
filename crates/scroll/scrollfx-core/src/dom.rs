//! In-memory [`Host`] for headless runs and tests.
//!
//! A page is described as a nested JSON tree (tag, `class` string, attributes,
//! document-relative rect, optional scroll width). Selectors support tag,
//! `#id`, `.class` compounds joined by descendant (` `) and child (`>`)
//! combinators, plus `,` groups.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};
use crate::host::Host;
use crate::ids::NodeId;
use crate::outputs::{Outputs, StyleWrite};

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Space-separated class list.
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub scroll_width: Option<f64>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub viewport: Viewport,
    pub root: NodeSpec,
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    rect: Rect,
    scroll_width: Option<f64>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    props: HashMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    viewport: Viewport,
    scroll_y: f64,
}

impl MemoryDom {
    pub fn new(page: &PageSpec) -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            viewport: page.viewport,
            scroll_y: 0.0,
        };
        dom.insert(&page.root, None);
        dom
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let page: PageSpec = serde_json::from_str(json)?;
        Ok(Self::new(&page))
    }

    fn insert(&mut self, spec: &NodeSpec, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            id: spec.id.clone(),
            classes: spec.class.split_whitespace().map(str::to_string).collect(),
            attrs: spec.attrs.clone(),
            rect: spec.rect,
            scroll_width: spec.scroll_width,
            parent,
            children: Vec::new(),
            props: HashMap::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0 as usize].children.push(id);
        }
        for child in &spec.children {
            self.insert(child, Some(id));
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Native scroll offset used for client rects.
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(node.0 as usize) {
            n.rect = rect;
        }
    }

    pub fn set_scroll_width(&mut self, node: NodeId, width: f64) {
        if let Some(n) = self.nodes.get_mut(node.0 as usize) {
            n.scroll_width = Some(width);
        }
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    pub fn property(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .and_then(|n| n.props.get(name))
            .map(String::as_str)
    }

    /// Apply class and property writes. Timeline and scroll commands are left
    /// to an engine.
    pub fn apply(&mut self, outputs: &Outputs) {
        for write in &outputs.writes {
            match write {
                StyleWrite::AddClass { node, class } => {
                    if let Some(n) = self.nodes.get_mut(node.0 as usize) {
                        if !n.classes.iter().any(|c| c == class) {
                            n.classes.push(class.clone());
                        }
                    }
                }
                StyleWrite::RemoveClass { node, class } => {
                    if let Some(n) = self.nodes.get_mut(node.0 as usize) {
                        n.classes.retain(|c| c != class);
                    }
                }
                StyleWrite::SetProperty { node, name, value } => {
                    if let Some(n) = self.nodes.get_mut(node.0 as usize) {
                        n.props.insert(name.clone(), value.clone());
                    }
                }
            }
        }
    }

    fn descendants(&self, scope: NodeId, include_self: bool, acc: &mut Vec<NodeId>) {
        if include_self {
            acc.push(scope);
        }
        if let Some(n) = self.node(scope) {
            for &child in &n.children {
                self.descendants(child, true, acc);
            }
        }
    }

    fn candidates(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        let mut acc = Vec::new();
        if self.nodes.is_empty() {
            return acc;
        }
        match scope {
            Some(s) => self.descendants(s, false, &mut acc),
            None => self.descendants(self.root(), true, &mut acc),
        }
        acc
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .filter_map(|group| Selector::parse(group.trim()))
            .any(|sel| self.matches_from(node, &sel.parts, sel.parts.len() - 1))
    }

    fn matches_from(&self, node: NodeId, parts: &[(Combinator, Compound)], idx: usize) -> bool {
        let (combinator, compound) = &parts[idx];
        if !self.matches_compound(node, compound) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        let mut parent = self.node(node).and_then(|n| n.parent);
        match combinator {
            Combinator::Child => parent.is_some_and(|p| self.matches_from(p, parts, idx - 1)),
            Combinator::Descendant => {
                while let Some(p) = parent {
                    if self.matches_from(p, parts, idx - 1) {
                        return true;
                    }
                    parent = self.node(p).and_then(|n| n.parent);
                }
                false
            }
        }
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let Some(n) = self.node(node) else {
            return false;
        };
        if let Some(tag) = &compound.tag {
            if tag != "*" && *tag != n.tag {
                return false;
            }
        }
        if let Some(id) = &compound.id {
            if n.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        compound
            .classes
            .iter()
            .all(|c| n.classes.iter().any(|have| have == c))
    }

    fn clone_subtree(&mut self, node: NodeId, parent: NodeId, dx: f64) -> NodeId {
        let Some(src) = self.node(node).cloned() else {
            return node;
        };
        let id = NodeId(self.nodes.len() as u32);
        let mut rect = src.rect;
        rect.left += dx;
        self.nodes.push(Node {
            rect,
            parent: Some(parent),
            children: Vec::new(),
            ..src.clone()
        });
        self.nodes[parent.0 as usize].children.push(id);
        for child in src.children {
            self.clone_subtree(child, id, dx);
        }
        id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(token: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = token;
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];
        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                b'.' => compound.classes.push(name.to_string()),
                b'#' => compound.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }
        Some(compound)
    }
}

#[derive(Clone, Debug)]
struct Selector {
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    fn parse(group: &str) -> Option<Self> {
        let spaced = group.replace('>', " > ");
        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;
        for token in spaced.split_whitespace() {
            if token == ">" {
                combinator = Combinator::Child;
                continue;
            }
            parts.push((combinator, Compound::parse(token)?));
            combinator = Combinator::Descendant;
        }
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts })
        }
    }
}

impl Host for MemoryDom {
    fn query(&self, scope: Option<NodeId>, selector: &str) -> Option<NodeId> {
        self.candidates(scope)
            .into_iter()
            .find(|&n| self.matches(n, selector))
    }

    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Vec<NodeId> {
        self.candidates(scope)
            .into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if self.matches(n, selector) {
                return Some(n);
            }
            cur = self.node(n).and_then(|n| n.parent);
        }
        None
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|n| n.attrs.get(name).cloned())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn rect(&self, node: NodeId) -> Rect {
        self.node(node).map(|n| n.rect).unwrap_or_default()
    }

    fn client_rect(&self, node: NodeId) -> Rect {
        let mut rect = self.rect(node);
        rect.top -= self.scroll_y;
        rect
    }

    fn scroll_width(&self, node: NodeId) -> f64 {
        let Some(n) = self.node(node) else {
            return 0.0;
        };
        if let Some(w) = n.scroll_width {
            return w;
        }
        n.children
            .iter()
            .map(|&c| self.rect(c).right() - n.rect.left)
            .fold(n.rect.width, f64::max)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clone_append(&mut self, node: NodeId, parent: NodeId) -> Option<NodeId> {
        if self.node(node).is_none() || self.node(parent).is_none() {
            return None;
        }
        let dx = self.rect(node).width;
        Some(self.clone_subtree(node, parent, dx))
    }

    fn append_element(&mut self, parent: NodeId, class: &str) -> Option<NodeId> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: "div".to_string(),
            id: None,
            classes: class.split_whitespace().map(str::to_string).collect(),
            attrs: HashMap::new(),
            rect: Rect::default(),
            scroll_width: None,
            parent: Some(parent),
            children: Vec::new(),
            props: HashMap::new(),
        });
        self.nodes[parent.0 as usize].children.push(id);
        Some(id)
    }
}
