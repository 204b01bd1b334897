use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use scrollfx_core::{Config, Host, NodeId, Rect, TimelineId, Viewport};
use scrollfx_orchestrator::Orchestrator;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    swb::to_value(value).map_err(|e| JsError::new(&format!("outputs error: {e}")))
}

/// [`Host`] over a plain JS object. Every method is looked up by name on the
/// object and called with node ids as numbers:
///
/// `query(scope, selector)`, `queryAll(scope, selector)`, `closest(node, selector)`,
/// `children(node)`, `attribute(node, name)`, `hasClass(node, class)`,
/// `rect(node)`, `clientRect(node)`, `scrollWidth(node)`, `viewport()`,
/// `cloneAppend(node, parent)`, `appendElement(parent, class)`.
struct JsHost {
    obj: JsValue,
}

fn node_arg(node: NodeId) -> JsValue {
    JsValue::from(node.0)
}

fn scope_arg(scope: Option<NodeId>) -> JsValue {
    scope.map(node_arg).unwrap_or(JsValue::NULL)
}

fn as_node(v: &JsValue) -> Option<NodeId> {
    v.as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| NodeId(n as u32))
}

impl JsHost {
    fn call(&self, method: &str, args: &[JsValue]) -> JsValue {
        let f = match Reflect::get(&self.obj, &JsValue::from_str(method)) {
            Ok(f) => f,
            Err(err) => {
                log::warn!("host.{method} lookup failed: {err:?}");
                return JsValue::UNDEFINED;
            }
        };
        let Some(f) = f.dyn_ref::<Function>() else {
            log::warn!("host.{method} is not a function");
            return JsValue::UNDEFINED;
        };
        let args: Array = args.iter().collect();
        f.apply(&self.obj, &args).unwrap_or_else(|err| {
            log::warn!("host.{method} threw: {err:?}");
            JsValue::UNDEFINED
        })
    }

    fn nodes(&self, method: &str, args: &[JsValue]) -> Vec<NodeId> {
        match self.call(method, args).dyn_into::<Array>() {
            Ok(arr) => arr.iter().filter_map(|v| as_node(&v)).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn rect_of(&self, method: &str, node: NodeId) -> Rect {
        let v = self.call(method, &[node_arg(node)]);
        if jsvalue_is_undefined_or_null(&v) {
            return Rect::default();
        }
        swb::from_value(v).unwrap_or_else(|err| {
            log::debug!("host.{method}({node:?}) returned a malformed rect: {err}");
            Rect::default()
        })
    }
}

impl Host for JsHost {
    fn query(&self, scope: Option<NodeId>, selector: &str) -> Option<NodeId> {
        as_node(&self.call("query", &[scope_arg(scope), JsValue::from_str(selector)]))
    }

    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Vec<NodeId> {
        self.nodes("queryAll", &[scope_arg(scope), JsValue::from_str(selector)])
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        as_node(&self.call("closest", &[node_arg(node), JsValue::from_str(selector)]))
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes("children", &[node_arg(node)])
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.call("attribute", &[node_arg(node), JsValue::from_str(name)])
            .as_string()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.call("hasClass", &[node_arg(node), JsValue::from_str(class)])
            .as_bool()
            .unwrap_or(false)
    }

    fn rect(&self, node: NodeId) -> Rect {
        self.rect_of("rect", node)
    }

    fn client_rect(&self, node: NodeId) -> Rect {
        self.rect_of("clientRect", node)
    }

    fn scroll_width(&self, node: NodeId) -> f64 {
        self.call("scrollWidth", &[node_arg(node)])
            .as_f64()
            .unwrap_or(0.0)
    }

    fn viewport(&self) -> Viewport {
        swb::from_value(self.call("viewport", &[])).unwrap_or_default()
    }

    fn clone_append(&mut self, node: NodeId, parent: NodeId) -> Option<NodeId> {
        as_node(&self.call("cloneAppend", &[node_arg(node), node_arg(parent)]))
    }

    fn append_element(&mut self, parent: NodeId, class: &str) -> Option<NodeId> {
        as_node(&self.call("appendElement", &[node_arg(parent), JsValue::from_str(class)]))
    }
}

#[wasm_bindgen]
pub struct ScrollFx {
    host: JsHost,
    core: Orchestrator,
    startup: Option<scrollfx_orchestrator::Frame>,
}

#[wasm_bindgen]
impl ScrollFx {
    /// Wire the page behind `host`. `config` is a partial JSON object or
    /// undefined/null for defaults; `now` is `performance.now()`.
    /// Example:
    ///   const fx = new ScrollFx(host, { resize_debounce_ms: 250 }, performance.now())
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsValue, config: JsValue, now: f64) -> Result<ScrollFx, JsError> {
        #[cfg(feature = "console_error")]
        console_error_panic_hook::set_once();

        if jsvalue_is_undefined_or_null(&host) {
            return Err(JsError::new("host object is required"));
        }
        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let mut host = JsHost { obj: host };
        let (core, frame) = Orchestrator::initialize(&mut host, cfg, now)
            .map_err(|e| JsError::new(&format!("{e:#}")))?;
        Ok(ScrollFx {
            host,
            core,
            startup: Some(frame),
        })
    }

    /// Outputs produced while wiring the page. Returns undefined after the
    /// first call.
    #[wasm_bindgen]
    pub fn startup(&mut self) -> Result<JsValue, JsError> {
        match self.startup.take() {
            Some(frame) => to_js(&frame),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen]
    pub fn on_scroll(&mut self, offset: f64) -> Result<JsValue, JsError> {
        to_js(&self.core.on_scroll(&self.host, offset))
    }

    #[wasm_bindgen]
    pub fn on_resize(&mut self, now: f64) -> Result<JsValue, JsError> {
        to_js(&self.core.on_resize(now))
    }

    /// The scroll container changed size (ResizeObserver).
    #[wasm_bindgen]
    pub fn on_content_resize(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.core.on_content_resize(&self.host))
    }

    /// Call once per animation frame.
    #[wasm_bindgen]
    pub fn on_frame(&mut self, now: f64) -> Result<JsValue, JsError> {
        to_js(&self.core.on_frame(&mut self.host, now))
    }

    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<JsValue, JsError> {
        to_js(&self.core.on_pointer_move(client_x, client_y))
    }

    #[wasm_bindgen]
    pub fn on_spotlight_move(&mut self, client_x: f64, client_y: f64) -> Result<JsValue, JsError> {
        to_js(&self.core.on_spotlight_move(&self.host, client_x, client_y))
    }

    #[wasm_bindgen]
    pub fn on_spotlight_leave(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.core.on_spotlight_leave())
    }

    /// Report that the animation engine finished timeline `id`.
    #[wasm_bindgen]
    pub fn on_timeline_complete(&mut self, id: u32) -> Result<JsValue, JsError> {
        to_js(&self.core.on_timeline_complete(&self.host, TimelineId(id)))
    }

    /// Returns undefined when `hash` matches nothing, so the caller can let
    /// the browser handle the click.
    #[wasm_bindgen]
    pub fn on_anchor_click(&mut self, hash: String) -> Result<JsValue, JsError> {
        match self.core.on_anchor_click(&self.host, &hash) {
            Some(frame) => to_js(&frame),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen]
    pub fn on_load_hash(&mut self, hash: String, now: f64) -> Result<JsValue, JsError> {
        to_js(&self.core.on_load_hash(&self.host, &hash, now))
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.core.dispose())
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
