#![cfg(target_arch = "wasm32")]
use js_sys::{Function, Reflect};
use scrollfx_wasm::{abi_version, ScrollFx};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// A page with nothing on it: every query misses.
fn bare_host() -> JsValue {
    let make = Function::new_no_args(
        "return {
            query: () => null,
            queryAll: () => [],
            closest: () => null,
            children: () => [],
            attribute: () => null,
            hasClass: () => false,
            rect: () => ({ left: 0, top: 0, width: 0, height: 0 }),
            clientRect: () => ({ left: 0, top: 0, width: 0, height: 0 }),
            scrollWidth: () => 0,
            viewport: () => ({ width: 1280, height: 800 }),
            cloneAppend: () => null,
            appendElement: () => null,
        };",
    );
    make.call0(&JsValue::NULL).expect("host object")
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).expect("property")
}

#[wasm_bindgen_test]
fn abi_is_one() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn missing_host_is_rejected() {
    assert!(ScrollFx::new(JsValue::UNDEFINED, JsValue::UNDEFINED, 0.0).is_err());
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    let config = serde_wasm_bindgen::to_value(&json!({ "resize_debounce_ms": "soon" })).unwrap();
    assert!(ScrollFx::new(bare_host(), config, 0.0).is_err());
}

#[wasm_bindgen_test]
fn startup_frame_is_handed_out_once() {
    let mut fx = ScrollFx::new(bare_host(), JsValue::NULL, 0.0).expect("construct");
    let frame = fx.startup().expect("startup");
    let outputs = get(&frame, "outputs");
    assert!(js_sys::Array::is_array(&get(&outputs, "scroll")));
    assert!(fx.startup().expect("second startup").is_undefined());
}

#[wasm_bindgen_test]
fn anchors_that_match_nothing_return_undefined() {
    let mut fx = ScrollFx::new(bare_host(), JsValue::NULL, 0.0).expect("construct");
    assert!(fx.on_anchor_click("#contact".into()).unwrap().is_undefined());
    let frame = fx.on_scroll(120.0).expect("scroll");
    assert!(frame.is_object());
    fx.dispose().expect("dispose");
}
