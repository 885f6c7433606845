#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{window, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn mount_creates_canvas_and_audio() {
    birthday_bash::start_celebration().expect("mount");
    let doc = window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = doc.get_element_by_id("bb-particles").expect("canvas").dyn_into().unwrap();
    assert!(canvas.width() > 0 && canvas.height() > 0);
    let audio = doc.query_selector("audio").unwrap().expect("audio element");
    assert!(audio.has_attribute("loop") || audio.dyn_ref::<web_sys::HtmlMediaElement>().is_some_and(|a| a.loop_()));

    // second mount is a logged no-op
    birthday_bash::start_celebration().expect("remount");
    assert_eq!(doc.query_selector_all("#bb-particles").unwrap().length(), 1);
}
