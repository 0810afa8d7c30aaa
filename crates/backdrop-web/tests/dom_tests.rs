// Browser tests for canvas layering; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use backdrop_web::dom::{window_document, Layers};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn container(document: &web::Document) -> web::HtmlElement {
    let el: web::HtmlElement = document
        .create_element("div")
        .unwrap()
        .dyn_into()
        .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn create_appends_both_canvases_and_styles_container() {
    let (_, document) = window_document().unwrap();
    let el = container(&document);
    let layers = Layers::create(&document, &el).unwrap();

    assert_eq!(el.child_element_count(), 2);
    assert_eq!(el.first_element_child().unwrap().class_name(), "backdrop-warp");
    assert_eq!(el.last_element_child().unwrap().class_name(), "backdrop-particles");
    let style = el.style();
    assert_eq!(style.get_property_value("position").unwrap(), "relative");
    assert_eq!(style.get_property_value("touch-action").unwrap(), "none");

    layers.detach();
    el.remove();
}

#[wasm_bindgen_test]
fn detach_leaves_container_as_found() {
    let (_, document) = window_document().unwrap();
    let el = container(&document);
    el.style().set_property("position", "absolute").unwrap();

    let layers = Layers::create(&document, &el).unwrap();
    assert_eq!(el.style().get_property_value("position").unwrap(), "absolute");
    layers.detach();

    assert_eq!(el.child_element_count(), 0);
    assert_eq!(el.style().get_property_value("position").unwrap(), "absolute");
    assert_eq!(el.style().get_property_value("touch-action").unwrap(), "");
    el.remove();
}

#[wasm_bindgen_test]
fn repeated_detach_is_harmless() {
    // create() also detaches canvases that were never appended
    let (_, document) = window_document().unwrap();
    let el = container(&document);
    let layers = Layers::create(&document, &el).unwrap();
    layers.detach();
    layers.detach();
    assert_eq!(el.child_element_count(), 0);
    assert_eq!(el.style().get_property_value("position").unwrap(), "");
    el.remove();
}
