// Browser tests for the web-sys adapters. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn make(tag: &str, id: &str) -> HtmlElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let el: HtmlElement = doc.create_element(tag).unwrap().dyn_into().unwrap();
    el.set_id(id);
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn abstract_toggle_flips_display_and_label() {
    let abs = make("div", "abstract-test");
    let button = make("button", "abstract-test-button");

    assert!(folio_motion::toggle_abstract("abstract-test", Some(button.clone())).unwrap());
    assert_eq!(abs.style().get_property_value("display").unwrap(), "block");
    assert_eq!(button.text_content().as_deref(), Some("Hide Abstract"));

    assert!(!folio_motion::toggle_abstract("abstract-test", Some(button.clone())).unwrap());
    assert_eq!(abs.style().get_property_value("display").unwrap(), "none");
    assert_eq!(button.text_content().as_deref(), Some("Show Abstract"));
}

#[wasm_bindgen_test]
fn abstract_toggle_reports_missing_target() {
    assert!(folio_motion::toggle_abstract("no-such-abstract", None).is_err());
}

#[wasm_bindgen_test]
fn start_without_canvas_is_an_error() {
    assert!(web_sys::window().unwrap().document().unwrap().get_element_by_id("bg-canvas").is_none());
    assert!(folio_motion::start_site().is_err());
}

#[wasm_bindgen_test]
async fn counters_and_skill_bars_run_from_markup() {
    let bar = make("div", "skill-test");
    bar.set_class_name("progress");
    bar.set_attribute("style", "display: block; height: 12px; width: 85%").unwrap();

    let stats = make("div", "stats-test");
    stats.set_class_name("stats-grid");
    stats.set_attribute("style", "display: block; height: 40px").unwrap();
    let number = make("span", "stat-test");
    number.set_class_name("stat-number");
    number.set_attribute("data-target", "250").unwrap();
    stats.append_child(&number).unwrap();

    // No #bg-canvas, so start reports an error after wiring everything else.
    assert!(folio_motion::start_site().is_err());
    assert_eq!(bar.style().get_property_value("--target-width").unwrap(), "85%");
    assert_eq!(bar.style().get_property_value("width").unwrap(), "0px");
    assert!(!bar.class_list().contains("animate"));

    sleep(600).await;
    assert!(bar.class_list().contains("animate"));

    sleep(2600).await;
    assert_eq!(number.text_content().as_deref(), Some("250"));
    // interval cleared: the text stays put
    sleep(200).await;
    assert_eq!(number.text_content().as_deref(), Some("250"));
}
