//! Browser side: `web-sys` adapters for the capability traits plus the wiring
//! that hooks every effect onto listeners, timers, observers and animation
//! frames.
//!
//! Each effect starts independently. Only the background canvas is treated as
//! a hard requirement; the rest log and carry on when their markup is absent.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AudioContext, CanvasRenderingContext2d, Document, Event, EventTarget, HtmlElement,
    OscillatorType, Storage, Window,
};

use crate::config::SiteConfig;
use crate::error::{SiteError, describe_js};
use crate::surface::{Element, SessionStore, Surface, ToneSynth, ToneVoice, Waveform};

mod background;
mod effects;
mod intro;
pub(crate) mod nav;

const CONFIG_ID: &str = "site-config";

// --- Entry --------------------------------------------------------------------

/// Start every effect once the document is parsed.
pub(crate) fn start() -> Result<(), SiteError> {
    let win = window()?;
    let doc = win.document().ok_or(SiteError::NoDocument)?;
    if doc.ready_state() == "loading" {
        log::debug!("document still loading; deferring start");
        listen(&doc, "DOMContentLoaded", move |_evt| {
            if let Err(e) = start_all() {
                log::error!("site start failed: {e}");
            }
        })?;
        return Ok(());
    }
    start_all()
}

fn start_all() -> Result<(), SiteError> {
    let win = window()?;
    let doc = win.document().ok_or(SiteError::NoDocument)?;
    let config = load_config(&doc);

    report("intro", intro::start(&win, &doc, &config.intro));
    report("scroll reveal", effects::start_scroll_reveal(&doc, &config.reveal));
    report("stat counters", effects::start_counters(&doc, &config.reveal));
    report("skill bars", effects::start_skill_bars(&doc, &config.reveal));
    report("typing tagline", effects::start_typing(&doc, &config.typing));
    report("navigation", nav::start(&win, &doc, &config.nav));

    background::start(&win, &doc, &config.grid)?;
    log::info!("site effects started");
    Ok(())
}

fn report(component: &str, result: Result<(), SiteError>) {
    if let Err(e) = result {
        log::error!("{component} failed to start: {e}");
    }
}

fn load_config(doc: &Document) -> SiteConfig {
    #[cfg(feature = "serde_json")]
    {
        if let Some(text) = doc.get_element_by_id(CONFIG_ID).and_then(|el| el.text_content()) {
            match SiteConfig::from_json(&text) {
                Ok(config) => return config,
                Err(e) => log::warn!("ignoring #{CONFIG_ID}: {e}"),
            }
        }
    }
    #[cfg(not(feature = "serde_json"))]
    {
        if doc.get_element_by_id(CONFIG_ID).is_some() {
            log::warn!("#{CONFIG_ID} present but JSON config support is disabled");
        }
    }
    SiteConfig::default()
}

// --- Lookup & event helpers ----------------------------------------------------

pub(crate) fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub(crate) fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::NoDocument)
}

fn as_dom(el: web_sys::Element) -> Option<DomElement> {
    el.dyn_into::<HtmlElement>().ok().map(DomElement)
}

pub(crate) fn by_id(doc: &Document, id: &str) -> Option<DomElement> {
    doc.get_element_by_id(id).and_then(as_dom)
}

pub(crate) fn query(doc: &Document, selector: &str) -> Option<DomElement> {
    doc.query_selector(selector).ok().flatten().and_then(as_dom)
}

pub(crate) fn query_all(doc: &Document, selector: &str) -> Vec<DomElement> {
    let Ok(list) = doc.query_selector_all(selector) else {
        log::warn!("bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(DomElement)
        .collect()
}

/// Attach a listener for the lifetime of the page.
pub(crate) fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SiteError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `task` once after `delay_ms`.
pub(crate) fn set_timeout(delay_ms: u32, task: impl FnOnce() + 'static) -> Result<i32, SiteError> {
    let callback = Closure::once(task);
    let handle = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        delay_ms as i32,
    )?;
    callback.forget();
    Ok(handle)
}

pub(crate) fn viewport_size(win: &Window) -> (f64, f64) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (read(win.inner_width()), read(win.inner_height()))
}

// --- Adapters --------------------------------------------------------------------

/// `Element` over a live `HtmlElement`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DomElement(pub HtmlElement);

impl Element for DomElement {
    fn add_class(&self, class: &str) {
        self.0.class_list().add_1(class).ok();
    }
    fn remove_class(&self, class: &str) {
        self.0.class_list().remove_1(class).ok();
    }
    fn toggle_class(&self, class: &str) -> bool {
        self.0.class_list().toggle(class).unwrap_or(false)
    }
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }
    fn style(&self, property: &str) -> String {
        self.0.style().get_property_value(property).unwrap_or_default()
    }
    fn set_style(&self, property: &str, value: &str) {
        self.0.style().set_property(property, value).ok();
    }
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
    fn offset_top(&self) -> f64 {
        self.0.offset_top() as f64
    }
    fn offset_height(&self) -> f64 {
        self.0.offset_height() as f64
    }
}

/// `Surface` over a 2D canvas context.
pub(crate) struct CanvasSurface(pub CanvasRenderingContext2d);

impl Surface for CanvasSurface {
    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.0.clear_rect(x, y, width, height);
    }
    fn set_fill_style(&self, css_color: &str) {
        self.0.set_fill_style_str(css_color);
    }
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.0.fill_rect(x, y, width, height);
    }
}

/// `SessionStore` over `window.sessionStorage`. Storage can be missing
/// (privacy modes, sandboxed frames); reads then see nothing and writes fail.
pub(crate) struct BrowserSession {
    storage: Option<Storage>,
}

impl BrowserSession {
    pub(crate) fn open(win: &Window) -> Self {
        let storage = match win.session_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("session storage unavailable: {}", describe_js(&e));
                None
            }
        };
        Self { storage }
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| SiteError::Storage("no sessionStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| SiteError::Storage(describe_js(&e)))
    }
}

/// `ToneSynth` on the Web Audio API. A fresh context per call; the intro only
/// plays once.
pub(crate) struct WebAudioSynth;

impl ToneSynth for WebAudioSynth {
    fn play(&self, voices: &[ToneVoice]) -> Result<(), SiteError> {
        let audio_err = |e: JsValue| SiteError::Audio(describe_js(&e));
        let ctx = AudioContext::new().map_err(audio_err)?;
        let t = ctx.current_time();
        for voice in voices {
            play_voice(&ctx, voice, t).map_err(audio_err)?;
        }
        Ok(())
    }
}

fn play_voice(ctx: &AudioContext, voice: &ToneVoice, t: f64) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(match voice.waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Triangle => OscillatorType::Triangle,
    });
    let freq = osc.frequency();
    freq.set_value_at_time(voice.start_hz as f32, t)?;
    freq.exponential_ramp_to_value_at_time(voice.end_hz as f32, t + voice.sweep_secs)?;
    let amp = gain.gain();
    amp.set_value_at_time(voice.start_gain, t)?;
    amp.exponential_ramp_to_value_at_time(voice.end_gain, t + voice.decay_secs)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start_with_when(t)?;
    osc.stop_with_when(t + voice.stop_secs)?;
    Ok(())
}

/// Seed for the grid's noise offsets.
pub(crate) fn noise_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => return u64::from_le_bytes(buf),
            Err(e) => log::warn!("browser rng unavailable, seeding from clock: {e}"),
        }
    }
    js_sys::Date::now().to_bits()
}
