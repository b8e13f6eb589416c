//! Capability interfaces the effects talk to instead of `web-sys` directly.
//!
//! The browser adapters live in `crate::web`; tests provide in-memory fakes.
//! Methods take `&self` because DOM handles are shared references into the
//! page, not owned values.

use crate::SiteError;

/// A page element as seen by the effects: class list, inline style, text and
/// layout geometry.
pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flip `class`, returning whether it is present afterwards.
    fn toggle_class(&self, class: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
    /// Inline style property value, empty when unset.
    fn style(&self, property: &str) -> String;
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;
}

/// Minimal 2D drawing target for the background grid.
pub trait Surface {
    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&self, css_color: &str);
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
}

/// Session-scoped string storage (cleared when the browsing session ends).
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError>;
}

/// Oscillator waveform for a synthesized voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One oscillator with exponential frequency and amplitude decay. Times are
/// seconds from the moment playback starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneVoice {
    pub waveform: Waveform,
    pub start_hz: f64,
    pub end_hz: f64,
    pub sweep_secs: f64,
    pub start_gain: f32,
    pub end_gain: f32,
    pub decay_secs: f64,
    pub stop_secs: f64,
}

/// Something that can play a set of voices at once. Failure means the
/// platform refused (autoplay policy, missing API); callers decide whether
/// that matters.
pub trait ToneSynth {
    fn play(&self, voices: &[ToneVoice]) -> Result<(), SiteError>;
}
