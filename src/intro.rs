//! Once-per-session intro: a synthesized "thud + hit", a hold on the overlay,
//! a fade, then the overlay is dropped. Repeat visits skip straight to content.

use crate::config::IntroConfig;
use crate::schedule::Timeline;
use crate::surface::{Element, SessionStore, ToneSynth, ToneVoice, Waveform};

pub const FADE_CLASS: &str = "fade-out";
pub const CONTENT_VISIBLE_CLASS: &str = "visible";
pub const BODY_LOADED_CLASS: &str = "loaded";

/// Low sine boom followed by a brighter triangle hit, both decaying fast.
pub const INTRO_VOICES: [ToneVoice; 2] = [
    ToneVoice {
        waveform: Waveform::Sine,
        start_hz: 60.0,
        end_hz: 10.0,
        sweep_secs: 0.5,
        start_gain: 1.0,
        end_gain: 0.01,
        decay_secs: 0.5,
        stop_secs: 0.6,
    },
    ToneVoice {
        waveform: Waveform::Triangle,
        start_hz: 120.0,
        end_hz: 30.0,
        sweep_secs: 0.3,
        start_gain: 0.5,
        end_gain: 0.01,
        decay_secs: 0.4,
        stop_secs: 0.4,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    NotShown,
    AlreadyShown,
    Playing,
    FadingOut,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroAction {
    BeginFade,
    RevealContent,
    RemoveOverlay,
}

/// Page parts the intro touches; any may be absent from the markup.
pub struct IntroElements<'a> {
    pub overlay: Option<&'a dyn Element>,
    pub wrapper: Option<&'a dyn Element>,
    pub body: Option<&'a dyn Element>,
}

pub struct IntroController {
    phase: IntroPhase,
    config: IntroConfig,
}

impl IntroController {
    /// Read the session flag once; it alone decides which path runs.
    pub fn new(config: IntroConfig, store: &dyn SessionStore) -> Self {
        let phase = match store.get(&config.storage_key) {
            Some(_) => IntroPhase::AlreadyShown,
            None => IntroPhase::NotShown,
        };
        Self { phase, config }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Start the sequence and return the actions to run, keyed by delay.
    ///
    /// On the first visit this marks the session and tries to play the intro
    /// sound; a refused or missing audio device is logged and otherwise
    /// ignored. Calling `begin` again after it has started yields an empty
    /// timeline.
    pub fn begin(&mut self, store: &mut dyn SessionStore, synth: &dyn ToneSynth) -> Timeline<IntroAction> {
        let mut plan = Timeline::new();
        match self.phase {
            IntroPhase::AlreadyShown => {
                plan.push(0, IntroAction::RemoveOverlay);
                plan.push(0, IntroAction::RevealContent);
            }
            IntroPhase::NotShown => {
                if let Err(e) = store.set(&self.config.storage_key, "true") {
                    log::warn!("could not persist intro flag: {e}");
                }
                self.phase = IntroPhase::Playing;
                if let Err(e) = synth.play(&INTRO_VOICES) {
                    log::warn!("Audio not supported or blocked: {e}");
                }
                let fade_at = self.config.display_ms;
                plan.push(fade_at, IntroAction::BeginFade);
                plan.push(fade_at + self.config.fade_ms, IntroAction::RevealContent);
                plan.push(fade_at + self.config.cleanup_ms, IntroAction::RemoveOverlay);
            }
            IntroPhase::Playing | IntroPhase::FadingOut | IntroPhase::Hidden => {}
        }
        plan
    }

    pub fn apply(&mut self, action: IntroAction, page: &IntroElements<'_>) {
        match action {
            IntroAction::BeginFade => {
                if let Some(overlay) = page.overlay {
                    overlay.add_class(FADE_CLASS);
                }
                self.phase = IntroPhase::FadingOut;
            }
            IntroAction::RevealContent => {
                if let Some(wrapper) = page.wrapper {
                    wrapper.add_class(CONTENT_VISIBLE_CLASS);
                    if let Some(body) = page.body {
                        body.add_class(BODY_LOADED_CLASS);
                    }
                }
            }
            IntroAction::RemoveOverlay => {
                if let Some(overlay) = page.overlay {
                    overlay.set_style("display", "none");
                }
                self.phase = IntroPhase::Hidden;
            }
        }
    }
}
