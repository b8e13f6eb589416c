//! Tunable constants for every effect, grouped per component.
//!
//! Defaults reproduce the shipped site. With the `serde_json` feature the page
//! may override any subset through a `<script id="site-config">` JSON block;
//! omitted fields keep their defaults.

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct SiteConfig {
    pub grid: GridConfig,
    pub reveal: RevealConfig,
    pub typing: TypingConfig,
    pub intro: IntroConfig,
    pub nav: NavConfig,
}

#[cfg(feature = "serde_json")]
impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self, crate::SiteError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Background lattice parameters (units are CSS pixels).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct GridConfig {
    pub spacing: f64,
    pub phase_step: f64,
    /// Radians of oscillation per pixel of distance from the viewport center.
    pub wave_frequency: f64,
    pub breathing_amplitude: f64,
    pub interaction_radius: f64,
    pub repel_strength: f64,
    /// Displacement length at full force, before `repel_strength` scaling.
    pub repel_reach: f64,
    pub dot_size: f64,
    pub dot_color: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 50.0,
            phase_step: 0.02,
            wave_frequency: 0.005,
            breathing_amplitude: 10.0,
            interaction_radius: 300.0,
            repel_strength: 0.8,
            repel_reach: 75.0,
            dot_size: 1.5,
            dot_color: "rgba(255, 255, 255, 0.15)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct RevealConfig {
    pub scroll_threshold: f64,
    /// Stats section observer threshold; 0 fires as soon as any pixel shows.
    pub counter_threshold: f64,
    pub counter_duration_ms: u32,
    pub counter_step_ms: u32,
    pub skill_threshold: f64,
    pub skill_delay_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 0.1,
            counter_threshold: 0.0,
            counter_duration_ms: 2000,
            counter_step_ms: 20,
            skill_threshold: 0.5,
            skill_delay_ms: 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct TypingConfig {
    pub words: Vec<String>,
    pub start_delay_ms: u32,
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Pause once a word is fully typed.
    pub hold_ms: u32,
    /// Pause once a word is fully deleted.
    pub next_word_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            words: ["ship faster", "build better", "deliver results"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            start_delay_ms: 1500,
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            next_word_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct IntroConfig {
    pub storage_key: String,
    pub display_ms: u32,
    pub fade_ms: u32,
    /// Delay from fade start until the overlay leaves the render tree.
    pub cleanup_ms: u32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            storage_key: "introShown".to_string(),
            display_ms: 2500,
            fade_ms: 500,
            cleanup_ms: 3000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct NavConfig {
    pub back_to_top_after: f64,
    pub section_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            back_to_top_after: 500.0,
            section_offset: 150.0,
        }
    }
}
