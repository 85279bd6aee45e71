//! Game settings
//!
//! The grid is always `GRID_ROWS x GRID_COLS`; everything else has a default
//! that can be overridden. On the web an optional JSON override is read from
//! LocalStorage (never written back).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::rgb;
use crate::sim::Board;

/// Animation and turn timings, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub fade_ms: u64,
    pub pulse_ms: u64,
    pub pulse_grace_ms: u64,
    /// Peak extra scale of the match pulse
    pub pulse_amplitude: f32,
    pub mismatch_delay_ms: u64,
    pub final_reveal_delay_ms: u64,
}

impl Timings {
    /// Reject durations above `MAX_TIMING_MS` and a non-finite or
    /// out-of-range pulse amplitude
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("fade_ms", self.fade_ms),
            ("pulse_ms", self.pulse_ms),
            ("pulse_grace_ms", self.pulse_grace_ms),
            ("mismatch_delay_ms", self.mismatch_delay_ms),
            ("final_reveal_delay_ms", self.final_reveal_delay_ms),
        ];
        for (name, value) in durations {
            if value > MAX_TIMING_MS {
                return Err(ConfigError::TimingOutOfRange {
                    name,
                    value: value.to_string(),
                    expected: "at most 60000ms",
                });
            }
        }

        let amplitude = self.pulse_amplitude;
        if !amplitude.is_finite() || amplitude <= 0.0 || amplitude > 1.0 {
            return Err(ConfigError::TimingOutOfRange {
                name: "pulse_amplitude",
                value: amplitude.to_string(),
                expected: "a number in (0, 1]",
            });
        }
        Ok(())
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            fade_ms: FADE_MS,
            pulse_ms: PULSE_MS,
            pulse_grace_ms: PULSE_GRACE_MS,
            pulse_amplitude: PULSE_AMPLITUDE,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            final_reveal_delay_ms: FINAL_REVEAL_DELAY_MS,
        }
    }
}

/// Screen geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
    pub padding: f32,
    pub corner_radius: f32,
    pub border_thickness: f32,
    pub image_fill: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            header_height: HEADER_HEIGHT,
            padding: TILE_PADDING,
            corner_radius: CORNER_RADIUS,
            border_thickness: BORDER_THICKNESS,
            image_fill: IMAGE_FILL,
        }
    }
}

/// Colors (RGBA, 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: [f32; 4],
    pub empty_tile: [f32; 4],
    pub glyph: [f32; 4],
    pub highlight: [f32; 4],
    pub status_text: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(187, 173, 160),
            empty_tile: rgb(205, 193, 180),
            glyph: rgb(0, 0, 0),
            highlight: rgb(255, 255, 0),
            status_text: rgb(255, 0, 0),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Card values; each is placed twice on the fixed grid
    pub values: Vec<u8>,
    /// Fixed board seed (None = seed from the clock)
    pub seed: Option<u64>,
    pub timings: Timings,
    pub layout: LayoutSettings,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            values: crate::default_value_pool(),
            seed: None,
            timings: Timings::default(),
            layout: LayoutSettings::default(),
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "memory_tiles_settings";

    /// Parse a (possibly partial) JSON override; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the grid holds exactly two of every value and the timings are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::check_pool(GRID_ROWS, GRID_COLS, &self.values)?;
        self.timings.validate()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring malformed settings override: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
