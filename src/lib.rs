//! Memory Tiles - a single-screen tile-matching game
//!
//! Core modules:
//! - `sim`: Board, timed effects and the turn state machine (pure, time-injected)
//! - `layout`: Pixel <-> cell mapping for the grid and header band
//! - `renderer`: Per-frame scene building and the WebGPU backend
//! - `app`: Frame loop tying input, simulation and rendering together
//! - `platform`: Clock and input abstractions for browser/native
//! - `headless`: Scripted play against a manual clock (native binary)
//! - `settings`: Data-driven configuration (grid, timings, layout, palette)

pub mod app;
pub mod assets;
pub mod error;
pub mod headless;
pub mod layout;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Frame};
pub use error::{AssetError, ConfigError, SetupError};
pub use layout::Layout;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (fixed for the process lifetime)
    pub const GRID_ROWS: usize = 4;
    pub const GRID_COLS: usize = 5;
    /// Number of distinct card values (each appears twice)
    pub const CARD_VALUES: u8 = 10;

    /// Fade-in duration for a freshly revealed card (ms)
    pub const FADE_MS: u64 = 500;
    /// Match pulse duration (ms)
    pub const PULSE_MS: u64 = 300;
    /// Highlight kept after the pulse ends (ms)
    pub const PULSE_GRACE_MS: u64 = 200;
    /// Peak extra scale of the match pulse (0.2 = +20%)
    pub const PULSE_AMPLITUDE: f32 = 0.2;
    /// How long a mismatched pair stays face-up (ms)
    pub const MISMATCH_DELAY_MS: u64 = 1000;
    /// Delay between winning and the final reveal-all sweep (ms)
    pub const FINAL_REVEAL_DELAY_MS: u64 = 2000;
    /// Upper bound accepted for any configured duration (ms)
    pub const MAX_TIMING_MS: u64 = 60_000;

    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 400.0;
    /// Header band reserved above the grid for the status message
    pub const HEADER_HEIGHT: f32 = 80.0;
    /// Gap between a tile and its cell edge
    pub const TILE_PADDING: f32 = 5.0;
    pub const CORNER_RADIUS: f32 = 4.0;
    /// Highlight border thickness around a pulsing card
    pub const BORDER_THICKNESS: f32 = 4.0;
    /// Card image size relative to the tile
    pub const IMAGE_FILL: f32 = 0.8;

    /// Status message shown once every pair is found
    pub const WIN_MESSAGE: &str = "Congratulations!";
}

/// Default value pool: `1..=CARD_VALUES`
pub fn default_value_pool() -> Vec<u8> {
    (1..=consts::CARD_VALUES).collect()
}

/// Convert an 8-bit RGB triple to a linear-ish float RGBA color
#[inline]
pub fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}
