//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time is injected as a millisecond timestamp per call
//! - Seeded RNG only (board setup)
//! - No rendering or platform dependencies

pub mod board;
pub mod effects;
pub mod state;
pub mod tick;

pub use board::{Board, Card, Cell, Orientation};
pub use effects::{CellSlots, EffectRegistry, MatchPulse, PulseSample, RevealFade, pulse_scale};
pub use state::{GameEvent, GameState, GameStatus, Selection, TurnPhase, Wait};
pub use tick::{TickInput, advance, click, tick};
