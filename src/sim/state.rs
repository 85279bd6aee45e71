//! Game state aggregate
//!
//! Everything the turn state machine mutates lives in one `GameState`.
//! There is no hidden global state; the render pass borrows this too.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::{Board, Cell};
use super::effects::EffectRegistry;
use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::error::ConfigError;
use crate::settings::{Settings, Timings};

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Every pair found at `won_at`; `swept` once the final reveal-all ran
    Won { won_at: u64, swept: bool },
}

/// Turn phase derived from the selection and wait state.
///
/// Resolving a second pick happens inside the click that made it, so a
/// "two selected, not yet resolved" phase is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Nothing picked
    Idle,
    /// One card face-up, waiting for its partner
    OneSelected,
    /// Mismatched pair on display until the hide delay elapses
    Waiting,
    /// All pairs found
    Won,
}

/// The (at most two) cards picked this turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub first: Option<Cell>,
    pub second: Option<Cell>,
}

impl Selection {
    pub fn contains(&self, cell: Cell) -> bool {
        self.first == Some(cell) || self.second == Some(cell)
    }

    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

/// Mismatch on display since `started_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub started_at: u64,
}

/// Something that happened during a tick (drained by the frame loop)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A card was turned face-up by a click
    Revealed(Cell),
    /// A lone pick was turned back face-down by clicking it again
    Unpicked(Cell),
    Matched { a: Cell, b: Cell, value: u8 },
    Mismatched { a: Cell, b: Cell },
    /// A mismatched pair was turned back face-down
    Hidden { a: Cell, b: Cell },
    Won { at: u64 },
    /// Final sweep turned up this many leftover cards
    FinalReveal { revealed: usize },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Board seed for reproducibility
    pub seed: u64,
    pub board: Board,
    pub effects: EffectRegistry,
    pub selection: Selection,
    pub wait: Option<Wait>,
    pub status: GameStatus,
    /// Matched pairs so far
    pub pairs_found: usize,
    /// Mismatched attempts so far
    pub misses: u32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Deal a fresh board from settings with the given seed
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = Board::setup(GRID_ROWS, GRID_COLS, &settings.values, &mut rng)?;
        Ok(Self::with_board(board, settings.timings, seed))
    }

    /// Wrap an existing board (all effects and selections empty)
    pub fn with_board(board: Board, timings: Timings, seed: u64) -> Self {
        let effects = EffectRegistry::new(board.rows(), board.cols(), timings);
        Self {
            seed,
            board,
            effects,
            selection: Selection::default(),
            wait: None,
            status: GameStatus::InProgress,
            pairs_found: 0,
            misses: 0,
            events: Vec::new(),
        }
    }

    pub fn timings(&self) -> &Timings {
        self.effects.timings()
    }

    pub fn is_waiting(&self) -> bool {
        self.wait.is_some()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.status, GameStatus::Won { .. })
    }

    pub fn won_at(&self) -> Option<u64> {
        match self.status {
            GameStatus::Won { won_at, .. } => Some(won_at),
            GameStatus::InProgress => None,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        if self.is_won() {
            TurnPhase::Won
        } else if self.is_waiting() {
            TurnPhase::Waiting
        } else if self.selection.first.is_some() || self.selection.second.is_some() {
            TurnPhase::OneSelected
        } else {
            TurnPhase::Idle
        }
    }

    /// Total pairs on the board
    pub fn total_pairs(&self) -> usize {
        self.board.len() / 2
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(&Settings::default(), 12345).unwrap();
        assert_eq!(state.phase(), TurnPhase::Idle);
        assert_eq!(state.total_pairs(), 10);
        assert!(!state.is_won());
        assert_eq!(state.won_at(), None);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_new_state_rejects_bad_settings() {
        let settings = Settings {
            values: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(&settings, 1),
            Err(ConfigError::GridMismatch { .. })
        ));
    }

    #[test]
    fn test_selection_contains() {
        let mut sel = Selection {
            first: Some(Cell::new(0, 1)),
            second: None,
        };
        assert!(sel.contains(Cell::new(0, 1)));
        assert!(!sel.contains(Cell::new(1, 0)));
        sel.clear();
        assert!(sel.is_empty());
    }
}
