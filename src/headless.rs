//! Scripted headless play
//!
//! Drives `App` with a manual clock and a player that remembers every card
//! it has seen. Used by the native binary and as an end-to-end check.

use std::collections::BTreeMap;

use crate::app::App;
use crate::error::SetupError;
use crate::platform::{Clock, InputEvent, ManualClock};
use crate::settings::Settings;
use crate::sim::{Cell, GameStatus, TurnPhase};

/// Hard stop for a run that never finishes
pub const MAX_FRAMES: u32 = 100_000;

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub seed: u64,
    pub frames: u32,
    pub elapsed_ms: u64,
    pub pairs_found: usize,
    pub misses: u32,
    pub won_at: Option<u64>,
    /// Won and the final sweep ran
    pub completed: bool,
}

/// Player with perfect recall of every card it has seen face-up
#[derive(Debug, Default)]
struct Player {
    seen: BTreeMap<Cell, u8>,
}

impl Player {
    fn observe(&mut self, app: &App) {
        let board = &app.state.board;
        for cell in board.cells().filter(|&c| board.is_revealed(c)) {
            if let Some(value) = board.value_at(cell) {
                self.seen.insert(cell, value);
            }
        }
    }

    /// Hidden cell already known to hold `value`, other than `except`
    fn known_hidden(&self, app: &App, value: u8, except: Option<Cell>) -> Option<Cell> {
        self.seen
            .iter()
            .find(|&(&c, &v)| v == value && Some(c) != except && !app.state.board.is_revealed(c))
            .map(|(&c, _)| c)
    }

    fn first_unseen(&self, app: &App) -> Option<Cell> {
        let board = &app.state.board;
        board
            .cells()
            .find(|&c| !board.is_revealed(c) && !self.seen.contains_key(&c))
    }

    /// At most one pick per frame
    fn choose(&self, app: &App) -> Option<Cell> {
        match app.state.phase() {
            TurnPhase::Idle => {
                // A fully known hidden pair beats exploring
                let known_pair = self.seen.iter().find_map(|(&c, &v)| {
                    if app.state.board.is_revealed(c) {
                        return None;
                    }
                    self.known_hidden(app, v, Some(c)).map(|_| c)
                });
                known_pair.or_else(|| self.first_unseen(app))
            }
            TurnPhase::OneSelected => {
                let first = app.state.selection.first?;
                let value = app.state.board.value_at(first)?;
                self.known_hidden(app, value, Some(first))
                    .or_else(|| self.first_unseen(app))
            }
            TurnPhase::Waiting | TurnPhase::Won => None,
        }
    }
}

/// Play one full game, `frame_ms` apart, until the final sweep has run
pub fn run_headless(
    settings: Settings,
    seed: u64,
    frame_ms: u64,
) -> Result<HeadlessReport, SetupError> {
    let mut app = App::new(settings, seed)?;
    let mut clock = ManualClock::new(0);
    let mut player = Player::default();
    let mut frames = 0;

    while frames < MAX_FRAMES {
        let events: Vec<InputEvent> = player
            .choose(&app)
            .map(|cell| {
                let center = app.layout.tile_rect(cell).center();
                InputEvent::Click {
                    x: center.x,
                    y: center.y,
                }
            })
            .into_iter()
            .collect();

        app.frame(&events, clock.now_ms());
        player.observe(&app);
        frames += 1;

        if matches!(app.state.status, GameStatus::Won { swept: true, .. }) {
            break;
        }
        clock.advance(frame_ms.max(1));
    }

    let report = HeadlessReport {
        seed,
        frames,
        elapsed_ms: clock.now_ms(),
        pairs_found: app.state.pairs_found,
        misses: app.state.misses,
        won_at: app.state.won_at(),
        completed: matches!(app.state.status, GameStatus::Won { swept: true, .. }),
    };
    if !report.completed {
        log::warn!("Headless run stopped after {} frames without finishing", frames);
    }
    Ok(report)
}
