//! Turn state machine
//!
//! Clicks turn cards face-up, pairs resolve immediately, and timed
//! transitions (mismatch hide, final reveal) are checked once per frame
//! against the frame timestamp.

use super::board::Cell;
use super::state::{GameEvent, GameState, GameStatus, Wait};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Clicked cells, in arrival order (already hit-tested to the grid)
    pub clicks: Vec<Cell>,
}

impl TickInput {
    pub fn click(cell: Cell) -> Self {
        Self { clicks: vec![cell] }
    }
}

/// Advance the game by one frame at time `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    for &cell in &input.clicks {
        click(state, cell, now);
    }
    advance(state, now);
}

/// Apply one click. Dropped while a mismatch is on display, after the win,
/// and for cells off the grid.
pub fn click(state: &mut GameState, cell: Cell, now: u64) {
    if state.is_waiting() || state.is_won() || !state.board.contains(cell) {
        return;
    }

    if state.board.is_revealed(cell) {
        // Only a current pick can be turned back; matched cards stay up
        if state.selection.first == Some(cell) {
            state.selection.first = None;
        } else if state.selection.second == Some(cell) {
            state.selection.second = None;
        } else {
            return;
        }
        state.board.set_revealed(cell, false);
        state.effects.cancel_reveal(cell);
        state.events.push(GameEvent::Unpicked(cell));
        return;
    }

    state.board.set_revealed(cell, true);
    state.effects.start_reveal(cell, now);
    state.events.push(GameEvent::Revealed(cell));

    match (state.selection.first, state.selection.second) {
        (None, _) => state.selection.first = Some(cell),
        (Some(first), None) if first != cell => {
            state.selection.second = Some(cell);
            resolve(state, first, cell, now);
        }
        _ => {}
    }
}

/// Compare a freshly completed pair
fn resolve(state: &mut GameState, a: Cell, b: Cell, now: u64) {
    let (va, vb) = (state.board.value_at(a), state.board.value_at(b));
    match (va, vb) {
        (Some(value), Some(other)) if value == other => {
            state.effects.start_pulse(a, b, now);
            state.selection.clear();
            state.pairs_found += 1;
            state.events.push(GameEvent::Matched { a, b, value });

            if state.board.all_revealed() {
                state.status = GameStatus::Won {
                    won_at: now,
                    swept: false,
                };
                state.events.push(GameEvent::Won { at: now });
            }
        }
        _ => {
            // Selections stay set so the hide knows which cards to turn back
            state.wait = Some(Wait { started_at: now });
            state.misses += 1;
            state.events.push(GameEvent::Mismatched { a, b });
        }
    }
}

/// Timed transitions, checked every frame
pub fn advance(state: &mut GameState, now: u64) {
    let timings = *state.timings();

    if let Some(wait) = state.wait {
        if now.saturating_sub(wait.started_at) >= timings.mismatch_delay_ms {
            let picks = [state.selection.first, state.selection.second];
            for cell in picks.into_iter().flatten() {
                state.board.set_revealed(cell, false);
                state.effects.cancel_reveal(cell);
            }
            if let [Some(a), Some(b)] = picks {
                state.events.push(GameEvent::Hidden { a, b });
            }
            state.selection.clear();
            state.wait = None;
        }
    }

    if let GameStatus::Won {
        won_at,
        swept: false,
    } = state.status
    {
        if now.saturating_sub(won_at) >= timings.final_reveal_delay_ms {
            // Under normal play nothing is left face-down here
            let hidden: Vec<Cell> = state
                .board
                .cells()
                .filter(|&cell| !state.board.is_revealed(cell))
                .collect();
            for &cell in &hidden {
                state.board.set_revealed(cell, true);
                state.effects.start_reveal(cell, now);
            }
            state.status = GameStatus::Won {
                won_at,
                swept: true,
            };
            state.events.push(GameEvent::FinalReveal {
                revealed: hidden.len(),
            });
        }
    }
}
