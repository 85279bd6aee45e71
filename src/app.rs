//! Frame loop glue
//!
//! One `frame` call per rendered frame: hit-test input, tick the game,
//! log what happened, build the scene. Platform code only supplies raw
//! events and the timestamp.

use crate::error::SetupError;
use crate::layout::Layout;
use crate::platform::InputEvent;
use crate::renderer::{Scene, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Output of one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub scene: Scene,
    /// False once a quit event was seen
    pub running: bool,
}

pub struct App {
    pub state: GameState,
    pub layout: Layout,
    pub settings: Settings,
    running: bool,
}

impl App {
    /// Validate settings and deal a board
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SetupError> {
        settings.validate()?;
        let state = GameState::new(&settings, seed)?;
        let layout = Layout::from_settings(&settings);
        log::info!(
            "New game: {}x{} grid, {} pairs, seed {}",
            state.board.rows(),
            state.board.cols(),
            state.total_pairs(),
            seed
        );
        Ok(Self {
            state,
            layout,
            settings,
            running: true,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Translate raw events into this frame's tick input
    fn collect_input(&mut self, events: &[InputEvent]) -> TickInput {
        let mut input = TickInput::default();
        for event in events {
            match *event {
                InputEvent::Click { x, y } => match self.layout.cell_at(x, y) {
                    Some(cell) => input.clicks.push(cell),
                    None => log::trace!("click at ({}, {}) missed the grid", x, y),
                },
                InputEvent::Quit => self.running = false,
            }
        }
        input
    }

    /// Run one frame at time `now` (ms)
    pub fn frame(&mut self, events: &[InputEvent], now: u64) -> Frame {
        let input = self.collect_input(events);
        if self.running {
            tick(&mut self.state, &input, now);
            for event in self.state.drain_events() {
                log_event(&event, &self.state);
            }
        }

        let scene = build_scene(&mut self.state, &self.layout, &self.settings.palette, now);
        Frame {
            scene,
            running: self.running,
        }
    }
}

fn log_event(event: &GameEvent, state: &GameState) {
    match event {
        GameEvent::Matched { value, .. } => log::debug!(
            "Matched {} ({}/{} pairs)",
            value,
            state.pairs_found,
            state.total_pairs()
        ),
        GameEvent::Won { at } => log::info!(
            "All pairs found at {}ms with {} misses",
            at,
            state.misses
        ),
        GameEvent::FinalReveal { revealed } if *revealed > 0 => {
            log::warn!("Final sweep turned up {} hidden cards", revealed)
        }
        other => log::debug!("{:?}", other),
    }
}
