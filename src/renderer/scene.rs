//! Per-frame render pass
//!
//! Turns the game state into a backend-neutral draw list. Keeps nothing
//! between frames, but sampling effects advances and retires them, so it
//! borrows the state mutably and must run once per frame.

use glam::Vec2;

use crate::consts::WIN_MESSAGE;
use crate::layout::{Layout, Rect};
use crate::settings::Palette;
use crate::sim::{Cell, GameState, Orientation};

/// One primitive for the backend
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rounded rectangle (tile background)
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: [f32; 4],
    },
    /// Card art, already scaled and centered
    Card {
        cell: Cell,
        value: u8,
        orientation: Orientation,
        rect: Rect,
        alpha: f32,
    },
    /// Face-down marker
    Placeholder {
        center: Vec2,
        size: f32,
        color: [f32; 4],
    },
    /// Rounded outline (match highlight)
    Border {
        rect: Rect,
        thickness: f32,
        radius: f32,
        color: [f32; 4],
    },
}

/// Header status line
#[derive(Debug, Clone, PartialEq)]
pub struct StatusText {
    pub text: &'static str,
    pub center: Vec2,
    pub color: [f32; 4],
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: [f32; 4],
    pub commands: Vec<DrawCommand>,
    pub status: Option<StatusText>,
}

/// Build the draw list for time `now`
pub fn build_scene(state: &mut GameState, layout: &Layout, palette: &Palette, now: u64) -> Scene {
    let cells: Vec<Cell> = state.board.cells().collect();
    let mut commands = Vec::with_capacity(cells.len() * 3);

    for cell in cells {
        let tile = layout.tile_rect(cell);
        commands.push(DrawCommand::RoundedRect {
            rect: tile,
            radius: layout.corner_radius,
            color: palette.empty_tile,
        });

        let pulse = state.effects.pulse(cell, now);

        let card = match state.board.card_at(cell) {
            Some(card) if state.board.is_revealed(cell) => *card,
            _ => {
                commands.push(DrawCommand::Placeholder {
                    center: tile.center(),
                    size: layout.tile_size() * 0.5,
                    color: palette.glyph,
                });
                continue;
            }
        };

        let alpha = state.effects.fade_progress(cell, now);
        let rect = Rect::centered(tile.center(), Vec2::splat(layout.image_size() * pulse.scale));
        commands.push(DrawCommand::Card {
            cell,
            value: card.value,
            orientation: card.orientation,
            rect,
            alpha,
        });

        if pulse.highlight {
            commands.push(DrawCommand::Border {
                rect: rect.expand(layout.border_thickness),
                thickness: layout.border_thickness,
                radius: layout.corner_radius,
                color: palette.highlight,
            });
        }
    }

    let status = state.is_won().then(|| StatusText {
        text: WIN_MESSAGE,
        center: layout.header_center(),
        color: palette.status_text,
    });

    Scene {
        background: palette.background,
        commands,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{TickInput, tick};

    fn setup() -> (GameState, Layout, Palette) {
        let settings = Settings::default();
        let state = GameState::new(&settings, 777).unwrap();
        (state, Layout::from_settings(&settings), settings.palette)
    }

    /// Two cells sharing a value on a seeded board
    fn find_pair(state: &GameState) -> (Cell, Cell) {
        let cells: Vec<Cell> = state.board.cells().collect();
        for (i, &a) in cells.iter().enumerate() {
            for &b in &cells[i + 1..] {
                if state.board.value_at(a) == state.board.value_at(b) {
                    return (a, b);
                }
            }
        }
        unreachable!("every board has pairs")
    }

    fn cards(scene: &Scene) -> Vec<&DrawCommand> {
        scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Card { .. }))
            .collect()
    }

    #[test]
    fn test_fresh_board_is_all_placeholders() {
        let (mut state, layout, palette) = setup();
        let scene = build_scene(&mut state, &layout, &palette, 0);

        let tiles = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::RoundedRect { .. }))
            .count();
        let placeholders = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Placeholder { .. }))
            .count();
        assert_eq!(tiles, 20);
        assert_eq!(placeholders, 20);
        assert!(cards(&scene).is_empty());
        assert_eq!(scene.status, None);
        assert_eq!(scene.background, palette.background);
    }

    #[test]
    fn test_revealed_card_fades_in() {
        let (mut state, layout, palette) = setup();
        let cell = Cell::new(2, 3);
        tick(&mut state, &TickInput::click(cell), 1000);

        let scene = build_scene(&mut state, &layout, &palette, 1250);
        match cards(&scene).as_slice() {
            [DrawCommand::Card { cell: c, alpha, rect, .. }] => {
                assert_eq!(*c, cell);
                assert!((alpha - 0.5).abs() < 1e-6);
                assert_eq!(rect.size, Vec2::splat(layout.image_size()));
                assert_eq!(rect.center(), layout.tile_rect(cell).center());
            }
            other => panic!("expected one card, got {:?}", other),
        }

        // A finished fade is retired by the frame that completes it
        build_scene(&mut state, &layout, &palette, 1500);
        assert!(!state.effects.has_reveal(cell));
    }

    #[test]
    fn test_matched_pair_pulses_with_border() {
        let (mut state, layout, palette) = setup();
        let (a, b) = find_pair(&state);
        tick(&mut state, &TickInput { clicks: vec![a, b] }, 0);

        let scene = build_scene(&mut state, &layout, &palette, 150);
        let borders = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Border { .. }))
            .count();
        assert_eq!(borders, 2);
        for cmd in cards(&scene) {
            if let DrawCommand::Card { rect, .. } = cmd {
                assert!((rect.size.x - layout.image_size() * 1.2).abs() < 1e-3);
            }
        }

        // After the grace period neither border nor scale remain
        let later = build_scene(&mut state, &layout, &palette, 501);
        assert!(
            !later
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Border { .. }))
        );
        assert_eq!(cards(&later).len(), 2);
    }

    #[test]
    fn test_status_only_when_won() {
        let (mut state, layout, palette) = setup();
        let cells: Vec<Cell> = state.board.cells().collect();
        // Match every pair, one pair per frame
        let mut now = 0;
        while !state.is_won() {
            let remaining: Vec<Cell> = cells
                .iter()
                .copied()
                .filter(|&c| !state.board.is_revealed(c))
                .collect();
            let a = remaining[0];
            let b = remaining[1..]
                .iter()
                .copied()
                .find(|&c| state.board.value_at(c) == state.board.value_at(a))
                .unwrap();
            let status_before = build_scene(&mut state, &layout, &palette, now).status;
            assert_eq!(status_before, None);
            tick(&mut state, &TickInput { clicks: vec![a, b] }, now);
            now += 100;
        }

        let scene = build_scene(&mut state, &layout, &palette, now);
        let status = scene.status.as_ref().expect("status shown after win");
        assert_eq!(status.text, WIN_MESSAGE);
        assert_eq!(status.center, layout.header_center());
        assert_eq!(cards(&scene).len(), 20);
    }
}
