//! Screen layout: header band on top, square cells below
//!
//! Pixel space has its origin at the top-left corner, y pointing down.
//! Drawing and hit testing share this one mapping.

use glam::Vec2;

use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::settings::Settings;
use crate::sim::Cell;

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Grow by `amount` on every side
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            size: self.size + Vec2::splat(2.0 * amount),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max().x && p.y < self.max().y
    }
}

/// Grid geometry derived from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
    /// Side of one square cell (whole pixels)
    pub cell_size: f32,
    pub padding: f32,
    pub corner_radius: f32,
    pub border_thickness: f32,
    /// Card image size relative to the tile
    pub image_fill: f32,
}

impl Layout {
    pub fn from_settings(settings: &Settings) -> Self {
        let l = &settings.layout;
        let cell_size = (l.width / GRID_COLS as f32)
            .min((l.height - l.header_height) / GRID_ROWS as f32)
            .floor()
            .max(1.0);
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            width: l.width,
            height: l.height,
            header_height: l.header_height,
            cell_size,
            padding: l.padding,
            corner_radius: l.corner_radius,
            border_thickness: l.border_thickness,
            image_fill: l.image_fill,
        }
    }

    /// Cell under a pixel, None for the header band and anything off the grid
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        if x < 0.0 || y < self.header_height {
            return None;
        }
        let col = (x / self.cell_size).floor() as usize;
        let row = ((y - self.header_height) / self.cell_size).floor() as usize;
        (row < self.rows && col < self.cols).then(|| Cell::new(row, col))
    }

    /// Whole cell including padding
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let min = Vec2::new(
            cell.col as f32 * self.cell_size,
            self.header_height + cell.row as f32 * self.cell_size,
        );
        Rect::new(min, Vec2::splat(self.cell_size))
    }

    /// Visible tile (cell minus padding)
    pub fn tile_rect(&self, cell: Cell) -> Rect {
        let cell_rect = self.cell_rect(cell);
        Rect::new(
            cell_rect.min + Vec2::splat(self.padding),
            Vec2::splat(self.tile_size()),
        )
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        (self.cell_size - 2.0 * self.padding).max(0.0)
    }

    /// Unscaled card image size
    #[inline]
    pub fn image_size(&self) -> f32 {
        self.tile_size() * self.image_fill
    }

    /// Center of the header band (status message anchor)
    pub fn header_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.header_height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::from_settings(&Settings::default())
    }

    #[test]
    fn test_default_geometry() {
        let l = layout();
        assert_eq!(l.cell_size, 80.0);
        assert_eq!(l.tile_size(), 70.0);
        assert_eq!(l.header_center(), Vec2::new(200.0, 40.0));
    }

    #[test]
    fn test_cell_at_grid() {
        let l = layout();
        assert_eq!(l.cell_at(0.0, 80.0), Some(Cell::new(0, 0)));
        assert_eq!(l.cell_at(79.9, 159.9), Some(Cell::new(0, 0)));
        assert_eq!(l.cell_at(80.0, 160.0), Some(Cell::new(1, 1)));
        assert_eq!(l.cell_at(399.0, 399.0), Some(Cell::new(3, 4)));
    }

    #[test]
    fn test_cell_at_header_and_outside() {
        let l = layout();
        assert_eq!(l.cell_at(200.0, 10.0), None);
        assert_eq!(l.cell_at(200.0, 79.9), None);
        assert_eq!(l.cell_at(-1.0, 200.0), None);
        assert_eq!(l.cell_at(400.0, 200.0), None);
        assert_eq!(l.cell_at(100.0, 400.0), None);
    }

    #[test]
    fn test_tile_rect_roundtrips_through_hit_test() {
        let l = layout();
        for row in 0..l.rows {
            for col in 0..l.cols {
                let cell = Cell::new(row, col);
                let tile = l.tile_rect(cell);
                assert_eq!(l.cell_at(tile.center().x, tile.center().y), Some(cell));
                assert!(l.cell_rect(cell).contains(tile.min));
            }
        }
    }

    #[test]
    fn test_rect_helpers() {
        let r = Rect::centered(Vec2::new(10.0, 10.0), Vec2::new(4.0, 2.0));
        assert_eq!(r.min, Vec2::new(8.0, 9.0));
        assert_eq!(r.max(), Vec2::new(12.0, 11.0));
        let grown = r.expand(1.0);
        assert_eq!(grown.size, Vec2::new(6.0, 4.0));
        assert_eq!(grown.center(), r.center());
    }
}
