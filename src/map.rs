//! Tiled map grid
//!
//! A tile is a square of `tiles_per_side` x `tiles_per_side` labelled
//! cells, centered on the map origin. The map offset translates the whole
//! tile; the viewport is centered on the joystick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One labelled cell of a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// Top-left corner relative to the tile center
    pub origin: Vec2,
    pub label: String,
}

/// Grid geometry of a map tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Tile coordinates (which tile of the world this is)
    pub tile: (i32, i32),
    pub tile_size: f32,
    pub tiles_per_side: u32,
}

impl TileGrid {
    pub fn new(tile_size: f32, tiles_per_side: u32) -> Self {
        Self {
            tile: (0, 0),
            tile_size,
            tiles_per_side: tiles_per_side.max(1),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tile_size, settings.tiles_per_side)
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.tile_size / self.tiles_per_side as f32
    }

    /// Cell caption: `{tile x}.{row}-{tile y}.{col}`
    pub fn label(&self, row: u32, col: u32) -> String {
        format!("{}.{}-{}.{}", self.tile.0, row, self.tile.1, col)
    }

    fn cell(&self, row: u32, col: u32) -> Cell {
        let half = self.tile_size / 2.0;
        let size = self.cell_size();
        Cell {
            row,
            col,
            origin: Vec2::new(col as f32 * size - half, row as f32 * size - half),
            label: self.label(row, col),
        }
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.tiles_per_side;
        (0..n).flat_map(move |row| (0..n).map(move |col| self.cell(row, col)))
    }

    /// Cells overlapping a viewport of `viewport` size centered on the
    /// joystick, with the tile shifted by `map_offset`
    pub fn visible_cells(&self, map_offset: Vec2, viewport: Vec2) -> Vec<Cell> {
        let half_view = viewport / 2.0;
        let size = self.cell_size();
        self.cells()
            .filter(|cell| {
                let min = cell.origin + map_offset;
                let max = min + Vec2::splat(size);
                max.x > -half_view.x && min.x < half_view.x && max.y > -half_view.y && min.y < half_view.y
            })
            .collect()
    }

    /// Cell under the joystick for a given map offset, if still on the tile
    pub fn cell_under_center(&self, map_offset: Vec2) -> Option<(u32, u32)> {
        let local = -map_offset + Vec2::splat(self.tile_size / 2.0);
        if local.x < 0.0 || local.y < 0.0 || local.x >= self.tile_size || local.y >= self.tile_size {
            return None;
        }
        let size = self.cell_size();
        let col = ((local.x / size) as u32).min(self.tiles_per_side - 1);
        let row = ((local.y / size) as u32).min(self.tiles_per_side - 1);
        Some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGrid {
        TileGrid::new(800.0, 10)
    }

    #[test]
    fn test_labels_and_count() {
        let grid = grid();
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), 100);
        assert_eq!(cells[0].label, "0.0-0.0");
        assert_eq!(cells[13].label, "0.1-0.3");
        assert_eq!(cells[13].origin, Vec2::new(-160.0, -320.0));
    }

    #[test]
    fn test_center_cell_at_rest() {
        // Tile center sits on a cell corner; the cell to its lower right wins
        assert_eq!(grid().cell_under_center(Vec2::ZERO), Some((5, 5)));
    }

    #[test]
    fn test_center_cell_after_panning() {
        // Map moved left and up: the viewer looks further right and down
        assert_eq!(grid().cell_under_center(Vec2::new(-390.0, -10.0)), Some((5, 9)));
        assert_eq!(grid().cell_under_center(Vec2::new(-401.0, 0.0)), None);
    }

    #[test]
    fn test_visible_cells_culls_offscreen() {
        let grid = grid();
        let visible = grid.visible_cells(Vec2::ZERO, Vec2::new(160.0, 160.0));
        assert_eq!(visible.len(), 4);

        let all = grid.visible_cells(Vec2::ZERO, Vec2::new(2000.0, 2000.0));
        assert_eq!(all.len(), 100);

        let none = grid.visible_cells(Vec2::new(5000.0, 0.0), Vec2::new(400.0, 400.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_panning_changes_visible_columns() {
        let grid = grid();
        let phone = Vec2::new(390.0, 844.0);
        // Taller than the tile: every row shows, six columns around the center
        assert_eq!(grid.visible_cells(Vec2::ZERO, phone).len(), 60);

        let panned = grid.visible_cells(Vec2::new(-400.0, 0.0), phone);
        assert_eq!(panned.len(), 30);
        assert!(panned.iter().all(|cell| cell.col >= 7));
    }
}
