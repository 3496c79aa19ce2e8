//! Tile capture grid
//!
//! A fixed-size boolean mask. The outer ring is captured for good; interior
//! tiles only ever go from uncaptured to captured within a level.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Rectangular capture mask, stored column-major like the board it models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<bool>,
}

impl Grid {
    /// Create a grid with the border captured and the interior clear
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 3 && height >= 3, "grid {width}x{height} has no interior");
        let Some(area) = width.checked_mul(height) else {
            panic!("grid {width}x{height} has too many tiles");
        };
        let mut grid = Self {
            width,
            height,
            tiles: vec![false; area as usize],
        };
        grid.initialize();
        grid
    }

    /// Reset for a new level: border captured, interior clear
    pub fn initialize(&mut self) {
        for x in 0..self.width {
            for y in 0..self.height {
                let border = x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                let idx = self.index(IVec2::new(x, y));
                self.tiles[idx] = border;
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the tile lies inside the grid at all
    #[inline]
    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    /// Whether the tile is inside the permanently captured border ring
    #[inline]
    pub fn is_interior(&self, tile: IVec2) -> bool {
        tile.x > 0 && tile.y > 0 && tile.x < self.width - 1 && tile.y < self.height - 1
    }

    /// Panics if `tile` is outside the grid
    #[inline]
    pub fn is_captured(&self, tile: IVec2) -> bool {
        self.tiles[self.index(tile)]
    }

    /// Mark a tile captured. Captured tiles stay captured.
    #[inline]
    pub fn set_captured(&mut self, tile: IVec2) {
        let idx = self.index(tile);
        self.tiles[idx] = true;
    }

    /// Number of captured tiles, not counting the border
    pub fn captured_interior(&self) -> usize {
        let mut n = 0;
        for x in 1..self.width - 1 {
            for y in 1..self.height - 1 {
                if self.is_captured(IVec2::new(x, y)) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Captured interior tiles over the *whole* grid area (border included
    /// in the denominator), so a fully captured board stays below 1.0.
    pub fn captured_fraction(&self) -> f64 {
        self.captured_interior() as f64 / (self.width * self.height) as f64
    }

    fn index(&self, tile: IVec2) -> usize {
        assert!(
            self.contains(tile),
            "tile ({}, {}) outside {}x{} grid",
            tile.x,
            tile.y,
            self.width,
            self.height
        );
        (tile.x * self.height + tile.y) as usize
    }
}

/// Captured fraction of `grid`; see [`Grid::captured_fraction`]
pub fn captured_fraction(grid: &Grid) -> f64 {
    grid.captured_fraction()
}
