//! Character-cell board and status bar

use glam::IVec2;

use crate::sim::{Extension, GameState, Side};

/// Glyphs used on the board
pub const GLYPH_OPEN: char = '.';
pub const GLYPH_CAPTURED: char = '#';
pub const GLYPH_BALL: char = 'o';
pub const GLYPH_EXT_NEGATIVE: char = '<';
pub const GLYPH_EXT_POSITIVE: char = '>';

/// One line per board row. Balls draw over everything, building
/// extensions over open tiles.
pub fn render_board(state: &GameState) -> String {
    let grid = &state.grid;
    let (w, h) = (grid.width(), grid.height());
    let mut cells: Vec<Vec<char>> = (0..h)
        .map(|y| {
            (0..w)
                .map(|x| {
                    if grid.is_captured(IVec2::new(x, y)) {
                        GLYPH_CAPTURED
                    } else {
                        GLYPH_OPEN
                    }
                })
                .collect()
        })
        .collect();

    for side in Side::BOTH {
        if let Extension::Building { reach } = state.wall.extension(side) {
            let glyph = match side {
                Side::Negative => GLYPH_EXT_NEGATIVE,
                Side::Positive => GLYPH_EXT_POSITIVE,
            };
            let (lo, hi) = (reach.min(0), reach.max(0));
            for offset in lo..=hi {
                let tile = state.wall.tile_at(offset);
                if grid.contains(tile) && !grid.is_captured(tile) {
                    cells[tile.y as usize][tile.x as usize] = glyph;
                }
            }
        }
    }

    for ball in &state.balls {
        if grid.contains(ball.pos) {
            cells[ball.pos.y as usize][ball.pos.x as usize] = GLYPH_BALL;
        }
    }

    let mut out = String::with_capacity(((w + 1) * h) as usize);
    for row in cells {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// `lvl: 1; nlives: 2; captured: 12.5%`
pub fn status_line(state: &GameState) -> String {
    format!(
        "lvl: {}; nlives: {}; captured: {:.1}%",
        state.level,
        state.lives,
        state.captured * 100.0
    )
}
