//! Region capture behind a finished wall
//!
//! Once both extensions of a wall have settled, a wall anchored to captured
//! territory at both ends may close off space on either side. Each row along
//! the wall is scanned outward, perpendicular to it, until captured territory
//! is reached. A side containing a ball anywhere in those rows stays open;
//! every other side is filled in.
//!
//! Ball detection runs over all rows before any tile is marked, so a ball
//! found late in the span still protects the rows scanned before it.

use glam::IVec2;

use super::ball::{Ball, has_ball};
use super::grid::Grid;
use super::state::GameEvent;
use super::wall::{Extension, Side, Wall};

/// Settle a wall whose extensions have both stopped building.
///
/// - one end built, the other destroyed: the wall is dropped, nothing else
/// - both ends built: flood capture on the ball-free sides, then dropped
/// - still building: nothing happens
pub fn capture_regions(wall: &mut Wall, grid: &mut Grid, balls: &[Ball], events: &mut Vec<GameEvent>) {
    match (wall.negative, wall.positive) {
        (Extension::Built { reach: lo }, Extension::Built { reach: hi }) => {
            let captured = flood_capture(grid, balls, wall, lo, hi);
            for side in Side::BOTH {
                if let Some(tiles) = captured[side.index()] {
                    if tiles > 0 {
                        log::debug!("Captured {} tiles on {:?} side", tiles, side);
                        events.push(GameEvent::RegionCaptured { side, tiles });
                    }
                }
            }
            wall.retire(true, events);
        }
        (Extension::Built { .. }, Extension::Inactive) | (Extension::Inactive, Extension::Built { .. }) => {
            wall.retire(false, events);
        }
        _ => {}
    }
}

/// Scan and fill both sides of the wall span `lo..=hi`.
///
/// Returns the number of tiles captured per side, or `None` for a side that
/// was disqualified by a ball.
pub fn flood_capture(grid: &mut Grid, balls: &[Ball], wall: &Wall, lo: i32, hi: i32) -> [Option<usize>; 2] {
    let across = wall.orientation.across();
    let mut enclosed = [true, true];

    for offset in lo..=hi {
        if !enclosed.iter().any(|&e| e) {
            break;
        }
        let row = wall.tile_at(offset);
        for side in Side::BOTH {
            if enclosed[side.index()] && scan_hits_ball(grid, balls, row, across * side.sign()) {
                enclosed[side.index()] = false;
            }
        }
    }

    let mut captured = [None, None];
    for side in Side::BOTH {
        if !enclosed[side.index()] {
            continue;
        }
        let step = across * side.sign();
        let mut tiles = 0;
        for offset in lo..=hi {
            let mut tile = wall.tile_at(offset) + step;
            while !grid.is_captured(tile) {
                grid.set_captured(tile);
                tiles += 1;
                tile += step;
            }
        }
        captured[side.index()] = Some(tiles);
    }
    captured
}

/// Walk from `row` in direction `step` over open tiles, looking for a ball
fn scan_hits_ball(grid: &Grid, balls: &[Ball], row: IVec2, step: IVec2) -> bool {
    let mut tile = row + step;
    while !grid.is_captured(tile) {
        if has_ball(balls, tile) {
            return true;
        }
        tile += step;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::wall::Orientation;

    /// A vertical wall at column 10 spanning the whole interior height,
    /// already built at both ends
    fn closed_vertical_wall(grid: &mut Grid) -> Wall {
        for y in 0..grid.height() {
            grid.set_captured(IVec2::new(10, y));
        }
        Wall {
            anchor: IVec2::new(10, 5),
            orientation: Orientation::Vertical,
            negative: Extension::Built { reach: -5 },
            positive: Extension::Built { reach: 14 },
        }
    }

    #[test]
    fn test_both_sides_captured_without_balls() {
        let mut grid = Grid::new(32, 20);
        let mut wall = closed_vertical_wall(&mut grid);
        let mut events = Vec::new();
        capture_regions(&mut wall, &mut grid, &[], &mut events);
        assert_eq!(grid.captured_interior(), 30 * 18);
        assert!(wall.is_idle());
        assert_eq!(
            events,
            vec![
                GameEvent::RegionCaptured { side: Side::Negative, tiles: 9 * 18 },
                GameEvent::RegionCaptured { side: Side::Positive, tiles: 20 * 18 },
                GameEvent::WallRetired { closed: true },
            ]
        );
    }

    #[test]
    fn test_ball_protects_its_side() {
        let mut grid = Grid::new(32, 20);
        let mut wall = closed_vertical_wall(&mut grid);
        let balls = [Ball::new(IVec2::new(20, 12), IVec2::new(1, 1))];
        let mut events = Vec::new();
        capture_regions(&mut wall, &mut grid, &balls, &mut events);
        for y in 1..19 {
            for x in 1..10 {
                assert!(grid.is_captured(IVec2::new(x, y)));
            }
            for x in 11..31 {
                assert!(!grid.is_captured(IVec2::new(x, y)));
            }
        }
    }

    #[test]
    fn test_late_ball_suppresses_earlier_rows() {
        let mut grid = Grid::new(32, 20);
        let mut wall = closed_vertical_wall(&mut grid);
        // Ball on the last interior row; the first rows must stay open too
        let balls = [Ball::new(IVec2::new(3, 18), IVec2::new(1, 1))];
        let mut events = Vec::new();
        capture_regions(&mut wall, &mut grid, &balls, &mut events);
        assert!(!grid.is_captured(IVec2::new(3, 1)));
        assert!(!grid.is_captured(IVec2::new(9, 2)));
        assert!(grid.is_captured(IVec2::new(11, 1)));
    }

    #[test]
    fn test_balls_on_both_sides_capture_nothing() {
        let mut grid = Grid::new(32, 20);
        let mut wall = closed_vertical_wall(&mut grid);
        let before = grid.captured_interior();
        let balls = [
            Ball::new(IVec2::new(3, 3), IVec2::new(1, 1)),
            Ball::new(IVec2::new(25, 7), IVec2::new(-1, 1)),
        ];
        let mut events = Vec::new();
        capture_regions(&mut wall, &mut grid, &balls, &mut events);
        assert_eq!(grid.captured_interior(), before);
        assert_eq!(events, vec![GameEvent::WallRetired { closed: true }]);
        assert!(wall.is_idle());
    }

    #[test]
    fn test_half_built_wall_is_dropped() {
        let mut grid = Grid::new(32, 20);
        let mut wall = Wall {
            anchor: IVec2::new(10, 5),
            orientation: Orientation::Horizontal,
            negative: Extension::Built { reach: -10 },
            positive: Extension::Inactive,
        };
        let before = grid.clone();
        let mut events = Vec::new();
        capture_regions(&mut wall, &mut grid, &[], &mut events);
        assert_eq!(grid, before);
        assert!(wall.is_idle());
        assert_eq!(events, vec![GameEvent::WallRetired { closed: false }]);
    }

    #[test]
    fn test_building_wall_untouched() {
        let mut grid = Grid::new(32, 20);
        let mut wall = Wall {
            anchor: IVec2::new(10, 5),
            orientation: Orientation::Horizontal,
            negative: Extension::Built { reach: -10 },
            positive: Extension::Building { reach: 3 },
        };
        let before = wall;
        let mut events = Vec::new();
        capture_regions(&mut wall, &mut grid, &[], &mut events);
        assert_eq!(wall, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_horizontal_wall_scans_vertically() {
        let mut grid = Grid::new(32, 20);
        for x in 0..32 {
            grid.set_captured(IVec2::new(x, 6));
        }
        let wall = Wall {
            anchor: IVec2::new(10, 6),
            orientation: Orientation::Horizontal,
            negative: Extension::Built { reach: -10 },
            positive: Extension::Built { reach: 21 },
        };
        let balls = [Ball::new(IVec2::new(15, 12), IVec2::new(1, 1))];
        let captured = flood_capture(&mut grid, &balls, &wall, -10, 21);
        assert_eq!(captured, [Some(30 * 5), None]);
        assert!(grid.is_captured(IVec2::new(15, 3)));
        assert!(!grid.is_captured(IVec2::new(15, 8)));
    }
}
