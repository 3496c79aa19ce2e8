//! The wall under construction
//!
//! A wall grows two extensions from an anchor tile, one toward decreasing
//! coordinates and one toward increasing coordinates. Each extension is a
//! small state machine; leaving `Building` is what the rest of the tick
//! reacts to (life penalty on destruction, region capture once both ends
//! settle).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, has_ball};
use super::grid::Grid;
use super::state::GameEvent;

/// Orientation of the wall (and of the player's cursor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Unit step along the wall
    pub fn along(self) -> IVec2 {
        match self {
            Orientation::Horizontal => IVec2::X,
            Orientation::Vertical => IVec2::Y,
        }
    }

    /// Unit step perpendicular to the wall
    pub fn across(self) -> IVec2 {
        match self {
            Orientation::Horizontal => IVec2::Y,
            Orientation::Vertical => IVec2::X,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Which extension (or which side of a finished wall)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Toward decreasing coordinates
    Negative,
    /// Toward increasing coordinates
    Positive,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Negative, Side::Positive];

    pub fn sign(self) -> i32 {
        match self {
            Side::Negative => -1,
            Side::Positive => 1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Negative => 0,
            Side::Positive => 1,
        }
    }
}

/// Building status of one extension. `reach` is the signed offset of the
/// tip from the anchor (<= 0 on the negative side, >= 0 on the positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Extension {
    #[default]
    Inactive,
    Building { reach: i32 },
    Built { reach: i32 },
}

impl Extension {
    pub fn is_inactive(self) -> bool {
        matches!(self, Extension::Inactive)
    }

    pub fn is_building(self) -> bool {
        matches!(self, Extension::Building { .. })
    }
}

/// At most one wall exists at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wall {
    pub anchor: IVec2,
    pub orientation: Orientation,
    pub negative: Extension,
    pub positive: Extension,
}

impl Wall {
    pub fn extension(&self, side: Side) -> Extension {
        match side {
            Side::Negative => self.negative,
            Side::Positive => self.positive,
        }
    }

    fn extension_mut(&mut self, side: Side) -> &mut Extension {
        match side {
            Side::Negative => &mut self.negative,
            Side::Positive => &mut self.positive,
        }
    }

    /// No wall in flight; a new one may be anchored
    pub fn is_idle(&self) -> bool {
        self.negative.is_inactive() && self.positive.is_inactive()
    }

    /// Tile at signed offset `offset` from the anchor along the wall
    pub fn tile_at(&self, offset: i32) -> IVec2 {
        self.anchor + self.orientation.along() * offset
    }

    /// Anchor a new wall on an open interior tile.
    ///
    /// Returns false (and leaves the wall untouched) if a wall is already in
    /// flight, or the tile is on the border, outside the grid, or captured.
    pub fn try_start(&mut self, grid: &Grid, tile: IVec2, orientation: Orientation) -> bool {
        if !self.is_idle() {
            return false;
        }
        if !grid.is_interior(tile) || grid.is_captured(tile) {
            return false;
        }
        *self = Wall {
            anchor: tile,
            orientation,
            negative: Extension::Building { reach: 0 },
            positive: Extension::Building { reach: 0 },
        };
        log::debug!(
            "Wall anchored at ({}, {}) {:?}",
            tile.x,
            tile.y,
            orientation
        );
        true
    }

    /// Extend a building extension by one tile, then destroy it if any ball
    /// sits between the anchor and the new tip. The growth is kept.
    pub fn grow(&mut self, side: Side, balls: &[Ball], events: &mut Vec<GameEvent>) {
        let Extension::Building { reach } = self.extension(side) else {
            return;
        };
        let reach = reach + side.sign();
        *self.extension_mut(side) = Extension::Building { reach };

        let hit = span(reach).any(|offset| has_ball(balls, self.tile_at(offset)));
        if hit {
            *self.extension_mut(side) = Extension::Inactive;
            log::debug!("Wall extension {:?} destroyed at reach {}", side, reach);
            events.push(GameEvent::ExtensionDestroyed { side });
        }
    }

    /// If the tip of a building extension touches captured territory,
    /// capture every tile from the tip back to the anchor.
    pub fn try_complete(&mut self, side: Side, grid: &mut Grid, events: &mut Vec<GameEvent>) {
        let Extension::Building { reach } = self.extension(side) else {
            return;
        };
        if !grid.is_captured(self.tile_at(reach)) {
            return;
        }
        for offset in span(reach) {
            grid.set_captured(self.tile_at(offset));
        }
        *self.extension_mut(side) = Extension::Built { reach };
        log::debug!("Wall extension {:?} built with reach {}", side, reach);
        events.push(GameEvent::ExtensionBuilt { side });
    }

    /// Both extensions have left `Building`
    pub fn is_settled(&self) -> bool {
        !self.negative.is_building() && !self.positive.is_building()
    }

    /// Drop the wall so a new one may be anchored
    pub fn retire(&mut self, closed: bool, events: &mut Vec<GameEvent>) {
        self.negative = Extension::Inactive;
        self.positive = Extension::Inactive;
        events.push(GameEvent::WallRetired { closed });
    }
}

/// Offsets from the anchor (0) out to `reach`, inclusive
fn span(reach: i32) -> std::ops::RangeInclusive<i32> {
    reach.min(0)..=reach.max(0)
}
