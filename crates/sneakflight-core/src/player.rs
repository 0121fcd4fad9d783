use serde::{Deserialize, Serialize};

use crate::map::{Direction, GridMap, Point};

/// How the player avatar is currently drawn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Flying,
    Hiding,
    Caught,
}

impl DisplayState {
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Flying => 'A',
            Self::Hiding => 'S',
            Self::Caught => 'X',
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flying => "flying",
            Self::Hiding => "hiding",
            Self::Caught => "caught",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    position: Point,
    score: u32,
    ticks_played: u64,
    display: DisplayState,
}

impl Player {
    /// Fresh player standing on the bed anchor.
    #[must_use]
    pub fn spawn_at(bed: Point) -> Self {
        Self {
            position: bed,
            ..Self::default()
        }
    }

    /// Step one cell in `direction` unless the target is a wall or off the map.
    pub fn try_move(&mut self, direction: Direction, map: &GridMap) -> bool {
        let next = self.position.step(direction);
        if !map.is_walkable(next) {
            return false;
        }
        self.position = next;
        true
    }

    /// Put the player on `position` if it lies inside `map`. Walls are allowed.
    pub(crate) fn place(&mut self, position: Point, map: &GridMap) -> bool {
        if !map.contains(position) {
            return false;
        }
        self.position = position;
        true
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn ticks_played(&self) -> u64 {
        self.ticks_played
    }

    #[must_use]
    pub const fn display(&self) -> DisplayState {
        self.display
    }

    pub(crate) fn set_display(&mut self, display: DisplayState) {
        self.display = display;
    }

    pub(crate) fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn count_tick(&mut self) {
        self.ticks_played += 1;
    }
}
