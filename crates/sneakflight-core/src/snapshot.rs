use serde::{Deserialize, Serialize};

use crate::map::{MapId, Point};
use crate::parents::{PARENT_SLOTS, ParentSlot};
use crate::player::DisplayState;
use crate::session::SessionState;
use crate::{GameWorld, Timers};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub position: Point,
    pub display: DisplayState,
    pub glyph: char,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentView {
    pub active: bool,
    pub position: Point,
    pub glyph: char,
    pub lifetime: u32,
}

impl From<&ParentSlot> for ParentView {
    fn from(slot: &ParentSlot) -> Self {
        match slot {
            ParentSlot::Active(parent) => Self {
                active: true,
                position: parent.position,
                glyph: parent.glyph,
                lifetime: parent.lifetime,
            },
            ParentSlot::Inactive => Self {
                glyph: ' ',
                ..Self::default()
            },
        }
    }
}

/// Read-only view of everything a front end needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub map_id: MapId,
    pub map_name: String,
    pub session: SessionState,
    pub instructions_visible: bool,
    pub player: PlayerView,
    pub parents: [ParentView; PARENT_SLOTS],
    pub timers: Timers,
    /// Ticks until the next parent spawn roll.
    pub next_check_in: u32,
}

impl FrameSnapshot {
    #[must_use]
    pub fn capture(world: &GameWorld) -> Self {
        let player = world.player();
        let timers = world.timers();
        Self {
            map_id: world.current_map(),
            map_name: world.map().name().to_string(),
            session: world.session(),
            instructions_visible: world.instructions_visible(),
            player: PlayerView {
                position: player.position(),
                display: player.display(),
                glyph: player.display().glyph(),
                score: player.score(),
            },
            parents: world.parents().slots().each_ref().map(ParentView::from),
            timers,
            next_check_in: world
                .config()
                .rules
                .parent_check_period
                .saturating_sub(timers.parent_check),
        }
    }
}
