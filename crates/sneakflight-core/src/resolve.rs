//! Zone membership and capture resolution, evaluated once per tick after parents move.
//!
//! Everything here is a pure function of the player position, the map and the parent pool.
//! Capture is checked before any scoring happens.

use crate::config::RuleSet;
use crate::map::{GridMap, Point};
use crate::parents::ParentPool;
use crate::player::DisplayState;

/// Result of resolving one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The parent in `slot` caught the player.
    Caught { slot: usize },
    Clear { display: DisplayState, bonus: u32 },
}

/// First active parent within `range` of an exposed player.
///
/// A player inside the hide zone is never caught.
#[must_use]
pub fn capture_check(
    position: Point,
    map: &GridMap,
    parents: &ParentPool,
    range: u32,
) -> Option<usize> {
    if map.in_hide_zone(position) {
        return None;
    }
    parents
        .active()
        .find(|(_, parent)| parent.position.manhattan(position) <= range)
        .map(|(slot, _)| slot)
}

#[must_use]
pub fn derive_display_state(position: Point, map: &GridMap, any_active: bool) -> DisplayState {
    match (any_active, map.in_hide_zone(position), map.in_bed_zone(position)) {
        (true, true, _) => DisplayState::Hiding,
        (true, false, _) => DisplayState::Flying,
        (false, _, true) => DisplayState::Flying,
        (false, _, false) => DisplayState::Hiding,
    }
}

/// Per-tick score bonus earned by standing in the right zone.
#[must_use]
pub fn zone_bonus(position: Point, map: &GridMap, any_active: bool, rules: &RuleSet) -> u32 {
    if any_active {
        if map.in_hide_zone(position) {
            rules.hide_bonus
        } else {
            0
        }
    } else if map.in_bed_zone(position) {
        rules.bed_bonus
    } else {
        0
    }
}

#[must_use]
pub fn resolve(position: Point, map: &GridMap, parents: &ParentPool, rules: &RuleSet) -> Resolution {
    if let Some(slot) = capture_check(position, map, parents, rules.capture_range) {
        return Resolution::Caught { slot };
    }
    let any_active = parents.any_active();
    Resolution::Clear {
        display: derive_display_state(position, map, any_active),
        bonus: zone_bonus(position, map, any_active, rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Direction, MapId, MapRegistry};
    use crate::parents::Parent;

    fn pool_with(position: Point) -> ParentPool {
        let mut pool = ParentPool::new();
        pool.place(0, Parent::new(position, 30, Direction::Left));
        pool
    }

    #[test]
    fn capture_range_is_inclusive() {
        let maps = MapRegistry::builtin().expect("maps");
        let map = maps.get(MapId::EuropeUs);
        let rules = RuleSet::default();
        let player = Point::new(10, 10);

        let pool = pool_with(Point::new(12, 11));
        assert_eq!(capture_check(player, map, &pool, rules.capture_range), Some(0));

        let pool = pool_with(Point::new(12, 12));
        assert_eq!(capture_check(player, map, &pool, rules.capture_range), None);
    }

    #[test]
    fn hide_zone_shields_from_adjacent_parents() {
        let maps = MapRegistry::builtin().expect("maps");
        let map = maps.get(MapId::EuropeUs);
        let rules = RuleSet::default();
        let player = Point::new(25, 8);
        let pool = pool_with(Point::new(24, 8));

        assert_eq!(
            resolve(player, map, &pool, &rules),
            Resolution::Clear {
                display: DisplayState::Hiding,
                bonus: rules.hide_bonus,
            }
        );
    }

    #[test]
    fn display_state_truth_table() {
        let maps = MapRegistry::builtin().expect("maps");
        let map = maps.get(MapId::EuropeUs);
        let bed = map.bed_anchor();
        let hide = map.hide_zone().origin();
        let hallway = Point::new(15, 15);

        assert_eq!(derive_display_state(hide, map, true), DisplayState::Hiding);
        assert_eq!(derive_display_state(hallway, map, true), DisplayState::Flying);
        assert_eq!(derive_display_state(bed, map, true), DisplayState::Flying);
        assert_eq!(derive_display_state(bed, map, false), DisplayState::Flying);
        assert_eq!(derive_display_state(hallway, map, false), DisplayState::Hiding);
        assert_eq!(derive_display_state(hide, map, false), DisplayState::Hiding);
    }

    #[test]
    fn bonuses_follow_parent_activity() {
        let maps = MapRegistry::builtin().expect("maps");
        let map = maps.get(MapId::ViennaHotel);
        let rules = RuleSet::default();
        let bed = map.bed_anchor();
        let hide = map.hide_zone().origin();

        assert_eq!(zone_bonus(bed, map, false, &rules), rules.bed_bonus);
        assert_eq!(zone_bonus(bed, map, true, &rules), 0);
        assert_eq!(zone_bonus(hide, map, true, &rules), rules.hide_bonus);
        assert_eq!(zone_bonus(hide, map, false, &rules), 0);
    }
}
