//! Fixed-capacity pool of wandering parents.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RuleSet;
use crate::map::{Direction, GridMap, Point};

/// Number of parents that may be active at once.
pub const PARENT_SLOTS: usize = 2;

/// Glyph drawn for an active parent.
pub const PARENT_GLYPH: char = 'P';

/// A parent currently walking the map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parent {
    pub position: Point,
    /// Ticks left before the parent leaves.
    pub lifetime: u32,
    pub direction: Direction,
    pub glyph: char,
}

impl Parent {
    #[must_use]
    pub const fn new(position: Point, lifetime: u32, direction: Direction) -> Self {
        Self {
            position,
            lifetime,
            direction,
            glyph: PARENT_GLYPH,
        }
    }
}

/// Occupancy of one pool slot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParentSlot {
    #[default]
    Inactive,
    Active(Parent),
}

impl ParentSlot {
    #[must_use]
    pub const fn parent(&self) -> Option<&Parent> {
        match self {
            Self::Active(parent) => Some(parent),
            Self::Inactive => None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentPool {
    slots: [ParentSlot; PARENT_SLOTS],
}

impl ParentPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the first free slot with a fresh parent.
    ///
    /// Returns the filled slot index, or `None` when both slots are already taken. The spawn
    /// cell is any in-bounds cell, walls included; a parent dropped onto a wall stays there
    /// until a walkable neighbour lies along its direction.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        map: &GridMap,
        rules: &RuleSet,
        rng: &mut R,
    ) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !slot.is_active())?;
        let position = map.random_point(rng);
        let direction = Direction::random(rng);
        self.slots[index] = ParentSlot::Active(Parent::new(
            position,
            rules.parent_lifetime,
            direction,
        ));
        debug!(slot = index, x = position.x, y = position.y, ?direction, "parent spawned");
        Some(index)
    }

    /// Advance every active parent by one tick.
    ///
    /// Returns, per slot, whether that parent's lifetime ran out this tick.
    pub fn tick_move_all<R: Rng + ?Sized>(
        &mut self,
        map: &GridMap,
        rules: &RuleSet,
        rng: &mut R,
    ) -> [bool; PARENT_SLOTS] {
        let mut expired = [false; PARENT_SLOTS];
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let ParentSlot::Active(parent) = slot else {
                continue;
            };
            parent.lifetime = parent.lifetime.saturating_sub(1);
            if parent.lifetime == 0 {
                debug!(slot = index, "parent left");
                *slot = ParentSlot::Inactive;
                expired[index] = true;
                continue;
            }
            if rng.random_bool(rules.parent_turn_chance) {
                parent.direction = Direction::random(rng);
            }
            let next = parent.position.step(parent.direction);
            if map.is_walkable(next) {
                parent.position = next;
            }
        }
        expired
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    #[must_use]
    pub fn any_active(&self) -> bool {
        self.slots.iter().any(ParentSlot::is_active)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(ParentSlot::is_active)
    }

    /// Active parents with their slot indices.
    pub fn active(&self) -> impl Iterator<Item = (usize, &Parent)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.parent().map(|parent| (index, parent)))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParentSlot> {
        self.slots.get(index)
    }

    #[must_use]
    pub const fn slots(&self) -> &[ParentSlot; PARENT_SLOTS] {
        &self.slots
    }

    /// Put `parent` into `index` directly, replacing whatever was there.
    ///
    /// Returns `false` when the index is out of range.
    pub fn place(&mut self, index: usize, parent: Parent) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = ParentSlot::Active(parent);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.slots = [ParentSlot::Inactive; PARENT_SLOTS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapId, MapRegistry};
    use rand::{SeedableRng, rngs::SmallRng};

    fn europe() -> GridMap {
        MapRegistry::builtin()
            .expect("maps")
            .get(MapId::EuropeUs)
            .clone()
    }

    #[test]
    fn spawn_fills_slots_in_order_then_caps() {
        let map = europe();
        let rules = RuleSet::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pool = ParentPool::new();

        assert_eq!(pool.try_spawn(&map, &rules, &mut rng), Some(0));
        assert_eq!(pool.try_spawn(&map, &rules, &mut rng), Some(1));
        assert!(pool.is_full());

        let before = pool.clone();
        assert_eq!(pool.try_spawn(&map, &rules, &mut rng), None);
        assert_eq!(pool, before);
        assert_eq!(pool.active_count(), PARENT_SLOTS);
    }

    #[test]
    fn spawned_parents_start_with_full_lifetime_in_bounds() {
        let map = europe();
        let rules = RuleSet::default();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let mut pool = ParentPool::new();
            let index = pool.try_spawn(&map, &rules, &mut rng).expect("free slot");
            let parent = pool.get(index).and_then(ParentSlot::parent).expect("active");
            assert_eq!(parent.lifetime, rules.parent_lifetime);
            assert_eq!(parent.glyph, PARENT_GLYPH);
            assert!(map.contains(parent.position));
        }
    }

    #[test]
    fn lifetime_expiry_frees_the_slot_without_moving() {
        let map = europe();
        let rules = RuleSet::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut pool = ParentPool::new();
        let start = Point::new(10, 10);
        pool.place(1, Parent::new(start, 1, Direction::Right));

        let expired = pool.tick_move_all(&map, &rules, &mut rng);
        assert_eq!(expired, [false, true]);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.get(1), Some(&ParentSlot::Inactive));
    }

    #[test]
    fn walls_stop_parents() {
        let map = europe();
        let rules = RuleSet {
            parent_turn_chance: 0.0,
            ..RuleSet::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let mut pool = ParentPool::new();
        pool.place(0, Parent::new(Point::new(1, 1), 10, Direction::Up));

        pool.tick_move_all(&map, &rules, &mut rng);
        let parent = pool.get(0).and_then(ParentSlot::parent).expect("active");
        assert_eq!(parent.position, Point::new(1, 1));
        assert_eq!(parent.lifetime, 9);

        pool.clear();
        pool.place(0, Parent::new(Point::new(1, 1), 10, Direction::Right));
        pool.tick_move_all(&map, &rules, &mut rng);
        let parent = pool.get(0).and_then(ParentSlot::parent).expect("active");
        assert_eq!(parent.position, Point::new(2, 1));
    }

    #[test]
    fn map_edge_stops_parents() {
        let map = europe();
        let rules = RuleSet {
            parent_turn_chance: 0.0,
            ..RuleSet::default()
        };
        let mut rng = SmallRng::seed_from_u64(21);
        let mut pool = ParentPool::new();
        let edge = Point::new(0, 5);
        pool.place(0, Parent::new(edge, 10, Direction::Left));

        for _ in 0..3 {
            pool.tick_move_all(&map, &rules, &mut rng);
        }
        let parent = pool.get(0).and_then(ParentSlot::parent).expect("active");
        assert_eq!(parent.position, edge);
        assert_eq!(parent.direction, Direction::Left);
        assert_eq!(parent.lifetime, 7);
    }

    #[test]
    fn certain_turn_chance_rerolls_direction() {
        let map = europe();
        let rules = RuleSet {
            parent_turn_chance: 1.0,
            ..RuleSet::default()
        };
        let mut rng = SmallRng::seed_from_u64(17);
        let mut pool = ParentPool::new();
        pool.place(0, Parent::new(Point::new(10, 10), 40, Direction::Right));

        let mut turned = false;
        for _ in 0..20 {
            pool.tick_move_all(&map, &rules, &mut rng);
            let parent = pool.get(0).and_then(ParentSlot::parent).expect("active");
            assert!(map.contains(parent.position));
            turned |= parent.direction != Direction::Right;
        }
        assert!(turned, "direction never changed with turn chance 1.0");
    }

    #[test]
    fn place_rejects_out_of_range_slots() {
        let mut pool = ParentPool::new();
        assert!(!pool.place(PARENT_SLOTS, Parent::new(Point::new(1, 1), 5, Direction::Left)));
        assert!(!pool.any_active());
    }
}
