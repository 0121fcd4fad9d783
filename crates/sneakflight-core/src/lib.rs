//! Core simulation for Sneakflight: a tick-driven game of staying out of sight of wandering
//! parents until the survival clock runs out.
//!
//! [`GameWorld`] owns every piece of state. Front ends feed it [`Input`]s, call
//! [`GameWorld::step`] on a fixed interval and draw a [`FrameSnapshot`].

use std::fmt;

use rand::{Rng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod config;
pub mod map;
pub mod parents;
pub mod player;
pub mod resolve;
pub mod session;
pub mod snapshot;

pub use config::{GameConfig, RuleSet};
pub use map::{Direction, GridMap, MapError, MapId, MapRegistry, Point, Rect, Terrain};
pub use parents::{PARENT_SLOTS, Parent, ParentPool, ParentSlot};
pub use player::{DisplayState, Player};
pub use resolve::Resolution;
pub use session::{Flow, Input, SessionState};
pub use snapshot::FrameSnapshot;

/// Errors that can occur when constructing a game world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Simulation clock (ticks processed since the current game started).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the next sequential tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Counters advanced by the tick update and reset whenever a game starts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timers {
    /// Ticks since the game started.
    pub game_time: u64,
    /// Survival seconds; the game is won when this reaches the survival goal.
    pub total_time: u32,
    /// Ticks since the last parent spawn roll.
    pub parent_check: u32,
    /// Remaining ticks of the "parent incoming" warning.
    pub warning: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lost,
}

/// Events emitted after processing a world tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickEvents {
    pub tick: Tick,
    /// A survival second elapsed this tick.
    pub interval_scored: bool,
    pub spawned: Option<usize>,
    pub expired: [bool; PARENT_SLOTS],
    pub caught_by: Option<usize>,
    pub outcome: Option<Outcome>,
}

impl TickEvents {
    /// True when nothing noteworthy happened beyond the clock advancing.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        !self.interval_scored
            && self.spawned.is_none()
            && !self.expired.iter().any(|expired| *expired)
            && self.outcome.is_none()
    }
}

/// Whole game state: maps, session, player, parents, clocks and RNG.
pub struct GameWorld {
    config: GameConfig,
    maps: MapRegistry,
    current_map: MapId,
    session: SessionState,
    instructions_visible: bool,
    player: Player,
    parents: ParentPool,
    timers: Timers,
    rng: SmallRng,
}

impl fmt::Debug for GameWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameWorld")
            .field("map", &self.current_map)
            .field("session", &self.session)
            .field("player", &self.player)
            .field("parents", &self.parents.active_count())
            .field("timers", &self.timers)
            .finish()
    }
}

impl GameWorld {
    /// Validate the configuration, build the map catalog and park the session on the menu.
    pub fn new(config: GameConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let maps = MapRegistry::builtin()?;
        let rng = config.seeded_rng();
        let current_map = config.starting_map;
        let player = Player::spawn_at(maps.get(current_map).bed_anchor());
        Ok(Self {
            config,
            maps,
            current_map,
            session: SessionState::Menu,
            instructions_visible: false,
            player,
            parents: ParentPool::new(),
            timers: Timers::default(),
            rng,
        })
    }

    /// Load `map` with a fresh player, an empty parent pool and zeroed timers, then play.
    pub fn start(&mut self, map: MapId) {
        self.current_map = map;
        self.player = Player::spawn_at(self.maps.get(map).bed_anchor());
        self.parents.clear();
        self.timers = Timers::default();
        self.instructions_visible = false;
        info!(map = %map, name = map.name(), "game started");
        self.set_session(SessionState::Playing);
    }

    /// Start over on the current map.
    pub fn restart(&mut self) {
        self.start(self.current_map);
    }

    /// Advance the simulation by one tick. Outside of [`SessionState::Playing`] this does nothing.
    pub fn step(&mut self) -> TickEvents {
        let mut events = TickEvents {
            tick: Tick(self.timers.game_time),
            ..TickEvents::default()
        };
        if self.session != SessionState::Playing {
            return events;
        }
        let rules = self.config.rules;

        events.tick = events.tick.next();
        self.timers.game_time = events.tick.0;
        self.player.count_tick();
        self.timers.warning = self.timers.warning.saturating_sub(1);

        if self
            .timers
            .game_time
            .is_multiple_of(u64::from(rules.scoring_interval))
        {
            self.timers.total_time += 1;
            self.player.award(rules.interval_bonus);
            events.interval_scored = true;
            debug!(total_time = self.timers.total_time, score = self.player.score(), "survival second");
            if self.timers.total_time >= rules.survival_goal {
                self.finish(Outcome::Win);
                events.outcome = Some(Outcome::Win);
                return events;
            }
        }

        let map = self.maps.get(self.current_map);

        self.timers.parent_check += 1;
        if self.timers.parent_check >= rules.parent_check_period {
            self.timers.parent_check = 0;
            if self.rng.random_bool(rules.parent_check_chance) {
                events.spawned = self.parents.try_spawn(map, &rules, &mut self.rng);
                self.timers.warning = rules.warning_ticks;
            }
        }

        events.expired = self.parents.tick_move_all(map, &rules, &mut self.rng);

        match resolve::resolve(self.player.position(), map, &self.parents, &rules) {
            Resolution::Caught { slot } => {
                self.player.set_display(DisplayState::Caught);
                events.caught_by = Some(slot);
                events.outcome = Some(Outcome::Lost);
                self.finish(Outcome::Lost);
            }
            Resolution::Clear { display, bonus } => {
                self.player.set_display(display);
                self.player.award(bonus);
            }
        }
        events
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(
            ?outcome,
            map = %self.current_map,
            score = self.player.score(),
            total_time = self.timers.total_time,
            "game over"
        );
        self.set_session(match outcome {
            Outcome::Win => SessionState::Win,
            Outcome::Lost => SessionState::Lost,
        });
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> SessionState {
        self.session
    }

    #[must_use]
    pub const fn instructions_visible(&self) -> bool {
        self.instructions_visible
    }

    #[must_use]
    pub const fn maps(&self) -> &MapRegistry {
        &self.maps
    }

    #[must_use]
    pub const fn current_map(&self) -> MapId {
        self.current_map
    }

    /// Layout of the map currently loaded.
    #[must_use]
    pub fn map(&self) -> &GridMap {
        self.maps.get(self.current_map)
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Move the player straight to `position` (for scripted scenarios).
    ///
    /// Returns `false` and leaves the player where it was when `position` is off the map.
    pub fn place_player(&mut self, position: Point) -> bool {
        let map = self.maps.get(self.current_map);
        self.player.place(position, map)
    }

    #[must_use]
    pub const fn parents(&self) -> &ParentPool {
        &self.parents
    }

    /// Mutable access to the parent pool (for scripted scenarios).
    pub fn parents_mut(&mut self) -> &mut ParentPool {
        &mut self.parents
    }

    #[must_use]
    pub const fn timers(&self) -> Timers {
        self.timers
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MAP_HEIGHT;

    fn quiet_world(map: MapId) -> GameWorld {
        let mut world = GameWorld::new(GameConfig {
            rng_seed: Some(42),
            starting_map: map,
            rules: RuleSet::without_parents(),
        })
        .expect("world");
        world.start(map);
        world
    }

    #[test]
    fn new_world_waits_on_the_menu() {
        let mut world = GameWorld::new(GameConfig::default()).expect("world");
        assert_eq!(world.session(), SessionState::Menu);
        let events = world.step();
        assert_eq!(events, TickEvents::default());
        assert_eq!(world.timers(), Timers::default());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.rules.parent_check_period = 0;
        assert!(matches!(
            GameWorld::new(config),
            Err(WorldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn warning_counts_down_from_tick_start() {
        let mut world = quiet_world(MapId::EuropeUs);
        world.timers.warning = 2;
        world.step();
        assert_eq!(world.timers().warning, 1);
        world.step();
        world.step();
        assert_eq!(world.timers().warning, 0);
    }

    #[test]
    fn guaranteed_roll_spawns_and_raises_warning() {
        let mut world = GameWorld::new(GameConfig {
            rng_seed: Some(8),
            starting_map: MapId::ViennaHotel,
            rules: RuleSet {
                parent_check_chance: 1.0,
                capture_range: 0,
                ..RuleSet::default()
            },
        })
        .expect("world");
        world.start(MapId::ViennaHotel);

        for _ in 0..14 {
            let events = world.step();
            assert!(events.spawned.is_none());
        }
        let events = world.step();
        assert_eq!(events.spawned, Some(0));
        assert_eq!(world.timers().parent_check, 0);
        assert_eq!(world.timers().warning, 20);
        assert_eq!(world.parents().active_count(), 1);
    }

    #[test]
    fn tick_events_carry_the_advanced_clock() {
        let mut world = quiet_world(MapId::EuropeUs);
        for expected in 1..=9 {
            let events = world.step();
            assert_eq!(events.tick, Tick(expected));
            assert!(events.is_quiet());
        }
        let events = world.step();
        assert_eq!(events.tick, Tick(9).next());
        assert!(events.interval_scored);
        assert!(!events.is_quiet());
    }

    #[test]
    fn expiries_and_outcomes_are_not_quiet() {
        let expired = TickEvents {
            expired: [false, true],
            ..TickEvents::default()
        };
        assert!(!expired.is_quiet());
        let lost = TickEvents {
            caught_by: Some(0),
            outcome: Some(Outcome::Lost),
            ..TickEvents::default()
        };
        assert!(!lost.is_quiet());
        assert!(TickEvents::default().is_quiet());
    }

    #[test]
    fn place_player_rejects_off_map_cells() {
        let mut world = quiet_world(MapId::Japan);
        let bed = world.map().bed_anchor();
        assert!(!world.place_player(Point::new(3, MAP_HEIGHT)));
        assert!(!world.place_player(Point::new(-2, 3)));
        assert_eq!(world.player().position(), bed);
        assert!(world.place_player(Point::new(0, 0)));
        assert_eq!(world.player().position(), Point::new(0, 0));
    }

    #[test]
    fn paused_world_does_not_advance() {
        let mut world = quiet_world(MapId::Japan);
        world.step();
        world.apply_input(Input::PauseToggle);
        let before = world.timers();
        for _ in 0..20 {
            world.step();
        }
        assert_eq!(world.timers(), before);
        assert_eq!(world.player().ticks_played(), 1);
    }

    #[test]
    fn restart_resets_progress_on_the_same_map() {
        let mut world = quiet_world(MapId::ViennaHotel);
        for _ in 0..25 {
            world.step();
        }
        assert!(world.player().score() > 0);
        world.restart();
        assert_eq!(world.current_map(), MapId::ViennaHotel);
        assert_eq!(world.player().score(), 0);
        assert_eq!(world.timers(), Timers::default());
        assert_eq!(world.session(), SessionState::Playing);
    }
}
