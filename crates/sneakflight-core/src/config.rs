use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::WorldError;
use crate::map::MapId;

/// Balance constants driving the simulation.
///
/// These are not a player-facing difficulty knob; they are fixed for the shipped game and only
/// vary in tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    /// Survival seconds required to win.
    pub survival_goal: u32,
    /// Ticks per survival second.
    pub scoring_interval: u32,
    /// Score granted every survival second.
    pub interval_bonus: u32,
    /// Ticks between parent spawn rolls.
    pub parent_check_period: u32,
    /// Probability that a spawn roll succeeds; 0 disables spawning.
    pub parent_check_chance: f64,
    /// Ticks a parent stays active after spawning.
    pub parent_lifetime: u32,
    /// Per-tick probability that an active parent picks a new direction.
    pub parent_turn_chance: f64,
    /// Manhattan distance at which an active parent catches an exposed player.
    pub capture_range: u32,
    /// Per-tick bonus for hiding while a parent is active.
    pub hide_bonus: u32,
    /// Per-tick bonus for staying on the bed while the house is quiet.
    pub bed_bonus: u32,
    /// Ticks the "parent incoming" warning stays on screen.
    pub warning_ticks: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            survival_goal: 100,
            scoring_interval: 10,
            interval_bonus: 10,
            parent_check_period: 15,
            parent_check_chance: 0.30,
            parent_lifetime: 50,
            parent_turn_chance: 0.30,
            capture_range: 3,
            hide_bonus: 5,
            bed_bonus: 2,
            warning_ticks: 20,
        }
    }
}

impl RuleSet {
    /// Rules with parent spawning switched off.
    #[must_use]
    pub fn without_parents() -> Self {
        Self {
            parent_check_chance: 0.0,
            ..Self::default()
        }
    }
}

/// Static configuration for a game world.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    /// Map loaded by [`crate::GameWorld::start`] when no other choice is made.
    pub starting_map: MapId,
    pub rules: RuleSet,
}

impl GameConfig {
    /// Reject rule sets the tick update cannot run with.
    pub fn validate(&self) -> Result<(), WorldError> {
        let rules = &self.rules;
        if rules.survival_goal == 0 {
            return Err(WorldError::InvalidConfig("survival_goal must be non-zero"));
        }
        if rules.scoring_interval == 0 {
            return Err(WorldError::InvalidConfig(
                "scoring_interval must be non-zero",
            ));
        }
        if rules.parent_check_period == 0 {
            return Err(WorldError::InvalidConfig(
                "parent_check_period must be non-zero",
            ));
        }
        if rules.parent_lifetime == 0 {
            return Err(WorldError::InvalidConfig("parent_lifetime must be non-zero"));
        }
        if !(0.0..=1.0).contains(&rules.parent_check_chance) {
            return Err(WorldError::InvalidConfig(
                "parent_check_chance must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&rules.parent_turn_chance) {
            return Err(WorldError::InvalidConfig(
                "parent_turn_chance must be within [0, 1]",
            ));
        }
        Ok(())
    }

    pub(crate) fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_match_the_shipped_game() {
        let rules = RuleSet::default();
        assert_eq!(rules.survival_goal, 100);
        assert_eq!(rules.parent_check_period, 15);
        assert_eq!(rules.parent_lifetime, 50);
        assert_eq!(rules.capture_range, 3);
        assert!((rules.parent_check_chance - 0.30).abs() < f64::EPSILON);
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_rules() {
        let mut config = GameConfig::default();
        config.rules.scoring_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(WorldError::InvalidConfig(_))
        ));

        let mut config = GameConfig::default();
        config.rules.parent_check_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(WorldError::InvalidConfig(_))
        ));

        let mut config = GameConfig::default();
        config.rules.parent_turn_chance = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn seeded_configs_share_a_stream() {
        use rand::Rng;
        let config = GameConfig {
            rng_seed: Some(7),
            ..GameConfig::default()
        };
        let a: u64 = config.seeded_rng().random();
        let b: u64 = config.seeded_rng().random();
        assert_eq!(a, b);
    }
}
