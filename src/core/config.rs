//! Duel configuration.
//!
//! Every rule constant the engine consults lives in `DuelConfig`. Callers
//! build one at startup and hand it to `DuelRules` and the `Arena`
//! explicitly; nothing reads configuration from process globals.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a `DuelConfig` is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Seats would start already knocked out.
    #[error("max_hp must be positive (got {0})")]
    NonPositiveHp(i32),
    /// A match needs at least one round.
    #[error("total_rounds must be at least 1")]
    NoRounds,
    /// Damage values must not heal.
    #[error("{name} must not be negative (got {value})")]
    NegativeDamage {
        /// Which damage field.
        name: &'static str,
        /// The offending value.
        value: i32,
    },
    /// The scripted opponent's special-action chance is a probability.
    #[error("opponent_special_chance must be within [0, 1] (got {0})")]
    ChanceOutOfRange(f64),
    /// The JSON document could not be parsed.
    #[error("invalid config document: {0}")]
    Parse(String),
}

/// Complete duel configuration.
///
/// Defaults match the classic rules: 20 HP, 5 rounds, two clubs dealing
/// 4 damage and two flinches dealing 1, a five minute inactivity timeout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Starting hit points for both seats.
    pub max_hp: i32,

    /// Clubs each seat may use per match.
    pub max_clubs: u8,

    /// Flinches each seat may use per match.
    pub max_flinches: u8,

    /// Fixed damage a club deals to the opponent.
    pub club_damage: i32,

    /// Fixed damage a flinch deals to the opponent.
    pub flinch_damage: i32,

    /// Rounds after which the match ends on hit points.
    pub total_rounds: u32,

    /// Inactivity window after which a session may be timed out.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// Probability the scripted opponent spends a club or flinch when one
    /// remains.
    pub opponent_special_chance: f64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            max_hp: 20,
            max_clubs: 2,
            max_flinches: 2,
            club_damage: 4,
            flinch_damage: 1,
            total_rounds: 5,
            timeout: Duration::from_secs(300),
            opponent_special_chance: 0.2,
        }
    }
}

impl DuelConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the starting hit points.
    #[must_use]
    pub fn with_max_hp(mut self, hp: i32) -> Self {
        self.max_hp = hp;
        self
    }

    /// Set the per-match club allowance.
    #[must_use]
    pub fn with_max_clubs(mut self, clubs: u8) -> Self {
        self.max_clubs = clubs;
        self
    }

    /// Set the per-match flinch allowance.
    #[must_use]
    pub fn with_max_flinches(mut self, flinches: u8) -> Self {
        self.max_flinches = flinches;
        self
    }

    /// Set club and flinch damage.
    #[must_use]
    pub fn with_special_damage(mut self, club: i32, flinch: i32) -> Self {
        self.club_damage = club;
        self.flinch_damage = flinch;
        self
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_total_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = rounds;
        self
    }

    /// Set the inactivity timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the scripted opponent's special-action chance.
    #[must_use]
    pub fn with_opponent_special_chance(mut self, chance: f64) -> Self {
        self.opponent_special_chance = chance;
        self
    }

    /// Check that the configuration describes a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hp <= 0 {
            return Err(ConfigError::NonPositiveHp(self.max_hp));
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.club_damage < 0 {
            return Err(ConfigError::NegativeDamage {
                name: "club_damage",
                value: self.club_damage,
            });
        }
        if self.flinch_damage < 0 {
            return Err(ConfigError::NegativeDamage {
                name: "flinch_damage",
                value: self.flinch_damage,
            });
        }
        if !(0.0..=1.0).contains(&self.opponent_special_chance) {
            return Err(ConfigError::ChanceOutOfRange(self.opponent_special_chance));
        }
        Ok(())
    }
}

/// Durations are stored as whole seconds in config documents.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
