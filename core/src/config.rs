//! Tunable game constants and rule policies.
//!
//! The core only ever reads a GameConfig. Hosts load one from
//! data/game_config.json (or build it in code) and hand it to the engine.

use crate::{
    error::{SimError, SimResult},
    types::SimTime,
};
use serde::{Deserialize, Serialize};

/// Whether an arrow can hit the player who fired it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfDamagePolicy {
    /// The attacker is a valid target of its own arrow.
    #[default]
    Include,
    /// The attacker is never damaged by its own arrow.
    Exclude,
}

/// What a PlayerJoin does when the id is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateJoinPolicy {
    /// Ignore the join; the existing player is kept untouched.
    #[default]
    Reject,
    /// Reset the existing player in place: new position, dizzy cleared.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Time from attack to impact.
    pub arrow_fly_time: SimTime,
    /// Hit radius around the arrow's target position.
    pub arrow_attack_radius: f64,
    /// How long a hit player stays dizzy.
    pub arrow_dizzy_time: SimTime,
    #[serde(default)]
    pub self_damage: SelfDamagePolicy,
    #[serde(default)]
    pub duplicate_join: DuplicateJoinPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arrow_fly_time:      500.0,
            arrow_attack_radius: 2.0,
            arrow_dizzy_time:    1000.0,
            self_damage:         SelfDamagePolicy::Include,
            duplicate_join:      DuplicateJoinPolicy::Reject,
        }
    }
}

impl GameConfig {
    /// Load from a JSON constants file.
    /// In tests, use GameConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!(
            "Loaded game config from {path}: fly={} radius={} dizzy={}",
            config.arrow_fly_time,
            config.arrow_attack_radius,
            config.arrow_dizzy_time
        );
        Ok(config)
    }

    /// Round numbers that keep test arithmetic exact.
    pub fn default_test() -> Self {
        Self {
            arrow_fly_time:      1.0,
            arrow_attack_radius: 2.0,
            arrow_dizzy_time:    2.0,
            ..Self::default()
        }
    }

    pub fn with_self_damage(mut self, policy: SelfDamagePolicy) -> Self {
        self.self_damage = policy;
        self
    }

    pub fn with_duplicate_join(mut self, policy: DuplicateJoinPolicy) -> Self {
        self.duplicate_join = policy;
        self
    }

    /// Squared hit radius, compared against squared distances.
    pub fn attack_radius_sq(&self) -> f64 {
        self.arrow_attack_radius * self.arrow_attack_radius
    }

    /// Fly and dizzy times must be positive so that an arrow's target time
    /// and a player's dizzy end time always lie strictly in the future.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.arrow_fly_time.is_finite() && self.arrow_fly_time > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!("arrow_fly_time must be positive, got {}", self.arrow_fly_time),
            });
        }
        if !(self.arrow_dizzy_time.is_finite() && self.arrow_dizzy_time > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!("arrow_dizzy_time must be positive, got {}", self.arrow_dizzy_time),
            });
        }
        if !(self.arrow_attack_radius.is_finite() && self.arrow_attack_radius >= 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!(
                    "arrow_attack_radius must be >= 0, got {}",
                    self.arrow_attack_radius
                ),
            });
        }
        Ok(())
    }
}
