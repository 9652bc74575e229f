//! Data-driven game balance
//!
//! Every tuning constant the simulation reads lives here. Loaded from JSON by
//! the native runner; the simulation itself never touches the filesystem.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Errors that can occur while loading tuning data.
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// Failed to read the tuning file.
    #[error("Failed to read tuning file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse tuning JSON.
    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its legal range.
    #[error("Invalid tuning value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Relative spawn weights per enemy tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierWeights {
    pub regular: f32,
    pub flying: f32,
    pub armored: f32,
    pub boss: f32,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            regular: 0.55,
            flying: 0.28,
            armored: 0.12,
            boss: 0.05,
        }
    }
}

impl TierWeights {
    pub fn total(&self) -> f32 {
        self.regular + self.flying + self.armored + self.boss
    }
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    /// Pixels moved per tick per pressed axis
    pub player_speed: f32,
    /// Side length of the player hitbox
    pub player_size: f32,
    pub player_max_health: u32,
    /// Move diagonally at `player_speed` instead of `player_speed` per axis
    pub normalize_diagonal: bool,

    // === Weapons ===
    /// Ticks between shots
    pub fire_cooldown_ticks: u32,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    /// Angle between adjacent shots of a multi-shot bundle
    pub spread_degrees: f32,
    /// Acceleration per tick applied to homing projectiles
    pub homing_strength: f32,
    pub explosion_radius: f32,
    pub explosion_damage: u32,
    pub explosion_knockback: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    /// Distance outside the arena edge where enemies appear
    pub spawn_margin: f32,
    pub spawn_interval_ticks: u32,
    pub tier_weights: TierWeights,
    /// Knockback distance applied when an enemy touches the player
    pub pushback_distance: f32,
    /// Knockback distance consumed per tick
    pub knockback_speed: f32,
    /// Damage dealt to the player per tick of contact
    pub contact_damage: u32,

    // === Boss escalation ===
    /// Kills between forced boss spawns
    pub boss_kill_interval: u32,
    /// Remove non-boss enemies when an escalation boss arrives
    pub boss_clears_field: bool,
    /// Ticks between boss shockwaves (0 disables)
    pub boss_attack_interval_ticks: u32,
    pub shockwave_count: u32,
    pub shockwave_speed: f32,
    pub shockwave_size: f32,

    // === Pickups ===
    pub pickup_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_speed: 3.0,
            player_size: 40.0,
            player_max_health: 5,
            normalize_diagonal: false,

            fire_cooldown_ticks: 20,
            bullet_speed: 10.0,
            bullet_size: 10.0,
            spread_degrees: 10.0,
            homing_strength: 0.1,
            explosion_radius: 50.0,
            explosion_damage: 2,
            explosion_knockback: 40.0,

            enemy_speed: 1.0,
            spawn_margin: 50.0,
            spawn_interval_ticks: 60,
            tier_weights: TierWeights::default(),
            pushback_distance: 80.0,
            knockback_speed: 5.0,
            contact_damage: 1,

            boss_kill_interval: 10,
            boss_clears_field: true,
            boss_attack_interval_ticks: 240,
            shockwave_count: 8,
            shockwave_speed: 5.0,
            shockwave_size: 15.0,

            pickup_size: 20.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("player_size", self.player_size)?;
        positive("bullet_size", self.bullet_size)?;
        positive("knockback_speed", self.knockback_speed)?;
        positive("pickup_size", self.pickup_size)?;

        if self.spawn_margin < 0.0 || !self.spawn_margin.is_finite() {
            return Err(TuningError::Invalid {
                field: "spawn_margin",
                reason: "must be non-negative",
            });
        }
        if self.spawn_interval_ticks == 0 {
            return Err(TuningError::Invalid {
                field: "spawn_interval_ticks",
                reason: "must be at least 1",
            });
        }
        if self.boss_kill_interval == 0 {
            return Err(TuningError::Invalid {
                field: "boss_kill_interval",
                reason: "must be at least 1",
            });
        }
        if self.player_max_health == 0 {
            return Err(TuningError::Invalid {
                field: "player_max_health",
                reason: "must be at least 1",
            });
        }

        let w = &self.tier_weights;
        let weights = [w.regular, w.flying, w.armored, w.boss];
        if weights.iter().any(|x| *x < 0.0 || !x.is_finite()) || w.total() <= 0.0 {
            return Err(TuningError::Invalid {
                field: "tier_weights",
                reason: "weights must be non-negative with a positive sum",
            });
        }

        Ok(())
    }
}
