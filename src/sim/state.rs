//! Session state
//!
//! Everything the simulation owns lives here: the avatar, the live entity
//! collections, counters, and the seeded RNG. Nothing outside `sim` mutates
//! it except through [`super::tick::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::combatant::{Combatant, EntityId, Tier};
use super::pickup::Pickup;
use super::upgrade::UpgradeOption;
use crate::tuning::{Tuning, TuningError};

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Waiting for the player to pick one of three upgrades
    LevelUpMenu,
    /// Avatar health reached zero
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub avatar: Avatar,
    /// Live combatants in spawn order
    pub combatants: Vec<Combatant>,
    pub pickups: Vec<Pickup>,
    /// Choices shown while in `LevelUpMenu`
    pub upgrade_options: Vec<UpgradeOption>,
    /// Running ticks since the last ambient spawn
    pub spawn_timer: u32,
    pub kill_count: u32,
    pub escalation_level: u32,
    /// Boss spawned by escalation, if still alive
    pub current_boss: Option<EntityId>,
    /// Simulation tick counter (Running ticks only)
    pub time_ticks: u64,
    /// Set by the quit trigger; the frame loop stops when it sees this
    pub quit_requested: bool,
    pub(crate) rng: Pcg32,
    next_id: EntityId,
}

impl GameState {
    /// New session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom tuning, rejected if any value is out of range
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let avatar = Avatar::new(&tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Running,
            avatar,
            combatants: Vec::new(),
            pickups: Vec::new(),
            upgrade_options: Vec::new(),
            spawn_timer: 0,
            kill_count: 0,
            escalation_level: 0,
            current_boss: None,
            time_ticks: 0,
            quit_requested: false,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run. The RNG stream keeps going.
    pub fn reset(&mut self) {
        self.avatar = Avatar::new(&self.tuning);
        self.combatants.clear();
        self.pickups.clear();
        self.upgrade_options.clear();
        self.spawn_timer = 0;
        self.kill_count = 0;
        self.escalation_level = 0;
        self.current_boss = None;
        self.phase = GamePhase::Running;
        log::info!("Session reset");
    }

    /// Spawn a combatant of the given tier at `pos`
    pub fn spawn_combatant(&mut self, tier: Tier, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.combatants
            .push(Combatant::new(id, tier, pos, self.tuning.enemy_speed));
        id
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id && c.is_alive())
    }

    /// The escalation boss, if it is still alive
    pub fn boss(&self) -> Option<&Combatant> {
        self.current_boss.and_then(|id| self.combatant(id))
    }

    /// Position of the live combatant closest to the avatar
    pub fn nearest_combatant_pos(&self) -> Option<Vec2> {
        let origin = self.avatar.pos;
        self.combatants
            .iter()
            .filter(|c| c.is_alive())
            .min_by(|a, b| {
                a.pos
                    .distance_squared(origin)
                    .partial_cmp(&b.pos.distance_squared(origin))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|c| c.pos)
    }

    #[inline]
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.tuning.arena_width, self.tuning.arena_height)
    }
}
