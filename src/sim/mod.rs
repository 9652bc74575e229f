//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod collision;
pub mod combatant;
pub mod pickup;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use avatar::{Avatar, MotionState, MoveIntent};
pub use collision::{Hitbox, nearest_index};
pub use combatant::{ArmorRule, Combatant, EntityId, Knockback, Tier, TierStats};
pub use pickup::{Pickup, PickupPhase};
pub use projectile::{Behavior, Blast, Projectile, ProjectileKind};
pub use snapshot::Snapshot;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, roll_tier, select_upgrade, spawn_position, tick};
pub use upgrade::{CATALOG, UpgradeCategory, UpgradeOption, sample_upgrades};
