//! Read-only view of the session for the presentation layer
//!
//! Positions are raw simulation coordinates; any screen shake or camera
//! offset is applied by the renderer.

use glam::Vec2;
use serde::Serialize;

use super::avatar::MotionState;
use super::combatant::{EntityId, Tier};
use super::pickup::PickupPhase;
use super::projectile::ProjectileKind;
use super::state::{GamePhase, GameState};
use super::upgrade::{UpgradeCategory, UpgradeOption};

#[derive(Debug, Clone, Serialize)]
pub struct AvatarView {
    pub pos: Vec2,
    pub facing_left: bool,
    pub motion: MotionState,
    pub health: u32,
    pub max_health: u32,
    pub level: u32,
    pub xp: u32,
    /// Experience still needed for the next level
    pub xp_to_next: u32,
    pub projectile_kind: ProjectileKind,
    pub armor_piercing: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombatantView {
    pub id: EntityId,
    pub tier: Tier,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub facing_left: bool,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub kind: ProjectileKind,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub pos: Vec2,
    pub phase: PickupPhase,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpgradeView {
    pub option: UpgradeOption,
    pub name: &'static str,
    pub category: UpgradeCategory,
    pub description: &'static str,
}

/// Escalation boss health bar data
#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub id: EntityId,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub escalation_level: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub avatar: AvatarView,
    pub combatants: Vec<CombatantView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    /// Non-empty only in `LevelUpMenu`
    pub upgrade_options: Vec<UpgradeView>,
    pub kill_count: u32,
    pub escalation_level: u32,
    pub boss: Option<BossView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let a = &state.avatar;
        let avatar = AvatarView {
            pos: a.pos,
            facing_left: a.facing_left,
            motion: a.motion,
            health: a.health,
            max_health: a.max_health,
            level: a.level,
            xp: a.xp,
            xp_to_next: a.xp_for_next_level().saturating_sub(a.xp),
            projectile_kind: a.projectile_kind,
            armor_piercing: a.armor_piercing,
        };

        let combatants = state
            .combatants
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| CombatantView {
                id: c.id,
                tier: c.tier,
                pos: c.pos,
                health: c.health,
                max_health: c.max_health,
                facing_left: c.facing_left,
                scale: c.scale,
            })
            .collect();

        let projectiles = a
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                pos: p.pos,
                kind: p.kind(),
                size: p.size,
            })
            .collect();

        let pickups = state
            .pickups
            .iter()
            .map(|p| PickupView {
                pos: p.pos,
                phase: p.phase,
            })
            .collect();

        let upgrade_options = if state.phase == GamePhase::LevelUpMenu {
            state
                .upgrade_options
                .iter()
                .map(|o| UpgradeView {
                    option: *o,
                    name: o.name(),
                    category: o.category(),
                    description: o.description(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let boss = state.boss().map(|b| BossView {
            id: b.id,
            pos: b.pos,
            health: b.health,
            max_health: b.max_health,
            escalation_level: b.escalation_level,
        });

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            avatar,
            combatants,
            projectiles,
            pickups,
            upgrade_options,
            kill_count: state.kill_count,
            escalation_level: state.escalation_level,
            boss,
        }
    }
}
