//! Level-up upgrade catalog

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::UPGRADE_CHOICES;

/// Which avatar attribute an upgrade touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeCategory {
    BulletKind,
    FireRate,
    ArmorPiercing,
    MaxHealth,
}

/// One entry of the fixed upgrade catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeOption {
    HomingBullets,
    ExplosiveRounds,
    ArmorPiercing,
    RapidFire,
    HealthBoost,
}

/// Every upgrade that can be offered
pub const CATALOG: [UpgradeOption; 5] = [
    UpgradeOption::HomingBullets,
    UpgradeOption::ExplosiveRounds,
    UpgradeOption::ArmorPiercing,
    UpgradeOption::RapidFire,
    UpgradeOption::HealthBoost,
];

impl UpgradeOption {
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeOption::HomingBullets => "Homing Bullets",
            UpgradeOption::ExplosiveRounds => "Explosive Rounds",
            UpgradeOption::ArmorPiercing => "Armor Piercing",
            UpgradeOption::RapidFire => "Rapid Fire",
            UpgradeOption::HealthBoost => "Health Boost",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeOption::HomingBullets => "Bullets track enemies",
            UpgradeOption::ExplosiveRounds => "Bullets explode on impact",
            UpgradeOption::ArmorPiercing => "Ignore enemy armor",
            UpgradeOption::RapidFire => "Double fire rate",
            UpgradeOption::HealthBoost => "+2 Max Health",
        }
    }

    pub fn category(&self) -> UpgradeCategory {
        match self {
            UpgradeOption::HomingBullets | UpgradeOption::ExplosiveRounds => {
                UpgradeCategory::BulletKind
            }
            UpgradeOption::ArmorPiercing => UpgradeCategory::ArmorPiercing,
            UpgradeOption::RapidFire => UpgradeCategory::FireRate,
            UpgradeOption::HealthBoost => UpgradeCategory::MaxHealth,
        }
    }
}

/// Draw the level-up choices from the catalog without replacement
pub fn sample_upgrades<R: Rng + ?Sized>(rng: &mut R) -> Vec<UpgradeOption> {
    rand::seq::index::sample(rng, CATALOG.len(), UPGRADE_CHOICES)
        .into_iter()
        .map(|i| CATALOG[i])
        .collect()
}
