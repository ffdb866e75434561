/// Upgrade offered to the player on level up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Upgrade {
    /// +5 damage.
    Damage,
    /// Fire cooldown ×0.85, never below 6 ticks.
    FireRate,
    /// +2 projectile speed.
    ProjectileSpeed,
    /// +1 pierce.
    Pierce,
    /// +20 maximum health and heal by the same amount.
    MaxHealth,
    /// +0.5 movement speed.
    MoveSpeed,
    /// +20 pickup range.
    PickupRange,
    /// Switches to the three-way fan.
    SpreadShot,
    /// Switches to bouncing projectiles.
    BouncingShot,
    /// Switches to homing projectiles.
    HomingShot,
    /// Switches to heavy projectiles.
    HeavyShot,
    /// Switches back to single linear projectiles.
    NormalShot,
    /// +20 damage.
    MegaDamage,
    /// Fire cooldown ×0.6, never below 3 ticks.
    HyperFireRate,
    /// +2 movement speed.
    LightningSpeed,
    /// +3 pierce.
    PierceMaster,
    /// +50 maximum health and a full heal.
    TitanHealth,
    /// +50 pickup range.
    OrbMagnet,
}

impl Upgrade {
    /// Regular upgrade pool.
    pub const STANDARD: [Upgrade; 12] = [
        Upgrade::Damage,
        Upgrade::FireRate,
        Upgrade::ProjectileSpeed,
        Upgrade::Pierce,
        Upgrade::MaxHealth,
        Upgrade::MoveSpeed,
        Upgrade::PickupRange,
        Upgrade::SpreadShot,
        Upgrade::BouncingShot,
        Upgrade::HomingShot,
        Upgrade::HeavyShot,
        Upgrade::NormalShot,
    ];

    /// Rare, stronger upgrade pool.
    pub const UBER: [Upgrade; 6] = [
        Upgrade::MegaDamage,
        Upgrade::HyperFireRate,
        Upgrade::LightningSpeed,
        Upgrade::PierceMaster,
        Upgrade::TitanHealth,
        Upgrade::OrbMagnet,
    ];

    /// Reports whether the upgrade belongs to the uber pool.
    #[must_use]
    pub fn is_uber(self) -> bool {
        Self::UBER.contains(&self)
    }
}

/// Skill unlocked from the skill tree, carrying its invested level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Skill {
    /// Projectiles explode on hit.
    ExplosiveShot,
    /// Hits spawn follow-up projectiles, one per level.
    Ricochet {
        /// Invested levels.
        level: u32,
    },
    /// Hits heal the player by 5% of dealt damage.
    LeechLife,
    /// Projectiles split into fragments on hit or expiry.
    ClusterShot,
    /// +10% critical chance per level.
    CriticalStrikes {
        /// Invested levels.
        level: u32,
    },
    /// +1 fanned projectile per level.
    Multishot {
        /// Invested levels.
        level: u32,
    },
    /// Enemies take +15% damage per level.
    ArmorBreaker {
        /// Invested levels.
        level: u32,
    },
    /// +15 damage per level.
    HeavyHitter {
        /// Invested levels.
        level: u32,
    },
    /// +1 pierce per level.
    PiercingShots {
        /// Invested levels.
        level: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_do_not_overlap() {
        assert!(Upgrade::STANDARD.iter().all(|upgrade| !upgrade.is_uber()));
        assert!(Upgrade::UBER.iter().all(|upgrade| upgrade.is_uber()));
    }
}
