use std::collections::VecDeque;

use glam::Vec2;

use crate::{
    projectile::ProjectileKind, CellCoord, Cooldown, Direction, EntityId, Health, Rewards,
    TILE_SIZE,
};

/// Enemy archetypes that can enter the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Baseline melee chaser.
    Normal,
    /// Slow melee chaser with heavy touch damage.
    Brute,
    /// Very slow melee chaser with a large health pool.
    Tank,
    /// Quick, fragile melee chaser.
    Fast,
    /// Ranged attacker firing straight shots.
    Shooter,
    /// Ranged attacker lobbing heavy globs over a short range.
    Spitter,
    /// Ranged attacker firing homing bolts.
    Wizard,
    /// Ranged attacker firing fast, long-range arrows.
    Archer,
    /// Miniature boss firing heavy piercing shots.
    Bossling,
    /// Chaser that periodically teleports next to the player.
    Ambusher,
    /// Chaser that detonates when it dies.
    Exploder,
    /// Elite melee chaser with a special attack.
    Miniboss,
    /// Arena boss with continuous ranged fire.
    Boss,
}

impl EnemyKind {
    /// Regular kinds the spawning director may roll.
    pub const REGULAR: [EnemyKind; 11] = [
        EnemyKind::Normal,
        EnemyKind::Brute,
        EnemyKind::Tank,
        EnemyKind::Fast,
        EnemyKind::Shooter,
        EnemyKind::Spitter,
        EnemyKind::Wizard,
        EnemyKind::Archer,
        EnemyKind::Bossling,
        EnemyKind::Ambusher,
        EnemyKind::Exploder,
    ];

    /// Factor applied to the base kill rewards.
    #[must_use]
    pub const fn reward_multiplier(self) -> u32 {
        match self {
            Self::Miniboss => 5,
            Self::Boss => 10,
            _ => 1,
        }
    }

    /// Reports whether the kind attacks with projectiles on a cooldown.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        matches!(
            self,
            Self::Shooter | Self::Spitter | Self::Wizard | Self::Archer | Self::Bossling
        )
    }
}

/// Spawn-time statistics computed by the roster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Maximum and starting health.
    pub max_health: f32,
    /// Movement speed in world units per tick.
    pub speed: f32,
    /// Damage dealt by a touch attack.
    pub touch_damage: f32,
    /// Gold and experience granted on death.
    pub rewards: Rewards,
}

/// Projectile parameters used by ranged attacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotProfile {
    /// Physics variant of the fired projectile.
    pub kind: ProjectileKind,
    /// Speed in world units per tick.
    pub speed: f32,
    /// Fraction of the attacker's touch damage carried by the shot.
    pub damage_factor: f32,
    /// Lifespan of the shot in ticks.
    pub lifespan: u32,
    /// Maximum travel distance, if limited.
    pub max_distance: Option<f32>,
    /// Collision radius in world units.
    pub radius: f32,
    /// Number of targets the shot may damage.
    pub pierce: u32,
}

/// State carried by ranged attackers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangedState {
    /// Gate between consecutive shots.
    pub fire: Cooldown,
    /// Projectile fired on each shot.
    pub shot: ShotProfile,
}

/// State carried by ambushers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbushState {
    /// Gate between consecutive teleports.
    pub teleport: Cooldown,
    /// Largest Manhattan distance from the player a teleport may land on.
    pub radius: u32,
}

/// Area damage released when an exploder dies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstState {
    /// Radius of the burst in world units.
    pub radius: f32,
    /// Damage dealt to the player when inside the radius.
    pub damage: f32,
}

/// Special attacks a miniboss can be spawned with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MinibossSpecial {
    /// Four projectiles along the axes.
    Classic,
    /// Delayed falling shots scattered around the player.
    Rain {
        /// Number of telegraphs created per special.
        drops: u32,
    },
    /// A single delayed shot aimed where the player stood at windup.
    Tracking,
}

/// State carried by minibosses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinibossState {
    /// Special fired on every cooldown expiry.
    pub special: MinibossSpecial,
    /// Gate between consecutive specials.
    pub cooldown: Cooldown,
}

/// Attack repertoire of a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BossVariant {
    /// Continuous aimed fire.
    Standard,
    /// Continuous aimed fire plus periodic radial bursts.
    LateGame,
}

/// Periodic ring of projectiles fired by late-game bosses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialBurst {
    /// Gate between consecutive bursts.
    pub cooldown: Cooldown,
    /// Number of evenly spaced projectiles per burst.
    pub count: u32,
    /// Speed of each burst projectile.
    pub speed: f32,
}

/// State carried by bosses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossState {
    /// Attack repertoire.
    pub variant: BossVariant,
    /// Gate between consecutive aimed shots.
    pub fire: Cooldown,
    /// Projectile used for aimed shots.
    pub shot: ShotProfile,
    /// Radial burst, present for late-game bosses.
    pub radial: Option<RadialBurst>,
}

/// Per-kind control state, dispatched by the behavior system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Chases the player and attacks on contact.
    Chaser,
    /// Chases the player and fires projectiles on a cooldown.
    Ranged(RangedState),
    /// Chases the player and periodically teleports near them.
    Ambusher(AmbushState),
    /// Chases the player and bursts on death.
    Exploder(BurstState),
    /// Chases the player and fires a special on a cooldown.
    Miniboss(MinibossState),
    /// Chases the player with continuous fire.
    Boss(BossState),
}

/// Enemy entity owned by the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier assigned at spawn.
    pub id: EntityId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Cell the enemy logically occupies.
    pub cell: CellCoord,
    /// Upper-left corner of the enemy in world units.
    pub position: Vec2,
    /// Remaining and maximum health.
    pub health: Health,
    /// Movement speed in world units per tick.
    pub speed: f32,
    /// Damage dealt by a touch attack.
    pub touch_damage: f32,
    /// Direction of the most recent step.
    pub facing: Direction,
    /// Ticks left before the enemy starts acting.
    pub entry_delay: u32,
    /// Gate between touch attacks.
    pub touch_cooldown: Cooldown,
    /// Remaining route toward the player, excluding the current cell.
    pub path: VecDeque<CellCoord>,
    /// Ticks since the route was last computed.
    pub path_age: u32,
    /// Set when the last search found no route; the next search waits for the
    /// refresh interval instead of running every tick.
    pub path_failed: bool,
    /// Gold and experience granted on death.
    pub rewards: Rewards,
    /// Per-kind control state.
    pub behavior: Behavior,
    /// Explicit removal flag set by scripted effects.
    pub removed: bool,
}

impl Enemy {
    /// Creates an enemy standing on the provided cell.
    #[must_use]
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        cell: CellCoord,
        stats: EnemyStats,
        behavior: Behavior,
        touch_cooldown: u32,
    ) -> Self {
        Self {
            id,
            kind,
            cell,
            position: cell.origin(),
            health: Health::full(stats.max_health),
            speed: stats.speed,
            touch_damage: stats.touch_damage,
            facing: Direction::South,
            entry_delay: 0,
            touch_cooldown: Cooldown::ready(touch_cooldown),
            path: VecDeque::new(),
            path_age: 0,
            path_failed: false,
            rewards: stats.rewards,
            behavior,
            removed: false,
        }
    }

    /// Centre of the enemy in world units.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// Reports whether the enemy still takes part in the simulation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.removed && !self.health.is_depleted()
    }

    /// Moves the enemy onto a cell instantly, discarding its route.
    pub fn place_at(&mut self, cell: CellCoord) {
        self.cell = cell;
        self.position = cell.origin();
        self.path.clear();
        self.path_age = 0;
        self.path_failed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> EnemyStats {
        EnemyStats {
            max_health: 40.0,
            speed: 1.0,
            touch_damage: 5.0,
            rewards: Rewards::default(),
        }
    }

    #[test]
    fn new_enemy_sits_on_cell_origin() {
        let enemy = Enemy::new(
            EntityId::new(3),
            EnemyKind::Normal,
            CellCoord::new(2, 4),
            stats(),
            Behavior::Chaser,
            30,
        );
        assert_eq!(enemy.position, Vec2::new(64.0, 128.0));
        assert_eq!(enemy.center(), Vec2::new(80.0, 144.0));
        assert!(enemy.touch_cooldown.is_ready());
        assert!(enemy.is_active());
    }

    #[test]
    fn removal_flag_deactivates() {
        let mut enemy = Enemy::new(
            EntityId::new(0),
            EnemyKind::Exploder,
            CellCoord::new(0, 0),
            stats(),
            Behavior::Chaser,
            30,
        );
        enemy.removed = true;
        assert!(!enemy.is_active());
    }

    #[test]
    fn boss_rewards_are_multiplied() {
        assert_eq!(EnemyKind::Normal.reward_multiplier(), 1);
        assert_eq!(EnemyKind::Miniboss.reward_multiplier(), 5);
        assert_eq!(EnemyKind::Boss.reward_multiplier(), 10);
        assert!(EnemyKind::Wizard.is_ranged());
        assert!(!EnemyKind::Exploder.is_ranged());
    }
}
