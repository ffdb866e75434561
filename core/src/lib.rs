#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Siege simulation.
//!
//! This crate defines the message surface and the simulation-owned state that
//! connects adapters, the authoritative world, and pure systems. Adapters
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what happened during the tick. Systems receive the
//! collections defined here explicitly and mutate them in place for exactly
//! one tick.

mod entity;
mod player;
mod projectile;
mod tuning;
mod upgrade;

pub use entity::{
    AmbushState, Behavior, BossState, BossVariant, BurstState, Enemy, EnemyKind, EnemyStats,
    MinibossSpecial, MinibossState, RadialBurst, RangedState, ShotProfile,
};
pub use player::{CharacterClass, ExperienceOrb, Player, PlayerStats, Progress, ShotPattern};
pub use projectile::{Projectile, ProjectileEffect, ProjectileKind, ProjectileRequest, Telegraph};
pub use tuning::{HitPolicy, Tuning};
pub use upgrade::{Skill, Upgrade};

pub use glam::Vec2;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the simulation boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Siege.";

/// Side length of a single square tile measured in world units.
pub const TILE_SIZE: f32 = 32.0;

/// Shortest vector length still treated as a usable direction.
pub const DIRECTION_EPSILON: f32 = 1.0e-4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one fixed step.
    Tick {
        /// Player input distilled by the adapter for this step.
        intent: PlayerIntent,
    },
    /// Requests that a regular enemy be created at the provided cell.
    SpawnEnemy {
        /// Kind of enemy to create.
        kind: EnemyKind,
        /// Cell the enemy occupies after spawning.
        cell: CellCoord,
    },
    /// Requests that a miniboss be created with the provided special.
    SpawnMiniboss {
        /// Cell the miniboss occupies after spawning.
        cell: CellCoord,
        /// Special attack fired on the miniboss cooldown.
        special: MinibossSpecial,
    },
    /// Requests that a boss be created using the provided variant.
    SpawnBoss {
        /// Cell the boss occupies after spawning.
        cell: CellCoord,
        /// Attack repertoire of the boss.
        variant: BossVariant,
    },
    /// Applies an upgrade chosen by the player.
    ApplyUpgrade {
        /// Upgrade to apply to the player stats.
        upgrade: Upgrade,
    },
    /// Applies a skill unlocked by the player.
    LearnSkill {
        /// Skill to apply to the player stats.
        skill: Skill,
    },
    /// Discards every enemy and projectile and resets the run.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one step.
    TimeAdvanced {
        /// Index of the step that just completed.
        tick: u64,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EntityId,
        /// Kind of the new enemy.
        kind: EnemyKind,
        /// Cell the enemy occupies.
        cell: CellCoord,
    },
    /// Reports that an enemy died and was removed from the arena.
    EnemyDied {
        /// Identifier of the removed enemy.
        enemy: EntityId,
        /// Kind of the removed enemy.
        kind: EnemyKind,
        /// Centre of the enemy when it died.
        position: Vec2,
        /// Gold and experience granted for the kill.
        rewards: Rewards,
    },
    /// Reports that an ambusher relocated next to the player.
    EnemyTeleported {
        /// Identifier of the ambusher.
        enemy: EntityId,
        /// Cell the ambusher left.
        from: CellCoord,
        /// Cell the ambusher arrived at.
        to: CellCoord,
    },
    /// Reports that the player lost health.
    PlayerDamaged {
        /// Health removed from the player.
        amount: f32,
        /// Origin of the damage.
        source: DamageSource,
    },
    /// Reports that the player regained health.
    PlayerHealed {
        /// Health restored to the player.
        amount: f32,
    },
    /// Confirms that a projectile entered the active set.
    ProjectileSpawned {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Combatant that fired the projectile, if any.
        owner: Option<Combatant>,
    },
    /// Reports that a projectile left the active set.
    ProjectileRemoved {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
        /// Liveness condition that failed.
        reason: RemovalReason,
    },
    /// Reports that an enemy started a special attack.
    SpecialTriggered {
        /// Identifier of the attacking enemy.
        enemy: EntityId,
        /// Special attack that started.
        special: SpecialAttack,
    },
    /// Reports that a telegraphed attack converted into a projectile.
    TelegraphDetonated {
        /// Position the telegraph was aimed at.
        target: Vec2,
    },
    /// Visual-only burst emitted when an exploder dies.
    DeathBurst {
        /// Centre of the burst.
        position: Vec2,
        /// Radius of the burst in world units.
        radius: f32,
    },
    /// Reports that the run-wide difficulty scalar increased.
    DifficultyRaised {
        /// Difficulty after the increase.
        difficulty: f32,
    },
    /// Reports that a dead enemy left an experience orb behind.
    OrbDropped {
        /// Centre of the orb.
        position: Vec2,
        /// Experience and gold the orb grants.
        value: u32,
    },
    /// Reports that the player picked up an experience orb.
    OrbCollected {
        /// Experience and gold granted.
        value: u32,
    },
    /// Reports that the player reached a new level.
    LevelUp {
        /// Level reached by the player.
        level: u32,
    },
    /// Reports that the player ran out of health.
    PlayerDefeated,
}

/// Origin of damage dealt to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// Contact damage from an adjacent enemy.
    Touch(EntityId),
    /// A projectile collided with the player.
    Projectile(ProjectileId),
    /// An exploder died within range.
    Burst(EntityId),
    /// The player entered a damaging tile.
    Tile,
}

/// Liveness condition that removed a projectile from the active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    /// Lifespan or travel range ran out.
    Expired,
    /// Every pierce charge was spent on hits.
    PierceSpent,
    /// A bouncing projectile ran out of bounces.
    BouncesSpent,
    /// An enemy projectile struck the player.
    HitPlayer,
}

/// Special attacks announced through [`Event::SpecialTriggered`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialAttack {
    /// Four projectiles along the axes.
    Volley,
    /// Delayed falling shots around the player.
    Rain,
    /// Windup shot aimed at the player's position at windup start.
    Tracking,
    /// Full radial burst fired by a late-game boss.
    Radial,
}

/// Player input for a single simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerIntent {
    /// Direction the player wants to step in, if any.
    pub step: Option<Direction>,
    /// Whether the attack input is held.
    pub attack: bool,
}

impl PlayerIntent {
    /// Intent that neither moves nor attacks.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            step: None,
            attack: false,
        }
    }

    /// Intent that steps in the provided direction.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        Self {
            step: Some(direction),
            attack: false,
        }
    }

    /// Returns a copy of the intent with the attack input held.
    #[must_use]
    pub const fn attacking(self) -> Self {
        Self {
            step: self.step,
            attack: true,
        }
    }
}

/// Cardinal directions used for movement and facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Neighbour expansion order used by the pathfinder.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Unit vector pointing in the direction, with rows growing downward.
    #[must_use]
    pub fn unit(self) -> Vec2 {
        match self {
            Self::North => Vec2::new(0.0, -1.0),
            Self::East => Vec2::new(1.0, 0.0),
            Self::South => Vec2::new(0.0, 1.0),
            Self::West => Vec2::new(-1.0, 0.0),
        }
    }

    /// Direction of a single cardinal step between two cells.
    ///
    /// Returns `None` when the cells are not 4-adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());
        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Self::East)
            } else {
                Some(Self::West)
            }
        } else if to.row() > from.row() {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };
        Some(Self::new(column?, row?))
    }

    /// Cell displaced by a signed offset, if it stays non-negative.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(columns)?;
        let row = self.row.checked_add_signed(rows)?;
        Some(Self::new(column, row))
    }

    /// World position of the cell's upper-left corner.
    #[must_use]
    pub fn origin(self) -> Vec2 {
        Vec2::new(
            self.column as f32 * TILE_SIZE,
            self.row as f32 * TILE_SIZE,
        )
    }

    /// World position of the cell's centre.
    #[must_use]
    pub fn center(self) -> Vec2 {
        self.origin() + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// Cell containing the provided world position.
    #[must_use]
    pub fn containing(point: Vec2) -> Option<CellCoord> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }

        let column = (point.x / TILE_SIZE).floor();
        let row = (point.y / TILE_SIZE).floor();
        if column > u32::MAX as f32 || row > u32::MAX as f32 {
            return None;
        }
        Some(Self::new(column as u32, row as u32))
    }
}

/// Read-only walkability oracle provided by the map collaborator.
///
/// Cells outside the grid must report as non-walkable. The world borrows the
/// map for the duration of a tick and never mutates it.
pub trait TileMap {
    /// Number of columns in the grid.
    fn width(&self) -> u32;

    /// Number of rows in the grid.
    fn height(&self) -> u32;

    /// Reports whether entities may enter the cell.
    fn is_walkable(&self, cell: CellCoord) -> bool;

    /// Effect applied to an entity entering the cell, if any.
    fn tile_effect(&self, _cell: CellCoord) -> Option<TileEffect> {
        None
    }

    /// Reports whether the cell lies inside the grid.
    fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width() && cell.row() < self.height()
    }

    /// Extent of the grid in world units.
    fn bounds(&self) -> Vec2 {
        Vec2::new(
            self.width() as f32 * TILE_SIZE,
            self.height() as f32 * TILE_SIZE,
        )
    }
}

/// Health change applied by special tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileEffect {
    /// Removes the provided amount of health.
    Damage(f32),
    /// Restores the provided amount of health, capped at the maximum.
    Heal(f32),
}

impl TileEffect {
    /// Applies the effect, returning the signed health delta.
    pub fn apply_to(self, health: &mut Health) -> f32 {
        match self {
            Self::Damage(amount) => -health.damage(amount),
            Self::Heal(amount) => health.heal(amount),
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reference to a participant that can own projectiles or take damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combatant {
    /// The single player entity.
    Player,
    /// An enemy identified by its entity id.
    Enemy(EntityId),
}

/// Reports whether a projectile fired by `owner` may ever damage `target`.
///
/// Neutral projectiles hit everyone, player projectiles hit enemies, and
/// enemy projectiles hit the player plus other enemies only under friendly
/// fire.
#[must_use]
pub fn may_strike(owner: Option<Combatant>, target: Combatant, friendly_fire: bool) -> bool {
    match (owner, target) {
        (None, _) => true,
        (Some(Combatant::Player), Combatant::Enemy(_)) => true,
        (Some(Combatant::Player), Combatant::Player) => false,
        (Some(Combatant::Enemy(_)), Combatant::Player) => true,
        (Some(Combatant::Enemy(_)), Combatant::Enemy(_)) => friendly_fire,
    }
}

/// Tile-sized body a projectile may collide with or steer toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Participant represented by the body.
    pub combatant: Combatant,
    /// Upper-left corner of the body in world units.
    pub position: Vec2,
}

impl Target {
    /// Centre of the body in world units.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(TILE_SIZE / 2.0)
    }
}

/// Current and maximum health of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Health {
    current: f32,
    maximum: f32,
}

impl Health {
    /// Creates full health with the provided maximum.
    #[must_use]
    pub fn full(maximum: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Remaining health.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Maximum health.
    #[must_use]
    pub const fn maximum(&self) -> f32 {
        self.maximum
    }

    /// Reports whether no health remains.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Removes health, never dropping below zero, and returns the amount removed.
    pub fn damage(&mut self, amount: f32) -> f32 {
        let amount = amount.max(0.0);
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        before - self.current
    }

    /// Restores health up to the maximum and returns the amount restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let amount = amount.max(0.0);
        let before = self.current;
        self.current = (self.current + amount).min(self.maximum);
        (self.current - before).max(0.0)
    }

    /// Raises the maximum and heals by the same amount.
    pub fn raise_maximum(&mut self, amount: f32) {
        self.maximum += amount;
        self.current = (self.current + amount).min(self.maximum);
    }

    /// Restores health to the maximum.
    pub fn refill(&mut self) {
        self.current = self.maximum;
    }
}

/// Tick counter that gates a repeating action.
///
/// The counter decrements once per tick; the action fires when it reaches
/// zero, after which the counter resets to its period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cooldown {
    remaining: u32,
    period: u32,
}

impl Cooldown {
    /// Creates a cooldown that fires after a full period.
    #[must_use]
    pub const fn new(period: u32) -> Self {
        Self {
            remaining: period,
            period,
        }
    }

    /// Creates a cooldown that is ready immediately.
    #[must_use]
    pub const fn ready(period: u32) -> Self {
        Self {
            remaining: 0,
            period,
        }
    }

    /// Ticks left until the cooldown is ready.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Number of ticks between firings.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// Reports whether the action may fire.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Advances the counter by one tick without firing.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Resets the counter to the full period.
    pub fn restart(&mut self) {
        self.remaining = self.period;
    }

    /// Replaces the period, clamping the remaining ticks to it.
    pub fn set_period(&mut self, period: u32) {
        self.period = period;
        self.remaining = self.remaining.min(period);
    }

    /// Advances one tick and fires when the counter reaches zero.
    ///
    /// Returns `true` exactly when the action fires; the counter is then reset.
    pub fn tick_and_fire(&mut self) -> bool {
        self.tick();
        if self.is_ready() {
            self.restart();
            true
        } else {
            false
        }
    }
}

/// Run-wide difficulty scalar used for linear stat scaling.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Difficulty(f32);

impl Difficulty {
    /// Creates a difficulty scalar.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Retrieves the raw scalar.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }

    /// Computes `base + factor × difficulty`.
    #[must_use]
    pub fn scale(&self, base: f32, factor: f32) -> f32 {
        base + factor * self.0
    }

    /// Returns the difficulty raised by the provided step.
    #[must_use]
    pub fn raised(self, step: f32) -> Self {
        Self(self.0 + step)
    }
}

/// Gold and experience granted when an enemy dies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rewards {
    /// Gold added to the player's purse.
    pub gold: u32,
    /// Experience added toward the next level.
    pub experience: u32,
}

impl Rewards {
    /// Rewards for a kill at the provided difficulty, scaled by a multiplier.
    ///
    /// Gold is `floor(5 + 2d)` and experience `1 + floor(d / 2)`.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty, multiplier: u32) -> Self {
        let d = difficulty.get().max(0.0);
        let gold = (5.0 + d * 2.0).floor() as u32;
        let experience = 1 + (d / 2.0).floor() as u32;
        Self {
            gold: gold.saturating_mul(multiplier),
            experience: experience.saturating_mul(multiplier),
        }
    }
}

/// Velocity of the provided speed pointing from `from` toward `to`.
///
/// Returns `None` when the two points coincide closely enough that no
/// direction can be derived.
#[must_use]
pub fn aim_velocity(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if !distance.is_finite() || distance < DIRECTION_EPSILON {
        return None;
    }
    Some(delta / distance * speed)
}
