use glam::Vec2;

use crate::{CellCoord, Cooldown, Direction, Health, TILE_SIZE};

/// Playable character classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// Sturdy melee-range shooter firing single shots.
    Warrior,
    /// Agile shooter firing three-way fans.
    Archer,
    /// Fragile caster firing homing bolts.
    Mage,
}

impl CharacterClass {
    /// Starting maximum health of the class.
    #[must_use]
    pub const fn base_health(self) -> f32 {
        match self {
            Self::Warrior => 120.0,
            Self::Archer => 100.0,
            Self::Mage => 90.0,
        }
    }
}

/// Projectile pattern fired by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShotPattern {
    /// Single linear projectile.
    Normal,
    /// Three linear projectiles fanned ±15°.
    Spread,
    /// Single projectile that bounces off the arena edges.
    Bouncing,
    /// Single projectile that steers toward the nearest enemy.
    Homing,
    /// Single large projectile.
    Heavy,
}

/// Offensive and movement statistics shaped by upgrades and skills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStats {
    /// Base damage of each projectile.
    pub damage: f32,
    /// Movement speed in world units per tick.
    pub move_speed: f32,
    /// Pattern fired on attack.
    pub shot: ShotPattern,
    /// Projectile speed in world units per tick.
    pub projectile_speed: f32,
    /// Projectile lifespan in ticks.
    pub projectile_lifespan: u32,
    /// Maximum projectile travel distance in world units.
    pub max_distance: f32,
    /// Targets each projectile may damage.
    pub pierce: u32,
    /// Ticks between attacks.
    pub fire_cooldown: u32,
    /// Probability that a projectile is a critical hit.
    pub crit_chance: f32,
    /// Damage multiplier applied to critical hits.
    pub crit_multiplier: f32,
    /// Fraction of dealt damage returned as health.
    pub life_leech: f32,
    /// Radius within which rewards are collected.
    pub pickup_range: f32,
    /// Extra projectiles fanned around each shot.
    pub multishot: u32,
    /// Whether projectiles explode on hit.
    pub explosive_shot: bool,
    /// Ricochet charges carried by each projectile.
    pub ricochet: u32,
    /// Whether projectiles split into fragments.
    pub cluster_shot: bool,
    /// Fractional bonus damage dealt to enemies.
    pub armor_pierce: f32,
}

impl PlayerStats {
    /// Starting statistics of the provided class.
    #[must_use]
    pub const fn for_class(class: CharacterClass) -> Self {
        let (damage, move_speed, shot, projectile_speed, projectile_lifespan) = match class {
            CharacterClass::Warrior => (18.0, 4.0, ShotPattern::Normal, 6.0, 60),
            CharacterClass::Archer => (12.0, 4.5, ShotPattern::Spread, 6.0, 60),
            CharacterClass::Mage => (10.0, 4.0, ShotPattern::Homing, 5.0, 80),
        };

        Self {
            damage,
            move_speed,
            shot,
            projectile_speed,
            projectile_lifespan,
            max_distance: 250.0,
            pierce: 1,
            fire_cooldown: 20,
            crit_chance: 0.05,
            crit_multiplier: 2.0,
            life_leech: 0.0,
            pickup_range: 16.0,
            multishot: 0,
            explosive_shot: false,
            ricochet: 0,
            cluster_shot: false,
            armor_pierce: 0.0,
        }
    }
}

/// Experience, level and purse of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Progress {
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Experience required to reach the next level.
    pub next_level_at: u32,
    /// Gold collected during the run.
    pub gold: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            next_level_at: 10,
            gold: 0,
        }
    }
}

/// Experience dropped by a dead enemy, waiting to be picked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExperienceOrb {
    /// Centre of the orb in world units.
    pub position: Vec2,
    /// Experience and gold granted on pickup.
    pub value: u32,
}

/// The single player entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Chosen character class.
    pub class: CharacterClass,
    /// Cell the player occupies or is stepping into.
    pub cell: CellCoord,
    /// Upper-left corner of the player in world units.
    pub position: Vec2,
    /// Remaining and maximum health.
    pub health: Health,
    /// Direction the player faces; shots travel this way.
    pub facing: Direction,
    /// Ticks of contact invulnerability left.
    pub invulnerable: u32,
    /// Offensive and movement statistics.
    pub stats: PlayerStats,
    /// Gate between attacks.
    pub fire: Cooldown,
    /// Experience, level and purse.
    pub progress: Progress,
}

impl Player {
    /// Creates a player of the provided class standing on a cell.
    #[must_use]
    pub fn new(class: CharacterClass, cell: CellCoord) -> Self {
        let stats = PlayerStats::for_class(class);
        Self {
            class,
            cell,
            position: cell.origin(),
            health: Health::full(class.base_health()),
            facing: Direction::South,
            invulnerable: 0,
            stats,
            fire: Cooldown::ready(stats.fire_cooldown),
            progress: Progress::default(),
        }
    }

    /// Centre of the player in world units.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// Reports whether the player finished interpolating into its cell.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.position == self.cell.origin()
    }

    /// Applies contact damage unless invulnerability frames are running.
    ///
    /// Returns the health actually removed. A landed hit starts a fresh
    /// invulnerability window of `frames` ticks.
    pub fn take_damage(&mut self, amount: f32, frames: u32) -> f32 {
        if self.invulnerable > 0 {
            return 0.0;
        }
        self.invulnerable = frames;
        self.health.damage(amount)
    }

    /// Restores health, returning the amount restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        self.health.heal(amount)
    }

    /// Returns the player to a cell with full health and fresh progress.
    ///
    /// Statistics chosen through upgrades are kept.
    pub fn reset(&mut self, cell: CellCoord) {
        self.cell = cell;
        self.position = cell.origin();
        self.health.refill();
        self.facing = Direction::South;
        self.invulnerable = 0;
        self.fire = Cooldown::ready(self.stats.fire_cooldown);
        self.progress = Progress::default();
    }
}
