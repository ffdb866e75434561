//! Factories turning spawn requests into configured enemies.

use grid_siege_core::{
    AmbushState, Behavior, BossState, BossVariant, BurstState, CellCoord, Cooldown, Difficulty,
    Enemy, EnemyKind, EnemyStats, EntityId, MinibossSpecial, MinibossState, ProjectileKind,
    RadialBurst, RangedState, Rewards, ShotProfile, Tuning,
};

/// Linear stat curve of a kind: `base + factor × difficulty`, rounded.
#[derive(Clone, Copy, Debug)]
struct Curve {
    health: (f32, f32),
    touch: (f32, f32),
    speed: (f32, f32),
    max_speed: f32,
}

impl Curve {
    const fn new(health: (f32, f32), touch: (f32, f32), speed: f32) -> Self {
        Self {
            health,
            touch,
            speed: (speed, 0.0),
            max_speed: speed,
        }
    }

    const fn accelerating(mut self, factor: f32, max_speed: f32) -> Self {
        self.speed.1 = factor;
        self.max_speed = max_speed;
        self
    }
}

const fn curve(kind: EnemyKind) -> Curve {
    match kind {
        EnemyKind::Normal => Curve::new((50.0, 15.0), (5.0, 1.5), 1.2).accelerating(0.05, 2.5),
        EnemyKind::Brute => Curve::new((120.0, 30.0), (12.0, 3.0), 0.8),
        EnemyKind::Tank => Curve::new((250.0, 50.0), (10.0, 2.0), 0.5),
        EnemyKind::Fast => Curve::new((30.0, 8.0), (4.0, 1.0), 2.0).accelerating(0.05, 3.0),
        EnemyKind::Shooter => Curve::new((80.0, 25.0), (6.0, 2.0), 0.9),
        EnemyKind::Spitter => Curve::new((70.0, 20.0), (8.0, 2.0), 0.8),
        EnemyKind::Wizard => Curve::new((60.0, 18.0), (7.0, 2.0), 0.8),
        EnemyKind::Archer => Curve::new((50.0, 15.0), (6.0, 2.0), 1.0),
        EnemyKind::Bossling => Curve::new((200.0, 40.0), (10.0, 3.0), 0.7),
        EnemyKind::Ambusher => Curve::new((60.0, 15.0), (8.0, 2.0), 1.0),
        EnemyKind::Exploder => Curve::new((40.0, 10.0), (6.0, 1.5), 1.4),
        EnemyKind::Miniboss => Curve::new((500.0, 0.0), (20.0, 0.0), 0.7),
        EnemyKind::Boss => Curve::new((1500.0, 200.0), (25.0, 3.0), 0.6),
    }
}

const fn shot(kind: ProjectileKind, speed: f32, damage_factor: f32, lifespan: u32) -> ShotProfile {
    ShotProfile {
        kind,
        speed,
        damage_factor,
        lifespan,
        max_distance: None,
        radius: kind.default_radius(),
        pierce: 1,
    }
}

const SHOOTER_SHOT: ShotProfile = shot(ProjectileKind::Linear, 3.0, 0.8, 90);
const SPITTER_SHOT: ShotProfile = ShotProfile {
    max_distance: Some(160.0),
    ..shot(ProjectileKind::Heavy, 2.5, 1.2, 60)
};
const WIZARD_SHOT: ShotProfile = shot(ProjectileKind::Homing, 2.5, 0.7, 120);
const ARCHER_SHOT: ShotProfile = ShotProfile {
    max_distance: Some(400.0),
    ..shot(ProjectileKind::Linear, 5.0, 0.9, 120)
};
const BOSSLING_SHOT: ShotProfile = ShotProfile {
    pierce: 2,
    ..shot(ProjectileKind::Heavy, 3.0, 1.0, 90)
};
const BOSS_SHOT: ShotProfile = shot(ProjectileKind::Linear, 3.5, 0.6, 120);

const BOSS_FIRE_TICKS: u32 = 45;
const RADIAL_TICKS: u32 = 240;
const RADIAL_COUNT: u32 = 12;
const RADIAL_SPEED: f32 = 3.0;
const AMBUSH_TICKS: u32 = 240;
const AMBUSH_RADIUS: u32 = 2;
const BURST_RADIUS: f32 = 48.0;
const RAIN_DROPS: u32 = 6;

/// Spawn-time statistics of a kind at the provided difficulty.
#[must_use]
pub fn stats_for(kind: EnemyKind, difficulty: Difficulty) -> EnemyStats {
    let curve = curve(kind);
    let scaled = |(base, factor): (f32, f32)| difficulty.scale(base, factor).round();
    EnemyStats {
        max_health: scaled(curve.health),
        speed: difficulty
            .scale(curve.speed.0, curve.speed.1)
            .min(curve.max_speed),
        touch_damage: scaled(curve.touch),
        rewards: Rewards::for_difficulty(difficulty, kind.reward_multiplier()),
    }
}

/// Creates a regular enemy of the provided kind.
///
/// Miniboss and boss requests fall back to their classic and standard
/// variants; use [`spawn_miniboss`] and [`spawn_boss`] to pick one.
#[must_use]
pub fn spawn_enemy(
    id: EntityId,
    kind: EnemyKind,
    cell: CellCoord,
    difficulty: Difficulty,
    tuning: &Tuning,
) -> Enemy {
    let behavior = match kind {
        EnemyKind::Normal | EnemyKind::Brute | EnemyKind::Tank | EnemyKind::Fast => {
            Behavior::Chaser
        }
        EnemyKind::Shooter => ranged(120, SHOOTER_SHOT),
        EnemyKind::Spitter => ranged(150, SPITTER_SHOT),
        EnemyKind::Wizard => ranged(140, WIZARD_SHOT),
        EnemyKind::Archer => ranged(100, ARCHER_SHOT),
        EnemyKind::Bossling => ranged(90, BOSSLING_SHOT),
        EnemyKind::Ambusher => Behavior::Ambusher(AmbushState {
            teleport: Cooldown::new(AMBUSH_TICKS),
            radius: AMBUSH_RADIUS,
        }),
        EnemyKind::Exploder => {
            let touch = stats_for(kind, difficulty).touch_damage;
            Behavior::Exploder(BurstState {
                radius: BURST_RADIUS,
                damage: touch * 2.0,
            })
        }
        EnemyKind::Miniboss => miniboss(MinibossSpecial::Classic, tuning),
        EnemyKind::Boss => boss(BossVariant::Standard),
    };
    build(id, kind, cell, difficulty, behavior, tuning)
}

/// Creates a miniboss firing the provided special.
#[must_use]
pub fn spawn_miniboss(
    id: EntityId,
    cell: CellCoord,
    special: MinibossSpecial,
    difficulty: Difficulty,
    tuning: &Tuning,
) -> Enemy {
    let behavior = miniboss(special, tuning);
    build(id, EnemyKind::Miniboss, cell, difficulty, behavior, tuning)
}

/// Creates a boss using the provided variant.
#[must_use]
pub fn spawn_boss(
    id: EntityId,
    cell: CellCoord,
    variant: BossVariant,
    difficulty: Difficulty,
    tuning: &Tuning,
) -> Enemy {
    build(id, EnemyKind::Boss, cell, difficulty, boss(variant), tuning)
}

/// Default special count for rain minibosses.
#[must_use]
pub const fn rain() -> MinibossSpecial {
    MinibossSpecial::Rain { drops: RAIN_DROPS }
}

fn build(
    id: EntityId,
    kind: EnemyKind,
    cell: CellCoord,
    difficulty: Difficulty,
    behavior: Behavior,
    tuning: &Tuning,
) -> Enemy {
    let mut enemy = Enemy::new(
        id,
        kind,
        cell,
        stats_for(kind, difficulty),
        behavior,
        tuning.touch_cooldown_ticks,
    );
    enemy.entry_delay = tuning.entry_delay_ticks;
    enemy
}

fn ranged(period: u32, shot: ShotProfile) -> Behavior {
    Behavior::Ranged(RangedState {
        fire: Cooldown::new(period),
        shot,
    })
}

fn miniboss(special: MinibossSpecial, tuning: &Tuning) -> Behavior {
    Behavior::Miniboss(MinibossState {
        special,
        cooldown: Cooldown::new(tuning.miniboss_special_ticks.max(1)),
    })
}

fn boss(variant: BossVariant) -> Behavior {
    let radial = match variant {
        BossVariant::Standard => None,
        BossVariant::LateGame => Some(RadialBurst {
            cooldown: Cooldown::new(RADIAL_TICKS),
            count: RADIAL_COUNT,
            speed: RADIAL_SPEED,
        }),
    };
    Behavior::Boss(BossState {
        variant,
        fire: Cooldown::new(BOSS_FIRE_TICKS),
        shot: BOSS_SHOT,
        radial,
    })
}
