//! Factories that turn attacks into projectile spawn requests.

use std::f32::consts::{PI, TAU};

use grid_siege_core::{
    aim_velocity, Combatant, EntityId, Player, PlayerStats, ProjectileEffect, ProjectileKind,
    ProjectileRequest, ShotPattern, ShotProfile, Vec2,
};
use log::trace;
use rand::Rng;

const SPREAD_ANGLE: f32 = PI / 12.0;
const MULTISHOT_ANGLE: f32 = PI / 18.0;
const HEAVY_DAMAGE: f32 = 1.5;
const HEAVY_SPEED: f32 = 0.75;
const EXPLOSION_RADIUS: f32 = 48.0;
const EXPLOSION_DAMAGE: f32 = 0.5;
const RICOCHET_SPEED: f32 = 3.0;

/// Fragments released by cluster shots.
pub const CLUSTER_SPLIT: ProjectileEffect = ProjectileEffect::Split {
    count: 5,
    damage_factor: 0.4,
    speed: 3.0,
    lifespan: 40,
    max_distance: 120.0,
};

/// Builds the projectiles fired by one player attack.
///
/// Shots leave the player's centre along its facing. Spread fans three shots
/// ±15°, multishot adds further shots alternating around the centre line, and
/// every projectile rolls its own critical hit.
pub fn player_volley<R: Rng>(player: &Player, rng: &mut R) -> Vec<ProjectileRequest> {
    let stats = &player.stats;
    let heading = player.facing.unit();
    let base_angle = heading.y.atan2(heading.x);

    let mut offsets: Vec<f32> = match stats.shot {
        ShotPattern::Spread => vec![-SPREAD_ANGLE, 0.0, SPREAD_ANGLE],
        _ => vec![0.0],
    };
    for extra in 1..=stats.multishot {
        let step = ((extra + 1) / 2) as f32 * MULTISHOT_ANGLE;
        offsets.push(if extra % 2 == 1 { step } else { -step });
    }

    let (kind, speed, damage_factor) = match stats.shot {
        ShotPattern::Normal | ShotPattern::Spread => (ProjectileKind::Linear, 1.0, 1.0),
        ShotPattern::Bouncing => (ProjectileKind::Bouncing, 1.0, 1.0),
        ShotPattern::Homing => (ProjectileKind::Homing, 1.0, 1.0),
        ShotPattern::Heavy => (ProjectileKind::Heavy, HEAVY_SPEED, HEAVY_DAMAGE),
    };
    let speed = stats.projectile_speed * speed;
    let base_damage = stats.damage * damage_factor * (1.0 + stats.armor_pierce);

    let (on_hit, on_expire) = player_effects(stats);
    offsets
        .into_iter()
        .map(|offset| {
            let angle = base_angle + offset;
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            let mut damage = base_damage;
            if rng.gen::<f32>() < stats.crit_chance {
                damage = (damage * stats.crit_multiplier).floor();
                trace!("critical shot for {damage}");
            }

            let mut request = ProjectileRequest::new(player.center(), velocity, damage)
                .kind(kind)
                .lifespan(stats.projectile_lifespan)
                .pierce(stats.pierce)
                .max_distance(stats.max_distance)
                .owner(Combatant::Player);
            request.on_hit.extend_from_slice(&on_hit);
            request.on_expire.extend_from_slice(&on_expire);
            request
        })
        .collect()
}

/// Effect descriptors attached to every player projectile.
#[must_use]
pub fn player_effects(stats: &PlayerStats) -> (Vec<ProjectileEffect>, Vec<ProjectileEffect>) {
    let mut on_hit = Vec::new();
    let mut on_expire = Vec::new();

    if stats.explosive_shot {
        on_hit.push(ProjectileEffect::Explosion {
            radius: EXPLOSION_RADIUS,
            damage_factor: EXPLOSION_DAMAGE,
        });
    }
    if stats.cluster_shot {
        on_hit.push(CLUSTER_SPLIT);
        on_expire.push(CLUSTER_SPLIT);
    }
    if stats.ricochet > 0 {
        on_hit.push(ProjectileEffect::Ricochet {
            bounces: stats.ricochet,
            speed: RICOCHET_SPEED,
        });
    }
    if stats.life_leech > 0.0 {
        on_hit.push(ProjectileEffect::Leech {
            fraction: stats.life_leech,
        });
    }

    (on_hit, on_expire)
}

/// Builds a shot from an enemy aimed at `target`.
///
/// When source and target coincide the shot leaves along `fallback`.
#[must_use]
pub fn aimed_shot(
    owner: EntityId,
    from: Vec2,
    target: Vec2,
    fallback: Vec2,
    shot: &ShotProfile,
    touch_damage: f32,
) -> ProjectileRequest {
    let velocity = aim_velocity(from, target, shot.speed).unwrap_or(fallback * shot.speed);
    profile_request(owner, from, velocity, shot, touch_damage)
}

/// Builds a ring of `count` evenly spaced shots starting along +x.
#[must_use]
pub fn radial_burst(
    owner: EntityId,
    from: Vec2,
    count: u32,
    speed: f32,
    shot: &ShotProfile,
    touch_damage: f32,
) -> Vec<ProjectileRequest> {
    (0..count)
        .map(|index| {
            let angle = index as f32 * TAU / count as f32;
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            profile_request(owner, from, velocity, shot, touch_damage)
        })
        .collect()
}

/// Builds four shots travelling east, west, south and north.
#[must_use]
pub fn axis_volley(
    owner: EntityId,
    from: Vec2,
    shot: &ShotProfile,
    touch_damage: f32,
) -> Vec<ProjectileRequest> {
    [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y]
        .into_iter()
        .map(|direction| profile_request(owner, from, direction * shot.speed, shot, touch_damage))
        .collect()
}

/// Builds a single shot described by a profile.
#[must_use]
pub fn profile_request(
    owner: EntityId,
    from: Vec2,
    velocity: Vec2,
    shot: &ShotProfile,
    touch_damage: f32,
) -> ProjectileRequest {
    let mut request = ProjectileRequest::new(from, velocity, touch_damage * shot.damage_factor)
        .kind(shot.kind)
        .lifespan(shot.lifespan)
        .pierce(shot.pierce)
        .radius(shot.radius)
        .owner(Combatant::Enemy(owner));
    request.max_distance = shot.max_distance;
    request
}
