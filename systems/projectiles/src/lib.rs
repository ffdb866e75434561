#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-stepped projectile motion, effect interpretation and volley factories.
//!
//! [`advance`] moves one projectile by one tick. The per-tick order is fixed:
//! homing retarget, displacement, lifespan decrement, range check, and finally
//! bounce reflection. Expiry is reported so the caller can run on-expire
//! effects before the projectile leaves the active set.

pub mod effects;
pub mod volley;

use grid_siege_core::{aim_velocity, Combatant, Projectile, ProjectileKind, Target, Vec2};

/// Result of advancing a projectile by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// The projectile is still flying.
    Flying,
    /// Lifespan or travel range ran out during this tick.
    Expired,
    /// A bouncing projectile used its final bounce during this tick.
    BouncesSpent,
}

/// Advances a projectile by one tick.
///
/// `candidates` are the living bodies a homing projectile may steer toward;
/// the owner is skipped even when present. `bounds` is the arena extent used
/// by bouncing projectiles.
pub fn advance(projectile: &mut Projectile, candidates: &[Target], bounds: Vec2) -> Motion {
    if projectile.kind == ProjectileKind::Homing {
        retarget(projectile, candidates);
    }

    projectile.position += projectile.velocity;
    projectile.lifespan = projectile.lifespan.saturating_sub(1);
    projectile.age = projectile.age.saturating_add(1);

    if let Some(max_distance) = projectile.max_distance {
        if projectile.position.distance(projectile.origin) >= max_distance {
            projectile.lifespan = 0;
        }
    }

    if projectile.kind == ProjectileKind::Bouncing {
        reflect(projectile, bounds);
    }

    if projectile.lifespan == 0 {
        Motion::Expired
    } else if projectile.kind == ProjectileKind::Bouncing && projectile.bounces == 0 {
        Motion::BouncesSpent
    } else {
        Motion::Flying
    }
}

/// Nearest candidate to `point`, skipping the excluded combatant.
///
/// Equal distances resolve to the earlier candidate.
#[must_use]
pub fn nearest_target<'a>(
    point: Vec2,
    candidates: &'a [Target],
    exclude: Option<Combatant>,
) -> Option<&'a Target> {
    let mut best: Option<(&Target, f32)> = None;
    for candidate in candidates {
        if Some(candidate.combatant) == exclude {
            continue;
        }
        let distance = candidate.center().distance_squared(point);
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(target, _)| target)
}

fn retarget(projectile: &mut Projectile, candidates: &[Target]) {
    let Some(target) = nearest_target(projectile.position, candidates, projectile.owner) else {
        return;
    };
    if let Some(velocity) = aim_velocity(projectile.position, target.center(), projectile.speed) {
        projectile.velocity = velocity;
    }
}

fn reflect(projectile: &mut Projectile, bounds: Vec2) {
    let radius = projectile.radius;
    let position = projectile.position;

    let crossed_x = (position.x - radius < 0.0 && projectile.velocity.x < 0.0)
        || (position.x + radius > bounds.x && projectile.velocity.x > 0.0);
    if crossed_x {
        projectile.velocity.x = -projectile.velocity.x;
        projectile.bounces = projectile.bounces.saturating_sub(1);
    }

    let crossed_y = (position.y - radius < 0.0 && projectile.velocity.y < 0.0)
        || (position.y + radius > bounds.y && projectile.velocity.y > 0.0);
    if crossed_y {
        projectile.velocity.y = -projectile.velocity.y;
        projectile.bounces = projectile.bounces.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_siege_core::{EntityId, ProjectileId, ProjectileRequest};

    fn spawn(request: ProjectileRequest) -> Projectile {
        Projectile::from_request(ProjectileId::new(0), request)
    }

    #[test]
    fn nearest_target_skips_excluded() {
        let near = Target {
            combatant: Combatant::Enemy(EntityId::new(0)),
            position: Vec2::new(0.0, 0.0),
        };
        let far = Target {
            combatant: Combatant::Enemy(EntityId::new(1)),
            position: Vec2::new(100.0, 0.0),
        };
        let candidates = [near, far];

        let chosen = nearest_target(Vec2::ZERO, &candidates, None).map(|t| t.combatant);
        assert_eq!(chosen, Some(near.combatant));

        let chosen =
            nearest_target(Vec2::ZERO, &candidates, Some(near.combatant)).map(|t| t.combatant);
        assert_eq!(chosen, Some(far.combatant));
    }

    #[test]
    fn homing_without_candidates_keeps_velocity() {
        let mut projectile = spawn(
            ProjectileRequest::new(Vec2::new(50.0, 50.0), Vec2::new(0.0, 2.0), 1.0)
                .kind(ProjectileKind::Homing),
        );
        let _ = advance(&mut projectile, &[], Vec2::splat(640.0));
        assert_eq!(projectile.velocity, Vec2::new(0.0, 2.0));
        assert_eq!(projectile.position, Vec2::new(50.0, 52.0));
    }

    #[test]
    fn lifespan_saturates() {
        let mut projectile = spawn(ProjectileRequest::new(Vec2::ZERO, Vec2::X, 1.0).lifespan(1));
        assert_eq!(advance(&mut projectile, &[], Vec2::splat(640.0)), Motion::Expired);
        assert_eq!(advance(&mut projectile, &[], Vec2::splat(640.0)), Motion::Expired);
        assert_eq!(projectile.lifespan, 0);
    }
}
