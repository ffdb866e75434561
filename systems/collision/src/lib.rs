#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projectile-versus-body collision resolution.
//!
//! Bodies are tile-sized axis-aligned boxes and projectiles are circles. The
//! resolver decides which overlapping bodies a projectile may damage, spends
//! pierce, records struck targets, and runs on-hit effects.

use grid_siege_core::{
    may_strike, Combatant, HitPolicy, Projectile, ProjectileId, RemovalReason, Target, Tuning,
    Vec2, TILE_SIZE,
};
use grid_siege_system_projectiles::effects::{trigger_on_hit, EffectOutput, Scene};
use log::trace;
use rand::Rng;

/// Direct damage dealt by a projectile to one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Projectile that struck.
    pub projectile: ProjectileId,
    /// Body that was struck.
    pub target: Combatant,
    /// Damage after the direct-hit multiplier.
    pub damage: f32,
}

/// Circle versus tile-sized box overlap using closest-point clamping.
///
/// Touching boundaries count as overlap.
#[must_use]
pub fn circle_overlaps_tile(center: Vec2, radius: f32, tile_origin: Vec2) -> bool {
    let closest = center.clamp(tile_origin, tile_origin + Vec2::splat(TILE_SIZE));
    center.distance_squared(closest) <= radius * radius
}

/// Resolver applying the configured hit rules.
#[derive(Clone, Copy, Debug)]
pub struct CollisionResolver {
    grace_ticks: u32,
    direct_hit_multiplier: f32,
    hit_policy: HitPolicy,
    friendly_fire: bool,
}

impl CollisionResolver {
    /// Creates a resolver from the simulation tuning.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            grace_ticks: tuning.grace_ticks,
            direct_hit_multiplier: tuning.direct_hit_multiplier,
            hit_policy: tuning.hit_policy,
            friendly_fire: tuning.friendly_fire,
        }
    }

    /// Reports whether the projectile may damage the body right now.
    #[must_use]
    pub fn is_eligible(&self, projectile: &Projectile, target: Combatant) -> bool {
        if projectile.pierce == 0 || projectile.has_struck(target) {
            return false;
        }
        if projectile.owned_by(target) && projectile.age < self.grace_ticks {
            return false;
        }
        may_strike(projectile.owner, target, self.friendly_fire)
    }

    /// Resolves one projectile against the candidate bodies for this tick.
    ///
    /// Direct hits are appended to `hits` and on-hit effect output to
    /// `effects`. Returns the removal reason when the projectile must leave
    /// the active set because of the hits it landed.
    pub fn resolve<R: Rng>(
        &self,
        projectile: &mut Projectile,
        candidates: &[Target],
        rng: &mut R,
        hits: &mut Vec<Hit>,
        effects: &mut EffectOutput,
    ) -> Option<RemovalReason> {
        let scene = Scene {
            candidates,
            friendly_fire: self.friendly_fire,
        };

        for target in candidates {
            if !self.is_eligible(projectile, target.combatant) {
                continue;
            }
            if !circle_overlaps_tile(projectile.position, projectile.radius, target.position) {
                continue;
            }

            let damage = match target.combatant {
                Combatant::Player => projectile.damage,
                Combatant::Enemy(_) => projectile.damage * self.direct_hit_multiplier,
            };
            hits.push(Hit {
                projectile: projectile.id,
                target: target.combatant,
                damage,
            });
            projectile.struck.push(target.combatant);
            projectile.pierce = projectile.pierce.saturating_sub(1);
            trigger_on_hit(projectile, target.combatant, damage, scene, rng, effects);

            if target.combatant == Combatant::Player {
                trace!("projectile {:?} struck the player", projectile.id);
                projectile.pierce = 0;
                return Some(RemovalReason::HitPlayer);
            }

            if projectile.pierce == 0 || self.hit_policy == HitPolicy::FirstMatch {
                break;
            }
        }

        (projectile.pierce == 0).then_some(RemovalReason::PierceSpent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_uses_closest_point() {
        let tile = Vec2::new(32.0, 32.0);
        assert!(circle_overlaps_tile(Vec2::new(48.0, 48.0), 4.0, tile));
        assert!(circle_overlaps_tile(Vec2::new(28.0, 48.0), 4.0, tile));
        assert!(!circle_overlaps_tile(Vec2::new(27.0, 48.0), 4.0, tile));
        assert!(!circle_overlaps_tile(Vec2::new(29.0, 29.0), 4.0, tile));
        assert!(circle_overlaps_tile(Vec2::new(30.0, 30.0), 4.0, tile));
    }
}
