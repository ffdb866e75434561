//! Interpretation of on-hit and on-expire effect descriptors.

use std::f32::consts::TAU;

use grid_siege_core::{
    may_strike, Combatant, Projectile, ProjectileEffect, ProjectileRequest, Target, Vec2,
};
use rand::Rng;

const RICOCHET_LIFESPAN: u32 = 40;
const RICOCHET_RANGE: f32 = 120.0;

/// Secondary damage produced by an effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    /// Participant receiving the damage.
    pub target: Combatant,
    /// Damage dealt; no direct-hit multiplier applies.
    pub amount: f32,
}

/// Everything produced by effects during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectOutput {
    /// Projectiles to add to the active set.
    pub spawns: Vec<ProjectileRequest>,
    /// Secondary damage to apply.
    pub strikes: Vec<Strike>,
    /// Health returned to the player.
    pub healing: f32,
}

impl EffectOutput {
    /// Discards everything collected so far.
    pub fn clear(&mut self) {
        self.spawns.clear();
        self.strikes.clear();
        self.healing = 0.0;
    }
}

/// Scene the effects of a single projectile are evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Living bodies that may receive secondary damage.
    pub candidates: &'a [Target],
    /// Whether enemy effects may damage other enemies.
    pub friendly_fire: bool,
}

impl Scene<'_> {
    fn eligible(&self, projectile: &Projectile, target: &Target) -> bool {
        projectile.owner != Some(target.combatant)
            && may_strike(projectile.owner, target.combatant, self.friendly_fire)
    }
}

/// Runs the on-hit effects of a projectile that just damaged `struck`.
///
/// `dealt` is the damage the direct hit removed. Split effects are consumed
/// the first time they fire; ricochet charges are spent one per hit.
pub fn trigger_on_hit<R: Rng>(
    projectile: &mut Projectile,
    struck: Combatant,
    dealt: f32,
    scene: Scene<'_>,
    rng: &mut R,
    out: &mut EffectOutput,
) {
    let mut split = false;
    for index in 0..projectile.on_hit.len() {
        let effect = projectile.on_hit[index];
        match effect {
            ProjectileEffect::Split { .. } => {
                if !split {
                    release_fragments(projectile, &effect, rng, out);
                    split = true;
                }
            }
            ProjectileEffect::Explosion {
                radius,
                damage_factor,
            } => explode(projectile, Some(struck), radius, damage_factor, scene, out),
            ProjectileEffect::Leech { fraction } => {
                if projectile.owner == Some(Combatant::Player) {
                    out.healing += (dealt * fraction).floor().max(0.0);
                }
            }
            ProjectileEffect::Ricochet { bounces, speed } => {
                if bounces > 0 {
                    projectile.on_hit[index] = ProjectileEffect::Ricochet {
                        bounces: bounces - 1,
                        speed,
                    };
                    let velocity = random_heading(rng) * speed;
                    let mut request =
                        ProjectileRequest::new(projectile.position, velocity, projectile.damage)
                            .lifespan(RICOCHET_LIFESPAN)
                            .max_distance(RICOCHET_RANGE);
                    request.owner = projectile.owner;
                    out.spawns.push(request);
                }
            }
            ProjectileEffect::Chain {
                range,
                damage_factor,
            } => chain(projectile, struck, range, damage_factor, scene, out),
        }
    }

    if split {
        let is_split = |effect: &ProjectileEffect| matches!(effect, ProjectileEffect::Split { .. });
        projectile.on_hit.retain(|effect| !is_split(effect));
        projectile.on_expire.retain(|effect| !is_split(effect));
    }
}

/// Runs the on-expire effects of a projectile whose lifespan or range ran out.
pub fn trigger_on_expire<R: Rng>(
    projectile: &Projectile,
    scene: Scene<'_>,
    rng: &mut R,
    out: &mut EffectOutput,
) {
    for effect in &projectile.on_expire {
        match *effect {
            ProjectileEffect::Split { .. } => release_fragments(projectile, effect, rng, out),
            ProjectileEffect::Explosion {
                radius,
                damage_factor,
            } => explode(projectile, None, radius, damage_factor, scene, out),
            ProjectileEffect::Leech { .. }
            | ProjectileEffect::Ricochet { .. }
            | ProjectileEffect::Chain { .. } => {}
        }
    }
}

fn release_fragments<R: Rng>(
    projectile: &Projectile,
    effect: &ProjectileEffect,
    rng: &mut R,
    out: &mut EffectOutput,
) {
    let ProjectileEffect::Split {
        count,
        damage_factor,
        speed,
        lifespan,
        max_distance,
    } = *effect
    else {
        return;
    };

    let damage = (projectile.damage * damage_factor).floor().max(1.0);
    for _ in 0..count {
        let velocity = random_heading(rng) * speed;
        let mut request = ProjectileRequest::new(projectile.position, velocity, damage)
            .lifespan(lifespan)
            .max_distance(max_distance);
        request.owner = projectile.owner;
        out.spawns.push(request);
    }
}

fn explode(
    projectile: &Projectile,
    struck: Option<Combatant>,
    radius: f32,
    damage_factor: f32,
    scene: Scene<'_>,
    out: &mut EffectOutput,
) {
    let amount = projectile.damage * damage_factor;
    for target in scene.candidates {
        if Some(target.combatant) == struck || !scene.eligible(projectile, target) {
            continue;
        }
        if target.center().distance(projectile.position) <= radius {
            out.strikes.push(Strike {
                target: target.combatant,
                amount,
            });
        }
    }
}

fn chain(
    projectile: &Projectile,
    struck: Combatant,
    range: f32,
    damage_factor: f32,
    scene: Scene<'_>,
    out: &mut EffectOutput,
) {
    let Some(origin) = scene
        .candidates
        .iter()
        .find(|target| target.combatant == struck)
        .map(Target::center)
    else {
        return;
    };

    let mut best: Option<(Combatant, f32)> = None;
    for target in scene.candidates {
        if target.combatant == struck
            || projectile.has_struck(target.combatant)
            || !scene.eligible(projectile, target)
        {
            continue;
        }
        let distance = target.center().distance(origin);
        if distance > range {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((target.combatant, distance)),
        }
    }

    if let Some((target, _)) = best {
        out.strikes.push(Strike {
            target,
            amount: projectile.damage * damage_factor,
        });
    }
}

fn random_heading<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_siege_core::{EntityId, ProjectileId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn enemy(id: u32, x: f32) -> Target {
        Target {
            combatant: Combatant::Enemy(EntityId::new(id)),
            position: Vec2::new(x, 0.0),
        }
    }

    fn player_shot(effect: ProjectileEffect) -> Projectile {
        Projectile::from_request(
            ProjectileId::new(0),
            ProjectileRequest::new(Vec2::new(16.0, 16.0), Vec2::X, 10.0)
                .owner(Combatant::Player)
                .on_hit(effect),
        )
    }

    #[test]
    fn leech_heals_only_player_owned_hits() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = EffectOutput::default();
        let scene = Scene {
            candidates: &[],
            friendly_fire: false,
        };

        let mut projectile = player_shot(ProjectileEffect::Leech { fraction: 0.25 });
        trigger_on_hit(
            &mut projectile,
            Combatant::Enemy(EntityId::new(0)),
            15.0,
            scene,
            &mut rng,
            &mut out,
        );
        assert_eq!(out.healing, 3.0);

        out.clear();
        projectile.owner = Some(Combatant::Enemy(EntityId::new(9)));
        trigger_on_hit(
            &mut projectile,
            Combatant::Player,
            15.0,
            scene,
            &mut rng,
            &mut out,
        );
        assert_eq!(out.healing, 0.0);
    }

    #[test]
    fn ricochet_spends_one_charge_per_hit() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut out = EffectOutput::default();
        let scene = Scene {
            candidates: &[],
            friendly_fire: false,
        };
        let mut projectile = player_shot(ProjectileEffect::Ricochet {
            bounces: 1,
            speed: 3.0,
        });

        for _ in 0..3 {
            trigger_on_hit(
                &mut projectile,
                Combatant::Enemy(EntityId::new(0)),
                10.0,
                scene,
                &mut rng,
                &mut out,
            );
        }

        assert_eq!(out.spawns.len(), 1);
        assert!((out.spawns[0].velocity.length() - 3.0).abs() < 1.0e-4);
        assert_eq!(out.spawns[0].owner, Some(Combatant::Player));
    }

    #[test]
    fn split_fires_once_then_disappears() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut out = EffectOutput::default();
        let scene = Scene {
            candidates: &[],
            friendly_fire: false,
        };
        let split = ProjectileEffect::Split {
            count: 5,
            damage_factor: 0.4,
            speed: 3.0,
            lifespan: 40,
            max_distance: 120.0,
        };
        let mut projectile = player_shot(split);
        projectile.on_expire.push(split);

        trigger_on_hit(
            &mut projectile,
            Combatant::Enemy(EntityId::new(0)),
            10.0,
            scene,
            &mut rng,
            &mut out,
        );
        trigger_on_expire(&projectile, scene, &mut rng, &mut out);

        assert_eq!(out.spawns.len(), 5);
        assert!(out.spawns.iter().all(|spawn| spawn.damage == 4.0));
        assert!(projectile.on_hit.is_empty());
        assert!(projectile.on_expire.is_empty());
    }

    #[test]
    fn explosion_skips_direct_target_and_distant_bodies() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut out = EffectOutput::default();
        let candidates = [enemy(0, 0.0), enemy(1, 20.0), enemy(2, 300.0)];
        let scene = Scene {
            candidates: &candidates,
            friendly_fire: false,
        };
        let mut projectile = player_shot(ProjectileEffect::Explosion {
            radius: 48.0,
            damage_factor: 0.5,
        });

        trigger_on_hit(
            &mut projectile,
            candidates[0].combatant,
            15.0,
            scene,
            &mut rng,
            &mut out,
        );

        assert_eq!(
            out.strikes,
            vec![Strike {
                target: candidates[1].combatant,
                amount: 5.0,
            }]
        );
    }

    #[test]
    fn chain_jumps_to_nearest_unstruck_enemy() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut out = EffectOutput::default();
        let candidates = [enemy(0, 0.0), enemy(1, 64.0), enemy(2, 40.0)];
        let scene = Scene {
            candidates: &candidates,
            friendly_fire: false,
        };
        let mut projectile = player_shot(ProjectileEffect::Chain {
            range: 100.0,
            damage_factor: 1.0,
        });

        trigger_on_hit(
            &mut projectile,
            candidates[0].combatant,
            15.0,
            scene,
            &mut rng,
            &mut out,
        );

        assert_eq!(out.strikes.len(), 1);
        assert_eq!(out.strikes[0].target, candidates[2].combatant);
    }
}
