use grid_siege_core::{
    Behavior, Enemy, Event, MinibossSpecial, Player, ProjectileKind, ProjectileRequest,
    ShotProfile, SpecialAttack, Telegraph, Vec2, TILE_SIZE,
};
use grid_siege_system_projectiles::volley;
use log::debug;
use rand::Rng;

use crate::BehaviorOutput;

/// Height above its target a falling shot spawns at, in world units.
pub const FALL_HEIGHT: f32 = 96.0;

/// Downward speed of a falling shot in world units per tick.
pub const FALL_SPEED: f32 = 6.0;

const RAIN_SCATTER: f32 = TILE_SIZE * 2.0;

const MINIBOSS_VOLLEY: ShotProfile = ShotProfile {
    kind: ProjectileKind::Linear,
    speed: 3.0,
    damage_factor: 1.2,
    lifespan: 90,
    max_distance: None,
    radius: 4.0,
    pierce: 1,
};

const FALLING_SHOT: ShotProfile = ShotProfile {
    kind: ProjectileKind::Heavy,
    speed: FALL_SPEED,
    damage_factor: 1.0,
    lifespan: 30,
    max_distance: Some(FALL_HEIGHT),
    radius: 6.0,
    pierce: 1,
};

const TRACKING_SHOT: ShotProfile = ShotProfile {
    kind: ProjectileKind::Heavy,
    speed: 4.0,
    damage_factor: 1.5,
    lifespan: 90,
    max_distance: None,
    radius: 6.0,
    pierce: 1,
};

/// Runs the kind-specific attack of an enemy for this tick.
pub(crate) fn attack<R: Rng>(
    enemy: &mut Enemy,
    player: &Player,
    telegraph_ticks: u32,
    rng: &mut R,
    out: &mut BehaviorOutput,
) {
    let behavior = enemy.behavior;
    match behavior {
        Behavior::Chaser | Behavior::Ambusher(_) | Behavior::Exploder(_) => {}
        Behavior::Ranged(mut state) => {
            if state.fire.tick_and_fire() {
                out.projectiles
                    .push(aim_at_player(enemy, player, &state.shot));
            }
            enemy.behavior = Behavior::Ranged(state);
        }
        Behavior::Miniboss(mut state) => {
            if state.cooldown.tick_and_fire() {
                miniboss_special(enemy, state.special, player, telegraph_ticks, rng, out);
            }
            enemy.behavior = Behavior::Miniboss(state);
        }
        Behavior::Boss(mut state) => {
            if state.fire.tick_and_fire() {
                out.projectiles
                    .push(aim_at_player(enemy, player, &state.shot));
            }
            if let Some(radial) = state.radial.as_mut() {
                if radial.cooldown.tick_and_fire() {
                    debug!("boss {:?} fires a radial burst", enemy.id);
                    out.projectiles.extend(volley::radial_burst(
                        enemy.id,
                        enemy.center(),
                        radial.count,
                        radial.speed,
                        &state.shot,
                        enemy.touch_damage,
                    ));
                    out.events.push(Event::SpecialTriggered {
                        enemy: enemy.id,
                        special: SpecialAttack::Radial,
                    });
                }
            }
            enemy.behavior = Behavior::Boss(state);
        }
    }
}

fn miniboss_special<R: Rng>(
    enemy: &Enemy,
    special: MinibossSpecial,
    player: &Player,
    telegraph_ticks: u32,
    rng: &mut R,
    out: &mut BehaviorOutput,
) {
    let attack = match special {
        MinibossSpecial::Classic => {
            out.projectiles.extend(volley::axis_volley(
                enemy.id,
                enemy.center(),
                &MINIBOSS_VOLLEY,
                enemy.touch_damage,
            ));
            SpecialAttack::Volley
        }
        MinibossSpecial::Rain { drops } => {
            let around = player.center();
            for _ in 0..drops {
                let target = around
                    + Vec2::new(
                        rng.gen_range(-RAIN_SCATTER..=RAIN_SCATTER),
                        rng.gen_range(-RAIN_SCATTER..=RAIN_SCATTER),
                    );
                out.telegraphs.push(Telegraph::new(
                    Some(enemy.id),
                    target,
                    telegraph_ticks,
                    falling_shot(enemy, target),
                ));
            }
            SpecialAttack::Rain
        }
        MinibossSpecial::Tracking => {
            let target = player.center();
            let shot = volley::aimed_shot(
                enemy.id,
                enemy.center(),
                target,
                enemy.facing.unit(),
                &TRACKING_SHOT,
                enemy.touch_damage,
            );
            out.telegraphs.push(Telegraph::new(
                Some(enemy.id),
                target,
                telegraph_ticks,
                shot,
            ));
            SpecialAttack::Tracking
        }
    };

    debug!("miniboss {:?} triggers {:?}", enemy.id, attack);
    out.events.push(Event::SpecialTriggered {
        enemy: enemy.id,
        special: attack,
    });
}

/// Shot dropping straight down onto `target` from above.
fn falling_shot(enemy: &Enemy, target: Vec2) -> ProjectileRequest {
    volley::profile_request(
        enemy.id,
        target - Vec2::new(0.0, FALL_HEIGHT),
        Vec2::new(0.0, FALL_SPEED),
        &FALLING_SHOT,
        enemy.touch_damage,
    )
}

fn aim_at_player(enemy: &Enemy, player: &Player, shot: &ShotProfile) -> ProjectileRequest {
    volley::aimed_shot(
        enemy.id,
        enemy.center(),
        player.center(),
        enemy.facing.unit(),
        shot,
        enemy.touch_damage,
    )
}
