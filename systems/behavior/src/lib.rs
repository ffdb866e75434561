#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy behavior state machine.
//!
//! Every active enemy is evaluated once per tick: the entry delay gates all
//! behavior, then touch attacks, route upkeep and movement run for every kind
//! before the kind-specific strategy fires its cooldown-driven attacks.

mod specials;
mod telegraph;

pub use specials::{FALL_HEIGHT, FALL_SPEED};
pub use telegraph::TelegraphQueue;

use grid_siege_core::{
    Behavior, CellCoord, DamageSource, Direction, Enemy, Event, Player, ProjectileRequest,
    Telegraph, TileMap, Tuning,
};
use grid_siege_system_pathfinding::{Arrival, Pathfinder};
use log::{debug, trace};
use rand::Rng;

const SNAP_DISTANCE: f32 = 0.1;
const TELEPORT_ATTEMPTS: u32 = 8;

/// Everything the behavior system produced during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BehaviorOutput {
    /// Projectiles fired this tick.
    pub projectiles: Vec<ProjectileRequest>,
    /// Telegraphs announced this tick.
    pub telegraphs: Vec<Telegraph>,
    /// Events describing attacks, teleports and specials.
    pub events: Vec<Event>,
}

impl BehaviorOutput {
    /// Discards everything collected so far.
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.telegraphs.clear();
        self.events.clear();
    }
}

/// Stateful system driving every enemy.
#[derive(Debug)]
pub struct EnemyBehavior {
    pathfinder: Pathfinder,
    path_refresh_ticks: u32,
    contact_invulnerability_ticks: u32,
    telegraph_ticks: u32,
}

impl EnemyBehavior {
    /// Creates the system from the simulation tuning.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pathfinder: Pathfinder::new(),
            path_refresh_ticks: tuning.path_refresh_ticks.max(1),
            contact_invulnerability_ticks: tuning.contact_invulnerability_ticks,
            telegraph_ticks: tuning.telegraph_ticks.max(1),
        }
    }

    /// Advances every active enemy by one tick.
    pub fn handle<M, R>(
        &mut self,
        enemies: &mut [Enemy],
        player: &mut Player,
        map: &M,
        rng: &mut R,
        out: &mut BehaviorOutput,
    ) where
        M: TileMap + ?Sized,
        R: Rng,
    {
        for enemy in enemies.iter_mut() {
            if !enemy.is_active() {
                continue;
            }
            if enemy.entry_delay > 0 {
                enemy.entry_delay -= 1;
                continue;
            }

            self.touch_attack(enemy, player, out);

            if let Behavior::Ambusher(mut state) = enemy.behavior {
                let teleported = state.teleport.tick_and_fire()
                    && teleport_near(enemy, player.cell, state.radius, map, rng, out);
                enemy.behavior = Behavior::Ambusher(state);
                if teleported {
                    continue;
                }
            }

            self.refresh_path(enemy, player.cell, map);
            step_along_path(enemy, map);
            if !enemy.is_active() {
                continue;
            }

            specials::attack(enemy, player, self.telegraph_ticks, rng, out);
        }
    }

    fn touch_attack(&self, enemy: &mut Enemy, player: &mut Player, out: &mut BehaviorOutput) {
        if enemy.cell.manhattan_distance(player.cell) == 1 && enemy.touch_cooldown.is_ready() {
            let dealt = player.take_damage(enemy.touch_damage, self.contact_invulnerability_ticks);
            if dealt > 0.0 {
                out.events.push(Event::PlayerDamaged {
                    amount: dealt,
                    source: DamageSource::Touch(enemy.id),
                });
            }
            enemy.touch_cooldown.restart();
        }
        enemy.touch_cooldown.tick();
    }

    fn refresh_path<M>(&mut self, enemy: &mut Enemy, goal: CellCoord, map: &M)
    where
        M: TileMap + ?Sized,
    {
        enemy.path_age = enemy.path_age.saturating_add(1);
        let waiting = !enemy.path.is_empty() || enemy.path_failed;
        if enemy.path_age < self.path_refresh_ticks && waiting {
            return;
        }

        let route = self
            .pathfinder
            .find_path(enemy.cell, goal, map, Arrival::Adjacent);
        enemy.path_failed = route.is_empty();
        if enemy.path_failed {
            trace!("enemy {:?} has no route to {:?}", enemy.id, goal);
        }
        enemy.path.clear();
        enemy.path.extend(route.into_iter().skip(1));
        enemy.path_age = 0;
    }
}

/// Moves the enemy toward the next cell of its route.
///
/// The enemy slides by its speed each tick and snaps onto the cell once within
/// a tenth of a unit, at which point the cell's tile effect applies.
fn step_along_path<M>(enemy: &mut Enemy, map: &M)
where
    M: TileMap + ?Sized,
{
    let Some(&next) = enemy.path.front() else {
        return;
    };
    if let Some(direction) = Direction::between(enemy.cell, next) {
        enemy.facing = direction;
    }

    let target = next.origin();
    let delta = target - enemy.position;
    let distance = delta.length();
    if distance > 0.0 {
        let step = enemy.speed.min(distance);
        enemy.position += delta / distance * step;
    }

    let remaining = (target - enemy.position).abs();
    if remaining.x < SNAP_DISTANCE && remaining.y < SNAP_DISTANCE {
        enemy.position = target;
        enemy.cell = next;
        let _ = enemy.path.pop_front();
        if let Some(effect) = map.tile_effect(next) {
            let _ = effect.apply_to(&mut enemy.health);
        }
    }
}

/// Relocates an ambusher to a walkable cell near `around`, reporting whether
/// one of the attempts landed.
fn teleport_near<M, R>(
    enemy: &mut Enemy,
    around: CellCoord,
    radius: u32,
    map: &M,
    rng: &mut R,
    out: &mut BehaviorOutput,
) -> bool
where
    M: TileMap + ?Sized,
    R: Rng,
{
    let reach = i32::try_from(radius.max(1)).unwrap_or(i32::MAX);
    for _ in 0..TELEPORT_ATTEMPTS {
        let columns = rng.gen_range(-reach..=reach);
        let rows = rng.gen_range(-reach..=reach);
        let Some(cell) = around.offset(columns, rows) else {
            continue;
        };
        let distance = cell.manhattan_distance(around);
        if distance == 0 || distance > radius.max(1) || !map.is_walkable(cell) {
            continue;
        }

        let from = enemy.cell;
        enemy.place_at(cell);
        if let Some(effect) = map.tile_effect(cell) {
            let _ = effect.apply_to(&mut enemy.health);
        }
        debug!("ambusher {:?} teleported {:?} -> {:?}", enemy.id, from, cell);
        out.events.push(Event::EnemyTeleported {
            enemy: enemy.id,
            from,
            to: cell,
        });
        return true;
    }
    false
}

/// Releases an exploder's death burst.
///
/// Always reports the visual burst; the player takes the burst damage when
/// its centre lies within the radius. Enemies of other kinds do nothing.
pub fn death_burst(
    enemy: &Enemy,
    player: &mut Player,
    contact_invulnerability_ticks: u32,
    events: &mut Vec<Event>,
) {
    let Behavior::Exploder(burst) = enemy.behavior else {
        return;
    };

    let center = enemy.center();
    events.push(Event::DeathBurst {
        position: center,
        radius: burst.radius,
    });

    if player.center().distance(center) <= burst.radius {
        let dealt = player.take_damage(burst.damage, contact_invulnerability_ticks);
        if dealt > 0.0 {
            events.push(Event::PlayerDamaged {
                amount: dealt,
                source: DamageSource::Burst(enemy.id),
            });
        }
    }
}
