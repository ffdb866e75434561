//! Intent-driven player movement and firing.

use grid_siege_core::{
    CellCoord, DamageSource, Event, Player, PlayerIntent, ProjectileRequest, TileEffect, TileMap,
};
use grid_siege_system_projectiles::volley;
use rand::Rng;

const SNAP_DISTANCE: f32 = 0.1;
const SPAWN_SEARCH_RADIUS: i32 = 10;

/// Runs one tick of player control.
///
/// Invulnerability frames wind down first. A new step starts only once the
/// previous one finished interpolating and the destination is walkable; the
/// destination's tile effect applies on arrival. Attacks fire on the player's
/// cooldown in the facing direction.
pub(crate) fn drive<M, R>(
    player: &mut Player,
    intent: PlayerIntent,
    map: &M,
    rng: &mut R,
    shots: &mut Vec<ProjectileRequest>,
    events: &mut Vec<Event>,
) where
    M: TileMap + ?Sized,
    R: Rng,
{
    player.invulnerable = player.invulnerable.saturating_sub(1);

    if player.is_settled() {
        if let Some(direction) = intent.step {
            player.facing = direction;
            if let Some(next) = player.cell.neighbor(direction) {
                if map.is_walkable(next) {
                    player.cell = next;
                }
            }
        }
    }
    glide(player, map, events);

    if intent.attack && player.fire.is_ready() {
        shots.extend(volley::player_volley(player, rng));
        player.fire.restart();
    }
    player.fire.tick();
}

fn glide<M>(player: &mut Player, map: &M, events: &mut Vec<Event>)
where
    M: TileMap + ?Sized,
{
    if player.is_settled() {
        return;
    }

    let target = player.cell.origin();
    let delta = target - player.position;
    let distance = delta.length();
    let step = player.stats.move_speed.min(distance);
    player.position += delta / distance * step;

    let remaining = (target - player.position).abs();
    if remaining.x < SNAP_DISTANCE && remaining.y < SNAP_DISTANCE {
        player.position = target;
        if let Some(effect) = map.tile_effect(player.cell) {
            apply_tile(player, effect, events);
        }
    }
}

fn apply_tile(player: &mut Player, effect: TileEffect, events: &mut Vec<Event>) {
    let delta = effect.apply_to(&mut player.health);
    if delta < 0.0 {
        events.push(Event::PlayerDamaged {
            amount: -delta,
            source: DamageSource::Tile,
        });
    } else if delta > 0.0 {
        events.push(Event::PlayerHealed { amount: delta });
    }
}

/// First walkable cell at or around `preferred`, searching outward ring by
/// ring. Falls back to `preferred` when nothing nearby is walkable.
pub(crate) fn find_spawn<M>(map: &M, preferred: CellCoord) -> CellCoord
where
    M: TileMap + ?Sized,
{
    if map.is_walkable(preferred) {
        return preferred;
    }
    for reach in 1..=SPAWN_SEARCH_RADIUS {
        for columns in -reach..=reach {
            for rows in -reach..=reach {
                if let Some(cell) = preferred.offset(columns, rows) {
                    if map.is_walkable(cell) {
                        return cell;
                    }
                }
            }
        }
    }
    preferred
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_siege_core::{CharacterClass, Direction, Vec2, TILE_SIZE};

    use crate::{Arena, Tile};

    fn player_at(cell: CellCoord) -> Player {
        Player::new(CharacterClass::Warrior, cell)
    }

    #[test]
    fn steps_interpolate_and_apply_tiles_on_arrival() {
        let mut arena = Arena::open(4, 4);
        arena.set_tile(CellCoord::new(2, 1), Tile::Hazard);
        let mut player = player_at(CellCoord::new(1, 1));
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let mut shots = Vec::new();
        let mut events = Vec::new();

        let east = PlayerIntent::step(Direction::East);
        drive(&mut player, east, &arena, &mut rng, &mut shots, &mut events);
        assert_eq!(player.cell, CellCoord::new(2, 1));
        assert_eq!(player.position, Vec2::new(TILE_SIZE + 4.0, TILE_SIZE));

        for _ in 0..7 {
            drive(&mut player, east, &arena, &mut rng, &mut shots, &mut events);
        }
        assert_eq!(player.cell, CellCoord::new(2, 1));
        assert!(player.is_settled());
        assert_eq!(player.health.current(), 110.0);
        assert_eq!(
            events,
            vec![Event::PlayerDamaged {
                amount: 10.0,
                source: DamageSource::Tile,
            }]
        );
    }

    #[test]
    fn walls_turn_the_player_without_moving() {
        let mut arena = Arena::open(3, 3);
        arena.set_tile(CellCoord::new(1, 0), Tile::Wall);
        let mut player = player_at(CellCoord::new(1, 1));
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let mut shots = Vec::new();
        let mut events = Vec::new();

        drive(
            &mut player,
            PlayerIntent::step(Direction::North),
            &arena,
            &mut rng,
            &mut shots,
            &mut events,
        );
        assert_eq!(player.cell, CellCoord::new(1, 1));
        assert_eq!(player.facing, Direction::North);
    }

    #[test]
    fn attacks_follow_the_fire_cooldown() {
        let arena = Arena::open(5, 5);
        let mut player = player_at(CellCoord::new(2, 2));
        let mut rng = rand::rngs::mock::StepRng::new(u64::MAX, 0);
        let mut shots = Vec::new();
        let mut events = Vec::new();

        for _ in 0..21 {
            drive(
                &mut player,
                PlayerIntent::idle().attacking(),
                &arena,
                &mut rng,
                &mut shots,
                &mut events,
            );
        }
        assert_eq!(shots.len(), 2);
        assert!((shots[0].velocity - Vec2::new(0.0, 6.0)).length() < 1.0e-4);
    }

    #[test]
    fn spawn_search_skips_walls() {
        let mut arena = Arena::open(4, 4);
        arena.set_tile(CellCoord::new(1, 1), Tile::Wall);
        assert_eq!(
            find_spawn(&arena, CellCoord::new(1, 1)),
            CellCoord::new(0, 0)
        );
        assert_eq!(
            find_spawn(&arena, CellCoord::new(2, 2)),
            CellCoord::new(2, 2)
        );
    }
}
