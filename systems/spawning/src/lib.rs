#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning director and enemy roster.
//!
//! The director consumes clock events, ramps the difficulty scalar and emits
//! spawn commands on a shrinking interval. The roster turns those commands
//! into fully configured enemies.

pub mod roster;

use grid_siege_core::{CellCoord, Command, Difficulty, EnemyKind, Event, TileMap, Tuning};
use log::{debug, info};
use rand::Rng;

/// Relative odds of every regular kind, out of 100.
///
/// Brutes and shooters keep their classic 15% share each.
const SPAWN_TABLE: [(EnemyKind, u32); 11] = [
    (EnemyKind::Brute, 15),
    (EnemyKind::Shooter, 15),
    (EnemyKind::Fast, 5),
    (EnemyKind::Tank, 4),
    (EnemyKind::Spitter, 3),
    (EnemyKind::Wizard, 3),
    (EnemyKind::Archer, 3),
    (EnemyKind::Bossling, 1),
    (EnemyKind::Ambusher, 3),
    (EnemyKind::Exploder, 3),
    (EnemyKind::Normal, 45),
];

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: u32,
    min_spawn_interval: u32,
    interval_step: u32,
    ramp_ticks: u32,
    difficulty_step: f32,
    initial_difficulty: f32,
    min_distance: u32,
    attempts: u32,
}

impl Config {
    /// Extracts the spawning parameters from the simulation tuning.
    #[must_use]
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            spawn_interval: tuning.spawn_interval_ticks,
            min_spawn_interval: tuning.min_spawn_interval_ticks,
            interval_step: tuning.spawn_interval_step,
            ramp_ticks: tuning.difficulty_ramp_ticks,
            difficulty_step: tuning.difficulty_step,
            initial_difficulty: tuning.initial_difficulty,
            min_distance: tuning.spawn_min_distance,
            attempts: tuning.spawn_attempts,
        }
    }
}

/// Pure system that ramps the difficulty and emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    spawn_interval: u32,
    spawn_timer: u32,
    difficulty: Difficulty,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            spawn_interval: config.spawn_interval,
            spawn_timer: 0,
            difficulty: Difficulty::new(config.initial_difficulty),
        }
    }

    /// Current difficulty scalar.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Ticks currently separating two spawns.
    #[must_use]
    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    /// Returns the director to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Consumes clock events and immutable views to emit spawn commands.
    ///
    /// Returns `true` when the difficulty rose while handling the events.
    pub fn handle<M, R>(
        &mut self,
        events: &[Event],
        player: CellCoord,
        map: &M,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> bool
    where
        M: TileMap + ?Sized,
        R: Rng,
    {
        let mut raised = false;
        for event in events {
            let Event::TimeAdvanced { tick } = event else {
                continue;
            };

            if self.config.ramp_ticks > 0 && *tick % u64::from(self.config.ramp_ticks) == 0 {
                self.ramp();
                raised = true;
            }

            self.spawn_timer += 1;
            if self.spawn_interval > 0 && self.spawn_timer >= self.spawn_interval {
                self.spawn_timer = 0;
                if let Some(command) = self.roll_spawn(player, map, rng) {
                    out.push(command);
                }
            }
        }
        raised
    }

    fn ramp(&mut self) {
        self.difficulty = self.difficulty.raised(self.config.difficulty_step);
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(self.config.interval_step)
            .max(self.config.min_spawn_interval);
        info!(
            "difficulty raised to {:.1}, spawning every {} ticks",
            self.difficulty.get(),
            self.spawn_interval
        );
    }

    fn roll_spawn<M, R>(&self, player: CellCoord, map: &M, rng: &mut R) -> Option<Command>
    where
        M: TileMap + ?Sized,
        R: Rng,
    {
        if map.width() == 0 || map.height() == 0 {
            return None;
        }

        for _ in 0..self.config.attempts {
            let cell = edge_cell(map.width(), map.height(), rng);
            if !map.is_walkable(cell) || cell.manhattan_distance(player) < self.config.min_distance
            {
                continue;
            }
            let kind = roll_kind(rng);
            debug!("director spawns {kind:?} at {cell:?}");
            return Some(Command::SpawnEnemy { kind, cell });
        }

        debug!("director found no spawn cell");
        None
    }
}

/// Picks a random cell on one of the four map edges.
fn edge_cell<R: Rng>(width: u32, height: u32, rng: &mut R) -> CellCoord {
    match rng.gen_range(0..4) {
        0 => CellCoord::new(0, rng.gen_range(0..height)),
        1 => CellCoord::new(width - 1, rng.gen_range(0..height)),
        2 => CellCoord::new(rng.gen_range(0..width), 0),
        _ => CellCoord::new(rng.gen_range(0..width), height - 1),
    }
}

fn roll_kind<R: Rng>(rng: &mut R) -> EnemyKind {
    let total: u32 = SPAWN_TABLE.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in SPAWN_TABLE {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EnemyKind::Normal
}
