//! Headless, scripted simulation runs.

use std::fmt;

use grid_siege_core::{CharacterClass, Command, Direction, Event, PlayerIntent, Tuning};
use grid_siege_world::{apply, query, Arena, World};
use log::{debug, info};
use serde::Serialize;

/// Ticks the scripted player holds each patrol direction.
const PATROL_LEG_TICKS: u64 = 24;

const PATROL: [Direction; 4] = [
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::North,
];

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RunSummary {
    /// Seed the run was started with.
    pub(crate) seed: u64,
    /// Ticks simulated before the run ended.
    pub(crate) ticks: u64,
    /// Enemies killed.
    pub(crate) kills: u32,
    /// Gold collected.
    pub(crate) gold: u32,
    /// Level reached.
    pub(crate) level: u32,
    /// Remaining player health.
    pub(crate) health: f32,
    /// Player maximum health.
    pub(crate) max_health: f32,
    /// Difficulty at the end of the run.
    pub(crate) difficulty: f32,
    /// Whether the player was defeated.
    pub(crate) defeated: bool,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed:       {}", self.seed)?;
        writeln!(f, "ticks:      {}", self.ticks)?;
        writeln!(f, "kills:      {}", self.kills)?;
        writeln!(f, "gold:       {}", self.gold)?;
        writeln!(f, "level:      {}", self.level)?;
        writeln!(f, "health:     {:.0}/{:.0}", self.health, self.max_health)?;
        writeln!(f, "difficulty: {:.1}", self.difficulty)?;
        write!(
            f,
            "outcome:    {}",
            if self.defeated { "defeated" } else { "survived" }
        )
    }
}

/// Intent of the scripted player: a square patrol while firing constantly.
fn scripted_intent(tick: u64) -> PlayerIntent {
    let leg = (tick / PATROL_LEG_TICKS) as usize % PATROL.len();
    PlayerIntent::step(PATROL[leg]).attacking()
}

/// Runs the simulation for up to `ticks` steps or until the player falls.
///
/// Every upgrade offer is answered with its first choice.
pub(crate) fn run(
    arena: &Arena,
    tuning: Tuning,
    class: CharacterClass,
    seed: u64,
    ticks: u64,
) -> RunSummary {
    let mut world = World::new(arena, tuning, class, seed);
    info!("{}", query::welcome_banner(&world));

    let mut events = Vec::new();
    for tick in 0..ticks {
        events.clear();
        apply(
            &mut world,
            arena,
            Command::Tick {
                intent: scripted_intent(tick),
            },
            &mut events,
        );
        for event in &events {
            if let Event::LevelUp { level } = event {
                info!("reached level {level}");
            }
        }

        if let Some(&upgrade) = query::upgrade_offers(&world).first() {
            debug!("choosing {upgrade:?}");
            apply(
                &mut world,
                arena,
                Command::ApplyUpgrade { upgrade },
                &mut events,
            );
        }
        if query::is_defeated(&world) {
            break;
        }
    }

    let player = query::player(&world);
    RunSummary {
        seed,
        ticks: query::tick(&world),
        kills: query::kills(&world),
        gold: player.progress.gold,
        level: player.progress.level,
        health: player.health.current(),
        max_health: player.health.maximum(),
        difficulty: query::difficulty(&world).get(),
        defeated: query::is_defeated(&world),
    }
}
