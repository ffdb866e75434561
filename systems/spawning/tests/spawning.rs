use grid_siege_core::{CellCoord, Command, Difficulty, EnemyKind, Event, TileMap, Tuning};
use grid_siege_system_spawning::{Config, Spawning};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct Arena {
    width: u32,
    height: u32,
    walls: bool,
}

impl TileMap for Arena {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_walkable(&self, cell: CellCoord) -> bool {
        let border = cell.column() == 0
            || cell.row() == 0
            || cell.column() + 1 == self.width
            || cell.row() + 1 == self.height;
        self.contains(cell) && !(self.walls && border)
    }
}

fn open(width: u32, height: u32) -> Arena {
    Arena {
        width,
        height,
        walls: false,
    }
}

fn ticks(range: std::ops::RangeInclusive<u64>) -> Vec<Event> {
    range.map(|tick| Event::TimeAdvanced { tick }).collect()
}

fn spawning(tuning: &Tuning) -> Spawning {
    Spawning::new(Config::from_tuning(tuning))
}

#[test]
fn spawns_once_per_interval_far_from_player() {
    let tuning = Tuning::default();
    let mut spawning = spawning(&tuning);
    let mut rng = ChaCha8Rng::seed_from_u64(0x1234_5678);
    let player = CellCoord::new(10, 7);
    let map = open(20, 15);
    let mut commands = Vec::new();

    let _ = spawning.handle(&ticks(1..=179), player, &map, &mut rng, &mut commands);
    assert!(commands.is_empty(), "no spawn before full interval");

    let _ = spawning.handle(&ticks(180..=180), player, &map, &mut rng, &mut commands);
    assert_eq!(commands.len(), 1, "expected spawn after full interval");

    match &commands[0] {
        Command::SpawnEnemy { kind, cell } => {
            assert!(EnemyKind::REGULAR.contains(kind));
            assert!(cell.manhattan_distance(player) >= 5);
            assert!(
                cell.column() == 0 || cell.column() == 19 || cell.row() == 0 || cell.row() == 14
            );
        }
        other => panic!("unexpected command emitted: {other:?}"),
    }
}

#[test]
fn difficulty_ramps_and_interval_shrinks() {
    let tuning = Tuning::default();
    let mut spawning = spawning(&tuning);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut commands = Vec::new();
    let map = open(12, 12);

    let raised = spawning.handle(
        &ticks(1..=299),
        CellCoord::new(6, 6),
        &map,
        &mut rng,
        &mut commands,
    );
    assert!(!raised);
    assert_eq!(spawning.difficulty(), Difficulty::new(1.0));

    let raised = spawning.handle(
        &ticks(300..=600),
        CellCoord::new(6, 6),
        &map,
        &mut rng,
        &mut commands,
    );
    assert!(raised);
    assert_eq!(spawning.difficulty(), Difficulty::new(2.0));
    assert_eq!(spawning.spawn_interval(), 176);
}

#[test]
fn interval_never_drops_below_floor() {
    let tuning = Tuning {
        difficulty_ramp_ticks: 1,
        spawn_interval_step: 50,
        ..Tuning::default()
    };
    let mut spawning = spawning(&tuning);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut commands = Vec::new();

    let _ = spawning.handle(
        &ticks(1..=10),
        CellCoord::new(1, 1),
        &open(8, 8),
        &mut rng,
        &mut commands,
    );
    assert_eq!(spawning.spawn_interval(), 40);
}

#[test]
fn walled_edges_yield_no_spawn() {
    let tuning = Tuning {
        spawn_interval_ticks: 1,
        ..Tuning::default()
    };
    let mut spawning = spawning(&tuning);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut commands = Vec::new();
    let map = Arena {
        width: 10,
        height: 10,
        walls: true,
    };

    let _ = spawning.handle(
        &ticks(1..=50),
        CellCoord::new(5, 5),
        &map,
        &mut rng,
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn deterministic_replay_produces_identical_sequence() {
    let replay = || {
        let tuning = Tuning {
            spawn_interval_ticks: 7,
            difficulty_ramp_ticks: 0,
            ..Tuning::default()
        };
        let mut spawning = spawning(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(0x4d59_5df4_d0f3_3173);
        let mut commands = Vec::new();
        let _ = spawning.handle(
            &ticks(1..=700),
            CellCoord::new(4, 4),
            &open(16, 9),
            &mut rng,
            &mut commands,
        );
        commands
    };

    let first = replay();
    assert!(!first.is_empty());
    assert_eq!(first, replay(), "replay diverged between runs");
}
