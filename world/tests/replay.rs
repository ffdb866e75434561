use grid_siege_core::{
    BossVariant, CellCoord, CharacterClass, Command, Direction, Event, MinibossSpecial,
    PlayerIntent, Tuning,
};
use grid_siege_world::{apply, query, Arena, World};

const SCRIPT: [Option<Direction>; 6] = [
    Some(Direction::East),
    Some(Direction::East),
    Some(Direction::South),
    None,
    Some(Direction::West),
    Some(Direction::North),
];

fn run(seed: u64, ticks: usize) -> (Vec<Event>, World) {
    let arena = Arena::default();
    let mut world = World::new(&arena, Tuning::default(), CharacterClass::Mage, seed);
    let mut events = Vec::new();

    apply(
        &mut world,
        &arena,
        Command::SpawnMiniboss {
            cell: CellCoord::new(17, 12),
            special: MinibossSpecial::Rain { drops: 6 },
        },
        &mut events,
    );
    apply(
        &mut world,
        &arena,
        Command::SpawnBoss {
            cell: CellCoord::new(17, 2),
            variant: BossVariant::LateGame,
        },
        &mut events,
    );

    for index in 0..ticks {
        let intent = PlayerIntent {
            step: SCRIPT[(index / 10) % SCRIPT.len()],
            attack: true,
        };
        apply(&mut world, &arena, Command::Tick { intent }, &mut events);
        if query::is_defeated(&world) {
            break;
        }
    }
    (events, world)
}

#[test]
fn identical_seeds_replay_identically() {
    let (first, first_world) = run(42, 900);
    let (second, second_world) = run(42, 900);

    assert_eq!(first, second);
    assert_eq!(query::player(&first_world), query::player(&second_world));
    assert_eq!(query::tick(&first_world), query::tick(&second_world));
    assert_eq!(query::kills(&first_world), query::kills(&second_world));
}

#[test]
fn bosses_enter_the_default_arena() {
    let (events, _) = run(3, 1);
    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 2);
}

#[test]
fn director_raises_difficulty_during_long_runs() {
    let arena = Arena::default();
    let tuning = Tuning {
        contact_invulnerability_ticks: 1_000_000,
        ..Tuning::default()
    };
    let mut world = World::new(&arena, tuning, CharacterClass::Warrior, 11);
    let mut events = Vec::new();

    for _ in 0..600 {
        apply(
            &mut world,
            &arena,
            Command::Tick {
                intent: PlayerIntent::idle(),
            },
            &mut events,
        );
    }

    let raised: Vec<f32> = events
        .iter()
        .filter_map(|event| match event {
            Event::DifficultyRaised { difficulty } => Some(*difficulty),
            _ => None,
        })
        .collect();
    assert_eq!(raised, vec![1.5, 2.0]);
    assert_eq!(query::difficulty(&world).get(), 2.0);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. })));
}

#[test]
fn restart_after_defeat_resumes_the_clock() {
    let arena = Arena::open(6, 6);
    let tuning = Tuning {
        contact_invulnerability_ticks: 0,
        ..Tuning::default()
    };
    let mut world = World::new(&arena, tuning, CharacterClass::Warrior, 5);
    let mut events = Vec::new();
    apply(
        &mut world,
        &arena,
        Command::SpawnMiniboss {
            cell: CellCoord::new(2, 1),
            special: MinibossSpecial::Classic,
        },
        &mut events,
    );

    for _ in 0..2_000 {
        apply(
            &mut world,
            &arena,
            Command::Tick {
                intent: PlayerIntent::idle(),
            },
            &mut events,
        );
        if query::is_defeated(&world) {
            break;
        }
    }
    assert!(query::is_defeated(&world));
    assert!(events.contains(&Event::PlayerDefeated));

    let frozen = query::tick(&world);
    apply(
        &mut world,
        &arena,
        Command::Tick {
            intent: PlayerIntent::idle(),
        },
        &mut events,
    );
    assert_eq!(query::tick(&world), frozen);

    apply(&mut world, &arena, Command::Restart, &mut events);
    assert!(!query::is_defeated(&world));
    assert_eq!(query::player(&world).health.current(), 120.0);
    apply(
        &mut world,
        &arena,
        Command::Tick {
            intent: PlayerIntent::idle(),
        },
        &mut events,
    );
    assert_eq!(query::tick(&world), 1);
}
