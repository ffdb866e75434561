use grid_siege_core::{
    Combatant, EntityId, Projectile, ProjectileId, ProjectileKind, ProjectileRequest, Target,
    Vec2,
};
use grid_siege_system_projectiles::{advance, Motion};

const ARENA: Vec2 = Vec2::new(640.0, 480.0);

fn spawn(request: ProjectileRequest) -> Projectile {
    Projectile::from_request(ProjectileId::new(1), request)
}

#[test]
fn range_limit_removes_projectile_on_seventh_tick() {
    let mut projectile = spawn(
        ProjectileRequest::new(Vec2::ZERO, Vec2::new(3.0, 0.0), 5.0)
            .lifespan(10)
            .max_distance(20.0),
    );

    let mut removed_at = None;
    for tick in 1..=10 {
        if advance(&mut projectile, &[], ARENA) == Motion::Expired {
            removed_at = Some(tick);
            break;
        }
    }

    assert_eq!(removed_at, Some(7));
    assert_eq!(projectile.position, Vec2::new(21.0, 0.0));
    assert!(!projectile.is_alive());
}

#[test]
fn bounce_flips_only_the_crossed_component() {
    let mut projectile = spawn(
        ProjectileRequest::new(Vec2::new(634.0, 200.0), Vec2::new(3.0, 2.0), 5.0)
            .kind(ProjectileKind::Bouncing)
            .lifespan(100),
    );

    assert_eq!(advance(&mut projectile, &[], ARENA), Motion::Flying);

    assert_eq!(projectile.velocity, Vec2::new(-3.0, 2.0));
    assert_eq!(projectile.bounces, 2);
}

#[test]
fn bouncing_projectile_dies_with_its_last_bounce() {
    let mut projectile = spawn(
        ProjectileRequest::new(Vec2::new(5.0, 240.0), Vec2::new(-2.0, 0.0), 5.0)
            .kind(ProjectileKind::Bouncing)
            .lifespan(100),
    );
    projectile.bounces = 1;

    assert_eq!(advance(&mut projectile, &[], ARENA), Motion::BouncesSpent);
    assert!(!projectile.is_alive());
}

#[test]
fn homing_keeps_speed_while_turning() {
    let mut projectile = spawn(
        ProjectileRequest::new(Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0), 5.0)
            .kind(ProjectileKind::Homing)
            .lifespan(60)
            .owner(Combatant::Player),
    );
    let candidates = [
        Target {
            combatant: Combatant::Enemy(EntityId::new(0)),
            position: Vec2::new(84.0, 300.0),
        },
        Target {
            combatant: Combatant::Enemy(EntityId::new(1)),
            position: Vec2::new(400.0, 400.0),
        },
    ];

    for _ in 0..20 {
        let _ = advance(&mut projectile, &candidates, ARENA);
        assert!((projectile.velocity.length() - 4.0).abs() < 1.0e-3);
    }

    assert!(projectile.position.y > 150.0);
    assert!((projectile.position.x - 100.0).abs() < 1.0e-3);
}

#[test]
fn homing_ignores_its_owner() {
    let owner = Combatant::Enemy(EntityId::new(5));
    let mut projectile = spawn(
        ProjectileRequest::new(Vec2::new(100.0, 100.0), Vec2::new(0.0, -2.0), 5.0)
            .kind(ProjectileKind::Homing)
            .owner(owner),
    );
    let candidates = [Target {
        combatant: owner,
        position: Vec2::new(84.0, 200.0),
    }];

    let _ = advance(&mut projectile, &candidates, ARENA);

    assert_eq!(projectile.velocity, Vec2::new(0.0, -2.0));
}
