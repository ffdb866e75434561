use grid_siege_core::{
    CellCoord, CharacterClass, Difficulty, Event, ExperienceOrb, Player, Rewards, ShotPattern,
    Skill, Upgrade, Vec2,
};
use grid_siege_system_progression::{apply_skill, apply_upgrade, award, collect_orbs};

fn warrior() -> Player {
    Player::new(CharacterClass::Warrior, CellCoord::new(1, 1))
}

#[test]
fn boss_kill_pays_out_and_levels_up() {
    let mut player = warrior();
    let _ = player.health.damage(50.0);
    let mut events = Vec::new();

    let rewards = Rewards::for_difficulty(Difficulty::new(3.0), 10);
    let levels = award(&mut player, rewards, &mut events);

    assert_eq!(player.progress.gold, 110);
    assert_eq!(levels, 1);
    assert_eq!(player.progress.level, 2);
    assert_eq!(player.progress.experience, 10);
    assert_eq!(player.health.maximum(), 130.0);
    assert_eq!(player.health.current(), 130.0);
    assert_eq!(player.stats.damage, 20.0);
    assert!((player.stats.move_speed - 4.2).abs() < 1.0e-6);
    assert_eq!(events, vec![Event::LevelUp { level: 2 }]);
}

#[test]
fn orbs_in_range_drift_toward_the_player() {
    let mut player = warrior();
    let center = player.center();
    let mut orbs = vec![
        ExperienceOrb {
            position: center + Vec2::new(12.0, 0.0),
            value: 2,
        },
        ExperienceOrb {
            position: center + Vec2::new(0.0, -40.0),
            value: 2,
        },
    ];
    let mut events = Vec::new();

    let levels = collect_orbs(&mut player, &mut orbs, &mut events);

    assert_eq!(levels, 0);
    assert!(events.is_empty());
    assert_eq!(orbs.len(), 2);
    assert!((orbs[0].position - (center + Vec2::new(9.0, 0.0))).length() < 1.0e-4);
    assert_eq!(orbs[1].position, center + Vec2::new(0.0, -40.0));

    player.stats.pickup_range = 50.0;
    let _ = collect_orbs(&mut player, &mut orbs, &mut events);
    assert!((orbs[1].position - (center + Vec2::new(0.0, -37.0))).length() < 1.0e-4);
}

#[test]
fn close_orbs_pay_experience_and_gold() {
    let mut player = warrior();
    let center = player.center();
    let mut orbs = vec![ExperienceOrb {
        position: center + Vec2::new(9.0, 0.0),
        value: 3,
    }];
    let mut events = Vec::new();

    let _ = collect_orbs(&mut player, &mut orbs, &mut events);
    assert_eq!(orbs.len(), 1);
    assert_eq!(player.progress.experience, 0);

    let _ = collect_orbs(&mut player, &mut orbs, &mut events);
    assert!(orbs.is_empty());
    assert_eq!(player.progress.experience, 3);
    assert_eq!(player.progress.gold, 3);
    assert_eq!(events, vec![Event::OrbCollected { value: 3 }]);
}

#[test]
fn fire_rate_upgrades_respect_their_floors() {
    let mut player = warrior();
    apply_upgrade(&mut player, Upgrade::FireRate);
    assert_eq!(player.stats.fire_cooldown, 17);
    assert_eq!(player.fire.period(), 17);

    for _ in 0..20 {
        apply_upgrade(&mut player, Upgrade::FireRate);
    }
    assert_eq!(player.stats.fire_cooldown, 6);

    for _ in 0..5 {
        apply_upgrade(&mut player, Upgrade::HyperFireRate);
    }
    assert_eq!(player.stats.fire_cooldown, 3);
}

#[test]
fn health_upgrades_heal() {
    let mut player = warrior();
    let _ = player.health.damage(60.0);

    apply_upgrade(&mut player, Upgrade::MaxHealth);
    assert_eq!(player.health.maximum(), 140.0);
    assert_eq!(player.health.current(), 80.0);

    apply_upgrade(&mut player, Upgrade::TitanHealth);
    assert_eq!(player.health.maximum(), 190.0);
    assert_eq!(player.health.current(), 190.0);
}

#[test]
fn shot_pattern_swaps_replace_the_pattern() {
    let mut player = warrior();
    apply_upgrade(&mut player, Upgrade::HeavyShot);
    assert_eq!(player.stats.shot, ShotPattern::Heavy);
    apply_upgrade(&mut player, Upgrade::NormalShot);
    assert_eq!(player.stats.shot, ShotPattern::Normal);
}

#[test]
fn skills_switch_on_projectile_effects() {
    let mut player = warrior();
    apply_skill(&mut player, Skill::ExplosiveShot);
    apply_skill(&mut player, Skill::ClusterShot);
    apply_skill(&mut player, Skill::LeechLife);
    apply_skill(&mut player, Skill::Ricochet { level: 2 });
    apply_skill(&mut player, Skill::CriticalStrikes { level: 3 });
    apply_skill(&mut player, Skill::Multishot { level: 2 });
    apply_skill(&mut player, Skill::ArmorBreaker { level: 2 });
    apply_skill(&mut player, Skill::HeavyHitter { level: 1 });
    apply_skill(&mut player, Skill::PiercingShots { level: 2 });

    let stats = player.stats;
    assert!(stats.explosive_shot);
    assert!(stats.cluster_shot);
    assert_eq!(stats.life_leech, 0.05);
    assert_eq!(stats.ricochet, 2);
    assert!((stats.crit_chance - 0.35).abs() < 1.0e-6);
    assert_eq!(stats.multishot, 2);
    assert!((stats.armor_pierce - 0.3).abs() < 1.0e-6);
    assert_eq!(stats.damage, 33.0);
    assert_eq!(stats.pierce, 3);
}
