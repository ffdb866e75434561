use grid_siege_core::{Player, ShotPattern, Skill, Upgrade};
use log::debug;

/// Applies a level-up upgrade to the player.
pub fn apply_upgrade(player: &mut Player, upgrade: Upgrade) {
    match upgrade {
        Upgrade::Damage => player.stats.damage += 5.0,
        Upgrade::FireRate => set_fire_cooldown(player, 0.85, 6),
        Upgrade::ProjectileSpeed => player.stats.projectile_speed += 2.0,
        Upgrade::Pierce => player.stats.pierce += 1,
        Upgrade::MaxHealth => player.health.raise_maximum(20.0),
        Upgrade::MoveSpeed => player.stats.move_speed += 0.5,
        Upgrade::PickupRange => player.stats.pickup_range += 20.0,
        Upgrade::SpreadShot => player.stats.shot = ShotPattern::Spread,
        Upgrade::BouncingShot => player.stats.shot = ShotPattern::Bouncing,
        Upgrade::HomingShot => player.stats.shot = ShotPattern::Homing,
        Upgrade::HeavyShot => player.stats.shot = ShotPattern::Heavy,
        Upgrade::NormalShot => player.stats.shot = ShotPattern::Normal,
        Upgrade::MegaDamage => player.stats.damage += 20.0,
        Upgrade::HyperFireRate => set_fire_cooldown(player, 0.6, 3),
        Upgrade::LightningSpeed => player.stats.move_speed += 2.0,
        Upgrade::PierceMaster => player.stats.pierce += 3,
        Upgrade::TitanHealth => {
            player.health.raise_maximum(50.0);
            player.health.refill();
        }
        Upgrade::OrbMagnet => player.stats.pickup_range += 50.0,
    }
    debug!("applied upgrade {upgrade:?}");
}

/// Applies a skill-tree node to the player.
///
/// Levelled skills add their per-level bonus once per invested level. Flag
/// skills switch their projectile effect on.
pub fn apply_skill(player: &mut Player, skill: Skill) {
    let stats = &mut player.stats;
    match skill {
        Skill::ExplosiveShot => stats.explosive_shot = true,
        Skill::Ricochet { level } => stats.ricochet = level,
        Skill::LeechLife => stats.life_leech = 0.05,
        Skill::ClusterShot => stats.cluster_shot = true,
        Skill::CriticalStrikes { level } => stats.crit_chance += 0.1 * level as f32,
        Skill::Multishot { level } => stats.multishot += level,
        Skill::ArmorBreaker { level } => stats.armor_pierce += 0.15 * level as f32,
        Skill::HeavyHitter { level } => stats.damage += 15.0 * level as f32,
        Skill::PiercingShots { level } => stats.pierce += level,
    }
    debug!("learned skill {skill:?}");
}

fn set_fire_cooldown(player: &mut Player, factor: f32, floor: u32) {
    let current = player.stats.fire_cooldown as f32;
    let cooldown = ((current * factor).round() as u32).max(floor);
    player.stats.fire_cooldown = cooldown;
    player.fire.set_period(cooldown);
}
