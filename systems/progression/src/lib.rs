#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player progression: kill rewards, experience and levels, upgrade rolls and
//! the effect application contract for upgrades and skills.

mod upgrades;

pub use upgrades::{apply_skill, apply_upgrade};

use grid_siege_core::{Event, ExperienceOrb, Player, Rewards, Upgrade};
use log::info;
use rand::{seq::SliceRandom, Rng};

/// Growth factor of the experience threshold per level.
const THRESHOLD_GROWTH: f32 = 1.25;
/// Chance that a regular roll offers one uber upgrade.
const UBER_CHANCE: f64 = 0.2;
/// Number of upgrades offered per roll.
const OFFERS: usize = 3;
/// Every this many levels the roll draws from the uber pool only.
const UBER_LEVEL_INTERVAL: u32 = 10;
/// Distance an orb inside the pickup range drifts toward the player per tick.
const ORB_PULL_SPEED: f32 = 3.0;
/// Orbs closer than this to the player's centre are collected.
const ORB_COLLECT_DISTANCE: f32 = 8.0;

/// Credits the rewards of a kill, levelling the player up as needed.
///
/// Returns the number of levels gained.
pub fn award(player: &mut Player, rewards: Rewards, events: &mut Vec<Event>) -> u32 {
    player.progress.gold = player.progress.gold.saturating_add(rewards.gold);
    gain_experience(player, rewards.experience, events)
}

/// Drifts orbs inside the pickup range toward the player and collects the
/// ones that reach it. Each orb pays its value as experience and gold.
///
/// Returns the number of levels gained.
pub fn collect_orbs(
    player: &mut Player,
    orbs: &mut Vec<ExperienceOrb>,
    events: &mut Vec<Event>,
) -> u32 {
    let center = player.center();
    let range = player.stats.pickup_range;
    let mut levels = 0;

    orbs.retain_mut(|orb| {
        let offset = center - orb.position;
        let distance = offset.length();
        if distance < range {
            orb.position += offset / distance.max(1.0) * ORB_PULL_SPEED;
        }
        if distance >= ORB_COLLECT_DISTANCE {
            return true;
        }

        events.push(Event::OrbCollected { value: orb.value });
        let rewards = Rewards {
            gold: orb.value,
            experience: orb.value,
        };
        levels += award(player, rewards, events);
        false
    });
    levels
}

/// Adds experience, applying every level up it pays for.
///
/// Returns the number of levels gained.
pub fn gain_experience(player: &mut Player, amount: u32, events: &mut Vec<Event>) -> u32 {
    let progress = &mut player.progress;
    progress.experience = progress.experience.saturating_add(amount);

    let mut gained = 0;
    while player.progress.next_level_at > 0
        && player.progress.experience >= player.progress.next_level_at
    {
        player.progress.experience -= player.progress.next_level_at;
        level_up(player);
        gained += 1;
        events.push(Event::LevelUp {
            level: player.progress.level,
        });
    }
    gained
}

fn level_up(player: &mut Player) {
    let progress = &mut player.progress;
    progress.level += 1;
    progress.next_level_at = (progress.next_level_at as f32 * THRESHOLD_GROWTH).floor() as u32;

    player.health.raise_maximum(10.0);
    player.health.refill();
    player.stats.damage += 2.0;
    player.stats.move_speed += 0.2;

    info!(
        "player reached level {} (next at {} xp)",
        player.progress.level, player.progress.next_level_at
    );
}

/// Rolls the upgrades offered after reaching `level`.
///
/// Regular rolls draw three distinct upgrades from the standard pool, with a
/// one-in-five chance that an uber upgrade joins the pool first. Every tenth
/// level draws from the uber pool alone.
pub fn roll_upgrades<R: Rng>(rng: &mut R, level: u32) -> Vec<Upgrade> {
    if level > 0 && level % UBER_LEVEL_INTERVAL == 0 {
        return Upgrade::UBER
            .choose_multiple(rng, OFFERS)
            .copied()
            .collect();
    }

    let mut pool = Upgrade::STANDARD.to_vec();
    if rng.gen_bool(UBER_CHANCE) {
        if let Some(uber) = Upgrade::UBER.choose(rng) {
            pool.push(*uber);
        }
    }
    pool.shuffle(rng);
    pool.truncate(OFFERS);
    pool
}
