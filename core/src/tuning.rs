use serde::{Deserialize, Serialize};

/// Selects how many targets a projectile may damage in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Only the first eligible target in iteration order is hit.
    #[default]
    FirstMatch,
    /// Every overlapping eligible target is hit while pierce remains.
    AllOverlapping,
}

/// Tunable constants of the simulation.
///
/// Every field falls back to its default when omitted from a tuning file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ticks after spawn during which a projectile cannot hit its owner.
    pub grace_ticks: u32,
    /// Multiplier applied to direct projectile hits on enemies.
    pub direct_hit_multiplier: f32,
    /// Ticks between route recomputations.
    pub path_refresh_ticks: u32,
    /// Ticks between consecutive touch attacks of one enemy.
    pub touch_cooldown_ticks: u32,
    /// Ticks a freshly spawned enemy waits before acting.
    pub entry_delay_ticks: u32,
    /// Ticks of invulnerability after the player takes contact damage.
    pub contact_invulnerability_ticks: u32,
    /// Ticks between difficulty increases.
    pub difficulty_ramp_ticks: u32,
    /// Amount added to the difficulty on every increase.
    pub difficulty_step: f32,
    /// Difficulty at the start of a run.
    pub initial_difficulty: f32,
    /// Ticks between spawns at the start of a run.
    pub spawn_interval_ticks: u32,
    /// Lower bound for the spawn interval.
    pub min_spawn_interval_ticks: u32,
    /// Amount the spawn interval shrinks on every difficulty increase.
    pub spawn_interval_step: u32,
    /// Smallest Manhattan distance between a spawn cell and the player.
    pub spawn_min_distance: u32,
    /// Placement attempts per spawn before giving up.
    pub spawn_attempts: u32,
    /// Ticks between miniboss specials.
    pub miniboss_special_ticks: u32,
    /// Ticks between a telegraph windup and its shot.
    pub telegraph_ticks: u32,
    /// Multi-hit policy of the collision resolver.
    pub hit_policy: HitPolicy,
    /// Whether enemy projectiles may damage other enemies.
    pub friendly_fire: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grace_ticks: 10,
            direct_hit_multiplier: 1.5,
            path_refresh_ticks: 10,
            touch_cooldown_ticks: 30,
            entry_delay_ticks: 30,
            contact_invulnerability_ticks: 30,
            difficulty_ramp_ticks: 300,
            difficulty_step: 0.5,
            initial_difficulty: 1.0,
            spawn_interval_ticks: 180,
            min_spawn_interval_ticks: 40,
            spawn_interval_step: 2,
            spawn_min_distance: 5,
            spawn_attempts: 8,
            miniboss_special_ticks: 300,
            telegraph_ticks: 45,
            hit_policy: HitPolicy::FirstMatch,
            friendly_fire: false,
        }
    }
}
