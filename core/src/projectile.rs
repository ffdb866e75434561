use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Combatant, EntityId, ProjectileId, RemovalReason};

/// Physics variant selected by a projectile's kind tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    /// Straight-line motion.
    Linear,
    /// Steers toward the nearest living target every tick.
    Homing,
    /// Reflects off the arena bounds a limited number of times.
    Bouncing,
    /// Straight-line motion with a larger radius.
    Heavy,
}

impl ProjectileKind {
    /// Collision radius used when the spawner does not override it.
    #[must_use]
    pub const fn default_radius(self) -> f32 {
        match self {
            Self::Heavy => 6.0,
            _ => 4.0,
        }
    }
}

/// Effect descriptor attached to a projectile and interpreted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileEffect {
    /// Releases fragments flying in random directions.
    Split {
        /// Number of fragments.
        count: u32,
        /// Fraction of the parent damage carried by each fragment.
        damage_factor: f32,
        /// Fragment speed in world units per tick.
        speed: f32,
        /// Fragment lifespan in ticks.
        lifespan: u32,
        /// Fragment travel range in world units.
        max_distance: f32,
    },
    /// Damages every opposing target within a radius.
    Explosion {
        /// Radius of the blast in world units.
        radius: f32,
        /// Fraction of the projectile damage dealt by the blast.
        damage_factor: f32,
    },
    /// Returns a fraction of the dealt damage to the owner.
    Leech {
        /// Fraction of dealt damage healed.
        fraction: f32,
    },
    /// Spawns a follow-up projectile in a random direction.
    Ricochet {
        /// Follow-ups left; each hit spends one.
        bounces: u32,
        /// Follow-up speed in world units per tick.
        speed: f32,
    },
    /// Strikes the nearest other target within range.
    Chain {
        /// Largest distance a chain may jump.
        range: f32,
        /// Fraction of the projectile damage dealt by the jump.
        damage_factor: f32,
    },
}

/// Projectile owned by the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Identifier assigned when the projectile entered the active set.
    pub id: ProjectileId,
    /// Physics variant.
    pub kind: ProjectileKind,
    /// Centre of the projectile in world units.
    pub position: Vec2,
    /// Displacement applied every tick.
    pub velocity: Vec2,
    /// Speed magnitude preserved by homing retargets.
    pub speed: f32,
    /// Collision radius in world units.
    pub radius: f32,
    /// Damage dealt on a direct hit before multipliers.
    pub damage: f32,
    /// Ticks left before expiry.
    pub lifespan: u32,
    /// Targets the projectile may still damage.
    pub pierce: u32,
    /// Reflections left for bouncing projectiles.
    pub bounces: u32,
    /// Combatant that fired the projectile; `None` for neutral hazards.
    pub owner: Option<Combatant>,
    /// Spawn position used for range checks.
    pub origin: Vec2,
    /// Maximum travel distance from the origin.
    pub max_distance: Option<f32>,
    /// Ticks since spawn.
    pub age: u32,
    /// Effects triggered on every valid hit.
    pub on_hit: Vec<ProjectileEffect>,
    /// Effects triggered when lifespan or range runs out.
    pub on_expire: Vec<ProjectileEffect>,
    /// Targets already damaged by this projectile.
    pub struck: Vec<Combatant>,
}

impl Projectile {
    /// Materialises a spawn request under the provided identifier.
    #[must_use]
    pub fn from_request(id: ProjectileId, request: ProjectileRequest) -> Self {
        Self {
            id,
            kind: request.kind,
            position: request.position,
            velocity: request.velocity,
            speed: request.velocity.length(),
            radius: request
                .radius
                .unwrap_or_else(|| request.kind.default_radius()),
            damage: request.damage,
            lifespan: request.lifespan,
            pierce: request.pierce,
            bounces: request.bounces,
            owner: request.owner,
            origin: request.position,
            max_distance: request.max_distance,
            age: 0,
            on_hit: request.on_hit,
            on_expire: request.on_expire,
            struck: Vec::new(),
        }
    }

    /// Reports whether every liveness condition holds.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.removal_reason().is_none()
    }

    /// Liveness condition that currently fails, if any.
    #[must_use]
    pub fn removal_reason(&self) -> Option<RemovalReason> {
        if self.pierce == 0 {
            Some(RemovalReason::PierceSpent)
        } else if self.kind == ProjectileKind::Bouncing && self.bounces == 0 {
            Some(RemovalReason::BouncesSpent)
        } else if self.lifespan == 0 {
            Some(RemovalReason::Expired)
        } else {
            None
        }
    }

    /// Reports whether the combatant fired this projectile.
    #[must_use]
    pub fn owned_by(&self, combatant: Combatant) -> bool {
        self.owner == Some(combatant)
    }

    /// Reports whether the combatant was already damaged by this projectile.
    #[must_use]
    pub fn has_struck(&self, combatant: Combatant) -> bool {
        self.struck.contains(&combatant)
    }
}

/// Spawn request emitted by attackers and effects.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileRequest {
    /// Spawn position in world units.
    pub position: Vec2,
    /// Initial displacement per tick.
    pub velocity: Vec2,
    /// Damage dealt on a direct hit before multipliers.
    pub damage: f32,
    /// Lifespan in ticks.
    pub lifespan: u32,
    /// Targets the projectile may damage.
    pub pierce: u32,
    /// Physics variant.
    pub kind: ProjectileKind,
    /// Collision radius override.
    pub radius: Option<f32>,
    /// Reflections allowed for bouncing projectiles.
    pub bounces: u32,
    /// Firing combatant.
    pub owner: Option<Combatant>,
    /// Maximum travel distance.
    pub max_distance: Option<f32>,
    /// Effects triggered on hit.
    pub on_hit: Vec<ProjectileEffect>,
    /// Effects triggered on expiry.
    pub on_expire: Vec<ProjectileEffect>,
}

impl ProjectileRequest {
    /// Creates a neutral linear request with the default lifespan and pierce.
    #[must_use]
    pub fn new(position: Vec2, velocity: Vec2, damage: f32) -> Self {
        Self {
            position,
            velocity,
            damage,
            lifespan: 30,
            pierce: 1,
            kind: ProjectileKind::Linear,
            radius: None,
            bounces: 3,
            owner: None,
            max_distance: None,
            on_hit: Vec::new(),
            on_expire: Vec::new(),
        }
    }

    /// Sets the lifespan in ticks.
    #[must_use]
    pub fn lifespan(mut self, lifespan: u32) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Sets the number of targets the projectile may damage.
    #[must_use]
    pub fn pierce(mut self, pierce: u32) -> Self {
        self.pierce = pierce;
        self
    }

    /// Sets the physics variant.
    #[must_use]
    pub fn kind(mut self, kind: ProjectileKind) -> Self {
        self.kind = kind;
        self
    }

    /// Overrides the collision radius.
    #[must_use]
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the owner.
    #[must_use]
    pub fn owner(mut self, owner: Combatant) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Limits the travel distance from the spawn position.
    #[must_use]
    pub fn max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Attaches an on-hit effect.
    #[must_use]
    pub fn on_hit(mut self, effect: ProjectileEffect) -> Self {
        self.on_hit.push(effect);
        self
    }

    /// Attaches an on-expire effect.
    #[must_use]
    pub fn on_expire(mut self, effect: ProjectileEffect) -> Self {
        self.on_expire.push(effect);
        self
    }
}

/// Delayed attack scheduled by a special windup.
///
/// The shot is fully resolved at windup, so the telegraph fires even when
/// its owner has since moved away or died.
#[derive(Clone, Debug, PartialEq)]
pub struct Telegraph {
    /// Enemy that announced the attack.
    pub owner: Option<EntityId>,
    /// Position the attack lands on.
    pub target: Vec2,
    /// Ticks left until the projectile spawns.
    pub countdown: u32,
    /// Cleared once the telegraph has fired.
    pub active: bool,
    /// Projectile spawned when the countdown expires.
    pub shot: ProjectileRequest,
}

impl Telegraph {
    /// Creates an active telegraph.
    #[must_use]
    pub fn new(
        owner: Option<EntityId>,
        target: Vec2,
        countdown: u32,
        shot: ProjectileRequest,
    ) -> Self {
        Self {
            owner,
            target,
            countdown,
            active: true,
            shot,
        }
    }

    /// Advances the countdown by one tick.
    ///
    /// Returns `true` exactly once, on the tick the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.active = false;
            true
        } else {
            false
        }
    }
}
