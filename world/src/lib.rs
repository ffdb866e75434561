#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Grid Siege.
//!
//! The world owns every entity, projectile and pending telegraph of a run and
//! mutates them exclusively through [`apply`]. The tile map is borrowed
//! read-only for each command.

mod arena;
mod control;

pub use arena::{Arena, ArenaParseError, Tile, DEFAULT_ARENA};

use grid_siege_core::{
    may_strike, CellCoord, CharacterClass, Combatant, Command, DamageSource, Enemy, EntityId,
    Event, ExperienceOrb, Player, PlayerIntent, Projectile, ProjectileId, ProjectileKind,
    ProjectileRequest, RemovalReason, Target, TileMap, Tuning, Upgrade, WELCOME_BANNER,
};
use grid_siege_system_behavior::{death_burst, BehaviorOutput, EnemyBehavior, TelegraphQueue};
use grid_siege_system_collision::{CollisionResolver, Hit};
use grid_siege_system_progression as progression;
use grid_siege_system_projectiles::{
    advance,
    effects::{trigger_on_expire, EffectOutput, Scene},
};
use grid_siege_system_spawning::{roster, Config as SpawnConfig, Spawning};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Cell the player prefers to start on.
const PLAYER_SPAWN: CellCoord = CellCoord::new(1, 1);

/// Buffers reused across ticks.
#[derive(Debug, Default)]
struct Scratch {
    behavior: BehaviorOutput,
    shots: Vec<ProjectileRequest>,
    commands: Vec<Command>,
    targets: Vec<Target>,
    steer: Vec<Target>,
    hits: Vec<Hit>,
    effects: EffectOutput,
    removals: Vec<(ProjectileId, RemovalReason)>,
}

impl Scratch {
    fn clear(&mut self) {
        self.behavior.clear();
        self.shots.clear();
        self.commands.clear();
        self.targets.clear();
        self.steer.clear();
        self.hits.clear();
        self.effects.clear();
        self.removals.clear();
    }
}

/// Represents the authoritative Grid Siege world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    telegraphs: TelegraphQueue,
    orbs: Vec<ExperienceOrb>,
    rng: ChaCha8Rng,
    tick: u64,
    next_enemy: u32,
    next_projectile: u32,
    spawning: Spawning,
    behavior: EnemyBehavior,
    resolver: CollisionResolver,
    offers: Vec<Upgrade>,
    kills: u32,
    defeated: bool,
    scratch: Scratch,
}

impl World {
    /// Creates a world for a fresh run on the provided map.
    ///
    /// The player starts on the first walkable cell around the top-left
    /// corner. Every random draw of the run derives from `seed`.
    #[must_use]
    pub fn new<M>(map: &M, tuning: Tuning, class: CharacterClass, seed: u64) -> Self
    where
        M: TileMap + ?Sized,
    {
        let spawn = control::find_spawn(map, PLAYER_SPAWN);
        Self {
            banner: WELCOME_BANNER,
            player: Player::new(class, spawn),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            telegraphs: TelegraphQueue::new(),
            orbs: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            next_enemy: 0,
            next_projectile: 0,
            spawning: Spawning::new(SpawnConfig::from_tuning(&tuning)),
            behavior: EnemyBehavior::new(&tuning),
            resolver: CollisionResolver::new(&tuning),
            offers: Vec::new(),
            kills: 0,
            defeated: false,
            scratch: Scratch::default(),
            tuning,
        }
    }

    fn step<M>(&mut self, map: &M, intent: PlayerIntent, out: &mut Vec<Event>)
    where
        M: TileMap + ?Sized,
    {
        if self.defeated {
            return;
        }

        self.tick = self.tick.saturating_add(1);
        let clock = Event::TimeAdvanced { tick: self.tick };
        out.push(clock.clone());

        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();

        control::drive(
            &mut self.player,
            intent,
            map,
            &mut self.rng,
            &mut scratch.shots,
            out,
        );

        let raised = self.spawning.handle(
            &[clock],
            self.player.cell,
            map,
            &mut self.rng,
            &mut scratch.commands,
        );
        if raised {
            out.push(Event::DifficultyRaised {
                difficulty: self.spawning.difficulty().get(),
            });
        }
        for command in scratch.commands.drain(..) {
            apply(self, map, command, out);
        }

        self.behavior.handle(
            &mut self.enemies,
            &mut self.player,
            map,
            &mut self.rng,
            &mut scratch.behavior,
        );
        out.append(&mut scratch.behavior.events);
        self.telegraphs
            .schedule(scratch.behavior.telegraphs.drain(..));
        scratch.shots.append(&mut scratch.behavior.projectiles);
        self.telegraphs.tick(&mut scratch.shots, out);
        for request in scratch.shots.drain(..) {
            self.launch(request, out);
        }

        self.move_projectiles(map, &mut scratch);
        self.collide(&mut scratch, out);
        self.expire(&mut scratch, out);
        self.sweep_projectiles(&scratch.removals, out);
        for request in scratch.effects.spawns.drain(..) {
            self.launch(request, out);
        }
        self.sweep_enemies(out);

        let levels = progression::collect_orbs(&mut self.player, &mut self.orbs, out);
        if levels > 0 {
            self.offers = progression::roll_upgrades(&mut self.rng, self.player.progress.level);
            debug!("offering {:?}", self.offers);
        }

        if self.player.health.is_depleted() {
            self.defeated = true;
            warn!("player defeated at tick {}", self.tick);
            out.push(Event::PlayerDefeated);
        }

        self.scratch = scratch;
    }

    fn launch(&mut self, request: ProjectileRequest, out: &mut Vec<Event>) {
        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile = self.next_projectile.wrapping_add(1);
        let owner = request.owner;
        self.projectiles.push(Projectile::from_request(id, request));
        out.push(Event::ProjectileSpawned {
            projectile: id,
            owner,
        });
    }

    fn admit<M>(&mut self, map: &M, enemy: Enemy, out: &mut Vec<Event>)
    where
        M: TileMap + ?Sized,
    {
        if !map.is_walkable(enemy.cell) {
            debug!("refused {:?} spawn on blocked cell {:?}", enemy.kind, enemy.cell);
            return;
        }
        debug!("{:?} {:?} entered at {:?}", enemy.kind, enemy.id, enemy.cell);
        out.push(Event::EnemySpawned {
            enemy: enemy.id,
            kind: enemy.kind,
            cell: enemy.cell,
        });
        self.enemies.push(enemy);
    }

    fn allocate_enemy(&mut self) -> EntityId {
        let id = EntityId::new(self.next_enemy);
        self.next_enemy = self.next_enemy.wrapping_add(1);
        id
    }

    fn move_projectiles<M>(&mut self, map: &M, scratch: &mut Scratch)
    where
        M: TileMap + ?Sized,
    {
        gather_targets(&self.enemies, &self.player, &mut scratch.targets);
        let bounds = map.bounds();

        for projectile in &mut self.projectiles {
            scratch.steer.clear();
            if projectile.kind == ProjectileKind::Homing {
                let owner = projectile.owner;
                let friendly_fire = self.tuning.friendly_fire;
                scratch.steer.extend(
                    scratch
                        .targets
                        .iter()
                        .filter(|target| may_strike(owner, target.combatant, friendly_fire)),
                );
            }
            let _ = advance(projectile, &scratch.steer, bounds);
        }
    }

    fn collide(&mut self, scratch: &mut Scratch, out: &mut Vec<Event>) {
        let iframes = self.tuning.contact_invulnerability_ticks;

        for projectile in &mut self.projectiles {
            if projectile.pierce == 0 {
                continue;
            }
            if let Some(reason) = self.resolver.resolve(
                projectile,
                &scratch.targets,
                &mut self.rng,
                &mut scratch.hits,
                &mut scratch.effects,
            ) {
                scratch.removals.push((projectile.id, reason));
            }

            let source = DamageSource::Projectile(projectile.id);
            let mut casualties = false;
            for hit in scratch.hits.drain(..) {
                casualties |= strike(
                    &mut self.enemies,
                    &mut self.player,
                    hit.target,
                    hit.damage,
                    source,
                    iframes,
                    out,
                );
            }
            for secondary in scratch.effects.strikes.drain(..) {
                casualties |= strike(
                    &mut self.enemies,
                    &mut self.player,
                    secondary.target,
                    secondary.amount,
                    source,
                    iframes,
                    out,
                );
            }
            if scratch.effects.healing > 0.0 {
                let restored = self.player.heal(scratch.effects.healing);
                if restored > 0.0 {
                    out.push(Event::PlayerHealed { amount: restored });
                }
                scratch.effects.healing = 0.0;
            }
            if casualties {
                gather_targets(&self.enemies, &self.player, &mut scratch.targets);
            }
        }
    }

    fn expire(&mut self, scratch: &mut Scratch, out: &mut Vec<Event>) {
        let iframes = self.tuning.contact_invulnerability_ticks;
        let scene_fire = self.tuning.friendly_fire;

        for projectile in &self.projectiles {
            if scratch.removals.iter().any(|(id, _)| *id == projectile.id) {
                continue;
            }
            if !matches!(
                projectile.removal_reason(),
                Some(RemovalReason::Expired | RemovalReason::BouncesSpent)
            ) {
                continue;
            }

            let scene = Scene {
                candidates: &scratch.targets,
                friendly_fire: scene_fire,
            };
            trigger_on_expire(projectile, scene, &mut self.rng, &mut scratch.effects);

            let source = DamageSource::Projectile(projectile.id);
            let mut casualties = false;
            for secondary in scratch.effects.strikes.drain(..) {
                casualties |= strike(
                    &mut self.enemies,
                    &mut self.player,
                    secondary.target,
                    secondary.amount,
                    source,
                    iframes,
                    out,
                );
            }
            if casualties {
                gather_targets(&self.enemies, &self.player, &mut scratch.targets);
            }
        }
    }

    fn sweep_projectiles(&mut self, removals: &[(ProjectileId, RemovalReason)], out: &mut Vec<Event>) {
        self.projectiles.retain(|projectile| {
            let reason = removals
                .iter()
                .find(|(id, _)| *id == projectile.id)
                .map(|(_, reason)| *reason)
                .or_else(|| projectile.removal_reason());
            match reason {
                Some(reason) => {
                    out.push(Event::ProjectileRemoved {
                        projectile: projectile.id,
                        reason,
                    });
                    false
                }
                None => true,
            }
        });
    }

    fn sweep_enemies(&mut self, out: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].is_active() {
                index += 1;
                continue;
            }
            let enemy = self.enemies.remove(index);
            if enemy.health.is_depleted() {
                self.bury(&enemy, out);
            }
        }
    }

    fn bury(&mut self, enemy: &Enemy, out: &mut Vec<Event>) {
        self.kills = self.kills.saturating_add(1);
        debug!("{:?} {:?} died", enemy.kind, enemy.id);
        out.push(Event::EnemyDied {
            enemy: enemy.id,
            kind: enemy.kind,
            position: enemy.center(),
            rewards: enemy.rewards,
        });

        death_burst(
            enemy,
            &mut self.player,
            self.tuning.contact_invulnerability_ticks,
            out,
        );

        let progress = &mut self.player.progress;
        progress.gold = progress.gold.saturating_add(enemy.rewards.gold);
        if enemy.rewards.experience > 0 {
            let orb = ExperienceOrb {
                position: enemy.center(),
                value: enemy.rewards.experience,
            };
            out.push(Event::OrbDropped {
                position: orb.position,
                value: orb.value,
            });
            self.orbs.push(orb);
        }
    }

    fn restart<M>(&mut self, map: &M)
    where
        M: TileMap + ?Sized,
    {
        self.enemies.clear();
        self.projectiles.clear();
        self.telegraphs.clear();
        self.orbs.clear();
        self.spawning.reset();
        self.offers.clear();
        self.tick = 0;
        self.kills = 0;
        self.defeated = false;
        self.player.reset(control::find_spawn(map, PLAYER_SPAWN));
        info!("run restarted");
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply<M>(world: &mut World, map: &M, command: Command, out_events: &mut Vec<Event>)
where
    M: TileMap + ?Sized,
{
    match command {
        Command::Tick { intent } => world.step(map, intent, out_events),
        Command::SpawnEnemy { kind, cell } => {
            let id = world.allocate_enemy();
            let enemy = roster::spawn_enemy(
                id,
                kind,
                cell,
                world.spawning.difficulty(),
                &world.tuning,
            );
            world.admit(map, enemy, out_events);
        }
        Command::SpawnMiniboss { cell, special } => {
            let id = world.allocate_enemy();
            let enemy = roster::spawn_miniboss(
                id,
                cell,
                special,
                world.spawning.difficulty(),
                &world.tuning,
            );
            world.admit(map, enemy, out_events);
        }
        Command::SpawnBoss { cell, variant } => {
            let id = world.allocate_enemy();
            let enemy =
                roster::spawn_boss(id, cell, variant, world.spawning.difficulty(), &world.tuning);
            world.admit(map, enemy, out_events);
        }
        Command::ApplyUpgrade { upgrade } => {
            progression::apply_upgrade(&mut world.player, upgrade);
            world.offers.clear();
        }
        Command::LearnSkill { skill } => progression::apply_skill(&mut world.player, skill),
        Command::Restart => world.restart(map),
    }
}

/// Deals damage to a combatant, reporting whether it died.
fn strike(
    enemies: &mut [Enemy],
    player: &mut Player,
    target: Combatant,
    amount: f32,
    source: DamageSource,
    iframes: u32,
    out: &mut Vec<Event>,
) -> bool {
    match target {
        Combatant::Enemy(id) => {
            let Some(enemy) = enemies.iter_mut().find(|enemy| enemy.id == id) else {
                return false;
            };
            if !enemy.is_active() {
                return false;
            }
            let _ = enemy.health.damage(amount);
            enemy.health.is_depleted()
        }
        Combatant::Player => {
            let dealt = player.take_damage(amount, iframes);
            if dealt > 0.0 {
                out.push(Event::PlayerDamaged { amount: dealt, source });
            }
            player.health.is_depleted()
        }
    }
}

/// Collects every living body projectiles may interact with.
fn gather_targets(enemies: &[Enemy], player: &Player, targets: &mut Vec<Target>) {
    targets.clear();
    targets.extend(
        enemies
            .iter()
            .filter(|enemy| enemy.is_active())
            .map(|enemy| Target {
                combatant: Combatant::Enemy(enemy.id),
                position: enemy.position,
            }),
    );
    if !player.health.is_depleted() {
        targets.push(Target {
            combatant: Combatant::Player,
            position: player.position,
        });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_siege_core::{
        Difficulty, Enemy, ExperienceOrb, Player, Projectile, Telegraph, Tuning, Upgrade,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// The player entity.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Enemies in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Projectiles in launch order.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.projectiles
    }

    /// Telegraphs still counting down.
    #[must_use]
    pub fn telegraphs(world: &World) -> &[Telegraph] {
        world.telegraphs.pending()
    }

    /// Current difficulty scalar.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.spawning.difficulty()
    }

    /// Number of completed ticks in the current run.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Enemies killed during the current run.
    #[must_use]
    pub fn kills(world: &World) -> u32 {
        world.kills
    }

    /// Experience orbs waiting to be picked up.
    #[must_use]
    pub fn orbs(world: &World) -> &[ExperienceOrb] {
        &world.orbs
    }

    /// Upgrades offered by the most recent level up, until one is applied.
    #[must_use]
    pub fn upgrade_offers(world: &World) -> &[Upgrade] {
        &world.offers
    }

    /// Reports whether the player ran out of health.
    #[must_use]
    pub fn is_defeated(world: &World) -> bool {
        world.defeated
    }
}
