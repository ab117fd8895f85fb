//! Mission controller: the top-level orchestrator.
//!
//! `MissionController` owns the path set, the presentation factory and the
//! per-mission `MissionData`. Each tick advances time once, dispatches due
//! wave spawns, then updates every actor registered at the start of the tick
//! in ascending id order. Spawns and removals raised while actors update are
//! buffered and applied when the pass is over.

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::components::{ActorInfo, Damage, Enemy, HitBox, Projectile, Tower};
use rampart_core::config::{MissionSettings, SimConfig, WaveDef};
use rampart_core::enums::*;
use rampart_core::error::{ActorError, MissionError, SpawnError};
use rampart_core::events::MissionEvent;
use rampart_core::types::{ActorId, Location, PresentationHandle};
use rampart_geometry::PathSet;

use crate::hooks::{ActorFactory, HitQuery, SphereHitQuery};
use crate::mission_data::{MissionData, PendingSpawn, ProjectileRequest};
use crate::registry::{ActorBody, ActorRegistry};
use crate::systems::wave_scheduler::SpawnRequest;
use crate::systems::{self, MissionContext};

pub struct MissionController {
    paths: PathSet,
    factory: Box<dyn ActorFactory>,
    hit_query: Box<dyn HitQuery>,
    config: SimConfig,
    rng: ChaCha8Rng,
    data: MissionData,
    events: Vec<MissionEvent>,
}

impl MissionController {
    pub fn new(paths: PathSet, factory: impl ActorFactory + 'static, config: SimConfig) -> Self {
        Self {
            paths,
            factory: Box::new(factory),
            hit_query: Box::new(SphereHitQuery),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            data: MissionData::default(),
            events: Vec::new(),
        }
    }

    /// Replace the default sphere hit query.
    pub fn with_hit_query(mut self, hit_query: impl HitQuery + 'static) -> Self {
        self.hit_query = Box::new(hit_query);
        self
    }

    /// Start a fresh mission. A mission still running is aborted first.
    /// Waves due at time zero are dispatched before this returns.
    pub fn start_mission(
        &mut self,
        settings: MissionSettings,
        waves: Vec<WaveDef>,
    ) -> Result<(), MissionError> {
        if self.paths.is_empty() {
            return Err(MissionError::EmptyPathSet);
        }
        if self.data.is_active() {
            self.end_mission();
        }

        let wave_count = waves.len();
        self.data = MissionData::new(settings, waves);
        self.data.state = MissionState::Active;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        log::info!(
            "mission started: {} waves, player health {}",
            wave_count,
            self.data.player_health
        );
        self.events.push(MissionEvent::MissionStarted {
            player_health: self.data.player_health,
            wave_count,
        });
        self.dispatch_waves();
        Ok(())
    }

    /// Advance the mission by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.data.is_active() || self.data.player_health <= 0 {
            return;
        }
        self.data.clock.advance(dt);

        // Actors spawned from here on wait for the next tick.
        let ids = self.data.registry.snapshot_ids();
        self.dispatch_waves();

        for id in ids {
            if !self.data.is_active() {
                break;
            }
            if let Err(err) = self.tick_actor(id, dt) {
                log::warn!("actor update failed: {}", err);
            }
        }
        self.flush();
    }

    /// End the mission from outside. Only an active mission records an
    /// outcome (`Aborted`) and emits `MissionEnded`. A mission that never
    /// started moves to Ended silently.
    pub fn end_mission(&mut self) {
        match self.data.state {
            MissionState::Active => self.context(0.0).end_mission(MissionOutcome::Aborted),
            MissionState::Init => self.data.state = MissionState::Ended,
            MissionState::Ended => {}
        }
    }

    pub fn state(&self) -> MissionState {
        self.data.state
    }

    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.data.outcome
    }

    pub fn mission_time(&self) -> f64 {
        self.data.time()
    }

    pub fn tick_count(&self) -> u64 {
        self.data.clock.tick
    }

    pub fn player_health(&self) -> i32 {
        self.data.player_health
    }

    pub fn enemies_alive(&self) -> usize {
        self.data.enemies_alive()
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.data.registry
    }

    pub fn data(&self) -> &MissionData {
        &self.data
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Drain buffered notifications.
    pub fn take_events(&mut self) -> Vec<MissionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place a tower. Only while the mission is active.
    pub fn spawn_tower(&mut self, kind: &str, position: DVec3) -> Result<ActorId, SpawnError> {
        if !self.data.is_active() {
            return Err(SpawnError::NotActive);
        }
        let blueprint = self.factory.spawn_tower(kind, position).map_err(|err| {
            log::warn!("tower spawn aborted: {}", err);
            err
        })?;
        let preset = blueprint.preset;
        let Some(weapon) = preset.weapon else {
            let err = SpawnError::MissingComponent {
                kind: kind.to_string(),
                part: "weapon",
            };
            log::warn!("tower spawn aborted: {}", err);
            return Err(err);
        };
        if let Some(reason) = weapon.invalid_reason() {
            let err = SpawnError::InvalidWeapon {
                kind: kind.to_string(),
                reason,
            };
            log::warn!("tower spawn aborted: {}", err);
            return Err(err);
        }

        let tower = Tower {
            mode: TowerMode::Init,
            init_duration: preset.init_duration,
            muzzle_height: preset.muzzle_height,
            weapon,
            attack_timer: 0.0,
            target: None,
            solution: None,
        };
        let id = self.register(
            ActorKind::Tower,
            kind,
            blueprint.handle,
            self.data.time(),
            Location::at(position),
            ActorBody::Tower(tower),
        );
        Ok(id)
    }

    /// Apply damage to any actor, as a projectile hit would.
    pub fn apply_damage(&mut self, target: ActorId, damage: Damage) {
        self.context(0.0).apply_damage(target, damage);
        self.flush_removals();
    }

    /// Subtract from player health. Ends the mission in defeat when it
    /// reaches zero.
    pub fn apply_player_damage(&mut self, amount: i32) {
        self.context(0.0).apply_player_damage(amount);
    }

    pub(crate) fn context(&mut self, dt: f64) -> MissionContext<'_> {
        MissionContext {
            data: &mut self.data,
            events: &mut self.events,
            paths: &self.paths,
            rng: &mut self.rng,
            hits: self.hit_query.as_ref(),
            epsilon: self.config.intercept_epsilon,
            dt,
        }
    }

    fn tick_actor(&mut self, id: ActorId, dt: f64) -> Result<(), ActorError> {
        let Some(kind) = self.data.registry.kind(id) else {
            return Ok(());
        };
        let mut ctx = self.context(dt);
        match kind {
            ActorKind::Enemy => systems::enemy::tick(&mut ctx, id),
            ActorKind::Tower => systems::tower::tick(&mut ctx, id),
            ActorKind::Projectile => systems::projectile::tick(&mut ctx, id),
        }
    }

    /// Step the scheduler, register its spawns, and check for victory when
    /// it has just run dry.
    fn dispatch_waves(&mut self) {
        let dispatch = self
            .data
            .scheduler
            .step(self.data.time(), self.paths.len());

        for &index in &dispatch.started {
            log::info!("wave {} started at t={:.2}", index, self.data.time());
            self.events.push(MissionEvent::WaveStarted { index });
        }
        self.data.pending_spawns.extend(
            dispatch
                .spawns
                .into_iter()
                .map(PendingSpawn::Enemy),
        );
        self.flush();
        for &index in &dispatch.completed {
            log::debug!("wave {} completed", index);
            self.events.push(MissionEvent::WaveCompleted { index });
        }

        if dispatch.exhausted {
            log::info!("all waves dispatched");
            self.context(0.0).check_victory();
        }
    }

    /// Apply buffered spawns, then buffered removals.
    fn flush(&mut self) {
        let spawns = std::mem::take(&mut self.data.pending_spawns);
        for spawn in spawns {
            if !self.data.is_active() {
                break;
            }
            let result = match spawn {
                PendingSpawn::Enemy(request) => self.spawn_enemy(request),
                PendingSpawn::Projectile(request) => self.spawn_projectile(request),
            };
            if let Err(err) = result {
                log::warn!("spawn aborted: {}", err);
            }
        }
        self.flush_removals();
    }

    fn flush_removals(&mut self) {
        for id in std::mem::take(&mut self.data.pending_removals) {
            self.data.registry.unregister(id);
        }
    }

    fn spawn_enemy(&mut self, request: SpawnRequest) -> Result<ActorId, SpawnError> {
        let blueprint = self.factory.spawn_enemy(
            &request.enemy_kind,
            request.path_index,
            request.spawn_time,
        )?;
        let def = blueprint.definition;
        let (position, heading) = self
            .paths
            .spawn_location(request.path_index)
            .unwrap_or((DVec3::ZERO, DVec3::Z));

        let enemy = Enemy {
            phase: EnemyPhase::Alive,
            health: def.health,
            path_index: request.path_index,
            move_progress: 0.0,
            speed: def.speed,
            player_damage: def.player_damage,
            tracking_height: def.tracking_height,
            velocity: heading * def.speed,
        };
        let hit_box = HitBox {
            radius: def.hit_radius,
        };
        let id = self.register(
            ActorKind::Enemy,
            &request.enemy_kind,
            blueprint.handle,
            request.spawn_time,
            Location::new(position, heading),
            ActorBody::Enemy(enemy, hit_box),
        );
        self.data.live_enemies.insert(id);
        Ok(id)
    }

    fn spawn_projectile(&mut self, request: ProjectileRequest) -> Result<ActorId, SpawnError> {
        let settings = request.settings;
        let blueprint = self.factory.spawn_projectile(
            &settings.kind,
            request.origin,
            request.aim_point,
            &settings,
        )?;
        let projectile = Projectile {
            phase: ProjectilePhase::Alive,
            speed: settings.speed,
            damage: settings.damage,
            lifetime: settings.lifetime,
            travelled: 0.0,
            shooter: Some(request.shooter),
            instigator: Some(request.shooter),
        };
        let id = self.register(
            ActorKind::Projectile,
            &settings.kind,
            blueprint.handle,
            self.data.time(),
            Location::new(request.origin, request.direction),
            ActorBody::Projectile(projectile),
        );
        Ok(id)
    }

    fn register(
        &mut self,
        kind: ActorKind,
        kind_id: &str,
        handle: PresentationHandle,
        spawn_time: f64,
        location: Location,
        body: ActorBody,
    ) -> ActorId {
        let id = ActorId::next();
        let info = ActorInfo {
            id,
            kind,
            kind_id: kind_id.to_string(),
            spawn_time,
            alive: true,
            handle,
        };
        self.data.registry.register(info, location, body);
        log::debug!("{:?} {} '{}' spawned at t={:.2}", kind, id, kind_id, spawn_time);
        self.events.push(MissionEvent::ActorSpawned {
            id,
            kind,
            kind_id: kind_id.to_string(),
        });
        id
    }
}
