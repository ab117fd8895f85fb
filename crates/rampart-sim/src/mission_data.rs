//! Per-mission state owned by the controller. Built fresh on every
//! mission start.

use std::collections::BTreeSet;

use glam::DVec3;

use rampart_core::config::{MissionSettings, ProjectileSettings, WaveDef};
use rampart_core::enums::{MissionOutcome, MissionState};
use rampart_core::types::{ActorId, MissionClock};

use crate::registry::ActorRegistry;
use crate::systems::wave_scheduler::{SpawnRequest, WaveScheduler};

/// A projectile a tower asked to launch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileRequest {
    pub shooter: ActorId,
    pub origin: DVec3,
    /// Unit launch direction after spread.
    pub direction: DVec3,
    pub aim_point: DVec3,
    pub settings: ProjectileSettings,
}

/// Spawns raised during a tick, applied once the actor pass is over.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSpawn {
    Enemy(SpawnRequest),
    Projectile(ProjectileRequest),
}

#[derive(Debug, Default)]
pub struct MissionData {
    pub state: MissionState,
    pub outcome: Option<MissionOutcome>,
    pub clock: MissionClock,
    pub settings: MissionSettings,
    pub player_health: i32,
    pub scheduler: WaveScheduler,
    pub registry: ActorRegistry,
    /// Enemies registered and not yet dead.
    pub live_enemies: BTreeSet<ActorId>,
    pub pending_spawns: Vec<PendingSpawn>,
    pub pending_removals: Vec<ActorId>,
}

impl MissionData {
    pub fn new(settings: MissionSettings, waves: Vec<WaveDef>) -> Self {
        Self {
            player_health: settings.player_health_max,
            settings,
            scheduler: WaveScheduler::new(waves),
            ..Default::default()
        }
    }

    pub fn time(&self) -> f64 {
        self.clock.elapsed_secs
    }

    pub fn is_active(&self) -> bool {
        self.state == MissionState::Active
    }

    pub fn enemies_alive(&self) -> usize {
        self.live_enemies.len()
    }

    /// Subtract from player health. Returns `true` when health is now
    /// depleted.
    pub fn apply_player_damage(&mut self, amount: i32) -> bool {
        self.player_health = self.player_health.saturating_sub(amount);
        self.player_health <= 0
    }

    /// Forget a live enemy. Returns `false` if it was already gone.
    pub fn remove_enemy(&mut self, id: ActorId) -> bool {
        self.live_enemies.remove(&id)
    }
}
