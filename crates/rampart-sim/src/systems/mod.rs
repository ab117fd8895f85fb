//! Per-actor state machines and the wave scheduler.
//!
//! Each actor kind exposes `tick(ctx, id)`, run once per actor per tick in
//! registry order. Everything an actor may touch is reached through
//! `MissionContext`; actors never hold references to each other, only ids.

pub mod enemy;
pub mod projectile;
pub mod tower;
pub mod wave_scheduler;

use glam::DVec3;
use rand_chacha::ChaCha8Rng;

use rampart_core::components::{Damage, HitBox};
use rampart_core::enums::{ActorKind, MissionOutcome, MissionState};
use rampart_core::error::ActorError;
use rampart_core::events::MissionEvent;
use rampart_core::types::ActorId;
use rampart_geometry::PathSet;

use crate::hooks::{HitCandidate, HitQuery};
use crate::mission_data::{MissionData, PendingSpawn};

/// Dependencies handed to every actor update and damage call.
pub struct MissionContext<'a> {
    pub data: &'a mut MissionData,
    pub events: &'a mut Vec<MissionEvent>,
    pub paths: &'a PathSet,
    pub rng: &'a mut ChaCha8Rng,
    pub hits: &'a dyn HitQuery,
    pub epsilon: f64,
    /// Seconds advanced by the current tick. Zero outside the tick loop.
    pub dt: f64,
}

impl MissionContext<'_> {
    pub fn time(&self) -> f64 {
        self.data.time()
    }

    pub fn emit(&mut self, event: MissionEvent) {
        self.events.push(event);
    }

    pub fn request_spawn(&mut self, spawn: PendingSpawn) {
        self.data.pending_spawns.push(spawn);
    }

    pub fn request_removal(&mut self, id: ActorId) {
        self.data.pending_removals.push(id);
    }

    /// Route damage to whatever actor `target` is.
    pub fn apply_damage(&mut self, target: ActorId, damage: Damage) {
        match self.data.registry.kind(target) {
            Some(ActorKind::Enemy) => enemy::take_damage(self, target, damage),
            Some(kind) => log::debug!(
                "{:?} {} hit for {} damage from {:?} by {:?}, ignored",
                kind,
                target,
                damage.amount,
                damage.source,
                damage.instigator
            ),
            None => {}
        }
    }

    /// Subtract from player health; ends the mission in defeat when it runs
    /// out. No effect unless the mission is active.
    pub fn apply_player_damage(&mut self, amount: i32) {
        if !self.data.is_active() {
            return;
        }
        let depleted = self.data.apply_player_damage(amount);
        let health = self.data.player_health;
        self.emit(MissionEvent::PlayerDamaged { amount, health });
        if depleted {
            log::info!("player health depleted at t={:.2}", self.time());
            self.end_mission(MissionOutcome::Defeat);
        }
    }

    /// Bookkeeping after an enemy's single death.
    pub fn on_enemy_died(&mut self, id: ActorId) {
        self.data.remove_enemy(id);
        self.check_victory();
    }

    /// Victory once every wave is delivered and no enemy is alive.
    pub fn check_victory(&mut self) {
        if self.data.is_active()
            && self.data.scheduler.is_exhausted()
            && self.data.live_enemies.is_empty()
        {
            log::info!("all enemies dead at t={:.2}", self.time());
            self.end_mission(MissionOutcome::Victory);
        }
    }

    /// Move to Ended. Cancels wave timers and drops spawns not yet applied.
    /// In-flight actors are left as they are.
    pub fn end_mission(&mut self, outcome: MissionOutcome) {
        if self.data.state == MissionState::Ended {
            return;
        }
        self.data.state = MissionState::Ended;
        self.data.outcome = Some(outcome);
        self.data.scheduler.cancel();
        self.data.pending_spawns.clear();

        let time = self.time();
        log::info!("mission ended: {:?} at t={:.2}", outcome, time);
        self.emit(MissionEvent::MissionEnded { outcome, time });
    }

    /// Hit boxes of every live enemy, centered on their tracking points.
    pub fn hit_candidates(&self) -> Vec<HitCandidate> {
        self.data
            .live_enemies
            .iter()
            .filter_map(|&id| {
                let radius = self.data.registry.get::<HitBox>(id)?.radius;
                let center = enemy::tracking_point(&self.data.registry, id)?;
                Some(HitCandidate { id, center, radius })
            })
            .collect()
    }

    /// Tracking points of every live enemy.
    pub fn enemy_positions(&self) -> Vec<(ActorId, DVec3)> {
        self.data
            .live_enemies
            .iter()
            .filter_map(|&id| Some((id, enemy::tracking_point(&self.data.registry, id)?)))
            .collect()
    }
}

/// Fetch and clone a component, or report it missing.
fn component<T: hecs::Component + Clone>(
    ctx: &MissionContext<'_>,
    id: ActorId,
    name: &'static str,
) -> Result<T, ActorError> {
    ctx.data
        .registry
        .get::<T>(id)
        .map(|c| (*c).clone())
        .ok_or(ActorError::MissingComponent {
            id,
            component: name,
        })
}

fn store<T: hecs::Component>(ctx: &mut MissionContext<'_>, id: ActorId, value: T) {
    if let Some(mut slot) = ctx.data.registry.get_mut::<T>(id) {
        *slot = value;
    }
}
