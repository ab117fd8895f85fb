//! Notifications emitted by the simulation for presentation collaborators.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::components::Damage;
use crate::enums::*;
use crate::types::ActorId;

/// Everything a presentation layer needs to mirror the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionEvent {
    MissionStarted {
        player_health: i32,
        wave_count: usize,
    },
    MissionEnded {
        outcome: MissionOutcome,
        time: f64,
    },
    WaveStarted {
        index: usize,
    },
    /// All spawn requests of a wave were emitted.
    WaveCompleted {
        index: usize,
    },
    ActorSpawned {
        id: ActorId,
        kind: ActorKind,
        kind_id: String,
    },
    ActorDied {
        id: ActorId,
        kind: ActorKind,
        damage: Damage,
    },
    EnemyReachedEnd {
        id: ActorId,
        player_damage: i32,
    },
    PlayerDamaged {
        amount: i32,
        health: i32,
    },
    TowerModeChanged {
        tower: ActorId,
        mode: TowerMode,
    },
    TowerAttacked {
        tower: ActorId,
        aim_point: DVec3,
        projectile_kind: String,
    },
}
