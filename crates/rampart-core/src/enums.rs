//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Actor variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Enemy,
    Tower,
    Projectile,
}

/// Tower targeting state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerMode {
    /// Warming up after spawn.
    #[default]
    Init,
    /// No target, polling for the nearest enemy in range.
    Idle,
    /// Locked on a target and firing on cadence.
    Tracking,
}

/// Enemy lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    #[default]
    Alive,
    /// Terminal.
    Dead,
}

/// Projectile lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    #[default]
    Alive,
    /// Hit something or ran out of lifetime. Terminal.
    Resolved,
}

/// How a projectile was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveCause {
    Hit,
    Expired,
}

/// Top-level mission state. Monotonic: once Ended, never reverts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionState {
    #[default]
    Init,
    Active,
    Ended,
}

/// Why a mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    /// Every wave was delivered and no enemy is left alive.
    Victory,
    /// Player health reached zero.
    Defeat,
    /// Ended from outside before either condition held.
    Aborted,
}
