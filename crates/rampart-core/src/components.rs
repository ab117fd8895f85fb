//! ECS components for hecs entities.
//!
//! Components are plain data. Behavior lives in the sim crate's actor
//! state machines, not here.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::TowerWeaponAttributes;
use crate::enums::*;
use crate::types::{ActorId, PresentationHandle};

/// Attributes common to every actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorInfo {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Catalog kind the actor was spawned from.
    pub kind_id: String,
    /// Mission time at which the actor was spawned.
    pub spawn_time: f64,
    pub alive: bool,
    /// Presentation counterpart returned by the spawn hook.
    pub handle: PresentationHandle,
}

/// Spherical hit box centered on the actor's tracking point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitBox {
    pub radius: f64,
}

/// Enemy walking a path toward the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub phase: EnemyPhase,
    pub health: i32,
    /// Index into the mission's path set (already wrapped).
    pub path_index: usize,
    /// Fractional path position in [0, 1].
    pub move_progress: f64,
    /// Movement speed (m/s).
    pub speed: f64,
    /// Damage inflicted on the player on reaching the path end.
    pub player_damage: i32,
    /// Height of the aim point above the path position.
    pub tracking_height: f64,
    /// Current velocity, published for intercept solutions.
    pub velocity: DVec3,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.phase == EnemyPhase::Alive
    }
}

/// A computed lead on a moving target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetingSolution {
    pub intercept_point: DVec3,
    pub time_to_intercept: f64,
    /// Distance from the muzzle to the intercept point.
    pub distance: f64,
}

/// Defensive tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub mode: TowerMode,
    pub init_duration: f64,
    pub muzzle_height: f64,
    pub weapon: TowerWeaponAttributes,
    /// Attack cadence accumulator in [0, 1).
    pub attack_timer: f64,
    /// Weak reference to the current target.
    pub target: Option<ActorId>,
    pub solution: Option<TargetingSolution>,
}

impl Tower {
    pub fn muzzle(&self, base: DVec3) -> DVec3 {
        base + DVec3::Y * self.muzzle_height
    }
}

/// Straight-line projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub phase: ProjectilePhase,
    pub speed: f64,
    pub damage: i32,
    /// Lifetime budget in seconds.
    pub lifetime: f64,
    pub travelled: f64,
    /// Tower that fired this projectile.
    pub shooter: Option<ActorId>,
    /// Actor credited for the damage.
    pub instigator: Option<ActorId>,
}

/// Damage record. Immutable value passed by copy.
///
/// Amounts are signed and not validated: a negative amount raises health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    pub amount: i32,
    pub source: Option<ActorId>,
    pub instigator: Option<ActorId>,
}

impl Damage {
    pub fn new(amount: i32, source: Option<ActorId>, instigator: Option<ActorId>) -> Self {
        Self {
            amount,
            source,
            instigator,
        }
    }

    /// Damage with no attribution, e.g. from a player click.
    pub fn unattributed(amount: i32) -> Self {
        Self::new(amount, None, None)
    }
}
