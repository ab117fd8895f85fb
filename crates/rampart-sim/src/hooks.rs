//! Seams to the presentation layer and the collision query.
//!
//! The engine asks an `ActorFactory` for a blueprint whenever it needs a new
//! actor, and asks a `HitQuery` which hit box a projectile's travel segment
//! strikes first. Neither trait has side effects on mission state.

use glam::DVec3;

use rampart_core::config::{EnemyDef, ProjectileSettings, TowerPreset};
use rampart_core::error::SpawnError;
use rampart_core::types::{ActorId, PresentationHandle};
use rampart_geometry::shapes::segment_sphere_entry;

/// Blueprint for a new enemy.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub handle: PresentationHandle,
    pub definition: EnemyDef,
}

/// Blueprint for a new tower. The preset may lack a weapon; the engine
/// rejects such towers.
#[derive(Debug, Clone)]
pub struct TowerSpawn {
    pub handle: PresentationHandle,
    pub preset: TowerPreset,
}

#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub handle: PresentationHandle,
}

/// Factory requests the engine issues to its presentation counterpart.
pub trait ActorFactory {
    fn spawn_enemy(
        &mut self,
        kind: &str,
        path_index: usize,
        spawn_time: f64,
    ) -> Result<EnemySpawn, SpawnError>;

    fn spawn_tower(&mut self, kind: &str, position: DVec3) -> Result<TowerSpawn, SpawnError>;

    fn spawn_projectile(
        &mut self,
        kind: &str,
        origin: DVec3,
        aim_point: DVec3,
        settings: &ProjectileSettings,
    ) -> Result<ProjectileSpawn, SpawnError>;
}

/// A hit box a projectile may strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCandidate {
    pub id: ActorId,
    pub center: DVec3,
    pub radius: f64,
}

/// Collision query along a projectile's travel segment.
pub trait HitQuery {
    /// First candidate intersected by the segment `from..to`, if any.
    fn first_hit(&self, from: DVec3, to: DVec3, candidates: &[HitCandidate]) -> Option<ActorId>;
}

/// Treats every hit box as a sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereHitQuery;

impl HitQuery for SphereHitQuery {
    fn first_hit(&self, from: DVec3, to: DVec3, candidates: &[HitCandidate]) -> Option<ActorId> {
        let mut best: Option<(ActorId, f64)> = None;
        for candidate in candidates {
            let Some(t) = segment_sphere_entry(from, to, candidate.center, candidate.radius) else {
                continue;
            };
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((candidate.id, t));
            }
        }
        best.map(|(id, _)| id)
    }
}
