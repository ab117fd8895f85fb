//! Actor catalogs, tower presets and the cooldown-gated tower builder.

use std::collections::HashMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use rampart_core::config::{EnemyDef, ProjectileSettings, TowerPreset};
use rampart_core::error::{BuildError, SpawnError};
use rampart_core::types::{ActorId, PresentationHandle};

use crate::engine::MissionController;
use crate::hooks::{ActorFactory, EnemySpawn, ProjectileSpawn, TowerSpawn};

/// Ordered list of buildable towers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TowerPresetDatabase {
    pub presets: Vec<TowerPreset>,
}

impl TowerPresetDatabase {
    pub fn new(presets: Vec<TowerPreset>) -> Self {
        Self { presets }
    }

    pub fn get(&self, index: usize) -> Option<&TowerPreset> {
        self.presets.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&TowerPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Wrap any index, including negative ones from cycling a selection
    /// left, into range. `None` when the database is empty.
    pub fn index_relative(&self, asked: i64) -> Option<usize> {
        let len = self.presets.len() as i64;
        (len > 0).then(|| asked.rem_euclid(len) as usize)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Definitions for every kind a mission can spawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub enemies: HashMap<String, EnemyDef>,
    /// Known projectile kinds. Launch parameters come from the firing weapon.
    pub projectiles: Vec<String>,
    pub towers: TowerPresetDatabase,
}

impl Catalog {
    pub fn with_enemy(mut self, kind: &str, definition: EnemyDef) -> Self {
        self.enemies.insert(kind.to_string(), definition);
        self
    }

    pub fn with_projectile(mut self, kind: &str) -> Self {
        self.projectiles.push(kind.to_string());
        self
    }

    pub fn with_tower(mut self, preset: TowerPreset) -> Self {
        self.towers.presets.push(preset);
        self
    }
}

/// Headless `ActorFactory` resolving kinds against a `Catalog`. Handles are
/// sequential.
#[derive(Debug, Clone, Default)]
pub struct CatalogFactory {
    catalog: Catalog,
    next_handle: u64,
}

impl CatalogFactory {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            next_handle: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn allocate(&mut self) -> PresentationHandle {
        self.next_handle += 1;
        PresentationHandle(self.next_handle)
    }
}

impl ActorFactory for CatalogFactory {
    fn spawn_enemy(
        &mut self,
        kind: &str,
        _path_index: usize,
        _spawn_time: f64,
    ) -> Result<EnemySpawn, SpawnError> {
        let definition = self
            .catalog
            .enemies
            .get(kind)
            .cloned()
            .ok_or_else(|| SpawnError::UnknownKind {
                category: "enemy",
                kind: kind.to_string(),
            })?;
        Ok(EnemySpawn {
            handle: self.allocate(),
            definition,
        })
    }

    fn spawn_tower(&mut self, kind: &str, _position: DVec3) -> Result<TowerSpawn, SpawnError> {
        let preset = self
            .catalog
            .towers
            .find(kind)
            .cloned()
            .ok_or_else(|| SpawnError::UnknownKind {
                category: "tower",
                kind: kind.to_string(),
            })?;
        Ok(TowerSpawn {
            handle: self.allocate(),
            preset,
        })
    }

    fn spawn_projectile(
        &mut self,
        kind: &str,
        _origin: DVec3,
        _aim_point: DVec3,
        _settings: &ProjectileSettings,
    ) -> Result<ProjectileSpawn, SpawnError> {
        if !self.catalog.projectiles.iter().any(|k| k == kind) {
            return Err(SpawnError::UnknownKind {
                category: "projectile",
                kind: kind.to_string(),
            });
        }
        Ok(ProjectileSpawn {
            handle: self.allocate(),
        })
    }
}

/// Places towers from a preset database, one cooldown per preset.
///
/// Cooldowns are measured in mission time and expire at
/// `build_time + preset.build_cooldown`.
#[derive(Debug, Clone, Default)]
pub struct TowerBuilder {
    presets: TowerPresetDatabase,
    ready_at: HashMap<usize, f64>,
}

impl TowerBuilder {
    pub fn new(presets: TowerPresetDatabase) -> Self {
        Self {
            presets,
            ready_at: HashMap::new(),
        }
    }

    pub fn presets(&self) -> &TowerPresetDatabase {
        &self.presets
    }

    /// Seconds left before `index` can be built again at `now`.
    pub fn cooldown_remaining(&self, index: usize, now: f64) -> f64 {
        self.ready_at
            .get(&index)
            .map_or(0.0, |&ready| (ready - now).max(0.0))
    }

    /// Build the preset at `preset_index` (wrapped into range) at `position`.
    pub fn try_build(
        &mut self,
        controller: &mut MissionController,
        preset_index: i64,
        position: DVec3,
    ) -> Result<ActorId, BuildError> {
        let index = self
            .presets
            .index_relative(preset_index)
            .ok_or(BuildError::UnknownPreset(preset_index))?;
        let preset = self
            .presets
            .get(index)
            .ok_or(BuildError::UnknownPreset(preset_index))?;

        let now = controller.mission_time();
        let remaining = self.cooldown_remaining(index, now);
        if remaining > 0.0 {
            log::warn!(
                "can't build '{}', cooldown remains: {:.2}s",
                preset.name,
                remaining
            );
            return Err(BuildError::CoolingDown {
                name: preset.name.clone(),
                remaining,
            });
        }

        let id = controller.spawn_tower(&preset.name, position)?;
        self.ready_at.insert(index, now + preset.build_cooldown);
        Ok(id)
    }
}
