//! Mission presets: settings, waves, paths, catalog and pre-placed towers,
//! loaded from JSON.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use rampart_core::config::{
    EnemyDef, MissionSettings, SimConfig, TowerPreset, TowerWeaponAttributes, WaveDef,
};
use rampart_core::error::{ScenarioError, SpawnError};
use rampart_core::types::ActorId;
use rampart_geometry::{PathSet, Polyline};

use crate::engine::MissionController;
use crate::presets::{Catalog, CatalogFactory};

/// A tower placed when the mission starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerPlacement {
    pub kind: String,
    pub position: DVec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPreset {
    pub name: String,
    #[serde(default)]
    pub settings: MissionSettings,
    pub waves: Vec<WaveDef>,
    pub paths: Vec<Polyline>,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub towers: Vec<TowerPlacement>,
}

/// Read and validate a mission file.
pub fn load_preset(path: impl AsRef<Path>) -> Result<MissionPreset, ScenarioError> {
    let text = std::fs::read_to_string(path)?;
    parse_preset(&text)
}

/// Parse and validate mission JSON.
pub fn parse_preset(json: &str) -> Result<MissionPreset, ScenarioError> {
    let preset: MissionPreset = serde_json::from_str(json)?;
    preset.validate()?;
    Ok(preset)
}

impl MissionPreset {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.paths.is_empty() {
            return Err(ScenarioError::Invalid("mission has no paths".into()));
        }
        if let Some(index) = self.paths.iter().position(|p| p.points().len() < 2) {
            return Err(ScenarioError::Invalid(format!(
                "path {index} needs at least two points"
            )));
        }
        for preset in &self.catalog.towers.presets {
            if let Some(reason) = preset.weapon.as_ref().and_then(|w| w.invalid_reason()) {
                return Err(ScenarioError::Invalid(format!(
                    "tower preset '{}': {reason}",
                    preset.name
                )));
            }
        }
        for (index, wave) in self.waves.iter().enumerate() {
            if !self.catalog.enemies.contains_key(&wave.enemy_kind) {
                return Err(ScenarioError::Invalid(format!(
                    "wave {index} spawns unknown enemy kind '{}'",
                    wave.enemy_kind
                )));
            }
        }
        Ok(())
    }

    pub fn path_set(&self) -> PathSet {
        PathSet::from_polylines(self.paths.iter().cloned())
    }

    /// Controller wired to this preset's paths and catalog.
    pub fn controller(&self, config: SimConfig) -> MissionController {
        MissionController::new(
            self.path_set(),
            CatalogFactory::new(self.catalog.clone()),
            config,
        )
    }

    /// Start the mission on `controller` and place the preset towers.
    /// Towers that fail to spawn are logged and skipped.
    pub fn start(&self, controller: &mut MissionController) -> Result<Vec<ActorId>, ScenarioError> {
        controller.start_mission(self.settings.clone(), self.waves.clone())?;

        let mut placed = Vec::with_capacity(self.towers.len());
        for tower in &self.towers {
            match controller.spawn_tower(&tower.kind, tower.position) {
                Ok(id) => placed.push(id),
                Err(err @ SpawnError::NotActive) => {
                    log::warn!("tower '{}' not placed: {}", tower.kind, err);
                    break;
                }
                Err(err) => log::warn!("tower '{}' not placed: {}", tower.kind, err),
            }
        }
        Ok(placed)
    }

    /// Two waves of grunts down an L-shaped lane guarded by one gun tower.
    pub fn training() -> Self {
        let gun = TowerPreset::new("gun", TowerWeaponAttributes::default());
        Self {
            name: "Training".to_string(),
            settings: MissionSettings::default(),
            waves: vec![
                WaveDef::new(0.0, "grunt", 3, 2.0),
                WaveDef::new(10.0, "grunt", 5, 1.5),
            ],
            paths: vec![Polyline::new(vec![
                DVec3::new(-10.0, 0.0, 0.0),
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(0.0, 0.0, 10.0),
            ])],
            catalog: Catalog::default()
                .with_enemy("grunt", EnemyDef::default())
                .with_projectile("bullet")
                .with_tower(gun),
            towers: vec![TowerPlacement {
                kind: "gun".to_string(),
                position: DVec3::new(2.0, 0.0, 2.0),
            }],
        }
    }
}
