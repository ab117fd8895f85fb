//! Configuration records: mission settings, waves and actor definitions.
//!
//! All records deserialize from mission JSON files. Missing fields take
//! the defaults from `constants`.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Per-mission settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSettings {
    pub player_health_max: i32,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            player_health_max: DEFAULT_PLAYER_HEALTH,
        }
    }
}

/// A declarative timed batch of enemy spawns. Read-only once the mission begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    /// Offset from mission start, seconds.
    pub start_time: f64,
    /// Enemy catalog kind.
    pub enemy_kind: String,
    pub spawn_count: u32,
    /// Seconds between consecutive spawns.
    pub spawn_interval: f64,
    /// Target path; wrapped modulo the path count.
    #[serde(default)]
    pub path_index: usize,
}

impl WaveDef {
    pub fn new(start_time: f64, enemy_kind: &str, spawn_count: u32, spawn_interval: f64) -> Self {
        Self {
            start_time,
            enemy_kind: enemy_kind.to_string(),
            spawn_count,
            spawn_interval,
            path_index: 0,
        }
    }

    pub fn on_path(mut self, path_index: usize) -> Self {
        self.path_index = path_index;
        self
    }
}

/// Enemy definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyDef {
    pub health: i32,
    pub speed: f64,
    pub player_damage: i32,
    pub hit_radius: f64,
    pub tracking_height: f64,
}

impl Default for EnemyDef {
    fn default() -> Self {
        Self {
            health: DEFAULT_ENEMY_HEALTH,
            speed: DEFAULT_ENEMY_SPEED,
            player_damage: DEFAULT_PLAYER_DAMAGE,
            hit_radius: DEFAULT_HIT_RADIUS,
            tracking_height: DEFAULT_TRACKING_HEIGHT,
        }
    }
}

/// Weapon attributes of a tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerWeaponAttributes {
    pub range: f64,
    pub damage: i32,
    /// Seconds between attacks.
    pub interval: f64,
    pub projectile_kind: String,
    pub projectile_speed: f64,
    pub projectile_lifetime: f64,
    /// Half-angle of the spread cone (radians). Zero fires exactly at the lead.
    pub spread_radians: f64,
}

impl Default for TowerWeaponAttributes {
    fn default() -> Self {
        Self {
            range: DEFAULT_TOWER_RANGE,
            damage: DEFAULT_TOWER_DAMAGE,
            interval: DEFAULT_ATTACK_INTERVAL,
            projectile_kind: "bullet".to_string(),
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            projectile_lifetime: DEFAULT_PROJECTILE_LIFETIME,
            spread_radians: 0.0,
        }
    }
}

impl TowerWeaponAttributes {
    /// Why these attributes cannot arm a tower, if they cannot.
    pub fn invalid_reason(&self) -> Option<String> {
        if !self.interval.is_finite() || self.interval < MIN_ATTACK_INTERVAL {
            return Some(format!(
                "attack interval {} must be finite and at least {}s",
                self.interval, MIN_ATTACK_INTERVAL
            ));
        }
        None
    }

    pub fn projectile_settings(&self) -> ProjectileSettings {
        ProjectileSettings {
            kind: self.projectile_kind.clone(),
            damage: self.damage,
            lifetime: self.projectile_lifetime,
            speed: self.projectile_speed,
        }
    }
}

/// A buildable tower. `weapon` is optional so that presets lacking a weapon
/// can be represented and rejected at spawn time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerPreset {
    pub name: String,
    #[serde(default = "default_init_duration")]
    pub init_duration: f64,
    #[serde(default = "default_muzzle_height")]
    pub muzzle_height: f64,
    #[serde(default)]
    pub weapon: Option<TowerWeaponAttributes>,
    /// Seconds before the same preset can be built again.
    #[serde(default)]
    pub build_cooldown: f64,
}

fn default_init_duration() -> f64 {
    DEFAULT_TOWER_INIT_DURATION
}

fn default_muzzle_height() -> f64 {
    DEFAULT_MUZZLE_HEIGHT
}

impl TowerPreset {
    pub fn new(name: &str, weapon: TowerWeaponAttributes) -> Self {
        Self {
            name: name.to_string(),
            init_duration: DEFAULT_TOWER_INIT_DURATION,
            muzzle_height: DEFAULT_MUZZLE_HEIGHT,
            weapon: Some(weapon),
            build_cooldown: 0.0,
        }
    }
}

/// Projectile launch parameters handed to the spawn hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSettings {
    pub kind: String,
    pub damage: i32,
    pub lifetime: f64,
    pub speed: f64,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        TowerWeaponAttributes::default().projectile_settings()
    }
}

/// Engine-level configuration, independent of any one mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// RNG seed for weapon spread.
    pub seed: u64,
    /// Epsilon for the interception solver.
    pub intercept_epsilon: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            intercept_epsilon: INTERCEPT_EPSILON,
        }
    }
}
