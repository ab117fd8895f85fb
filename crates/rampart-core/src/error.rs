//! Error taxonomy.
//!
//! Invariant violations (double registration, double death) are silent
//! no-ops and have no variant here.

use thiserror::Error;

use crate::types::ActorId;

/// A spawn request that could not be turned into a registered actor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("unknown {category} kind '{kind}'")]
    UnknownKind {
        category: &'static str,
        kind: String,
    },
    #[error("'{kind}' is missing required component: {part}")]
    MissingComponent { kind: String, part: &'static str },
    #[error("'{kind}' has an unusable weapon: {reason}")]
    InvalidWeapon { kind: String, reason: String },
    #[error("mission is not active")]
    NotActive,
}

/// Failures of mission-level operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissionError {
    #[error("mission has no paths")]
    EmptyPathSet,
}

/// Failures of the tower builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("no tower preset at index {0}")]
    UnknownPreset(i64),
    #[error("preset '{name}' is cooling down for {remaining:.2}s")]
    CoolingDown { name: String, remaining: f64 },
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// A single actor's update failed. Logged and isolated to that actor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActorError {
    #[error("actor {id} is missing its {component} component")]
    MissingComponent {
        id: ActorId,
        component: &'static str,
    },
    #[error("actor {id} references path {path_index} but the mission has no paths")]
    NoPath { id: ActorId, path_index: usize },
    #[error("tower {id} has attack interval {interval}, cadence is not finite")]
    InvalidCadence { id: ActorId, interval: f64 },
}

/// Failures loading a mission file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read mission file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse mission file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid mission: {0}")]
    Invalid(String),
    #[error(transparent)]
    Mission(#[from] MissionError),
}
