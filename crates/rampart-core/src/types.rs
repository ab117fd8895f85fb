//! Fundamental identity, placement and time types.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec3;
use serde::{Deserialize, Serialize};

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique actor identifier. Allocated once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Allocate a fresh id from the process-wide counter.
    pub fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle handed back by the presentation layer for a spawned actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresentationHandle(pub u64);

/// World placement of an actor: position plus unit facing direction.
/// y is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub position: DVec3,
    pub forward: DVec3,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            forward: DVec3::Z,
        }
    }
}

impl Location {
    pub fn new(position: DVec3, forward: DVec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(DVec3::Z),
        }
    }

    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Rotate the facing to look at a point. Keeps the old facing when the
    /// point coincides with the position.
    pub fn look_at(&mut self, point: DVec3) {
        if let Some(dir) = (point - self.position).try_normalize() {
            self.forward = dir;
        }
    }
}

/// Mission clock tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionClock {
    /// Number of ticks advanced since mission start.
    pub tick: u64,
    /// Elapsed mission time in seconds.
    pub elapsed_secs: f64,
}

impl MissionClock {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
