//! Mission simulation for RAMPART.
//!
//! Owns the actor registry, runs the wave scheduler and the per-actor state
//! machines on an explicit tick, and reports what happened as a buffered
//! event stream. Headless: presentation plugs in through `hooks`.

pub mod engine;
pub mod hooks;
pub mod mission_data;
pub mod presets;
pub mod registry;
pub mod scenario;
pub mod systems;

pub use engine::MissionController;
pub use rampart_core as core;
pub use rampart_geometry as geometry;
