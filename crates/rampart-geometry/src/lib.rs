//! Geometry for RAMPART.
//!
//! Ballistic interception, point/segment/plane helpers, shape containment,
//! nearest-candidate search and path curves. Pure functions over
//! `glam::DVec3`; no ECS and no mission state.

pub mod intercept;
pub mod path;
pub mod shapes;
pub mod spatial;

pub use intercept::{intercept_time, try_intercept, Intercept};
pub use path::{PathCurve, PathSet, Polyline};
pub use spatial::{find_closest, SearchResult};

#[cfg(test)]
mod tests;
