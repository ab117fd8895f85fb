//! Path curves enemies walk along.
//!
//! Curves are parameterized by `t` in `[0, 1]` proportional to arc length, so
//! `position_at(d / length)` is the point at distance `d` along the path.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A fixed path supplied by the map.
pub trait PathCurve: Send + Sync {
    /// Total arc length.
    fn length(&self) -> f64;
    /// Point at normalized arc length `t` (clamped to `[0, 1]`).
    fn position_at(&self, t: f64) -> DVec3;
    /// Unit tangent at `t`. Zero for degenerate curves.
    fn direction_at(&self, t: f64) -> DVec3;
}

/// Piecewise-linear path through ordered points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DVec3>", into = "Vec<DVec3>")]
pub struct Polyline {
    points: Vec<DVec3>,
    /// Cumulative arc length at each point.
    cumulative: Vec<f64>,
}

impl Polyline {
    pub fn new(points: Vec<DVec3>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Segment index and local fraction for normalized arc length `t`.
    fn locate(&self, t: f64) -> Option<(usize, f64)> {
        if self.points.len() < 2 {
            return None;
        }
        let length = self.length();
        let target = t.clamp(0.0, 1.0) * length;
        let last_segment = self.points.len() - 2;
        let segment = self
            .cumulative
            .windows(2)
            .position(|w| target <= w[1])
            .unwrap_or(last_segment);
        let seg_len = self.cumulative[segment + 1] - self.cumulative[segment];
        let local = if seg_len > 0.0 {
            (target - self.cumulative[segment]) / seg_len
        } else {
            0.0
        };
        Some((segment, local))
    }
}

impl From<Vec<DVec3>> for Polyline {
    fn from(points: Vec<DVec3>) -> Self {
        Self::new(points)
    }
}

impl From<Polyline> for Vec<DVec3> {
    fn from(line: Polyline) -> Self {
        line.points
    }
}

impl PathCurve for Polyline {
    fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn position_at(&self, t: f64) -> DVec3 {
        match self.locate(t) {
            Some((segment, local)) => self.points[segment].lerp(self.points[segment + 1], local),
            None => self.points.first().copied().unwrap_or(DVec3::ZERO),
        }
    }

    fn direction_at(&self, t: f64) -> DVec3 {
        let Some((segment, _)) = self.locate(t) else {
            return DVec3::ZERO;
        };
        // Skip zero-length segments so repeated points still yield a heading.
        self.points[segment..]
            .windows(2)
            .find_map(|w| (w[1] - w[0]).try_normalize())
            .unwrap_or(DVec3::ZERO)
    }
}

/// The mission's paths. Indices wrap modulo the path count.
#[derive(Default)]
pub struct PathSet {
    paths: Vec<Box<dyn PathCurve>>,
}

impl PathSet {
    pub fn new(paths: Vec<Box<dyn PathCurve>>) -> Self {
        Self { paths }
    }

    pub fn from_polylines(lines: impl IntoIterator<Item = Polyline>) -> Self {
        Self::new(
            lines
                .into_iter()
                .map(|line| Box::new(line) as Box<dyn PathCurve>)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Wrap an arbitrary index into range. `None` when there are no paths.
    pub fn wrap_index(&self, index: usize) -> Option<usize> {
        (!self.paths.is_empty()).then(|| index % self.paths.len())
    }

    pub fn get(&self, index: usize) -> Option<&dyn PathCurve> {
        let index = self.wrap_index(index)?;
        Some(self.paths[index].as_ref())
    }

    /// Position and heading at the start of a path.
    pub fn spawn_location(&self, index: usize) -> Option<(DVec3, DVec3)> {
        let path = self.get(index)?;
        Some((path.position_at(0.0), path.direction_at(0.0)))
    }
}

impl std::fmt::Debug for PathSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathSet")
            .field("paths", &self.paths.len())
            .finish()
    }
}
