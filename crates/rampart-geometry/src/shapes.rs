//! Point, segment, plane and volume helpers.

use std::f64::consts::{PI, TAU};

use glam::{DQuat, DVec3};
use rand::Rng;

const PARALLEL_EPSILON: f64 = 1e-9;

// --- Volumes ---

pub fn sphere_volume(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius.powi(3)
}

/// Volume of a capsule with the given radius and cylindrical section height.
pub fn capsule_volume(radius: f64, cylindrical_height: f64) -> f64 {
    if cylindrical_height > 0.0 {
        PI * radius * radius * ((4.0 / 3.0) * radius + cylindrical_height)
    } else {
        sphere_volume(radius)
    }
}

// --- Lines and points ---

/// Closest point on an infinite line. `direction` must be normalized.
pub fn closest_point_on_line(origin: DVec3, direction: DVec3, point: DVec3) -> DVec3 {
    origin + direction * (point - origin).dot(direction)
}

/// Closest point on the segment `a..b`.
pub fn closest_point_on_segment(point: DVec3, a: DVec3, b: DVec3) -> DVec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

pub fn distance_point_to_segment(point: DVec3, a: DVec3, b: DVec3) -> f64 {
    point.distance(closest_point_on_segment(point, a, b))
}

// --- Planes ---

/// Intersect a ray with a plane. `None` when the ray is parallel to it.
pub fn ray_plane_intersection(
    origin: DVec3,
    direction: DVec3,
    plane_point: DVec3,
    plane_normal: DVec3,
) -> Option<DVec3> {
    let denom = direction.dot(plane_normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane_point - origin).dot(plane_normal) / denom;
    Some(origin + direction * t)
}

/// Closest point on a plane. `plane_normal` must be normalized.
pub fn closest_point_on_plane(point: DVec3, plane_point: DVec3, plane_normal: DVec3) -> DVec3 {
    point - plane_normal * plane_normal.dot(point - plane_point)
}

pub fn distance_point_to_plane(point: DVec3, plane_point: DVec3, plane_normal: DVec3) -> f64 {
    plane_normal.dot(point - plane_point).abs()
}

/// Remove the component of `vector` along the (normalized) plane normal.
pub fn project_onto_plane(vector: DVec3, plane_normal: DVec3) -> DVec3 {
    vector - plane_normal * vector.dot(plane_normal)
}

/// Result of intersecting a segment with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneHit {
    /// The segment crosses the plane at this point.
    Crossing(DVec3),
    /// The segment start lies on the plane.
    AtStart(DVec3),
    /// The segment end lies on the plane.
    AtEnd(DVec3),
    /// The segment lies in the plane; reports the end point.
    Coplanar(DVec3),
}

/// Intersect the segment `a..b` with a plane.
pub fn segment_plane_intersection(
    a: DVec3,
    b: DVec3,
    plane_point: DVec3,
    plane_normal: DVec3,
) -> Option<PlaneHit> {
    let dist_a = (plane_point - a).dot(plane_normal);
    let dist_b = (plane_point - b).dot(plane_normal);
    let ab = b - a;
    let denom = ab.dot(plane_normal);

    if denom.abs() < PARALLEL_EPSILON {
        return (dist_a.abs() < PARALLEL_EPSILON).then_some(PlaneHit::Coplanar(b));
    }
    if dist_a.abs() < PARALLEL_EPSILON {
        return Some(PlaneHit::AtStart(a));
    }
    if dist_b.abs() < PARALLEL_EPSILON {
        return Some(PlaneHit::AtEnd(b));
    }

    let t = dist_a / denom;
    (0.0..=1.0)
        .contains(&t)
        .then(|| PlaneHit::Crossing(a + ab * t))
}

// --- Containment ---

/// Axis-aligned box given by center and full size.
pub fn point_in_box(point: DVec3, center: DVec3, size: DVec3) -> bool {
    let offset = ((point - center) * 2.0).abs();
    let size = size.abs();
    offset.x <= size.x && offset.y <= size.y && offset.z <= size.z
}

pub fn point_in_sphere(point: DVec3, center: DVec3, radius: f64) -> bool {
    (point - center).length_squared() <= radius * radius
}

/// Vertical (y-axis) capsule centered at `center`.
pub fn point_in_capsule(point: DVec3, center: DVec3, radius: f64, cylindrical_height: f64) -> bool {
    let half = DVec3::Y * (cylindrical_height * 0.5);
    let axis_point = closest_point_on_segment(point, center - half, center + half);
    (point - axis_point).length_squared() <= radius * radius
}

/// Parameter in `[0, 1]` where the segment `a..b` first enters a sphere.
/// Returns `Some(0.0)` when `a` already lies inside.
pub fn segment_sphere_entry(a: DVec3, b: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let d = b - a;
    let f = a - center;
    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let aa = d.length_squared();
    if aa <= f64::EPSILON {
        return None;
    }
    let bb = 2.0 * f.dot(d);
    let disc = bb * bb - 4.0 * aa * c;
    if disc < 0.0 {
        return None;
    }

    let t = (-bb - disc.sqrt()) / (2.0 * aa);
    (0.0..=1.0).contains(&t).then_some(t)
}

// --- Spherical ---

/// Uniformly distributed direction within a cone around `direction`.
pub fn random_direction_in_cone<R: Rng + ?Sized>(
    direction: DVec3,
    half_angle: f64,
    rng: &mut R,
) -> DVec3 {
    let Some(axis) = direction.try_normalize() else {
        return direction;
    };
    if half_angle <= 0.0 {
        return axis;
    }

    let z: f64 = rng.gen_range(half_angle.cos()..=1.0);
    let phi: f64 = rng.gen_range(0.0..TAU);
    let h = (1.0 - z * z).max(0.0).sqrt();
    let local = DVec3::new(h * phi.cos(), h * phi.sin(), z);

    DQuat::from_rotation_arc(DVec3::Z, axis) * local
}
