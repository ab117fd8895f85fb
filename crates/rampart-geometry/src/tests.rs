//! Tests for interception, shapes, spatial search and paths.

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::intercept::{intercept_time, try_intercept};
use crate::path::{PathCurve, PathSet, Polyline};
use crate::shapes::*;
use crate::spatial::{find_closest, SearchResult};

const EPS: f64 = 0.001;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---- Interception ----

#[test]
fn test_stationary_target_intercepts_immediately() {
    let target = DVec3::new(3.0, 0.0, 4.0);
    let solution = try_intercept(DVec3::ZERO, DVec3::ZERO, 10.0, target, DVec3::ZERO, EPS)
        .expect("stationary target must be solvable");
    assert_eq!(solution.time, 0.0);
    assert_eq!(solution.point, target);
}

#[test]
fn test_shooter_moving_with_target_is_stationary_case() {
    let vel = DVec3::new(2.0, 0.0, 0.0);
    let target = DVec3::new(0.0, 0.0, 5.0);
    let solution = try_intercept(DVec3::ZERO, vel, 1.0, target, vel, EPS).unwrap();
    assert_eq!(solution.time, 0.0);
    assert_eq!(solution.point, target);
}

#[test]
fn test_head_on_target() {
    // Target 10 m away closing at 5 m/s, projectile at 5 m/s: meet after 1 s.
    let solution = try_intercept(
        DVec3::ZERO,
        DVec3::ZERO,
        5.0,
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(-5.0, 0.0, 0.0),
        EPS,
    )
    .unwrap();
    assert!(approx(solution.time, 1.0), "t = {}", solution.time);
    assert!((solution.point - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-9);
}

#[test]
fn test_crossing_target_solution_is_consistent() {
    let shooter = DVec3::new(0.0, 1.0, 0.0);
    let target = DVec3::new(0.0, 0.0, 8.0);
    let target_vel = DVec3::new(3.0, 0.0, 0.0);
    let speed = 10.0;

    let solution = try_intercept(shooter, DVec3::ZERO, speed, target, target_vel, EPS).unwrap();
    assert!(solution.time > 0.0);

    // Projectile travels exactly speed * t to reach the intercept point.
    let flight = (solution.point - shooter).length();
    assert!(
        (flight - speed * solution.time).abs() < 1e-9,
        "flight {flight} vs {}",
        speed * solution.time
    );
    // And the target is there at that time.
    let target_then = target + target_vel * solution.time;
    assert!((target_then - solution.point).length() < 1e-9);
}

#[test]
fn test_receding_fast_target_has_no_solution() {
    // Target runs away faster than the projectile: both roots are negative.
    let result = try_intercept(
        DVec3::ZERO,
        DVec3::ZERO,
        2.0,
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(5.0, 0.0, 0.0),
        EPS,
    );
    assert!(result.is_none());
}

#[test]
fn test_never_negative_time() {
    let cases = [
        (DVec3::new(10.0, 0.0, 0.0), DVec3::new(5.0, 0.0, 0.0), 2.0),
        (DVec3::new(10.0, 0.0, 0.0), DVec3::new(-5.0, 0.0, 0.0), 3.0),
        (DVec3::new(0.0, 0.0, 4.0), DVec3::new(1.0, 0.0, 1.0), 0.5),
        (DVec3::new(-2.0, 3.0, 1.0), DVec3::new(0.0, -4.0, 2.0), 8.0),
    ];
    for (rel_pos, rel_vel, speed) in cases {
        if let Some(t) = intercept_time(speed, rel_pos, rel_vel, EPS) {
            assert!(t >= 0.0, "negative time {t} for {rel_pos:?} {rel_vel:?}");
        }
    }
}

#[test]
fn test_equal_speed_uses_linear_solution() {
    // |v| == projectile speed, target approaching: t = -c / b.
    let rel_pos = DVec3::new(10.0, 0.0, 0.0);
    let rel_vel = DVec3::new(-4.0, 0.0, 0.0);
    let t = intercept_time(4.0, rel_pos, rel_vel, EPS).unwrap();
    // c = 100, b = -80 -> t = 1.25
    assert!(approx(t, 1.25), "t = {t}");

    // Same speed but receding: clamps to zero as the linear form dictates.
    let t = intercept_time(4.0, rel_pos, -rel_vel, EPS).unwrap();
    assert_eq!(t, 0.0);

    // Same speed moving perpendicular: never closes.
    let t = intercept_time(4.0, rel_pos, DVec3::new(0.0, 0.0, 4.0), EPS);
    assert!(t.is_none());
}

// ---- Shapes ----

#[test]
fn test_volumes() {
    assert!(approx(sphere_volume(1.0), 4.0 / 3.0 * std::f64::consts::PI));
    assert!(approx(capsule_volume(1.0, 0.0), sphere_volume(1.0)));
    assert!(capsule_volume(1.0, 2.0) > sphere_volume(1.0));
}

#[test]
fn test_closest_point_on_segment() {
    let a = DVec3::ZERO;
    let b = DVec3::new(10.0, 0.0, 0.0);
    assert_eq!(closest_point_on_segment(DVec3::new(-3.0, 1.0, 0.0), a, b), a);
    assert_eq!(closest_point_on_segment(DVec3::new(13.0, 1.0, 0.0), a, b), b);
    assert_eq!(
        closest_point_on_segment(DVec3::new(4.0, 2.0, 0.0), a, b),
        DVec3::new(4.0, 0.0, 0.0)
    );
    assert!(approx(distance_point_to_segment(DVec3::new(4.0, 2.0, 0.0), a, b), 2.0));
    assert_eq!(
        closest_point_on_line(a, DVec3::X, DVec3::new(-3.0, 1.0, 0.0)),
        DVec3::new(-3.0, 0.0, 0.0)
    );
}

#[test]
fn test_planes() {
    let hit = ray_plane_intersection(
        DVec3::new(0.0, 10.0, 0.0),
        DVec3::new(1.0, -1.0, 0.0).normalize(),
        DVec3::ZERO,
        DVec3::Y,
    )
    .unwrap();
    assert!((hit - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-9);
    assert!(ray_plane_intersection(DVec3::Y, DVec3::X, DVec3::ZERO, DVec3::Y).is_none());

    let p = DVec3::new(2.0, 5.0, 3.0);
    assert_eq!(closest_point_on_plane(p, DVec3::ZERO, DVec3::Y), DVec3::new(2.0, 0.0, 3.0));
    assert!(approx(distance_point_to_plane(p, DVec3::ZERO, DVec3::Y), 5.0));
    assert_eq!(project_onto_plane(p, DVec3::Y), DVec3::new(2.0, 0.0, 3.0));
}

#[test]
fn test_segment_plane_cases() {
    let n = DVec3::Y;
    let origin = DVec3::ZERO;
    match segment_plane_intersection(DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.0, -1.0, 0.0), origin, n) {
        Some(PlaneHit::Crossing(p)) => assert!(p.length() < 1e-9),
        other => panic!("expected crossing, got {other:?}"),
    }
    assert_eq!(
        segment_plane_intersection(DVec3::ZERO, DVec3::Y, origin, n),
        Some(PlaneHit::AtStart(DVec3::ZERO))
    );
    assert_eq!(
        segment_plane_intersection(DVec3::Y, DVec3::ZERO, origin, n),
        Some(PlaneHit::AtEnd(DVec3::ZERO))
    );
    assert_eq!(
        segment_plane_intersection(DVec3::ZERO, DVec3::X, origin, n),
        Some(PlaneHit::Coplanar(DVec3::X))
    );
    // Both ends above the plane.
    assert_eq!(
        segment_plane_intersection(DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.0, 2.0, 1.0), origin, n),
        None
    );
}

#[test]
fn test_containment() {
    let c = DVec3::ZERO;
    assert!(point_in_box(DVec3::new(1.0, 0.5, -1.0), c, DVec3::new(2.0, 1.0, 2.0)));
    assert!(!point_in_box(DVec3::new(1.1, 0.0, 0.0), c, DVec3::new(2.0, 1.0, 2.0)));
    assert!(point_in_sphere(DVec3::new(0.0, 2.0, 0.0), c, 2.0));
    assert!(!point_in_sphere(DVec3::new(0.0, 2.01, 0.0), c, 2.0));
    // Capsule: radius 0.5, cylinder 2 -> reaches y = 1.5.
    assert!(point_in_capsule(DVec3::new(0.0, 1.4, 0.0), c, 0.5, 2.0));
    assert!(point_in_capsule(DVec3::new(0.5, 1.0, 0.0), c, 0.5, 2.0));
    assert!(!point_in_capsule(DVec3::new(0.0, 1.6, 0.0), c, 0.5, 2.0));
}

#[test]
fn test_segment_sphere_entry() {
    let center = DVec3::new(5.0, 0.0, 0.0);
    let t = segment_sphere_entry(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0), center, 1.0).unwrap();
    assert!(approx(t, 0.4));
    // Starting inside.
    assert_eq!(segment_sphere_entry(center, DVec3::ZERO, center, 1.0), Some(0.0));
    // Passing beside.
    assert!(segment_sphere_entry(DVec3::new(0.0, 2.0, 0.0), DVec3::new(10.0, 2.0, 0.0), center, 1.0).is_none());
    // Stops short.
    assert!(segment_sphere_entry(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), center, 1.0).is_none());
}

#[test]
fn test_random_direction_in_cone_stays_inside() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let axis = DVec3::new(1.0, 1.0, 0.0).normalize();
    let half_angle = 0.2;
    for _ in 0..200 {
        let dir = random_direction_in_cone(axis, half_angle, &mut rng);
        assert!((dir.length() - 1.0).abs() < 1e-9);
        assert!(dir.angle_between(axis) <= half_angle + 1e-9);
    }
    let straight = random_direction_in_cone(axis, 0.0, &mut rng);
    assert!((straight - axis).length() < 1e-12);
}

// ---- Spatial search ----

#[test]
fn test_find_closest_picks_nearest_in_range() {
    let points = vec![
        DVec3::new(5.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 3.0),
        DVec3::new(50.0, 0.0, 0.0),
    ];
    let result = find_closest(DVec3::ZERO, 6.0, points.iter().enumerate(), |(_, p)| **p, |_| true);
    let (index, _) = result.item.unwrap();
    assert_eq!(index, 1);
    assert!(approx(result.distance, 2.0));
    assert_eq!(result.in_range, 3);
}

#[test]
fn test_find_closest_radius_is_inclusive() {
    let radius = 4.0;
    let on_edge = vec![DVec3::new(radius, 0.0, 0.0)];
    let result = find_closest(DVec3::ZERO, radius, on_edge, |p| *p, |_| true);
    assert!(result.item.is_some(), "candidate exactly at radius must be included");
    assert!(approx(result.distance, radius));

    let outside = vec![DVec3::new(radius + 1e-6, 0.0, 0.0)];
    let result = find_closest(DVec3::ZERO, radius, outside, |p| *p, |_| true);
    assert!(result.is_empty());
    assert_eq!(result.distance, f64::INFINITY);
}

#[test]
fn test_find_closest_ties_keep_first_and_filter_applies() {
    let items = vec![
        ("a", DVec3::new(1.0, 0.0, 0.0)),
        ("b", DVec3::new(-1.0, 0.0, 0.0)),
        ("c", DVec3::new(0.5, 0.0, 0.0)),
    ];
    let result = find_closest(DVec3::ZERO, 2.0, items.iter(), |(_, p)| *p, |(name, _)| *name != "c");
    assert_eq!(result.item.map(|(name, _)| *name), Some("a"));
    assert_eq!(result.in_range, 2);
}

#[test]
fn test_find_closest_empty() {
    let result: SearchResult<DVec3> = find_closest(DVec3::ZERO, 10.0, Vec::new(), |p| *p, |_| true);
    assert_eq!(result, SearchResult::empty());
}

// ---- Paths ----

fn l_path() -> Polyline {
    Polyline::new(vec![
        DVec3::ZERO,
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(10.0, 0.0, 10.0),
    ])
}

#[test]
fn test_polyline_arc_length_parameterization() {
    let path = l_path();
    assert!(approx(path.length(), 20.0));
    assert_eq!(path.position_at(0.0), DVec3::ZERO);
    assert!((path.position_at(0.25) - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-9);
    assert!((path.position_at(0.75) - DVec3::new(10.0, 0.0, 5.0)).length() < 1e-9);
    assert_eq!(path.position_at(1.0), DVec3::new(10.0, 0.0, 10.0));
    assert_eq!(path.position_at(7.0), DVec3::new(10.0, 0.0, 10.0));
    assert_eq!(path.direction_at(0.1), DVec3::X);
    assert_eq!(path.direction_at(0.9), DVec3::Z);
}

#[test]
fn test_degenerate_polyline() {
    let single = Polyline::new(vec![DVec3::ONE]);
    assert_eq!(single.length(), 0.0);
    assert_eq!(single.position_at(0.5), DVec3::ONE);
    assert_eq!(single.direction_at(0.5), DVec3::ZERO);

    let repeated = Polyline::new(vec![DVec3::ZERO, DVec3::ZERO, DVec3::X]);
    assert_eq!(repeated.direction_at(0.0), DVec3::X);
}

#[test]
fn test_polyline_json_is_point_list() {
    let path: Polyline = serde_json::from_str("[[0,0,0],[0,0,4]]").unwrap();
    assert!(approx(path.length(), 4.0));
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "[[0.0,0.0,0.0],[0.0,0.0,4.0]]");
}

#[test]
fn test_path_set_wraps_indices() {
    let set = PathSet::from_polylines(vec![l_path(), Polyline::new(vec![DVec3::Y, DVec3::new(0.0, 1.0, 3.0)])]);
    assert_eq!(set.len(), 2);
    assert_eq!(set.wrap_index(5), Some(1));
    let (pos, dir) = set.spawn_location(3).unwrap();
    assert_eq!(pos, DVec3::Y);
    assert_eq!(dir, DVec3::Z);

    let empty = PathSet::default();
    assert!(empty.is_empty());
    assert!(empty.get(0).is_none());
    assert!(empty.spawn_location(0).is_none());
}
