//! Lead prediction: where and when a constant-speed projectile fired now
//! meets a target moving at constant velocity.

use glam::DVec3;

/// An interception solution in the absolute frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercept {
    pub point: DVec3,
    pub time: f64,
}

/// Solve for the earliest interception of a moving target.
///
/// Returns `None` when no non-negative real time exists, which callers treat
/// as "not trackable" rather than an error.
pub fn try_intercept(
    shooter_pos: DVec3,
    shooter_vel: DVec3,
    projectile_speed: f64,
    target_pos: DVec3,
    target_vel: DVec3,
    epsilon: f64,
) -> Option<Intercept> {
    let rel_pos = target_pos - shooter_pos;
    let rel_vel = target_vel - shooter_vel;

    let time = intercept_time(projectile_speed, rel_pos, rel_vel, epsilon)?;
    Some(Intercept {
        point: target_pos + rel_vel * time,
        time,
    })
}

/// Time to intercept in the target-relative frame.
///
/// Solves `(|v|² - s²)·t² + 2(v·p)·t + |p|² = 0` for the smallest
/// non-negative root.
pub fn intercept_time(
    projectile_speed: f64,
    rel_pos: DVec3,
    rel_vel: DVec3,
    epsilon: f64,
) -> Option<f64> {
    let vel_sq = rel_vel.length_squared();
    if vel_sq < epsilon {
        // Effectively stationary relative to the shooter.
        return Some(0.0);
    }

    let a = vel_sq - projectile_speed * projectile_speed;
    let b = 2.0 * rel_vel.dot(rel_pos);
    let c = rel_pos.length_squared();

    if a.abs() < epsilon {
        // Target moves as fast as the projectile: the quadratic degenerates
        // to b·t + c = 0.
        if b.abs() < epsilon {
            return (c < epsilon).then_some(0.0);
        }
        return Some((-c / b).max(0.0));
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    // Cancellation-free roots.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let (t1, t2) = if q == 0.0 {
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };

    match (t1 >= 0.0, t2 >= 0.0) {
        (true, true) => Some(t1.min(t2)),
        (true, false) => Some(t1),
        (false, true) => Some(t2),
        (false, false) => None,
    }
}
