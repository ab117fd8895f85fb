//! Tower state machine: Init → Idle → Tracking, firing on cadence.
//!
//! - **Init**: waits `init_duration` after spawn.
//! - **Idle**: takes the nearest live enemy within range.
//! - **Tracking**: re-solves the intercept every tick and drops the target
//!   when it dies, becomes unreachable, or its intercept point lies beyond
//!   range. The attack timer advances by `dt / interval` and fires once per
//!   whole unit, keeping the remainder. A step that is not finite drops the
//!   tower to Idle with `ActorError::InvalidCadence` instead of firing.

use glam::DVec3;

use rampart_core::components::{ActorInfo, Enemy, TargetingSolution, Tower};
use rampart_core::enums::TowerMode;
use rampart_core::error::ActorError;
use rampart_core::events::MissionEvent;
use rampart_core::types::{ActorId, Location};
use rampart_geometry::shapes::random_direction_in_cone;
use rampart_geometry::{find_closest, try_intercept};

use super::{component, enemy, store, MissionContext};
use crate::mission_data::{PendingSpawn, ProjectileRequest};

pub fn tick(ctx: &mut MissionContext<'_>, id: ActorId) -> Result<(), ActorError> {
    let mut tower: Tower = component(ctx, id, "Tower")?;
    let info: ActorInfo = component(ctx, id, "ActorInfo")?;
    let mut location: Location = component(ctx, id, "Location")?;

    let result = match tower.mode {
        TowerMode::Init => {
            if ctx.time() > info.spawn_time + tower.init_duration {
                set_mode(ctx, id, &mut tower, TowerMode::Idle);
            }
            Ok(())
        }
        TowerMode::Idle => {
            acquire(ctx, id, &mut tower, location.position);
            Ok(())
        }
        TowerMode::Tracking => track(ctx, id, &mut tower, &mut location),
    };

    store(ctx, id, tower);
    store(ctx, id, location);
    result
}

/// Intercept solution from the tower's muzzle to `target`, or `None` when
/// the target is gone or cannot be caught.
pub fn solve(
    ctx: &MissionContext<'_>,
    muzzle: DVec3,
    projectile_speed: f64,
    target: ActorId,
) -> Option<TargetingSolution> {
    let position = enemy::tracking_point(&ctx.data.registry, target)?;
    let velocity = ctx.data.registry.get::<Enemy>(target)?.velocity;
    let intercept = try_intercept(
        muzzle,
        DVec3::ZERO,
        projectile_speed,
        position,
        velocity,
        ctx.epsilon,
    )?;
    Some(TargetingSolution {
        intercept_point: intercept.point,
        time_to_intercept: intercept.time,
        distance: intercept.point.distance(muzzle),
    })
}

fn set_mode(ctx: &mut MissionContext<'_>, id: ActorId, tower: &mut Tower, mode: TowerMode) {
    if mode != TowerMode::Tracking {
        tower.target = None;
        tower.solution = None;
    }
    tower.mode = mode;
    log::debug!("tower {} -> {:?}", id, mode);
    ctx.emit(MissionEvent::TowerModeChanged { tower: id, mode });
}

fn acquire(ctx: &mut MissionContext<'_>, id: ActorId, tower: &mut Tower, base: DVec3) {
    let candidates = ctx.enemy_positions();
    let result = find_closest(
        base,
        tower.weapon.range,
        candidates,
        |(_, position)| *position,
        |_| true,
    );
    let Some((target, _)) = result.item else {
        return;
    };

    tower.target = Some(target);
    tower.attack_timer = 0.0;
    tower.solution = solve(ctx, tower.muzzle(base), tower.weapon.projectile_speed, target);
    set_mode(ctx, id, tower, TowerMode::Tracking);
}

fn track(
    ctx: &mut MissionContext<'_>,
    id: ActorId,
    tower: &mut Tower,
    location: &mut Location,
) -> Result<(), ActorError> {
    let target_alive = tower.target.is_some_and(|target| {
        ctx.data
            .registry
            .get::<Enemy>(target)
            .is_some_and(|e| e.is_alive())
    });
    let Some(target) = tower.target.filter(|_| target_alive) else {
        set_mode(ctx, id, tower, TowerMode::Idle);
        return Ok(());
    };

    let muzzle = tower.muzzle(location.position);
    let solution = match solve(ctx, muzzle, tower.weapon.projectile_speed, target) {
        Some(solution) if solution.distance <= tower.weapon.range => solution,
        _ => {
            set_mode(ctx, id, tower, TowerMode::Idle);
            return Ok(());
        }
    };
    tower.solution = Some(solution);

    let mut facing = solution.intercept_point - location.position;
    facing.y = 0.0;
    location.look_at(location.position + facing);

    let interval = tower.weapon.interval;
    let step = ctx.dt / interval;
    if !(interval > 0.0 && step.is_finite()) {
        set_mode(ctx, id, tower, TowerMode::Idle);
        return Err(ActorError::InvalidCadence { id, interval });
    }
    tower.attack_timer += step;
    while tower.attack_timer >= 1.0 {
        tower.attack_timer -= 1.0;
        fire(ctx, id, tower, muzzle, solution.intercept_point);
    }
    Ok(())
}

fn fire(ctx: &mut MissionContext<'_>, id: ActorId, tower: &Tower, muzzle: DVec3, aim_point: DVec3) {
    let weapon = &tower.weapon;
    let mut direction = (aim_point - muzzle).try_normalize().unwrap_or(DVec3::Z);
    if weapon.spread_radians > 0.0 {
        direction = random_direction_in_cone(direction, weapon.spread_radians, &mut *ctx.rng);
    }

    ctx.request_spawn(PendingSpawn::Projectile(ProjectileRequest {
        shooter: id,
        origin: muzzle,
        direction,
        aim_point,
        settings: weapon.projectile_settings(),
    }));
    ctx.emit(MissionEvent::TowerAttacked {
        tower: id,
        aim_point,
        projectile_kind: weapon.projectile_kind.clone(),
    });
}
