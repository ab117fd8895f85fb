//! Projectile state machine: fly straight, hit the first hit box on the
//! travel segment, or expire.

use rampart_core::components::{ActorInfo, Damage, Projectile};
use rampart_core::constants::RESOLVE_MARKER_DAMAGE;
use rampart_core::enums::{ActorKind, ProjectilePhase, ResolveCause};
use rampart_core::error::ActorError;
use rampart_core::events::MissionEvent;
use rampart_core::types::{ActorId, Location};

use super::{component, store, MissionContext};

pub fn tick(ctx: &mut MissionContext<'_>, id: ActorId) -> Result<(), ActorError> {
    let mut projectile: Projectile = component(ctx, id, "Projectile")?;
    if projectile.phase != ProjectilePhase::Alive {
        return Ok(());
    }
    let info: ActorInfo = component(ctx, id, "ActorInfo")?;
    let mut location: Location = component(ctx, id, "Location")?;

    let from = location.position;
    let step = location.forward * projectile.speed * ctx.dt;
    let to = from + step;

    let candidates = ctx.hit_candidates();
    if let Some(target) = ctx.hits.first_hit(from, to, &candidates) {
        ctx.apply_damage(
            target,
            Damage::new(projectile.damage, Some(id), projectile.instigator),
        );
        resolve(
            ctx,
            id,
            ResolveCause::Hit,
            Damage::new(RESOLVE_MARKER_DAMAGE, Some(target), Some(id)),
        );
        return Ok(());
    }

    location.position = to;
    projectile.travelled += step.length();
    let lifetime = projectile.lifetime;
    store(ctx, id, location);
    store(ctx, id, projectile);

    if ctx.time() - info.spawn_time >= lifetime {
        resolve(
            ctx,
            id,
            ResolveCause::Expired,
            Damage::new(RESOLVE_MARKER_DAMAGE, None, None),
        );
    }
    Ok(())
}

/// Mark the projectile resolved and queue its removal. Idempotent.
pub fn resolve(ctx: &mut MissionContext<'_>, id: ActorId, cause: ResolveCause, damage: Damage) {
    {
        let Some(mut projectile) = ctx.data.registry.get_mut::<Projectile>(id) else {
            return;
        };
        if projectile.phase == ProjectilePhase::Resolved {
            return;
        }
        projectile.phase = ProjectilePhase::Resolved;
    }
    if let Some(mut info) = ctx.data.registry.get_mut::<ActorInfo>(id) {
        info.alive = false;
    }

    log::debug!("projectile {} resolved: {:?}", id, cause);
    ctx.emit(MissionEvent::ActorDied {
        id,
        kind: ActorKind::Projectile,
        damage,
    });
    ctx.request_removal(id);
}
