//! Enemy state machine: walk the assigned path, take damage, die once.

use glam::DVec3;

use rampart_core::components::{ActorInfo, Damage, Enemy};
use rampart_core::constants::LOOK_AHEAD_DISTANCE;
use rampart_core::enums::{ActorKind, EnemyPhase};
use rampart_core::error::ActorError;
use rampart_core::events::MissionEvent;
use rampart_core::types::{ActorId, Location};

use super::{component, store, MissionContext};
use crate::registry::ActorRegistry;

/// Point towers aim at: path position lifted by the tracking height.
pub fn tracking_point(registry: &ActorRegistry, id: ActorId) -> Option<DVec3> {
    let position = registry.get::<Location>(id)?.position;
    let height = registry.get::<Enemy>(id)?.tracking_height;
    Some(position + DVec3::Y * height)
}

/// Advance along the path. Progress is derived from time since spawn, so a
/// skipped or long tick lands the enemy where it should be.
pub fn tick(ctx: &mut MissionContext<'_>, id: ActorId) -> Result<(), ActorError> {
    let mut enemy: Enemy = component(ctx, id, "Enemy")?;
    if !enemy.is_alive() {
        return Ok(());
    }
    let info: ActorInfo = component(ctx, id, "ActorInfo")?;
    let mut location: Location = component(ctx, id, "Location")?;

    let path = ctx.paths.get(enemy.path_index).ok_or(ActorError::NoPath {
        id,
        path_index: enemy.path_index,
    })?;
    let length = path.length();
    let distance = enemy.speed * (ctx.time() - info.spawn_time);
    let raw_progress = if length > 0.0 { distance / length } else { 1.0 };
    let progress = raw_progress.clamp(0.0, 1.0);

    location.position = path.position_at(progress);
    if length > 0.0 {
        location.look_at(path.position_at(progress + LOOK_AHEAD_DISTANCE / length));
    }
    enemy.move_progress = progress;
    enemy.velocity = path.direction_at(progress) * enemy.speed;

    let player_damage = enemy.player_damage;
    store(ctx, id, location);
    store(ctx, id, enemy);

    if raw_progress >= 1.0 {
        reached_end(ctx, id, player_damage);
    }
    Ok(())
}

/// Inflict the enemy's damage on the player, then kill it whatever its
/// health.
fn reached_end(ctx: &mut MissionContext<'_>, id: ActorId, player_damage: i32) {
    log::debug!("enemy {} reached the end of its path", id);
    ctx.emit(MissionEvent::EnemyReachedEnd { id, player_damage });
    ctx.apply_player_damage(player_damage);
    kill(ctx, id, Damage::new(0, Some(id), None));
}

/// Apply damage. Negative amounts raise health.
pub fn take_damage(ctx: &mut MissionContext<'_>, id: ActorId, damage: Damage) {
    let depleted = {
        let Some(mut enemy) = ctx.data.registry.get_mut::<Enemy>(id) else {
            return;
        };
        if !enemy.is_alive() {
            return;
        }
        enemy.health = enemy.health.saturating_sub(damage.amount);
        enemy.health <= 0
    };
    if depleted {
        kill(ctx, id, damage);
    }
}

/// Transition to Dead. Returns `false` when the enemy was already dead.
pub fn kill(ctx: &mut MissionContext<'_>, id: ActorId, damage: Damage) -> bool {
    {
        let Some(mut enemy) = ctx.data.registry.get_mut::<Enemy>(id) else {
            return false;
        };
        if enemy.phase == EnemyPhase::Dead {
            return false;
        }
        enemy.phase = EnemyPhase::Dead;
        enemy.velocity = DVec3::ZERO;
    }
    if let Some(mut info) = ctx.data.registry.get_mut::<ActorInfo>(id) {
        info.alive = false;
    }

    log::debug!(
        "enemy {} died to {} damage from {:?} by {:?}",
        id,
        damage.amount,
        damage.source,
        damage.instigator
    );
    ctx.emit(MissionEvent::ActorDied {
        id,
        kind: ActorKind::Enemy,
        damage,
    });
    ctx.request_removal(id);
    ctx.on_enemy_died(id);
    true
}
