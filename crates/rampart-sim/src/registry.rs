//! Actor registry: the authoritative set of live actors.
//!
//! Backed by a hecs `World`. Each actor is one entity carrying `ActorInfo`,
//! `Location` and its kind's component. A side index keyed by `ActorId`
//! gives lookup and a stable ascending-id iteration order.

use std::collections::BTreeMap;

use hecs::{Component, Entity, Ref, RefMut, World};

use rampart_core::components::{ActorInfo, Enemy, HitBox, Projectile, Tower};
use rampart_core::enums::ActorKind;
use rampart_core::types::{ActorId, Location};

/// The kind-specific part of a new actor.
#[derive(Debug, Clone)]
pub enum ActorBody {
    Enemy(Enemy, HitBox),
    Tower(Tower),
    Projectile(Projectile),
}

impl ActorBody {
    pub fn kind(&self) -> ActorKind {
        match self {
            ActorBody::Enemy(..) => ActorKind::Enemy,
            ActorBody::Tower(_) => ActorKind::Tower,
            ActorBody::Projectile(_) => ActorKind::Projectile,
        }
    }
}

#[derive(Default)]
pub struct ActorRegistry {
    world: World,
    index: BTreeMap<ActorId, (Entity, ActorKind)>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor. Returns `false` without touching anything when the
    /// id is already present. Ids come from `ActorId::next`, so a removed id
    /// never comes back.
    pub fn register(&mut self, mut info: ActorInfo, location: Location, body: ActorBody) -> bool {
        let id = info.id;
        if self.index.contains_key(&id) {
            return false;
        }

        let kind = body.kind();
        info.kind = kind;
        let entity = match body {
            ActorBody::Enemy(enemy, hit_box) => self.world.spawn((info, location, enemy, hit_box)),
            ActorBody::Tower(tower) => self.world.spawn((info, location, tower)),
            ActorBody::Projectile(projectile) => self.world.spawn((info, location, projectile)),
        };
        self.index.insert(id, (entity, kind));
        true
    }

    /// Remove an actor. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ActorId) -> bool {
        let Some((entity, _)) = self.index.remove(&id) else {
            return false;
        };
        let _ = self.world.despawn(entity);
        true
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn kind(&self, id: ActorId) -> Option<ActorKind> {
        self.index.get(&id).map(|&(_, kind)| kind)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn count_of_kind(&self, kind: ActorKind) -> usize {
        self.all_of_kind(kind).count()
    }

    /// Ids of every registered actor of `kind`, ascending.
    pub fn all_of_kind(&self, kind: ActorKind) -> impl Iterator<Item = ActorId> + '_ {
        self.index
            .iter()
            .filter(move |(_, (_, k))| *k == kind)
            .map(|(&id, _)| id)
    }

    /// Ids of every registered actor, ascending. Owned, so callers may
    /// mutate the registry while walking it.
    pub fn snapshot_ids(&self) -> Vec<ActorId> {
        self.index.keys().copied().collect()
    }

    pub fn get<T: Component>(&self, id: ActorId) -> Option<Ref<'_, T>> {
        let &(entity, _) = self.index.get(&id)?;
        self.world.get::<&T>(entity).ok()
    }

    pub fn get_mut<T: Component>(&self, id: ActorId) -> Option<RefMut<'_, T>> {
        let &(entity, _) = self.index.get(&id)?;
        self.world.get::<&mut T>(entity).ok()
    }
}

impl std::fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorRegistry")
            .field("live", &self.index.len())
            .finish()
    }
}
