use crate::entity::Entity;

/// Handle to an entity slot. The generation is bumped whenever a slot is
/// freed, so a stale handle never resolves to the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Owned store of live entities with stable indices.
#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    /// Stack of free slot indices.
    free_slots: Vec<u32>,
    live: usize,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entity`, reusing a freed slot when one is available.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityId {
            index,
            generation: 0,
        }
    }

    fn slot(&self, id: EntityId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slot(id).and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Free the slot behind `id` and return its entity.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(id.index);
        self.live -= 1;
        Some(entity)
    }

    /// Live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity.as_ref().map(|entity| {
                (
                    EntityId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entity,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.entity.as_mut().map(|entity| {
                (
                    EntityId {
                        index: index as u32,
                        generation,
                    },
                    entity,
                )
            })
        })
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Drop every retired entity in a single pass. Returns the freed ids.
    pub fn compact(&mut self) -> Vec<EntityId> {
        let retired: Vec<EntityId> = self
            .iter()
            .filter(|(_, entity)| entity.is_retired())
            .map(|(id, _)| id)
            .collect();
        for &id in &retired {
            self.remove(id);
        }
        retired
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slots ever allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_slot_count(&self) -> usize {
        self.free_slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, ActorKind};
    use crater_core::config::EntityTuning;
    use crater_core::direction::Facing;
    use glam::IVec2;

    fn zombie(x: i32) -> Entity {
        Entity::Actor(Actor::new(
            ActorKind::Zombie,
            IVec2::new(x, 0),
            Facing::Left,
            &EntityTuning::default(),
        ))
    }

    #[test]
    fn test_insert_get_remove() {
        let mut arena = EntityArena::new();
        let a = arena.insert(zombie(1));
        let b = arena.insert(zombie(2));
        assert_eq!(arena.len(), 2);
        assert_ne!(a, b);
        assert!(arena.get(a).is_some());

        assert!(arena.remove(a).is_some());
        assert!(arena.get(a).is_none());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_stale_handle_does_not_resolve_to_reused_slot() {
        let mut arena = EntityArena::new();
        let old = arena.insert(zombie(1));
        arena.remove(old);
        let new = arena.insert(zombie(9));

        assert_eq!(old.index, new.index);
        assert_ne!(old.generation, new.generation);
        assert!(arena.get(old).is_none());
        assert!(arena.get_mut(old).is_none());
        assert!(arena.get(new).is_some());
        assert_eq!(arena.capacity(), 1);
    }

    #[test]
    fn test_compact_removes_only_retired() {
        let mut arena = EntityArena::new();
        let keep = arena.insert(zombie(1));
        let drop = arena.insert(zombie(2));
        if let Some(Entity::Actor(actor)) = arena.get_mut(drop) {
            actor.kill();
        }

        let freed = arena.compact();
        assert_eq!(freed, vec![drop]);
        assert_eq!(arena.ids(), vec![keep]);
        assert_eq!(arena.free_slot_count(), 1);
        assert!(arena.compact().is_empty());
    }

    #[test]
    fn test_iteration_in_slot_order() {
        let mut arena = EntityArena::new();
        let ids: Vec<EntityId> = (0..4).map(|x| arena.insert(zombie(x))).collect();
        arena.remove(ids[1]);
        assert_eq!(arena.ids(), vec![ids[0], ids[2], ids[3]]);
        assert_eq!(arena.iter_mut().count(), 3);
    }
}
