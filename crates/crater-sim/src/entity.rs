use crater_core::types::Aabb;
use glam::Vec2;

use crate::actor::Actor;
use crate::ordnance::Ordnance;
use crate::projectile::Projectile;

/// Anything that moves over the terrain.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Projectile(Projectile),
    Ordnance(Ordnance),
    Actor(Actor),
}

impl Entity {
    pub fn bbox(&self) -> Aabb {
        match self {
            Entity::Projectile(p) => p.bbox(),
            Entity::Ordnance(o) => o.bbox(),
            Entity::Actor(a) => a.bbox(),
        }
    }

    /// Finished entities are dropped by the next compaction.
    pub fn is_retired(&self) -> bool {
        match self {
            Entity::Projectile(p) => !p.is_alive(),
            Entity::Ordnance(o) => o.is_retired(),
            Entity::Actor(a) => !a.is_alive(),
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Entity::Projectile(p) => p.pos,
            Entity::Ordnance(o) => o.pos,
            Entity::Actor(a) => a.pos.as_vec2(),
        }
    }

    /// Mark the entity finished.
    pub fn retire(&mut self) {
        match self {
            Entity::Projectile(p) => p.kill(),
            Entity::Ordnance(o) => o.phase = crate::ordnance::OrdnancePhase::Retired,
            Entity::Actor(a) => a.kill(),
        }
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match self {
            Entity::Actor(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match self {
            Entity::Actor(a) => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;
    use crater_core::config::EntityTuning;
    use crater_core::direction::Facing;
    use glam::IVec2;

    #[test]
    fn test_dispatch_matches_variant() {
        let tuning = EntityTuning::default();
        let bullet = Projectile::fire(Vec2::new(3.0, 3.0), Facing::Right, &tuning);
        let nade = Ordnance::throw(Vec2::new(3.0, 3.0), Facing::Right, 100, &tuning);
        let actor = Actor::new(ActorKind::Player, IVec2::new(3, 3), Facing::Right, &tuning);

        let entities = [
            Entity::Projectile(bullet.clone()),
            Entity::Ordnance(nade.clone()),
            Entity::Actor(actor.clone()),
        ];
        assert_eq!(entities[0].bbox(), bullet.bbox());
        assert_eq!(entities[1].bbox(), nade.bbox());
        assert_eq!(entities[2].bbox(), actor.bbox());
        assert!(entities.iter().all(|e| e.position() == Vec2::new(3.0, 3.0)));
        assert!(entities.iter().all(|e| !e.is_retired()));
        assert!(entities[2].as_actor().is_some());
        assert!(entities[0].as_actor().is_none());
    }

    #[test]
    fn test_retire_every_variant() {
        let tuning = EntityTuning::default();
        let mut entities = [
            Entity::Projectile(Projectile::fire(Vec2::ZERO, Facing::Left, &tuning)),
            Entity::Ordnance(Ordnance::throw(Vec2::ZERO, Facing::Left, 10, &tuning)),
            Entity::Actor(Actor::new(ActorKind::Zombie, IVec2::ZERO, Facing::Left, &tuning)),
        ];
        for entity in &mut entities {
            entity.retire();
            assert!(entity.is_retired());
        }
    }
}
