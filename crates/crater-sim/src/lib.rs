pub mod actor;
pub mod arena;
pub mod collision;
pub mod entity;
pub mod ordnance;
pub mod projectile;

#[cfg(test)]
mod test_harness;

use std::collections::BTreeSet;

use crater_core::config::CraterConfig;
use crater_core::direction::Facing;
use crater_core::types::{Aabb, PixelCoord, Timestamp};
use crater_terrain::{DecayStats, PixelGrid, Terrain};

use actor::{Actor, ActorKind};
use arena::{EntityArena, EntityId};
use entity::Entity;
use ordnance::{Detonation, Ordnance};
use projectile::Projectile;

/// Something gameplay code may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ZombieShot {
        zombie: EntityId,
        projectile: EntityId,
    },
    /// A zombie's box met a growing blast.
    ZombieBlasted {
        zombie: EntityId,
        ordnance: EntityId,
    },
    PlayerCaught {
        player: EntityId,
        zombie: EntityId,
    },
}

/// Everything that happened during one [`Simulation::tick`].
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<GameEvent>,
    pub decay: DecayStats,
    pub detonations: Vec<(EntityId, Detonation)>,
    /// Entities dropped by this tick's compaction.
    pub retired: usize,
    /// The grid changed shape; display copies must be rebuilt.
    pub needs_rebuild: bool,
}

/// Primary public struct for the crater-sim crate.
/// Owns the terrain and every entity moving over it.
pub struct Simulation {
    terrain: Terrain,
    entities: EntityArena,
    config: CraterConfig,
    tick_count: u64,
}

impl Simulation {
    pub fn new(grid: PixelGrid, config: CraterConfig) -> Self {
        let terrain = Terrain::initialize(grid, &config);
        Self {
            terrain,
            entities: EntityArena::new(),
            config,
            tick_count: 0,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut Terrain {
        &mut self.terrain
    }

    pub fn entities(&self) -> &EntityArena {
        &self.entities
    }

    pub fn config(&self) -> &CraterConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.entities.insert(entity)
    }

    pub fn spawn_player(&mut self, pos: PixelCoord) -> EntityId {
        self.spawn_actor(ActorKind::Player, pos, Facing::Right)
    }

    pub fn spawn_zombie(&mut self, pos: PixelCoord) -> EntityId {
        self.spawn_actor(ActorKind::Zombie, pos, Facing::Left)
    }

    fn spawn_actor(&mut self, kind: ActorKind, pos: PixelCoord, facing: Facing) -> EntityId {
        let actor = Actor::new(kind, pos, facing, &self.config.entities);
        let id = self.entities.insert(Entity::Actor(actor));
        log::debug!("spawned {:?} {:?} at {:?}", kind, id, pos);
        id
    }

    fn live_actor(&self, id: EntityId) -> Option<&Actor> {
        self.entities
            .get(id)
            .and_then(Entity::as_actor)
            .filter(|actor| actor.is_alive())
    }

    /// Fire a bullet from `shooter`'s muzzle. `None` if the shooter is not a
    /// live actor.
    pub fn fire(&mut self, shooter: EntityId) -> Option<EntityId> {
        let actor = self.live_actor(shooter)?;
        let bullet = Projectile::fire(actor.muzzle(), actor.facing, &self.config.entities);
        Some(self.entities.insert(Entity::Projectile(bullet)))
    }

    /// Throw ordnance charged for `charge_ms` from `shooter`'s hand.
    pub fn throw(&mut self, shooter: EntityId, charge_ms: u64) -> Option<EntityId> {
        let actor = self.live_actor(shooter)?;
        let nade = Ordnance::throw(actor.hand(), actor.facing, charge_ms, &self.config.entities);
        Some(self.entities.insert(Entity::Ordnance(nade)))
    }

    /// Step a live actor one pixel sideways. Returns whether it moved.
    pub fn walk(&mut self, id: EntityId, facing: Facing) -> bool {
        let width = self.terrain.width();
        match self.entities.get_mut(id).and_then(Entity::as_actor_mut) {
            Some(actor) if actor.is_alive() => {
                actor.walk(facing, width);
                true
            }
            _ => false,
        }
    }

    pub fn jump(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(id).and_then(Entity::as_actor_mut) {
            Some(actor) if actor.is_alive() => {
                actor.jump();
                true
            }
            _ => false,
        }
    }

    /// Advance the world to `now`.
    ///
    /// Order is fixed: entity updates (which damage terrain), heat decay,
    /// box collision, kills, compaction. Decay runs exactly once.
    pub fn tick(&mut self, now: Timestamp) -> TickReport {
        self.tick_count += 1;
        let mut report = TickReport {
            tick: self.tick_count,
            ..Default::default()
        };

        report.detonations = self.update_entities(now);
        report.decay = self.terrain.tick(now);

        let kills = self.resolve_collisions(&report.detonations, &mut report.events);
        for id in &kills {
            if let Some(entity) = self.entities.get_mut(*id) {
                entity.retire();
            }
        }

        report.retired = self.entities.compact().len();
        report.needs_rebuild = self.terrain.needs_rebuild();

        for event in &report.events {
            log::debug!("tick {}: {:?}", self.tick_count, event);
        }
        report
    }

    fn update_entities(&mut self, now: Timestamp) -> Vec<(EntityId, Detonation)> {
        let player_xs: Vec<i32> = self
            .entities
            .iter()
            .filter_map(|(_, e)| e.as_actor())
            .filter(|a| a.is_player() && a.is_alive())
            .map(|a| a.pos.x)
            .collect();
        let width = self.terrain.width();
        let terrain = &mut self.terrain;

        let mut detonations = Vec::new();
        for (id, entity) in self.entities.iter_mut() {
            match entity {
                Entity::Projectile(bullet) => bullet.update(terrain, now),
                Entity::Ordnance(nade) => {
                    if let Some(detonation) = nade.update(terrain) {
                        detonations.push((id, detonation));
                    }
                }
                Entity::Actor(actor) => {
                    if !actor.is_alive() {
                        continue;
                    }
                    if actor.is_zombie() {
                        let x = actor.pos.x;
                        let nearest = player_xs.iter().min_by_key(|&&px| ((px - x).abs(), px));
                        if let Some(&target) = nearest {
                            actor.shamble_toward(target, width);
                        }
                    }
                    actor.update(terrain);
                }
            }
        }
        detonations
    }

    /// Broad-phase tests between entity groups. Returns every entity that
    /// dies as a result; nothing is mutated here.
    fn resolve_collisions(
        &self,
        detonations: &[(EntityId, Detonation)],
        events: &mut Vec<GameEvent>,
    ) -> BTreeSet<EntityId> {
        let mut zombies: Vec<(EntityId, Aabb)> = Vec::new();
        let mut players: Vec<(EntityId, Aabb)> = Vec::new();
        let mut bullets: Vec<(EntityId, Aabb)> = Vec::new();
        let mut blasts: Vec<(EntityId, Aabb)> = Vec::new();

        for (id, entity) in self.entities.iter() {
            if entity.is_retired() {
                continue;
            }
            match entity {
                Entity::Actor(a) if a.is_zombie() => zombies.push((id, a.bbox())),
                Entity::Actor(a) => players.push((id, a.bbox())),
                Entity::Projectile(p) => bullets.push((id, p.bbox())),
                Entity::Ordnance(o) if o.is_exploding() => blasts.push((id, o.bbox())),
                Entity::Ordnance(_) => {}
            }
        }
        blasts.extend(detonations.iter().map(|(id, d)| (*id, d.bbox())));

        let zombie_boxes = boxes_of(&zombies);

        let mut kills = BTreeSet::new();

        for (zi, bi) in collision::intersect_sets(&zombie_boxes, &boxes_of(&bullets)) {
            let (zombie, projectile) = (zombies[zi].0, bullets[bi].0);
            kills.insert(projectile);
            if kills.insert(zombie) {
                events.push(GameEvent::ZombieShot { zombie, projectile });
            }
        }

        for (zi, oi) in collision::intersect_sets(&zombie_boxes, &boxes_of(&blasts)) {
            let (zombie, ordnance) = (zombies[zi].0, blasts[oi].0);
            if kills.insert(zombie) {
                events.push(GameEvent::ZombieBlasted { zombie, ordnance });
            }
        }

        for (pi, zi) in collision::intersect_sets(&boxes_of(&players), &zombie_boxes) {
            let (player, zombie) = (players[pi].0, zombies[zi].0);
            if kills.contains(&zombie) {
                continue;
            }
            if kills.insert(player) {
                events.push(GameEvent::PlayerCaught { player, zombie });
            }
        }

        kills
    }

    pub fn needs_rebuild(&self) -> bool {
        self.terrain.needs_rebuild()
    }

    pub fn clear_rebuild(&mut self) {
        self.terrain.clear_rebuild();
    }

    /// Live (players, zombies, projectiles, ordnance).
    pub fn population(&self) -> (usize, usize, usize, usize) {
        let mut counts = (0, 0, 0, 0);
        for (_, entity) in self.entities.iter() {
            match entity {
                Entity::Actor(a) if a.is_player() => counts.0 += 1,
                Entity::Actor(_) => counts.1 += 1,
                Entity::Projectile(_) => counts.2 += 1,
                Entity::Ordnance(_) => counts.3 += 1,
            }
        }
        counts
    }
}

fn boxes_of(group: &[(EntityId, Aabb)]) -> Vec<Aabb> {
    group.iter().map(|(_, b)| *b).collect()
}
