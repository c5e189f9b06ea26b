use crater_core::config::EntityTuning;
use crater_core::direction::Facing;
use crater_core::types::{Aabb, PixelCoord};
use crater_terrain::Terrain;
use glam::{IVec2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Zombie,
}

/// A walking sprite anchored at its lower-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub kind: ActorKind,
    pub pos: PixelCoord,
    pub size: IVec2,
    pub facing: Facing,
    alive: bool,
    jump_height: i32,
}

/// Solid test that treats everything off-grid as open air.
fn solid_at(terrain: &Terrain, pos: PixelCoord) -> bool {
    terrain.in_bounds(pos) && terrain.is_solid(pos).unwrap_or(false)
}

impl Actor {
    pub fn new(kind: ActorKind, pos: PixelCoord, facing: Facing, tuning: &EntityTuning) -> Self {
        Self {
            kind,
            pos,
            size: IVec2::from_array(tuning.actor_size),
            facing,
            alive: true,
            jump_height: tuning.actor_jump_height,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    pub fn is_zombie(&self) -> bool {
        self.kind == ActorKind::Zombie
    }

    /// Settle one pixel against the terrain.
    ///
    /// Feet buried with more ground above climb a pixel; feet in open air
    /// drop a pixel. Dropping below row 0 is fatal.
    pub fn update(&mut self, terrain: &Terrain) {
        if !self.alive {
            return;
        }

        if self.pos.y < terrain.height() as i32 {
            if solid_at(terrain, self.pos) {
                if solid_at(terrain, self.pos + IVec2::Y) {
                    self.pos.y += 1;
                }
            } else {
                self.pos.y -= 1;
            }
        } else {
            self.pos.y -= 1;
        }

        if self.pos.y < 0 {
            log::debug!("{:?} fell out of the world at x={}", self.kind, self.pos.x);
            self.kill();
        }
    }

    /// Step one pixel sideways, staying within `0..width`.
    pub fn walk(&mut self, facing: Facing, width: u32) {
        self.facing = facing;
        let max_x = (width as i32 - 1).max(0);
        self.pos.x = (self.pos.x + facing.sign()).clamp(0, max_x);
    }

    pub fn jump(&mut self) {
        self.pos.y += self.jump_height;
    }

    /// Step toward `target_x`, or stand still when already level with it.
    pub fn shamble_toward(&mut self, target_x: i32, width: u32) {
        match target_x.cmp(&self.pos.x) {
            std::cmp::Ordering::Greater => self.walk(Facing::Right, width),
            std::cmp::Ordering::Less => self.walk(Facing::Left, width),
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Where bullets leave the sprite: half way up its left edge.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x as f32, (self.pos.y + self.size.y / 2) as f32)
    }

    /// Where thrown ordnance leaves the sprite: top of its left edge.
    pub fn hand(&self) -> Vec2 {
        Vec2::new(self.pos.x as f32, (self.pos.y + self.size.y) as f32)
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::from_origin_size(self.pos.as_vec2(), self.size.as_vec2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{empty_terrain, terrain_with_floor};

    fn player_at(x: i32, y: i32) -> Actor {
        Actor::new(
            ActorKind::Player,
            IVec2::new(x, y),
            Facing::Right,
            &EntityTuning::default(),
        )
    }

    #[test]
    fn test_falls_through_open_air_and_dies() {
        let terrain = empty_terrain(20, 20);
        let mut actor = player_at(5, 2);
        actor.update(&terrain);
        assert_eq!(actor.pos.y, 1);
        actor.update(&terrain);
        actor.update(&terrain);
        assert_eq!(actor.pos.y, -1);
        assert!(!actor.is_alive());
    }

    #[test]
    fn test_rests_on_surface() {
        // Rows 0..10 solid: the surface pixel is y = 9.
        let terrain = terrain_with_floor(20, 20, 10);
        let mut actor = player_at(5, 12);
        for _ in 0..10 {
            actor.update(&terrain);
        }
        assert_eq!(actor.pos.y, 9);
        assert!(actor.is_alive());
    }

    #[test]
    fn test_climbs_out_when_buried() {
        let terrain = terrain_with_floor(20, 20, 10);
        let mut actor = player_at(5, 4);
        actor.update(&terrain);
        assert_eq!(actor.pos.y, 5);
        for _ in 0..10 {
            actor.update(&terrain);
        }
        assert_eq!(actor.pos.y, 9);
    }

    #[test]
    fn test_above_grid_descends() {
        let terrain = terrain_with_floor(20, 20, 10);
        let mut actor = player_at(5, 25);
        actor.update(&terrain);
        assert_eq!(actor.pos.y, 24);
    }

    #[test]
    fn test_walk_clamps_to_grid_and_sets_facing() {
        let mut actor = player_at(0, 5);
        actor.walk(Facing::Left, 10);
        assert_eq!(actor.pos.x, 0);
        assert_eq!(actor.facing, Facing::Left);

        let mut actor = player_at(9, 5);
        actor.walk(Facing::Right, 10);
        assert_eq!(actor.pos.x, 9);
        actor.walk(Facing::Left, 10);
        assert_eq!(actor.pos.x, 8);
    }

    #[test]
    fn test_jump_and_shamble() {
        let mut zombie = Actor::new(
            ActorKind::Zombie,
            IVec2::new(10, 5),
            Facing::Left,
            &EntityTuning::default(),
        );
        zombie.jump();
        assert_eq!(zombie.pos.y, 5 + EntityTuning::default().actor_jump_height);

        zombie.shamble_toward(3, 40);
        assert_eq!(zombie.pos.x, 9);
        zombie.shamble_toward(30, 40);
        assert_eq!(zombie.pos.x, 10);
        assert_eq!(zombie.facing, Facing::Right);
        zombie.shamble_toward(10, 40);
        assert_eq!(zombie.pos.x, 10);
    }

    #[test]
    fn test_launch_points_and_bbox() {
        let actor = player_at(4, 6);
        assert_eq!(actor.bbox(), Aabb::new(4.0, 6.0, 12.0, 22.0));
        assert_eq!(actor.muzzle(), Vec2::new(4.0, 14.0));
        assert_eq!(actor.hand(), Vec2::new(4.0, 22.0));
    }
}
