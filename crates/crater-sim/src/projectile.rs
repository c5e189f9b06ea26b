use crater_core::config::EntityTuning;
use crater_core::direction::Facing;
use crater_core::types::{Aabb, Timestamp};
use crater_terrain::Terrain;
use glam::Vec2;

/// Lifecycle of a projectile. There is no way back from `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Alive,
    Dead,
}

/// A bullet travelling horizontally until it strikes fresh terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub state: ProjectileState,
    half_width: f32,
    height: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, tuning: &EntityTuning) -> Self {
        Self {
            pos,
            vel,
            state: ProjectileState::Alive,
            half_width: tuning.projectile_half_width,
            height: tuning.projectile_height,
        }
    }

    /// Launch from `origin` in the facing direction at the configured speed.
    pub fn fire(origin: Vec2, facing: Facing, tuning: &EntityTuning) -> Self {
        let vel = Vec2::new(facing.signum_f32() * tuning.projectile_speed, 0.0);
        Self::new(origin, vel, tuning)
    }

    pub fn is_alive(&self) -> bool {
        self.state == ProjectileState::Alive
    }

    pub fn kill(&mut self) {
        self.state = ProjectileState::Dead;
    }

    /// One tick of flight.
    ///
    /// The segment from the current cell to the next is traced through the
    /// terrain. A hit, or a segment that leaves the grid, ends the flight
    /// where it is; otherwise the projectile advances by its velocity.
    pub fn update(&mut self, terrain: &mut Terrain, now: Timestamp) {
        if !self.is_alive() {
            return;
        }
        if self.pos.x < 0.0 || self.pos.x >= terrain.width() as f32 {
            self.kill();
            return;
        }

        let start = self.pos.floor().as_ivec2();
        let end = (self.pos + self.vel).floor().as_ivec2();
        match terrain.apply_line_damage(start, end, now) {
            Ok(damage) if damage.is_hit() => self.kill(),
            Ok(_) => self.pos += self.vel,
            Err(e) => {
                log::trace!("projectile at {:?} left the terrain: {}", self.pos, e);
                self.kill();
            }
        }
    }

    /// Sprite box: `half_width` either side of x, `height` below y.
    pub fn bbox(&self) -> Aabb {
        Aabb::new(
            self.pos.x - self.half_width,
            self.pos.y - self.height,
            self.pos.x + self.half_width,
            self.pos.y,
        )
    }
}
