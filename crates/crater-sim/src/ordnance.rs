use crater_core::config::EntityTuning;
use crater_core::direction::Facing;
use crater_core::types::{Aabb, PixelCoord};
use crater_terrain::{CarveStats, Terrain};
use glam::Vec2;

/// Lifecycle of a thrown charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrdnancePhase {
    #[default]
    Flying,
    /// Touched solid terrain this tick; starts growing next tick.
    Triggered,
    /// Blast radius growing by one pixel per tick.
    Exploding,
    Retired,
}

/// A crater carved by ordnance reaching its full blast radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detonation {
    pub center: PixelCoord,
    pub radius: i32,
    pub stats: CarveStats,
}

impl Detonation {
    pub fn bbox(&self) -> Aabb {
        let r = self.radius as f32;
        Aabb::from_center_half(self.center.as_vec2(), Vec2::splat(r))
    }
}

/// Ballistic explosive.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordnance {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: i32,
    pub phase: OrdnancePhase,
    gravity: f32,
    threshold: i32,
}

impl Ordnance {
    pub fn new(pos: Vec2, vel: Vec2, tuning: &EntityTuning) -> Self {
        Self {
            pos,
            vel,
            radius: tuning.ordnance_flight_radius,
            phase: OrdnancePhase::Flying,
            gravity: tuning.ordnance_gravity,
            threshold: tuning.explosion_radius_threshold,
        }
    }

    /// Throw from `origin` with power proportional to how long the throw was
    /// charged, capped at the configured maximum.
    pub fn throw(origin: Vec2, facing: Facing, charge_ms: u64, tuning: &EntityTuning) -> Self {
        let power = throw_power(charge_ms, tuning);
        let vel = Vec2::new(facing.signum_f32() * power, 2.0 * power);
        Self::new(origin, vel, tuning)
    }

    pub fn is_retired(&self) -> bool {
        self.phase == OrdnancePhase::Retired
    }

    pub fn is_exploding(&self) -> bool {
        self.phase == OrdnancePhase::Exploding
    }

    pub fn center(&self) -> PixelCoord {
        self.pos.floor().as_ivec2()
    }

    /// One tick of flight or blast growth.
    ///
    /// Returns the crater when the blast resolves this tick. Area damage is
    /// applied at most once per ordnance.
    pub fn update(&mut self, terrain: &mut Terrain) -> Option<Detonation> {
        match self.phase {
            OrdnancePhase::Retired => None,
            OrdnancePhase::Flying => {
                self.fly(terrain);
                None
            }
            OrdnancePhase::Triggered | OrdnancePhase::Exploding => {
                self.phase = OrdnancePhase::Exploding;
                self.radius += 1;
                if self.radius > self.threshold {
                    self.detonate(terrain)
                } else {
                    None
                }
            }
        }
    }

    fn fly(&mut self, terrain: &Terrain) {
        if self.pos.x < 0.0 || self.pos.x >= terrain.width() as f32 || self.pos.y < 0.0 {
            log::trace!("ordnance left the terrain at {:?}", self.pos);
            self.phase = OrdnancePhase::Retired;
            return;
        }

        // Above the top row counts as open air.
        let center = self.center();
        let solid = terrain.in_bounds(center) && terrain.is_solid(center).unwrap_or(false);
        if solid {
            self.phase = OrdnancePhase::Triggered;
        } else {
            self.pos += self.vel;
            self.vel.y -= self.gravity;
        }
    }

    fn detonate(&mut self, terrain: &mut Terrain) -> Option<Detonation> {
        let center = self.center();
        let radius = self.radius;
        self.radius = 0;
        self.phase = OrdnancePhase::Retired;

        match terrain.apply_area_damage(center, radius) {
            Ok(stats) => Some(Detonation {
                center,
                radius,
                stats,
            }),
            Err(e) => {
                log::warn!("ordnance at {:?} failed to detonate: {}", center, e);
                None
            }
        }
    }

    /// Box of the current radius around the centre.
    pub fn bbox(&self) -> Aabb {
        let r = self.radius as f32;
        Aabb::from_center_half(self.pos, Vec2::splat(r))
    }
}

/// Launch power for a throw charged for `charge_ms`.
pub fn throw_power(charge_ms: u64, tuning: &EntityTuning) -> f32 {
    (charge_ms as f32 / tuning.ordnance_charge_ms_per_power).min(tuning.ordnance_max_power)
}
