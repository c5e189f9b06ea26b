use crater_core::config::CraterConfig;
use crater_core::types::{PixelCoord, Timestamp};

use crate::damage::{self, LineDamage};
use crate::decay::{DecayStats, HeatDecayQueue};
use crate::error::TerrainError;
use crate::grid::{CarveStats, PixelGrid};

/// The destructible terrain: pixel grid plus pending heat decay.
///
/// This is the single exclusive owner of the grid during a tick. All
/// mutation goes through `&mut Terrain`.
#[derive(Debug, Clone)]
pub struct Terrain {
    grid: PixelGrid,
    decay: HeatDecayQueue,
    last_tick: Option<Timestamp>,
}

impl Terrain {
    /// Bind the core to a decoded pixel buffer.
    pub fn initialize(grid: PixelGrid, config: &CraterConfig) -> Self {
        let palette = config.palette;
        let decay = HeatDecayQueue::with_settings(
            config.decay_duration_ms(),
            palette.scorch,
            palette.coolant,
        );
        log::info!(
            "terrain initialized: {}x{}, {} solid pixels",
            grid.width(),
            grid.height(),
            grid.solid_count()
        );
        Self {
            grid: grid.with_palette(palette),
            decay,
            last_tick: None,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    pub fn decay_queue(&self) -> &HeatDecayQueue {
        &self.decay
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn in_bounds(&self, pos: PixelCoord) -> bool {
        self.grid.in_bounds(pos)
    }

    pub fn is_solid(&self, pos: PixelCoord) -> Result<bool, TerrainError> {
        self.grid.is_solid(pos)
    }

    pub fn is_hot(&self, pos: PixelCoord) -> Result<bool, TerrainError> {
        self.grid.is_hot(pos)
    }

    /// Projectile path damage. See [`damage::apply_line_damage`].
    pub fn apply_line_damage(
        &mut self,
        start: PixelCoord,
        end: PixelCoord,
        now: Timestamp,
    ) -> Result<LineDamage, TerrainError> {
        damage::apply_line_damage(&mut self.grid, &mut self.decay, start, end, now)
    }

    /// Explosion crater. See [`damage::apply_area_damage`].
    pub fn apply_area_damage(
        &mut self,
        center: PixelCoord,
        radius: i32,
    ) -> Result<CarveStats, TerrainError> {
        damage::apply_area_damage(&mut self.grid, center, radius)
    }

    /// Advance heat decay to `now`. Call exactly once per tick.
    pub fn tick(&mut self, now: Timestamp) -> DecayStats {
        if let Some(last) = self.last_tick {
            if now < last {
                log::warn!(
                    "terrain clock went backwards ({} -> {} ms)",
                    last.as_millis(),
                    now.as_millis()
                );
            }
        }
        self.last_tick = Some(now);
        self.decay.tick(&mut self.grid, now)
    }

    /// Whether a display-side copy of the grid must be re-derived.
    pub fn needs_rebuild(&self) -> bool {
        self.grid.needs_rebuild()
    }

    /// Acknowledge a rebuild. Call once per tick after re-deriving.
    pub fn clear_rebuild(&mut self) {
        self.grid.clear_rebuild();
    }

    /// Swap in freshly decoded terrain. Pending decay records refer to the
    /// old pixels and are discarded.
    pub fn replace_grid(&mut self, grid: PixelGrid) -> PixelGrid {
        let palette = *self.grid.palette();
        let dropped = self.decay.len();
        self.decay.clear();
        let mut grid = grid.with_palette(palette);
        grid.mark_rebuild();
        if dropped > 0 {
            log::debug!("terrain replaced, {} decay records dropped", dropped);
        }
        std::mem::replace(&mut self.grid, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crater_core::constants::ALPHA_SOLID;
    use crater_core::types::Rgb;
    use glam::IVec2;

    fn solid_terrain(config: &CraterConfig) -> Terrain {
        let grid = PixelGrid::filled(50, 50, [70, 70, 70, ALPHA_SOLID]).expect("valid dims");
        Terrain::initialize(grid, config)
    }

    #[test]
    fn test_initialize_applies_palette() {
        let mut config = CraterConfig::default();
        config.palette.scorch = Rgb::new(1, 2, 3);
        let mut terrain = solid_terrain(&config);
        let hit = terrain
            .apply_line_damage(IVec2::new(10, 10), IVec2::new(20, 10), Timestamp(0))
            .expect("in bounds");
        assert!(hit.is_hit());
        assert_eq!(terrain.grid().rgb(IVec2::new(10, 10)), Ok(Rgb::new(1, 2, 3)));
        assert_eq!(terrain.is_hot(IVec2::new(10, 10)), Ok(true));
    }

    #[test]
    fn test_scorched_pixel_destroyed_after_decay_duration() {
        let mut config = CraterConfig::default();
        config.heat_decay_ms.0 = 200;
        let mut terrain = solid_terrain(&config);
        let p = IVec2::new(30, 30);
        terrain
            .apply_line_damage(p, IVec2::new(40, 30), Timestamp(1000))
            .expect("in bounds");

        terrain.tick(Timestamp(1100));
        assert_eq!(terrain.is_solid(p), Ok(true));
        assert_eq!(terrain.is_hot(p), Ok(false));

        let stats = terrain.tick(Timestamp(1200));
        assert_eq!(stats.cleared, 9);
        assert_eq!(terrain.is_solid(p), Ok(false));
        assert!(terrain.decay_queue().is_empty());
    }

    #[test]
    fn test_repeat_shot_after_tick_bores_through_cooling_halo() {
        let mut terrain = solid_terrain(&CraterConfig::default());
        let start = IVec2::new(10, 10);
        let end = IVec2::new(40, 10);
        terrain.apply_line_damage(start, end, Timestamp(0)).expect("in bounds");
        terrain.tick(Timestamp(16));

        let second = terrain
            .apply_line_damage(start, end, Timestamp(16))
            .expect("in bounds");
        assert_eq!(second.hit, Some(IVec2::new(12, 10)));
        let records_at_start = terrain
            .decay_queue()
            .iter()
            .filter(|e| e.pos == start)
            .count();
        assert_eq!(records_at_start, 1);
    }

    #[test]
    fn test_rebuild_flag_roundtrip() {
        let mut terrain = solid_terrain(&CraterConfig::default());
        assert!(!terrain.needs_rebuild());
        terrain
            .apply_area_damage(IVec2::new(25, 25), 4)
            .expect("valid radius");
        assert!(terrain.needs_rebuild());
        terrain.clear_rebuild();
        assert!(!terrain.needs_rebuild());
    }

    #[test]
    fn test_replace_grid_drops_pending_decay() {
        let mut terrain = solid_terrain(&CraterConfig::default());
        terrain
            .apply_line_damage(IVec2::new(5, 5), IVec2::new(9, 5), Timestamp(0))
            .expect("in bounds");
        assert!(!terrain.decay_queue().is_empty());

        let fresh = PixelGrid::filled(50, 50, [9, 9, 9, ALPHA_SOLID]).expect("valid dims");
        let old = terrain.replace_grid(fresh);
        assert_eq!(old.is_hot(IVec2::new(5, 5)), Ok(true));
        assert!(terrain.decay_queue().is_empty());
        assert!(terrain.needs_rebuild());
        assert_eq!(terrain.is_hot(IVec2::new(5, 5)), Ok(false));
    }
}
