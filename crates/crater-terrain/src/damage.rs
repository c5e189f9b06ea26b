//! Projectile and explosion damage against the pixel grid.

use std::ops::ControlFlow;

use crater_core::direction::NEIGHBORS_8;
use crater_core::types::{PixelCoord, Timestamp};

use crate::decay::HeatDecayQueue;
use crate::error::TerrainError;
use crate::grid::{CarveStats, PixelGrid};
use crate::raster::trace_line;

/// Result of tracing a damaging segment through the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineDamage {
    /// First fresh (solid, not hot, not queued) cell on the segment, if any.
    pub hit: Option<PixelCoord>,
    /// Pixels newly scorched by the halo around `hit`.
    pub scorched: u32,
}

impl LineDamage {
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// Solid terrain that has not already been scorched.
///
/// A pixel with a live decay record counts as damaged even once its colour
/// has cooled away from the scorch marker.
fn is_fresh_terrain(
    grid: &PixelGrid,
    queue: &HeatDecayQueue,
    pos: PixelCoord,
) -> Result<bool, TerrainError> {
    Ok(grid.is_solid(pos)? && !grid.is_hot(pos)? && !queue.contains(pos))
}

/// Walk the segment `start..=end` and stop at the first fresh solid cell,
/// scorching it and its 8 neighbours.
///
/// Hot or still-cooling cells are passed through, so a projectile bores
/// through terrain it has already damaged. A segment that leaves the grid before hitting
/// anything fails with `OutOfBounds`; nothing is mutated in that case.
pub fn apply_line_damage(
    grid: &mut PixelGrid,
    queue: &mut HeatDecayQueue,
    start: PixelCoord,
    end: PixelCoord,
    now: Timestamp,
) -> Result<LineDamage, TerrainError> {
    let flow = trace_line(start, end, |pos| match is_fresh_terrain(grid, queue, pos) {
        Ok(true) => ControlFlow::Break(Ok(pos)),
        Ok(false) => ControlFlow::Continue(()),
        Err(e) => ControlFlow::Break(Err(e)),
    });

    let hit = match flow {
        ControlFlow::Break(result) => result?,
        ControlFlow::Continue(()) => return Ok(LineDamage::default()),
    };

    let scorched = scorch_halo(grid, queue, hit, now)?;
    log::debug!(
        "line {:?} -> {:?} hit terrain at {:?}, scorched {}",
        start,
        end,
        hit,
        scorched
    );

    Ok(LineDamage {
        hit: Some(hit),
        scorched,
    })
}

/// Scorch `center` and each of its 8 neighbours exactly once.
///
/// Neighbours that are off-grid, empty, hot or still cooling are left alone
/// so a pixel never carries two decay records from overlapping halos.
pub fn scorch_halo(
    grid: &mut PixelGrid,
    queue: &mut HeatDecayQueue,
    center: PixelCoord,
    now: Timestamp,
) -> Result<u32, TerrainError> {
    grid.mark_scorched(center, now, queue)?;
    let mut scorched = 1;

    for dir in NEIGHBORS_8 {
        let pos = center + dir.offset();
        if !grid.in_bounds(pos) || !is_fresh_terrain(grid, queue, pos)? {
            continue;
        }
        grid.mark_scorched(pos, now, queue)?;
        scorched += 1;
    }

    Ok(scorched)
}

/// Blast a crater of `radius` around `center`: clear the disk and seal it
/// with the ring colour. The carve itself flags the grid for rebuild.
///
/// A non-positive radius is rejected before anything is touched. Decay
/// records inside the crater are pruned on the next decay tick.
pub fn apply_area_damage(
    grid: &mut PixelGrid,
    center: PixelCoord,
    radius: i32,
) -> Result<CarveStats, TerrainError> {
    let stats = grid.carve_disk(center, radius)?;
    log::debug!(
        "crater at {:?} r={}: {} cleared, {} ringed",
        center,
        radius,
        stats.cleared,
        stats.ringed
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crater_core::constants::{ALPHA_SOLID, RING_COLOR, SCORCH_COLOR};
    use crater_core::math::dist_sq;
    use crater_core::types::Rgb;
    use glam::IVec2;

    fn solid_50() -> PixelGrid {
        PixelGrid::filled(50, 50, [80, 60, 40, ALPHA_SOLID]).expect("valid dims")
    }

    #[test]
    fn test_line_through_solid_hits_first_cell() {
        let mut grid = solid_50();
        let mut queue = HeatDecayQueue::new();
        let result = apply_line_damage(
            &mut grid,
            &mut queue,
            IVec2::new(0, 25),
            IVec2::new(49, 25),
            Timestamp(0),
        )
        .expect("in bounds");

        assert!(result.is_hit());
        assert_eq!(result.hit, Some(IVec2::new(0, 25)));
        // Centre plus the 5 in-bounds neighbours of an edge pixel.
        assert_eq!(result.scorched, 6);
        assert_eq!(queue.len(), 6);

        for dy in -1..=1 {
            for dx in 0..=1 {
                let p = IVec2::new(dx, 25 + dy);
                assert_eq!(grid.is_hot(p), Ok(true), "{p:?} should be hot");
            }
        }
        assert_eq!(grid.is_hot(IVec2::new(2, 25)), Ok(false));
    }

    #[test]
    fn test_interior_hit_scorches_full_halo() {
        let mut grid = solid_50();
        let mut queue = HeatDecayQueue::new();
        let result = apply_line_damage(
            &mut grid,
            &mut queue,
            IVec2::new(10, 10),
            IVec2::new(20, 10),
            Timestamp(3),
        )
        .expect("in bounds");
        assert_eq!(result.scorched, 9);
        for dy in -1..=1 {
            for dx in -1..=1 {
                assert_eq!(grid.is_hot(IVec2::new(10 + dx, 10 + dy)), Ok(true));
            }
        }
        assert!(queue.iter().all(|e| e.created_at == Timestamp(3)));
    }

    #[test]
    fn test_empty_grid_misses_and_is_unchanged() {
        let mut grid = PixelGrid::new(50, 50).expect("valid dims");
        let before = grid.as_bytes().to_vec();
        let mut queue = HeatDecayQueue::new();
        for (a, b) in [((0, 0), (49, 49)), ((49, 0), (0, 30)), ((7, 7), (7, 7))] {
            let result = apply_line_damage(
                &mut grid,
                &mut queue,
                IVec2::new(a.0, a.1),
                IVec2::new(b.0, b.1),
                Timestamp(0),
            )
            .expect("in bounds");
            assert!(!result.is_hit());
        }
        assert_eq!(grid.as_bytes(), &before[..]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_hot_terrain_is_penetrated() {
        let mut grid = solid_50();
        let mut queue = HeatDecayQueue::new();
        let start = IVec2::new(5, 5);
        let end = IVec2::new(30, 5);

        let first = apply_line_damage(&mut grid, &mut queue, start, end, Timestamp(0))
            .expect("in bounds");
        assert_eq!(first.hit, Some(IVec2::new(5, 5)));

        // (5,5) and (6,5) are hot now; the next shot stops at (7,5).
        let second = apply_line_damage(&mut grid, &mut queue, start, end, Timestamp(1))
            .expect("in bounds");
        assert_eq!(second.hit, Some(IVec2::new(7, 5)));
    }

    #[test]
    fn test_cooling_terrain_is_penetrated_and_never_requeued() {
        let mut grid = solid_50();
        let mut queue = HeatDecayQueue::new();
        let start = IVec2::new(10, 10);
        let end = IVec2::new(40, 10);

        let first = apply_line_damage(&mut grid, &mut queue, start, end, Timestamp(0))
            .expect("in bounds");
        assert_eq!(first.hit, Some(start));

        // One decay step moves the halo off the scorch colour.
        queue.tick(&mut grid, Timestamp(16));
        assert_eq!(grid.is_hot(start), Ok(false));

        let second = apply_line_damage(&mut grid, &mut queue, start, end, Timestamp(16))
            .expect("in bounds");
        assert_eq!(second.hit, Some(IVec2::new(12, 10)));
        // Column 11 is still queued from the first halo.
        assert_eq!(second.scorched, 6);
        assert_eq!(queue.len(), 15);

        let mut seen = std::collections::HashSet::new();
        assert!(queue.iter().all(|e| seen.insert(e.pos)));
    }

    #[test]
    fn test_halo_skips_empty_and_hot_neighbours() {
        let mut grid = PixelGrid::new(5, 5).expect("valid dims");
        let mut queue = HeatDecayQueue::new();
        grid.set_rgba(IVec2::new(2, 2), [1, 1, 1, ALPHA_SOLID]).expect("in bounds");
        grid.set_rgba(IVec2::new(3, 2), [1, 1, 1, ALPHA_SOLID]).expect("in bounds");
        let hot = Rgb(SCORCH_COLOR).with_alpha(ALPHA_SOLID);
        grid.set_rgba(IVec2::new(1, 2), hot).expect("in bounds");

        let scorched = scorch_halo(&mut grid, &mut queue, IVec2::new(2, 2), Timestamp(0))
            .expect("in bounds");
        assert_eq!(scorched, 2);
        assert_eq!(queue.len(), 2);
        // Empty neighbours keep their colour.
        assert_eq!(grid.rgba(IVec2::new(2, 3)), Ok([0, 0, 0, 0]));
    }

    #[test]
    fn test_line_leaving_grid_is_out_of_bounds() {
        let mut grid = PixelGrid::new(10, 10).expect("valid dims");
        let mut queue = HeatDecayQueue::new();
        let result = apply_line_damage(
            &mut grid,
            &mut queue,
            IVec2::new(8, 4),
            IVec2::new(12, 4),
            Timestamp(0),
        );
        assert_eq!(
            result,
            Err(TerrainError::OutOfBounds {
                x: 10,
                y: 4,
                width: 10,
                height: 10
            })
        );
    }

    #[test]
    fn test_hit_before_leaving_grid_wins() {
        let mut grid = PixelGrid::new(10, 10).expect("valid dims");
        grid.set_rgba(IVec2::new(9, 4), [5, 5, 5, ALPHA_SOLID]).expect("in bounds");
        let mut queue = HeatDecayQueue::new();
        let result = apply_line_damage(
            &mut grid,
            &mut queue,
            IVec2::new(8, 4),
            IVec2::new(12, 4),
            Timestamp(0),
        )
        .expect("hit precedes the edge");
        assert_eq!(result.hit, Some(IVec2::new(9, 4)));
    }

    #[test]
    fn test_area_damage_carves_and_flags_rebuild() {
        let mut grid = solid_50();
        let center = IVec2::new(25, 25);
        let stats = apply_area_damage(&mut grid, center, 5).expect("valid radius");
        assert!(grid.needs_rebuild());
        assert_eq!(stats.cleared as usize, 2500 - grid.solid_count());

        for y in 0..50 {
            for x in 0..50 {
                let p = IVec2::new(x, y);
                let d2 = dist_sq(p, center);
                if d2 <= 25 {
                    assert_eq!(grid.is_solid(p), Ok(false));
                } else if d2 == 36 {
                    assert_eq!(grid.rgb(p), Ok(Rgb(RING_COLOR)));
                    assert_eq!(grid.is_hot(p), Ok(false));
                }
            }
        }
    }

    #[test]
    fn test_area_damage_rejects_bad_radius_without_mutation() {
        let mut grid = solid_50();
        assert_eq!(
            apply_area_damage(&mut grid, IVec2::new(25, 25), 0),
            Err(TerrainError::InvalidRadius(0))
        );
        assert_eq!(
            apply_area_damage(&mut grid, IVec2::new(25, 25), -4),
            Err(TerrainError::InvalidRadius(-4))
        );
        assert_eq!(grid.solid_count(), 2500);
        assert!(!grid.needs_rebuild());
    }

    #[test]
    fn test_area_damage_idempotent() {
        let mut once = solid_50();
        apply_area_damage(&mut once, IVec2::new(10, 40), 7).expect("valid radius");
        let mut twice = once.clone();
        apply_area_damage(&mut twice, IVec2::new(10, 40), 7).expect("valid radius");
        assert_eq!(once.as_bytes(), twice.as_bytes());
    }
}
