//! Deterministic terrain and simulation builders shared by the unit tests.

use crater_core::config::CraterConfig;
use crater_core::constants::ALPHA_SOLID;
use crater_terrain::{PixelGrid, Terrain};
use glam::IVec2;

use crate::Simulation;

pub const DIRT: [u8; 4] = [96, 72, 40, ALPHA_SOLID];

pub fn empty_terrain(width: u32, height: u32) -> Terrain {
    let grid = PixelGrid::new(width, height).expect("valid dims");
    Terrain::initialize(grid, &CraterConfig::default())
}

pub fn solid_terrain(width: u32, height: u32) -> Terrain {
    let grid = PixelGrid::filled(width, height, DIRT).expect("valid dims");
    Terrain::initialize(grid, &CraterConfig::default())
}

/// Rows `0..floor` solid, everything above empty.
pub fn floor_grid(width: u32, height: u32, floor: i32) -> PixelGrid {
    PixelGrid::from_fn(width, height, |pos: IVec2| {
        if pos.y < floor {
            DIRT
        } else {
            [0; 4]
        }
    })
    .expect("valid dims")
}

pub fn terrain_with_floor(width: u32, height: u32, floor: i32) -> Terrain {
    Terrain::initialize(floor_grid(width, height, floor), &CraterConfig::default())
}

/// Three-pixel-thick full-height wall starting at column `x`.
pub fn terrain_with_wall(width: u32, height: u32, x: i32) -> Terrain {
    let grid = PixelGrid::from_fn(width, height, |pos: IVec2| {
        if (x..x + 3).contains(&pos.x) {
            DIRT
        } else {
            [0; 4]
        }
    })
    .expect("valid dims");
    Terrain::initialize(grid, &CraterConfig::default())
}

/// 200x100 simulation with a flat floor at row 20.
pub fn flat_simulation() -> Simulation {
    Simulation::new(floor_grid(200, 100, 20), CraterConfig::default())
}
