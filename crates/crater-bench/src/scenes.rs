use crater_core::constants::ALPHA_SOLID;
use crater_terrain::{PixelGrid, TerrainError};
use glam::IVec2;

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub players: u32,
    pub zombies: u32,
    /// Each player fires every this many ticks.
    pub fire_interval: u32,
    /// Each player throws ordnance every this many ticks. Zero disables.
    pub throw_interval: u32,
    /// Throw charge in milliseconds.
    pub throw_charge_ms: u64,
}

/// Return the standard suite of benchmark scenes, smallest first.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "skirmish",
            width: 320,
            height: 240,
            players: 1,
            zombies: 8,
            fire_interval: 4,
            throw_interval: 30,
            throw_charge_ms: 80,
        },
        SceneConfig {
            name: "battlefield",
            width: 640,
            height: 480,
            players: 4,
            zombies: 64,
            fire_interval: 2,
            throw_interval: 20,
            throw_charge_ms: 120,
        },
        SceneConfig {
            name: "horde",
            width: 1280,
            height: 720,
            players: 8,
            zombies: 512,
            fire_interval: 1,
            throw_interval: 10,
            throw_charge_ms: 150,
        },
        SceneConfig {
            name: "bombardment",
            width: 1280,
            height: 720,
            players: 16,
            zombies: 32,
            fire_interval: 8,
            throw_interval: 3,
            throw_charge_ms: 100,
        },
    ]
}

/// Surface row at column `x`: a few summed sine hills in the lower half.
pub fn surface_height(x: i32, width: u32, height: u32) -> i32 {
    let u = x as f32 / width.max(1) as f32 * std::f32::consts::TAU;
    let base = height as f32 * 0.35;
    let hills = (u * 2.0).sin() * 0.08 + (u * 5.0 + 1.3).sin() * 0.04 + (u * 11.0).sin() * 0.01;
    (base + hills * height as f32).round() as i32
}

/// Procedural hills. Colour varies with depth so scorched pixels stand out.
pub fn generate_terrain(config: &SceneConfig) -> Result<PixelGrid, TerrainError> {
    let (width, height) = (config.width, config.height);
    PixelGrid::from_fn(width, height, |pos: IVec2| {
        let surface = surface_height(pos.x, width, height);
        if pos.y >= surface {
            return [0; 4];
        }
        let depth = (surface - pos.y).min(60) as u8;
        [110 - depth, 80 - depth / 2, 50, ALPHA_SOLID]
    })
}

/// Evenly spaced spawn columns across the middle `span` of the grid.
pub fn spawn_columns(count: u32, width: u32, span: (f32, f32)) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    let (lo, hi) = span;
    let left = width as f32 * lo;
    let step = width as f32 * (hi - lo) / count as f32;
    (0..count)
        .map(|i| (left + step * (i as f32 + 0.5)) as i32)
        .collect()
}
