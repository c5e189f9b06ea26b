//! Destructible pixel terrain: grid storage, line rasterization, projectile
//! and explosion damage, and timed heat decay of damaged pixels.

pub mod damage;
pub mod decay;
pub mod error;
pub mod grid;
pub mod raster;
pub mod terrain;

pub use damage::LineDamage;
pub use decay::{DecayStats, HeatDecayQueue};
pub use error::TerrainError;
pub use grid::{CarveStats, Channel, PixelGrid};
pub use terrain::Terrain;
