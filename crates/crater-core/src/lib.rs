//! Shared types, constants and configuration for the crater terrain core.

pub mod config;
pub mod constants;
pub mod direction;
pub mod error;
pub mod math;
pub mod types;

pub use config::CraterConfig;
pub use error::ConfigError;
pub use types::{Aabb, PixelCoord, Rgb, Timestamp};
