use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Rgb;

/// Colours the terrain core writes into the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Marker colour of freshly damaged terrain.
    pub scorch: Rgb,
    /// Colour a scorched pixel cools towards.
    pub coolant: Rgb,
    /// Crater edge colour. Must differ from `scorch`.
    pub ring: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            scorch: Rgb(SCORCH_COLOR),
            coolant: Rgb(COOLANT_COLOR),
            ring: Rgb(RING_COLOR),
        }
    }
}

/// Tuning for projectiles, ordnance and actors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityTuning {
    /// Horizontal projectile speed (pixels/tick).
    pub projectile_speed: f32,
    pub projectile_half_width: f32,
    pub projectile_height: f32,
    /// Radius drawn while ordnance flies.
    pub ordnance_flight_radius: i32,
    /// Ordnance resolves once its radius exceeds this.
    pub explosion_radius_threshold: i32,
    /// Per-tick decrease of ordnance vertical velocity.
    pub ordnance_gravity: f32,
    pub ordnance_max_power: f32,
    pub ordnance_charge_ms_per_power: f32,
    /// Actor sprite extent (width, height).
    pub actor_size: [i32; 2],
    pub actor_jump_height: i32,
}

impl Default for EntityTuning {
    fn default() -> Self {
        Self {
            projectile_speed: PROJECTILE_SPEED,
            projectile_half_width: PROJECTILE_HALF_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            ordnance_flight_radius: ORDNANCE_FLIGHT_RADIUS,
            explosion_radius_threshold: EXPLOSION_RADIUS_THRESHOLD,
            ordnance_gravity: ORDNANCE_GRAVITY,
            ordnance_max_power: ORDNANCE_MAX_POWER,
            ordnance_charge_ms_per_power: ORDNANCE_CHARGE_MS_PER_POWER,
            actor_size: ACTOR_SIZE,
            actor_jump_height: ACTOR_JUMP_HEIGHT,
        }
    }
}

/// Runtime configuration for the terrain core and the entity simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CraterConfig {
    pub palette: Palette,
    /// Milliseconds from scorch to destruction.
    pub heat_decay_ms: HeatDecayMs,
    pub entities: EntityTuning,
}

/// Decay duration newtype so the default comes from `HEAT_DECAY_MS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeatDecayMs(pub u64);

impl Default for HeatDecayMs {
    fn default() -> Self {
        Self(HEAT_DECAY_MS)
    }
}

impl CraterConfig {
    /// Parse a config from RON. Missing fields take their defaults.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        let config: CraterConfig = options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the terrain core cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.ring == self.palette.scorch {
            return Err(ConfigError::InvalidValue {
                field: "palette.ring",
                reason: "ring colour must differ from the scorch colour".into(),
            });
        }
        if self.entities.explosion_radius_threshold <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "entities.explosion_radius_threshold",
                reason: format!("{} is not positive", self.entities.explosion_radius_threshold),
            });
        }
        if self.entities.actor_size[0] <= 0 || self.entities.actor_size[1] <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "entities.actor_size",
                reason: format!("{:?} must be positive on both axes", self.entities.actor_size),
            });
        }
        Ok(())
    }

    pub fn decay_duration_ms(&self) -> u64 {
        self.heat_decay_ms.0
    }
}
