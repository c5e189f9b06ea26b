//! Single source of truth for shared constants.
//! `CraterConfig::default()` mirrors these values; anything tunable at
//! runtime goes through the config instead of reading them directly.

/// Number of byte channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Alpha value meaning "no terrain here".
pub const ALPHA_EMPTY: u8 = 0;

/// Alpha value written for freshly solid terrain.
pub const ALPHA_SOLID: u8 = 255;

/// RGB marker written over freshly damaged terrain. A solid pixel with
/// exactly this colour is "hot".
pub const SCORCH_COLOR: [u8; 3] = [255, 75, 19];

/// RGB that a hot pixel cools towards before it is destroyed.
pub const COOLANT_COLOR: [u8; 3] = [48, 36, 30];

/// RGB of the one-pixel ring sealing the edge of an explosion crater.
pub const RING_COLOR: [u8; 3] = [102, 126, 151];

/// Milliseconds from scorch to destruction of a damaged pixel.
pub const HEAT_DECAY_MS: u64 = 1000;

/// Explosion radius at which ordnance resolves into a crater.
/// Resolution happens once the radius strictly exceeds this value.
pub const EXPLOSION_RADIUS_THRESHOLD: i32 = 10;

/// Visible radius of ordnance while it is in flight.
pub const ORDNANCE_FLIGHT_RADIUS: i32 = 2;

/// Per-tick decrease of ordnance vertical velocity (pixels/tick²).
pub const ORDNANCE_GRAVITY: f32 = 0.05;

/// Cap on the throw power derived from how long the throw key was held.
pub const ORDNANCE_MAX_POWER: f32 = 1.5;

/// Milliseconds of charge per unit of throw power.
pub const ORDNANCE_CHARGE_MS_PER_POWER: f32 = 100.0;

/// Horizontal projectile speed in pixels per tick.
pub const PROJECTILE_SPEED: f32 = 2.0;

/// Projectile box extents: half-width and height in pixels.
pub const PROJECTILE_HALF_WIDTH: f32 = 2.0;
pub const PROJECTILE_HEIGHT: f32 = 1.0;

/// Default actor sprite extent in pixels (width, height).
pub const ACTOR_SIZE: [i32; 2] = [8, 16];

/// Pixels a jump lifts an actor in a single tick.
pub const ACTOR_JUMP_HEIGHT: i32 = 2;
