//! Timed cooling of scorched pixels.
//!
//! Each damaged pixel is recorded with the time it was scorched. Every tick
//! its colour is interpolated from the scorch marker towards the coolant
//! colour; once the decay duration has fully elapsed the pixel's alpha is
//! cleared and the record dropped. Records are independent of each other.

use std::collections::HashMap;

use crater_core::constants::{ALPHA_EMPTY, HEAT_DECAY_MS};
use crater_core::math::{lerp_rgb, progress};
use crater_core::types::{PixelCoord, Rgb, Timestamp};

use crate::grid::{Channel, PixelGrid};

/// A pixel that became hot at `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamagedPixel {
    pub pos: PixelCoord,
    pub created_at: Timestamp,
}

/// Lifecycle of a damaged pixel at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatPhase {
    /// Just scorched; colour is still the marker.
    Hot,
    /// Part way between scorch and coolant.
    Cooling(f32),
    /// Fully decayed; the pixel is destroyed.
    Cleared,
}

impl DamagedPixel {
    /// Phase of this record at `now` for a decay lasting `duration_ms`.
    pub fn phase(&self, now: Timestamp, duration_ms: u64) -> HeatPhase {
        let elapsed = now.elapsed_since(self.created_at);
        if elapsed >= duration_ms {
            HeatPhase::Cleared
        } else if elapsed == 0 {
            HeatPhase::Hot
        } else {
            HeatPhase::Cooling(progress(elapsed, duration_ms))
        }
    }
}

/// Outcome counts of one decay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecayStats {
    /// Entries still cooling after this tick.
    pub cooling: u32,
    /// Entries whose pixel was destroyed this tick.
    pub cleared: u32,
    /// Entries dropped because their pixel was already empty or off-grid.
    pub pruned: u32,
}

/// Damaged pixels waiting to cool down.
#[derive(Debug, Clone)]
pub struct HeatDecayQueue {
    entries: Vec<DamagedPixel>,
    /// Live record count per position, kept in step with `entries`.
    pending: HashMap<PixelCoord, u32>,
    duration_ms: u64,
    scorch: Rgb,
    coolant: Rgb,
}

impl Default for HeatDecayQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatDecayQueue {
    pub fn new() -> Self {
        let palette = crater_core::config::Palette::default();
        Self::with_settings(HEAT_DECAY_MS, palette.scorch, palette.coolant)
    }

    pub fn with_settings(duration_ms: u64, scorch: Rgb, coolant: Rgb) -> Self {
        Self {
            entries: Vec::new(),
            pending: HashMap::new(),
            duration_ms,
            scorch,
            coolant,
        }
    }

    /// Record a newly hot pixel.
    pub fn push(&mut self, pos: PixelCoord, now: Timestamp) {
        self.entries.push(DamagedPixel {
            pos,
            created_at: now,
        });
        *self.pending.entry(pos).or_insert(0) += 1;
    }

    /// Whether `pos` still has a live decay record.
    pub fn contains(&self, pos: PixelCoord) -> bool {
        self.pending.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DamagedPixel> {
        self.entries.iter()
    }

    /// Drop every record without touching the grid.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Advance every record to `now`.
    ///
    /// Fully elapsed records clear their pixel's alpha and are removed. The
    /// rest get `lerp(scorch, coolant, elapsed / duration)` written into RGB.
    /// Records whose pixel is already empty (carved, rebuilt) are dropped
    /// without a write.
    pub fn tick(&mut self, grid: &mut PixelGrid, now: Timestamp) -> DecayStats {
        let mut stats = DecayStats::default();
        let duration = self.duration_ms;
        let scorch = self.scorch;
        let coolant = self.coolant;
        let pending = &mut self.pending;
        let mut release = |pos: PixelCoord| {
            if let Some(count) = pending.get_mut(&pos) {
                *count -= 1;
                if *count == 0 {
                    pending.remove(&pos);
                }
            }
        };

        self.entries.retain(|entry| {
            match grid.is_solid(entry.pos) {
                Ok(true) => {}
                Ok(false) | Err(_) => {
                    stats.pruned += 1;
                    release(entry.pos);
                    return false;
                }
            }

            match entry.phase(now, duration) {
                HeatPhase::Cleared => {
                    // In bounds: checked by is_solid above.
                    let _ = grid.set(entry.pos, Channel::A, ALPHA_EMPTY);
                    stats.cleared += 1;
                    release(entry.pos);
                    false
                }
                HeatPhase::Hot => {
                    let _ = grid.set_rgb(entry.pos, scorch);
                    stats.cooling += 1;
                    true
                }
                HeatPhase::Cooling(t) => {
                    let _ = grid.set_rgb(entry.pos, lerp_rgb(scorch, coolant, t));
                    stats.cooling += 1;
                    true
                }
            }
        });

        if stats.cleared > 0 || stats.pruned > 0 {
            log::trace!(
                "heat decay: {} cooling, {} cleared, {} pruned",
                stats.cooling,
                stats.cleared,
                stats.pruned
            );
        }
        stats
    }
}
