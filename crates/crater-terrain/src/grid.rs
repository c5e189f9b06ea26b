//! Dense RGBA pixel buffer holding the destructible terrain.
//!
//! Alpha carries solidity (0 = empty space, anything else = terrain). The
//! RGB channels are colour, except that a solid pixel whose RGB equals the
//! palette's scorch colour is treated as "hot" (recently damaged).
//!
//! Row 0 is the bottom of the terrain; y grows upward.

use bytemuck::cast_slice;
use crater_core::config::Palette;
use crater_core::constants::{ALPHA_EMPTY, CHANNELS};
use crater_core::math::dist_sq;
use crater_core::types::{PixelCoord, Rgb, Timestamp};
use glam::IVec2;

use crate::decay::HeatDecayQueue;
use crate::error::TerrainError;

/// One of the four byte channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    R = 0,
    G = 1,
    B = 2,
    A = 3,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channel {
    type Error = TerrainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::R),
            1 => Ok(Channel::G),
            2 => Ok(Channel::B),
            3 => Ok(Channel::A),
            other => Err(TerrainError::InvalidChannel(other)),
        }
    }
}

/// Pixels touched by a disk carve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarveStats {
    /// Pixels inside the disk that were solid before the carve.
    pub cleared: u32,
    /// Solid pixels on the sealing ring that received the ring colour.
    pub ringed: u32,
}

/// Terrain pixel buffer. Row-major, 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<[u8; CHANNELS]>,
    palette: Palette,
    /// Set by bulk mutations; any cached view of the buffer is stale.
    needs_rebuild: bool,
}

impl PixelGrid {
    /// Create an all-empty grid.
    pub fn new(width: u32, height: u32) -> Result<Self, TerrainError> {
        Self::filled(width, height, [0, 0, 0, ALPHA_EMPTY])
    }

    /// Create a grid with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; CHANNELS]) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![rgba; width as usize * height as usize],
            palette: Palette::default(),
            needs_rebuild: false,
        })
    }

    /// Create a grid by evaluating `f` at every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(PixelCoord) -> [u8; CHANNELS],
    ) -> Result<Self, TerrainError> {
        let mut grid = Self::new(width, height)?;
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let idx = grid.linear_index(x, y);
                grid.pixels[idx] = f(IVec2::new(x, y));
            }
        }
        Ok(grid)
    }

    /// Wrap decoded RGBA bytes whose first row is grid row 0.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, TerrainError> {
        let mut grid = Self::new(width, height)?;
        let expected = grid.pixels.len() * CHANNELS;
        if bytes.len() != expected {
            return Err(TerrainError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        grid.pixels.copy_from_slice(cast_slice(bytes));
        Ok(grid)
    }

    /// Wrap decoded image bytes (first row = top of the image), flipping
    /// them so the image's bottom row becomes grid row 0.
    pub fn from_rgba_bytes_flipped(
        width: u32,
        height: u32,
        bytes: &[u8],
    ) -> Result<Self, TerrainError> {
        let mut grid = Self::from_rgba_bytes(width, height, bytes)?;
        let row = width as usize;
        let rows: Vec<[u8; CHANNELS]> = grid
            .pixels
            .chunks_exact(row)
            .rev()
            .flatten()
            .copied()
            .collect();
        grid.pixels = rows;
        Ok(grid)
    }

    /// Replace the palette used for hot tests and crater rings.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `pos` addresses a pixel of this grid.
    pub fn in_bounds(&self, pos: PixelCoord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn linear_index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn index(&self, pos: PixelCoord) -> Result<usize, TerrainError> {
        if !self.in_bounds(pos) {
            return Err(TerrainError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.linear_index(pos.x, pos.y))
    }

    /// Read one channel.
    pub fn get(&self, pos: PixelCoord, channel: Channel) -> Result<u8, TerrainError> {
        let idx = self.index(pos)?;
        Ok(self.pixels[idx][channel.index()])
    }

    /// Write one channel.
    pub fn set(&mut self, pos: PixelCoord, channel: Channel, value: u8) -> Result<(), TerrainError> {
        let idx = self.index(pos)?;
        self.pixels[idx][channel.index()] = value;
        Ok(())
    }

    /// Read a whole pixel.
    pub fn rgba(&self, pos: PixelCoord) -> Result<[u8; CHANNELS], TerrainError> {
        let idx = self.index(pos)?;
        Ok(self.pixels[idx])
    }

    /// Write a whole pixel.
    pub fn set_rgba(&mut self, pos: PixelCoord, rgba: [u8; CHANNELS]) -> Result<(), TerrainError> {
        let idx = self.index(pos)?;
        self.pixels[idx] = rgba;
        Ok(())
    }

    pub fn rgb(&self, pos: PixelCoord) -> Result<Rgb, TerrainError> {
        let [r, g, b, _] = self.rgba(pos)?;
        Ok(Rgb([r, g, b]))
    }

    /// Overwrite the colour channels, leaving alpha alone.
    pub fn set_rgb(&mut self, pos: PixelCoord, rgb: Rgb) -> Result<(), TerrainError> {
        let idx = self.index(pos)?;
        self.pixels[idx][..3].copy_from_slice(&rgb.0);
        Ok(())
    }

    /// alpha != 0
    pub fn is_solid(&self, pos: PixelCoord) -> Result<bool, TerrainError> {
        Ok(self.get(pos, Channel::A)? != ALPHA_EMPTY)
    }

    /// Solid and coloured exactly like the scorch marker.
    ///
    /// Terrain art that happens to use the scorch colour is misread as hot.
    pub fn is_hot(&self, pos: PixelCoord) -> Result<bool, TerrainError> {
        let [r, g, b, a] = self.rgba(pos)?;
        Ok(a != ALPHA_EMPTY && [r, g, b] == self.palette.scorch.0)
    }

    /// Paint the scorch colour over a pixel and record it for decay.
    ///
    /// Every call appends one queue entry; callers that must not double
    /// count check `is_hot` first.
    pub fn mark_scorched(
        &mut self,
        pos: PixelCoord,
        now: Timestamp,
        queue: &mut HeatDecayQueue,
    ) -> Result<(), TerrainError> {
        let scorch = self.palette.scorch;
        self.set_rgb(pos, scorch)?;
        queue.push(pos, now);
        Ok(())
    }

    /// Clear alpha in the disk of `radius` around `center` (squared-distance
    /// test, inclusive) and seal the edge with a one-pixel ring at
    /// `radius + 1`. Only pixels that are still solid take the ring colour.
    ///
    /// Parts of the disk outside the grid are clipped. Sets `needs_rebuild`.
    pub fn carve_disk(&mut self, center: PixelCoord, radius: i32) -> Result<CarveStats, TerrainError> {
        if radius <= 0 {
            return Err(TerrainError::InvalidRadius(radius));
        }

        let inner = radius as i64 * radius as i64;
        let outer = (radius as i64 + 1) * (radius as i64 + 1);
        let reach = radius as i64 + 1;

        let x0 = (center.x as i64 - reach).max(0);
        let x1 = (center.x as i64 + reach).min(self.width as i64 - 1);
        let y0 = (center.y as i64 - reach).max(0);
        let y1 = (center.y as i64 + reach).min(self.height as i64 - 1);

        let mut stats = CarveStats::default();
        let ring = self.palette.ring;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let pos = IVec2::new(x as i32, y as i32);
                let d2 = dist_sq(pos, center);
                let idx = self.linear_index(pos.x, pos.y);
                let pixel = &mut self.pixels[idx];
                if d2 <= inner {
                    if pixel[3] != ALPHA_EMPTY {
                        stats.cleared += 1;
                    }
                    pixel[3] = ALPHA_EMPTY;
                } else if d2 <= outer && pixel[3] != ALPHA_EMPTY {
                    pixel[..3].copy_from_slice(&ring.0);
                    stats.ringed += 1;
                }
            }
        }

        self.needs_rebuild = true;
        Ok(stats)
    }

    /// Whether a bulk mutation happened since the last `clear_rebuild`.
    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub fn mark_rebuild(&mut self) {
        self.needs_rebuild = true;
    }

    /// Acknowledge the rebuild after re-deriving any cached view.
    pub fn clear_rebuild(&mut self) {
        self.needs_rebuild = false;
    }

    /// Number of solid pixels.
    pub fn solid_count(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] != ALPHA_EMPTY).count()
    }

    /// Raw RGBA bytes, row 0 first.
    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.pixels)
    }

    /// Raw RGBA bytes with the top row first, ready for an image surface.
    pub fn to_image_bytes(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(self.width as usize)
            .rev()
            .flatten()
            .flatten()
            .copied()
            .collect()
    }
}
