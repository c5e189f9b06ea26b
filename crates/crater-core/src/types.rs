use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Pixel address in grid space. Signed so that positions just outside the
/// grid can be represented and rejected instead of wrapping.
pub type PixelCoord = IVec2;

/// Opaque RGB triple. Alpha is handled separately because it carries the
/// solidity of a pixel, not its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }

    /// Attach an alpha value to build a full pixel.
    pub fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], alpha]
    }
}

/// Monotonic timestamp in milliseconds. Only differences are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`. Saturates at zero if the clock
    /// is handed an earlier value than one already observed.
    pub fn elapsed_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Timestamp `ms` milliseconds later.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Axis-aligned box (xmin, ymin, xmax, ymax) in world space.
///
/// Overlap is half-open: boxes that only share an edge do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self {
            min: Vec2::new(xmin, ymin),
            max: Vec2::new(xmax, ymax),
        }
    }

    /// Box of `size` whose lower-left corner is `origin`.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Box of half-extent `half` centred on `center`.
    pub fn from_center_half(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x
    }

    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && other.min.y < self.max.y
    }

    /// Half-open overlap on both axes.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_edge_touching_does_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_aabb_overlap_requires_both_axes() {
        let a = Aabb::new(0.0, 0.0, 5.0, 5.0);
        let beside = Aabb::new(3.0, 6.0, 8.0, 9.0);
        let inside = Aabb::new(3.0, 3.0, 8.0, 8.0);
        assert!(a.overlaps_x(&beside));
        assert!(!a.overlaps(&beside));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_timestamp_elapsed_saturates() {
        let t = Timestamp::from_millis(500);
        assert_eq!(t.after(250).elapsed_since(t), 250);
        assert_eq!(t.elapsed_since(t.after(10)), 0);
    }

    #[test]
    fn test_rgb_with_alpha() {
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(9), [1, 2, 3, 9]);
    }
}
