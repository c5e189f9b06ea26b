use crate::types::{PixelCoord, Rgb};

/// Linear interpolation between two channel values, `t` clamped to [0, 1].
/// Rounds to the nearest byte.
pub fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    let value = from as f32 + (to as f32 - from as f32) * t;
    value.round().clamp(0.0, 255.0) as u8
}

/// Per-channel interpolation from `from` towards `to`.
pub fn lerp_rgb(from: Rgb, to: Rgb, t: f32) -> Rgb {
    Rgb([
        lerp_u8(from.0[0], to.0[0], t),
        lerp_u8(from.0[1], to.0[1], t),
        lerp_u8(from.0[2], to.0[2], t),
    ])
}

/// Squared integer distance between two pixels.
///
/// Deltas are taken in i64; the square saturates at `i64::MAX`, which is
/// still larger than any `(r + 1)²` for an i32 radius.
pub fn dist_sq(a: PixelCoord, b: PixelCoord) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

/// Interpolation parameter for `elapsed` out of `duration` milliseconds.
/// A zero duration counts as already complete.
pub fn progress(elapsed: u64, duration: u64) -> f32 {
    if duration == 0 {
        return 1.0;
    }
    (elapsed as f64 / duration as f64).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_lerp_u8_endpoints() {
        assert_eq!(lerp_u8(255, 48, 0.0), 255);
        assert_eq!(lerp_u8(255, 48, 1.0), 48);
        assert_eq!(lerp_u8(0, 200, 0.5), 100);
    }

    #[test]
    fn test_lerp_u8_clamps_t() {
        assert_eq!(lerp_u8(10, 20, -3.0), 10);
        assert_eq!(lerp_u8(10, 20, 7.0), 20);
    }

    #[test]
    fn test_lerp_rgb_midpoint() {
        let mid = lerp_rgb(Rgb::new(0, 100, 200), Rgb::new(100, 100, 0), 0.5);
        assert_eq!(mid, Rgb::new(50, 100, 100));
    }

    #[test]
    fn test_dist_sq() {
        assert_eq!(dist_sq(IVec2::new(25, 25), IVec2::new(31, 25)), 36);
        assert_eq!(dist_sq(IVec2::new(-3, 4), IVec2::ZERO), 25);
    }

    #[test]
    fn test_dist_sq_extreme_coordinates() {
        let far = i32::MAX as i64;
        assert_eq!(dist_sq(IVec2::new(i32::MIN + 1, 0), IVec2::ZERO), far * far);
        assert_eq!(dist_sq(IVec2::ZERO, IVec2::new(0, i32::MIN + 1)), far * far);
        assert_eq!(
            dist_sq(IVec2::new(i32::MIN, i32::MIN), IVec2::new(i32::MAX, i32::MAX)),
            i64::MAX
        );
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(0, 1000), 0.0);
        assert_eq!(progress(250, 1000), 0.25);
        assert_eq!(progress(5000, 1000), 1.0);
        assert_eq!(progress(3, 0), 1.0);
    }
}
