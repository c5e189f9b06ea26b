//! Integer Bresenham line walk.

use std::ops::ControlFlow;

use crater_core::types::PixelCoord;
use glam::IVec2;

/// Walk the lattice line from `start` to `end`, both inclusive, calling
/// `visit` on every cell in order.
///
/// The axis with the larger absolute delta is stepped every iteration (ties
/// step y); the other axis accumulates error and steps once `2 * error`
/// reaches the major delta. A zero delta steps in the + direction. Exactly
/// `max(|dx|, |dy|) + 1` cells are visited, each 8-connected to the last.
///
/// Returning `ControlFlow::Break` from `visit` ends the walk immediately and
/// hands the break value back.
pub fn trace_line<B>(
    start: PixelCoord,
    end: PixelCoord,
    mut visit: impl FnMut(PixelCoord) -> ControlFlow<B>,
) -> ControlFlow<B> {
    let dx = end.x as i64 - start.x as i64;
    let dy = end.y as i64 - start.y as i64;
    let adx = dx.abs();
    let ady = dy.abs();
    let sx: i32 = if dx >= 0 { 1 } else { -1 };
    let sy: i32 = if dy >= 0 { 1 } else { -1 };

    let x_major = adx > ady;
    let (major, minor) = if x_major { (adx, ady) } else { (ady, adx) };

    let mut x = start.x;
    let mut y = start.y;
    let mut error: i64 = 0;

    for step in 0..=major {
        if let ControlFlow::Break(value) = visit(IVec2::new(x, y)) {
            return ControlFlow::Break(value);
        }
        if step == major {
            break;
        }

        error += minor;
        let minor_step = error * 2 >= major;
        if minor_step {
            error -= major;
        }

        if x_major {
            x += sx;
            if minor_step {
                y += sy;
            }
        } else {
            y += sy;
            if minor_step {
                x += sx;
            }
        }
    }

    ControlFlow::Continue(())
}

/// Every cell of the line from `start` to `end`, in walk order.
pub fn line_points(start: PixelCoord, end: PixelCoord) -> Vec<PixelCoord> {
    let mut points = Vec::new();
    let _ = trace_line::<()>(start, end, |p| {
        points.push(p);
        ControlFlow::Continue(())
    });
    points
}
