//! Broad-phase box overlap between entity sets.
//!
//! Boxes are swept along x: entries are visited in order of `min.x`, each
//! set keeps the boxes whose x-interval is still open, and a new box is
//! tested only against the open boxes of the other set. Overlap is
//! half-open, so boxes sharing an edge never pair up.
//!
//! Output pairs are sorted by `(i, j)`, which makes the result a pure
//! function of the input and `intersect_sets(b, a)` the exact mirror of
//! `intersect_sets(a, b)`.

use std::cmp::Ordering;

use crater_core::types::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// Sweep order: `min.x` ascending, ties broken by set then index so the
/// walk itself is deterministic.
fn sweep_order(boxes_a: &[Aabb], boxes_b: &[Aabb]) -> Vec<(Side, usize)> {
    let mut order: Vec<(Side, usize)> = (0..boxes_a.len())
        .map(|i| (Side::A, i))
        .chain((0..boxes_b.len()).map(|j| (Side::B, j)))
        .collect();
    let min_x = |entry: &(Side, usize)| match entry.0 {
        Side::A => boxes_a[entry.1].min.x,
        Side::B => boxes_b[entry.1].min.x,
    };
    order.sort_by(|l, r| {
        min_x(l)
            .total_cmp(&min_x(r))
            .then_with(|| match (l.0, r.0) {
                (Side::A, Side::B) => Ordering::Less,
                (Side::B, Side::A) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| l.1.cmp(&r.1))
    });
    order
}

/// Every `(i, j)` where `boxes_a[i]` overlaps `boxes_b[j]`, sorted.
pub fn intersect_sets(boxes_a: &[Aabb], boxes_b: &[Aabb]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    if boxes_a.is_empty() || boxes_b.is_empty() {
        return pairs;
    }

    let mut open_a: Vec<usize> = Vec::new();
    let mut open_b: Vec<usize> = Vec::new();

    for (side, idx) in sweep_order(boxes_a, boxes_b) {
        let current = match side {
            Side::A => &boxes_a[idx],
            Side::B => &boxes_b[idx],
        };
        let sweep_x = current.min.x;

        // Intervals ending at or before the sweep line can no longer overlap
        // anything still to come.
        open_a.retain(|&i| boxes_a[i].max.x > sweep_x);
        open_b.retain(|&j| boxes_b[j].max.x > sweep_x);

        match side {
            Side::A => {
                pairs.extend(
                    open_b
                        .iter()
                        .filter(|&&j| current.overlaps(&boxes_b[j]))
                        .map(|&j| (idx, j)),
                );
                open_a.push(idx);
            }
            Side::B => {
                pairs.extend(
                    open_a
                        .iter()
                        .filter(|&&i| boxes_a[i].overlaps(current))
                        .map(|&i| (i, idx)),
                );
                open_b.push(idx);
            }
        }
    }

    pairs.sort_unstable();
    pairs
}

/// Every `(i, j)` with `i < j` where two boxes of the same set overlap.
pub fn intersect_self(boxes: &[Aabb]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&l, &r| boxes[l].min.x.total_cmp(&boxes[r].min.x).then(l.cmp(&r)));

    let mut pairs = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    for idx in order {
        let current = &boxes[idx];
        open.retain(|&k| boxes[k].max.x > current.min.x);
        for &k in &open {
            if boxes[k].overlaps(current) {
                pairs.push((k.min(idx), k.max(idx)));
            }
        }
        open.push(idx);
    }

    pairs.sort_unstable();
    pairs
}

/// Reference O(n·m) scan. Same output as [`intersect_sets`].
pub fn intersect_sets_naive(boxes_a: &[Aabb], boxes_b: &[Aabb]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            if a.overlaps(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
