//! Core geometric value types shared across the pipeline stages.

use serde::Serialize;

/// 2D point in image coordinates.
pub type Point = [f32; 2];

/// Convex quadrilateral with corners in canonical order:
/// `[top-left, top-right, bottom-left, bottom-right]`.
///
/// The canonical order is an invariant relied on by the perspective
/// transforms in both directions; construct via [`Quad::reorder`] unless the
/// corners are already known to be canonical.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    /// Canonicalize 4 unordered corners.
    ///
    /// Sum and difference of coordinates separate the corners monotonically:
    /// top-left minimizes x+y, bottom-right maximizes it, top-right minimizes
    /// y−x and bottom-left maximizes it. Idempotent on canonical input.
    pub fn reorder(pts: [Point; 4]) -> Self {
        let sum = |p: Point| p[0] + p[1];
        let diff = |p: Point| p[1] - p[0];

        let mut tl = pts[0];
        let mut br = pts[0];
        let mut tr = pts[0];
        let mut bl = pts[0];
        for &p in &pts[1..] {
            if sum(p) < sum(tl) {
                tl = p;
            }
            if sum(p) > sum(br) {
                br = p;
            }
            if diff(p) < diff(tr) {
                tr = p;
            }
            if diff(p) > diff(bl) {
                bl = p;
            }
        }
        Self {
            corners: [tl, tr, bl, br],
        }
    }

    /// Corner list of the W×H rectangle anchored at the origin, in canonical
    /// order. This is the destination set of the flattening transform.
    pub fn axis_aligned(w: f32, h: f32) -> Self {
        Self {
            corners: [[0.0, 0.0], [w, 0.0], [0.0, h], [w, h]],
        }
    }

    /// Enclosed area via the shoelace formula on the perimeter order
    /// TL → TR → BR → BL.
    pub fn area(&self) -> f32 {
        let [tl, tr, bl, br] = self.corners;
        let ring = [tl, tr, br, bl];
        let mut acc = 0.0f32;
        for i in 0..4 {
            let a = ring[i];
            let b = ring[(i + 1) % 4];
            acc += a[0] * b[1] - b[0] * a[1];
        }
        acc.abs() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_canonicalizes_shuffled_corners() {
        let q = Quad::reorder([[400.0, 10.0], [20.0, 420.0], [15.0, 12.0], [410.0, 400.0]]);
        assert_eq!(q.corners[0], [15.0, 12.0]);
        assert_eq!(q.corners[1], [400.0, 10.0]);
        assert_eq!(q.corners[2], [20.0, 420.0]);
        assert_eq!(q.corners[3], [410.0, 400.0]);
    }

    #[test]
    fn reorder_is_idempotent() {
        let once = Quad::reorder([[0.0, 0.0], [100.0, 5.0], [2.0, 95.0], [103.0, 98.0]]);
        let twice = Quad::reorder(once.corners);
        assert_eq!(once, twice);
    }

    #[test]
    fn unit_square_area() {
        let q = Quad::axis_aligned(10.0, 10.0);
        assert!((q.area() - 100.0).abs() < 1e-3);
    }
}
