//! Projective mapping between two planar quadrilaterals.
//!
//! The transform flattening the located grid onto the square canvas and the
//! inverse used to re-project the solution overlay are both instances of
//! [`PerspectiveTransform`]; the inverse is built by swapping the source and
//! destination point sets, never by inverting a matrix in caller code.

use crate::types::{Point, Quad};
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::image::{GrayImage, RgbImage};

const EPS: f32 = 1e-9;

/// 3×3 projective transform mapping source points onto destination points.
#[derive(Clone, Debug)]
pub struct PerspectiveTransform {
    m: Matrix3<f32>,
}

impl PerspectiveTransform {
    /// Solve the transform carrying the 4 source corners onto the 4
    /// destination corners (both in canonical order).
    ///
    /// The 8 unknowns come from the exact 8×8 correspondence system, solved
    /// in f64 for conditioning. Returns `None` for degenerate (collinear)
    /// corner sets.
    pub fn between(src: &Quad, dst: &Quad) -> Option<Self> {
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for i in 0..4 {
            let [x, y] = src.corners[i].map(f64::from);
            let [u, v] = dst.corners[i].map(f64::from);
            let r = 2 * i;
            a[(r, 0)] = x;
            a[(r, 1)] = y;
            a[(r, 2)] = 1.0;
            a[(r, 6)] = -x * u;
            a[(r, 7)] = -y * u;
            b[r] = u;
            a[(r + 1, 3)] = x;
            a[(r + 1, 4)] = y;
            a[(r + 1, 5)] = 1.0;
            a[(r + 1, 6)] = -x * v;
            a[(r + 1, 7)] = -y * v;
            b[r + 1] = v;
        }
        let coeffs = a.lu().solve(&b)?;
        let m = Matrix3::new(
            coeffs[0] as f32,
            coeffs[1] as f32,
            coeffs[2] as f32,
            coeffs[3] as f32,
            coeffs[4] as f32,
            coeffs[5] as f32,
            coeffs[6] as f32,
            coeffs[7] as f32,
            1.0,
        );
        let t = Self { m };

        // A near-singular system can still produce a finite but useless
        // solution; accept only if the correspondences are reproduced.
        let scale = dst
            .corners
            .iter()
            .flatten()
            .fold(1.0f32, |acc, &c| acc.max(c.abs()));
        for i in 0..4 {
            let got = t.apply(src.corners[i])?;
            let du = got[0] - dst.corners[i][0];
            let dv = got[1] - dst.corners[i][1];
            if (du * du + dv * dv).sqrt() > 1e-3 * scale {
                return None;
            }
        }
        Some(t)
    }

    /// Transform flattening `quad` onto the axis-aligned W×H canvas.
    pub fn quad_to_canvas(quad: &Quad, w: usize, h: usize) -> Option<Self> {
        Self::between(quad, &Quad::axis_aligned(w as f32, h as f32))
    }

    /// Transform re-projecting the W×H canvas back into `quad` — the same
    /// correspondences with the point sets swapped.
    pub fn canvas_to_quad(quad: &Quad, w: usize, h: usize) -> Option<Self> {
        Self::between(&Quad::axis_aligned(w as f32, h as f32), quad)
    }

    /// Apply to one point. `None` when the point maps to the line at
    /// infinity or the result is not finite.
    pub fn apply(&self, p: Point) -> Option<Point> {
        let v = self.m * Vector3::new(p[0], p[1], 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        Some([v[0] / w, v[1] / w])
    }

    pub fn matrix(&self) -> &Matrix3<f32> {
        &self.m
    }

    fn inverse_matrix(&self) -> Option<Matrix3<f32>> {
        self.m.try_inverse()
    }
}

/// Resample `src` through `t` into a `w × h` grayscale canvas.
///
/// For every destination pixel the source position is found through the
/// inverted matrix and sampled bilinearly; out-of-bounds samples are 0.
pub fn warp_gray(src: &GrayImage, t: &PerspectiveTransform, w: usize, h: usize) -> GrayImage {
    let mut out = GrayImage::new(w, h);
    let Some(inv) = t.inverse_matrix() else {
        return out;
    };
    for y in 0..h {
        for x in 0..w {
            if let Some(v) = sample(&inv, x, y, src.w, src.h, |sx, sy| src.get(sx, sy) as f32) {
                out.set(x, y, v.round().clamp(0.0, 255.0) as u8);
            }
        }
    }
    out
}

/// Color variant of [`warp_gray`]; out-of-bounds samples are black.
pub fn warp_rgb(src: &RgbImage, t: &PerspectiveTransform, w: usize, h: usize) -> RgbImage {
    let mut out = RgbImage::new(w, h);
    let Some(inv) = t.inverse_matrix() else {
        return out;
    };
    for y in 0..h {
        for x in 0..w {
            let mut px = [0u8; 3];
            let mut hit = false;
            for c in 0..3 {
                if let Some(v) = sample(&inv, x, y, src.w, src.h, |sx, sy| {
                    src.get(sx, sy)[c] as f32
                }) {
                    px[c] = v.round().clamp(0.0, 255.0) as u8;
                    hit = true;
                }
            }
            if hit {
                out.set(x, y, px);
            }
        }
    }
    out
}

/// Bilinear sample of the source position that `inv` assigns to destination
/// pixel (x, y). `None` when the position falls outside the `sw × sh` source.
fn sample<F: Fn(usize, usize) -> f32>(
    inv: &Matrix3<f32>,
    x: usize,
    y: usize,
    sw: usize,
    sh: usize,
    read: F,
) -> Option<f32> {
    let v = inv * Vector3::new(x as f32, y as f32, 1.0);
    if !v[2].is_finite() || v[2].abs() <= EPS {
        return None;
    }
    let sx = v[0] / v[2];
    let sy = v[1] / v[2];
    if !sx.is_finite() || !sy.is_finite() {
        return None;
    }
    if sx < 0.0 || sy < 0.0 || sx >= sw as f32 || sy >= sh as f32 {
        return None;
    }
    let x0 = sx.floor() as usize;
    let y0 = sy.floor() as usize;
    let x1 = (x0 + 1).min(sw - 1);
    let y1 = (y0 + 1).min(sh - 1);
    let (wx, wy) = (sx - x0 as f32, sy - y0 as f32);
    Some(bilinear(
        read(x0, y0),
        read(x1, y0),
        read(x0, y1),
        read(x1, y1),
        wx,
        wy,
    ))
}

fn bilinear(p00: f32, p10: f32, p01: f32, p11: f32, wx: f32, wy: f32) -> f32 {
    let top = p00 + (p10 - p00) * wx;
    let bot = p01 + (p11 - p01) * wx;
    top + (bot - top) * wy
}
