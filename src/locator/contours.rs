//! External contour extraction over a binarized image.
//!
//! Connected components (8-connectivity) are discovered with a scanline
//! flood fill; the outer boundary of each component is then traced with
//! Moore-neighbor following starting at the component's topmost-leftmost
//! pixel. Hole boundaries are not reported.

use crate::image::GrayImage;

/// Closed boundary polyline of one connected foreground region.
#[derive(Clone, Debug)]
pub struct Contour {
    /// Boundary pixels in trace order (closed ring, first point not repeated).
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    /// Enclosed polygon area via the shoelace formula.
    pub fn area(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            acc += a[0] as i64 * b[1] as i64 - b[0] as i64 * a[1] as i64;
        }
        (acc.abs() as f32) * 0.5
    }

    /// Closed perimeter length.
    pub fn perimeter(&self) -> f32 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut acc = 0.0f32;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let dx = (a[0] - b[0]) as f32;
            let dy = (a[1] - b[1]) as f32;
            acc += (dx * dx + dy * dy).sqrt();
        }
        acc
    }
}

/// Clockwise 8-neighborhood sweep order (y grows downward).
const OFFSETS: [(i32, i32); 8] = [
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
];

/// Trace the outer boundary of every foreground component.
pub fn find_external_contours(bin: &GrayImage) -> Vec<Contour> {
    let (w, h) = (bin.w as i32, bin.h as i32);
    let mut labeled = vec![false; bin.w * bin.h];
    let mut contours = Vec::new();
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if labeled[idx] || bin.data[idx] == 0 {
                continue;
            }
            // First scan hit of a component is its topmost-leftmost pixel.
            contours.push(trace_boundary(bin, [x, y]));

            // Flood the whole component so it is not traced again.
            stack.push((x, y));
            labeled[idx] = true;
            while let Some((cx, cy)) = stack.pop() {
                for &(dx, dy) in &OFFSETS {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let nidx = (ny * w + nx) as usize;
                    if !labeled[nidx] && bin.data[nidx] != 0 {
                        labeled[nidx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }
    contours
}

/// Moore-neighbor boundary following from the topmost-leftmost pixel.
///
/// The sweep rotates clockwise starting just past the backtrack
/// (background) neighbor. The walk terminates when it stands on the start
/// pixel again and the sweep selects the same first move as the initial
/// one — the ring is then closed exactly once, including out-and-back
/// spurs of one-pixel-thin regions.
fn trace_boundary(bin: &GrayImage, start: [i32; 2]) -> Contour {
    let fg = |p: [i32; 2]| -> bool {
        p[0] >= 0
            && p[1] >= 0
            && p[0] < bin.w as i32
            && p[1] < bin.h as i32
            && bin.data[(p[1] * bin.w as i32 + p[0]) as usize] != 0
    };

    let mut points = vec![start];
    let mut current = start;
    // West of a topmost-leftmost pixel is always background.
    let mut backtrack_dir = 0usize;
    let mut first_move: Option<[i32; 2]> = None;
    // Ring length can never exceed the pixel perimeter bound.
    let cap = 4 * (bin.w * bin.h) + 8;

    for _ in 0..cap {
        let mut found: Option<([i32; 2], usize)> = None;
        for step in 1..=8 {
            let dir = (backtrack_dir + step) % 8;
            let next = [current[0] + OFFSETS[dir].0, current[1] + OFFSETS[dir].1];
            if fg(next) {
                // Backtrack for the next pixel is the last background
                // neighbor examined, expressed relative to `next`.
                let prev_dir = (backtrack_dir + step - 1) % 8;
                let back_px = [
                    current[0] + OFFSETS[prev_dir].0,
                    current[1] + OFFSETS[prev_dir].1,
                ];
                let back = offset_index([back_px[0] - next[0], back_px[1] - next[1]]);
                found = Some((next, back));
                break;
            }
        }
        let Some((next, back)) = found else {
            break; // isolated pixel
        };
        if current == start {
            match first_move {
                None => first_move = Some(next),
                Some(fm) if fm == next => break,
                Some(_) => {}
            }
        }
        current = next;
        backtrack_dir = back;
        if current != start {
            points.push(current);
        }
    }

    Contour { points }
}

fn offset_index(d: [i32; 2]) -> usize {
    OFFSETS
        .iter()
        .position(|&(dx, dy)| dx == d[0] && dy == d[1])
        .unwrap_or(0)
}
