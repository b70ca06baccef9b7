//! Synthetic sudoku "photos" for end-to-end tests.

use sudoku_vision::image::RgbImage;
use sudoku_vision::types::Point;

const PAPER: [u8; 3] = [232, 228, 220];
const INK: [u8; 3] = [24, 22, 20];

/// Axis-aligned puzzle photo: a light page with a dark 9×9 grid frame
/// (outer border plus interior lines) inset by `inset` pixels.
pub fn flat_grid_photo(size: usize, inset: usize) -> RgbImage {
    let mut img = blank_page(size, size);
    let span = size - 2 * inset;
    let cell = span / 9;

    // Outer frame, 5px thick.
    for line in 0..=9 {
        let offset = inset + line * cell;
        let thickness = if line == 0 || line == 9 { 5 } else { 2 };
        fill_rect(&mut img, inset, offset, span + 1, thickness);
        fill_rect(&mut img, offset, inset, thickness, span + 1);
    }
    img
}

/// Perspective-skewed photo: only the four edges of `corners` are drawn
/// (canonical [TL, TR, BL, BR] order), as a thick dark quad outline.
pub fn skewed_grid_photo(size: usize, corners: [Point; 4]) -> RgbImage {
    let mut img = blank_page(size, size);
    let [tl, tr, bl, br] = corners;
    for (a, b) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        draw_line(&mut img, a, b, 5);
    }
    img
}

fn blank_page(w: usize, h: usize) -> RgbImage {
    let mut img = RgbImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            img.set(x, y, PAPER);
        }
    }
    img
}

fn fill_rect(img: &mut RgbImage, x0: usize, y0: usize, w: usize, h: usize) {
    for y in y0..(y0 + h).min(img.h) {
        for x in x0..(x0 + w).min(img.w) {
            img.set(x, y, INK);
        }
    }
}

/// Thick line as a stamped disc along the segment.
fn draw_line(img: &mut RgbImage, a: Point, b: Point, thickness: usize) {
    let steps = ((b[0] - a[0]).hypot(b[1] - a[1]).ceil() as usize).max(1);
    let r = (thickness / 2) as isize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let cx = (a[0] + (b[0] - a[0]) * t).round() as isize;
        let cy = (a[1] + (b[1] - a[1]) * t).round() as isize;
        for dy in -r..=r {
            for dx in -r..=r {
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && (x as usize) < img.w && (y as usize) < img.h {
                    img.set(x as usize, y as usize, INK);
                }
            }
        }
    }
}
