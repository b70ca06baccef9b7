//! Binarization front-end for the grid locator.
//!
//! Purpose
//! - Turn the resized color photo into the high-contrast binary image the
//!   contour stage consumes: grayscale → 5×5 Gaussian blur → inverted
//!   adaptive threshold.
//!
//! Design
//! - The blur is a separable 5-tap kernel ≈ [1,4,6,4,1]/16 (σ≈1) with
//!   replicated borders.
//! - The threshold compares each pixel against the mean of its surrounding
//!   `block × block` neighborhood minus a constant offset; grid lines and
//!   digits come out as foreground (255) on background 0 regardless of
//!   lighting gradients across the photo. Neighborhood sums come from an
//!   integral image, so the pass is O(W·H) for any block size.

use crate::image::GrayImage;

/// Separable 5-tap Gaussian blur with clamped (replicate) borders.
pub fn gaussian_blur5(img: &GrayImage) -> GrayImage {
    const K: [u32; 5] = [1, 4, 6, 4, 1];
    let (w, h) = (img.w, img.h);
    if w == 0 || h == 0 {
        return img.clone();
    }

    // horizontal
    let mut tmp = vec![0u8; w * h];
    for y in 0..h {
        let row = img.row(y);
        for x in 0..w {
            let mut acc = 0u32;
            for (k, &kv) in K.iter().enumerate() {
                let xi = (x + k).saturating_sub(2).min(w - 1);
                acc += kv * row[xi] as u32;
            }
            tmp[y * w + x] = ((acc + 8) / 16) as u8;
        }
    }

    // vertical
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (k, &kv) in K.iter().enumerate() {
                let yi = (y + k).saturating_sub(2).min(h - 1);
                acc += kv * tmp[yi * w + x] as u32;
            }
            out.data[y * w + x] = ((acc + 8) / 16) as u8;
        }
    }
    out
}

/// Inverted adaptive threshold against the local `block × block` mean.
///
/// A pixel becomes foreground (255) when it is darker than its neighborhood
/// mean minus `offset`. `block` must be odd.
pub fn adaptive_threshold(img: &GrayImage, block: usize, offset: i32) -> GrayImage {
    assert!(block % 2 == 1, "threshold block size must be odd");
    let (w, h) = (img.w, img.h);
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    // Integral image with a zero row/column prefix.
    let iw = w + 1;
    let mut integral = vec![0u64; iw * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += img.get(x, y) as u64;
            integral[(y + 1) * iw + (x + 1)] = integral[y * iw + (x + 1)] + row_sum;
        }
    }

    let r = block / 2;
    for y in 0..h {
        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(r);
            let x1 = (x + r).min(w - 1);
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as u64;
            let sum = integral[(y1 + 1) * iw + (x1 + 1)] + integral[y0 * iw + x0]
                - integral[y0 * iw + (x1 + 1)]
                - integral[(y1 + 1) * iw + x0];
            let mean = (sum / count) as i32;
            let v = if (img.get(x, y) as i32) < mean - offset {
                255
            } else {
                0
            };
            out.set(x, y, v);
        }
    }
    out
}

/// Full binarization front-end: blur then threshold.
pub fn binarize(gray: &GrayImage, block: usize, offset: i32) -> GrayImage {
    adaptive_threshold(&gaussian_blur5(gray), block, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_flat_regions() {
        let img = GrayImage::from_raw(8, 8, vec![100; 64]).unwrap();
        let out = gaussian_blur5(&img);
        assert!(out.data.iter().all(|&v| v == 100));
    }

    #[test]
    fn dark_line_on_light_background_becomes_foreground() {
        let mut img = GrayImage::from_raw(21, 21, vec![200; 21 * 21]).unwrap();
        for x in 0..21 {
            img.set(x, 10, 20);
        }
        let bin = adaptive_threshold(&img, 11, 2);
        assert_eq!(bin.get(10, 10), 255);
        assert_eq!(bin.get(10, 2), 0);
    }

    #[test]
    fn uniform_image_yields_no_foreground() {
        let img = GrayImage::from_raw(15, 15, vec![128; 225]).unwrap();
        let bin = adaptive_threshold(&img, 11, 2);
        assert!(bin.data.iter().all(|&v| v == 0));
    }
}
