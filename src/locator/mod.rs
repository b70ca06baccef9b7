//! Grid localization: pick the quadrilateral most likely to be the puzzle.
//!
//! Overview
//! - Trace every external contour in the binarized image.
//! - Drop contours at or below the noise floor, approximate the rest to
//!   polygons with a tolerance of a fixed fraction of their perimeter and
//!   keep only 4-vertex results.
//! - The largest such quadrilateral wins, provided it clears the minimum
//!   grid area; its corners are returned in canonical order.

pub mod approx;
pub mod contours;

use crate::image::GrayImage;
use crate::types::Quad;
use approx::approx_polygon;
use contours::find_external_contours;
use log::debug;
use serde::Deserialize;

/// Thresholds steering the contour-to-quad selection.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct LocatorParams {
    /// Contours with enclosed area at or below this are treated as noise.
    pub min_contour_area: f32,
    /// Winning quadrilateral must exceed this area; 0 disables the guard.
    pub min_grid_area: f32,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub approx_ratio: f32,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            min_contour_area: 50.0,
            min_grid_area: 1000.0,
            approx_ratio: 0.02,
        }
    }
}

/// The located grid region.
#[derive(Clone, Copy, Debug)]
pub struct LocatedGrid {
    /// Corners in canonical [TL, TR, BL, BR] order.
    pub quad: Quad,
    /// Enclosed area of the winning contour, px².
    pub area: f32,
}

/// Find the largest quadrilateral contour in a binarized image.
pub fn locate_grid(bin: &GrayImage, params: &LocatorParams) -> Option<LocatedGrid> {
    let contours = find_external_contours(bin);
    debug!("locate_grid: {} external contours", contours.len());

    let mut best: Option<([[i32; 2]; 4], f32)> = None;
    for contour in &contours {
        let area = contour.area();
        if area <= params.min_contour_area {
            continue;
        }
        let eps = params.approx_ratio * contour.perimeter();
        let poly = approx_polygon(&contour.points, eps);
        if poly.len() != 4 {
            continue;
        }
        if best.is_none_or(|(_, best_area)| area > best_area) {
            best = Some(([poly[0], poly[1], poly[2], poly[3]], area));
        }
    }

    let (corners, area) = best?;
    if params.min_grid_area > 0.0 && area <= params.min_grid_area {
        debug!("locate_grid: best quad area {area:.1} below floor {}", params.min_grid_area);
        return None;
    }

    let pts = corners.map(|p| [p[0] as f32, p[1] as f32]);
    Some(LocatedGrid {
        quad: Quad::reorder(pts),
        area,
    })
}
