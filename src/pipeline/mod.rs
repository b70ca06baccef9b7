//! End-to-end photo-to-solution pipeline.
//!
//! Overview
//! - Decodes and resizes the input onto the square working canvas, then
//!   binarizes it for contour extraction.
//! - Locates the grid quadrilateral, flattens it through the forward
//!   perspective transform and splits the flat grid into 81 cells.
//! - Classifies the cells into the recognized board (injected classifier),
//!   solves it by exact backtracking, and renders the newly solved digits
//!   through the retained inverse transform back onto the photo.
//!
//! Every stage consumes its predecessor's output immutably and the whole
//! run is per-request state; the only shared object is the classifier,
//! which is read-only during inference.

mod params;
mod report;

pub use params::PipelineParams;
pub use report::{SolveReport, StageTiming, TimingBreakdown};

use crate::classify::DigitClassifier;
use crate::error::PipelineError;
use crate::homography::{PerspectiveTransform, warp_gray, warp_rgb};
use crate::image::{RgbImage, io};
use crate::overlay::{composite, render_digits};
use crate::solver::{SolveError, Solver};
use crate::{cells, locator, preprocess};
use log::{debug, warn};
use std::time::Instant;

/// Photo-to-solution pipeline with fixed parameters.
///
/// Create once, then call [`process_bytes`](Self::process_bytes) or
/// [`process_image`](Self::process_image) per request with an injected
/// classifier.
#[derive(Clone, Debug)]
pub struct SudokuPipeline {
    params: PipelineParams,
}

impl SudokuPipeline {
    /// Validates the parameter set up front so stage code can rely on it.
    pub fn new(params: PipelineParams) -> Result<Self, PipelineError> {
        params
            .validate()
            .map_err(PipelineError::Internal)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Run on an encoded image buffer (PNG/JPEG/...).
    pub fn process_bytes(
        &self,
        bytes: &[u8],
        classifier: &dyn DigitClassifier,
    ) -> Result<SolveReport, PipelineError> {
        let decoded = io::decode_rgb(bytes)?;
        self.process_image(&decoded, classifier)
    }

    /// Run on an already decoded image.
    pub fn process_image(
        &self,
        input: &RgbImage,
        classifier: &dyn DigitClassifier,
    ) -> Result<SolveReport, PipelineError> {
        let run_start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let side = self.params.canvas_size;

        // Resize + binarize for contour extraction.
        let stage = Instant::now();
        let base = input.resize_bilinear(side, side);
        let gray = base.to_gray();
        let binary = preprocess::binarize(
            &gray,
            self.params.threshold_block,
            self.params.threshold_offset,
        );
        timing.push("preprocess", elapsed_ms(stage));

        // Locate the grid.
        let stage = Instant::now();
        let located = locator::locate_grid(&binary, &self.params.locator).ok_or_else(|| {
            warn!("no grid quadrilateral above the area floor");
            PipelineError::GridNotFound
        })?;
        timing.push("locate", elapsed_ms(stage));
        debug!(
            "grid located: area={:.0}px² corners={:?}",
            located.area, located.quad.corners
        );

        // Flatten the grid; keep the inverse mapping for the overlay.
        let stage = Instant::now();
        let forward = PerspectiveTransform::quad_to_canvas(&located.quad, side, side)
            .ok_or_else(|| PipelineError::Internal("degenerate grid quadrilateral".into()))?;
        let inverse = PerspectiveTransform::canvas_to_quad(&located.quad, side, side)
            .ok_or_else(|| PipelineError::Internal("degenerate grid quadrilateral".into()))?;
        let flat = warp_gray(&gray, &forward, side, side);
        timing.push("normalize", elapsed_ms(stage));

        // Segment into 81 cells.
        let stage = Instant::now();
        let cell_images = cells::split_cells(&flat)
            .ok_or_else(|| PipelineError::Internal("canvas not divisible by 9".into()))?;
        timing.push("segment", elapsed_ms(stage));

        // Classify.
        let stage = Instant::now();
        let recognized = self
            .params
            .cell_adapter
            .recognize(&cell_images, classifier)
            .ok_or_else(|| PipelineError::Internal("classifier emitted a bad digit".into()))?;
        timing.push("classify", elapsed_ms(stage));
        debug!("recognized board:\n{recognized}");

        // Solve.
        let stage = Instant::now();
        let solver = Solver::new(self.params.solver);
        let solved = solver.solve(&recognized).map_err(|e| match e {
            SolveError::Unsolvable => PipelineError::Unsolvable,
            SolveError::BudgetExceeded => PipelineError::BudgetExceeded,
        })?;
        timing.push("solve", elapsed_ms(stage));

        // Overlay the newly solved digits onto the photo geometry.
        let stage = Instant::now();
        let mask = recognized.empty_mask();
        let digits_canvas = render_digits(&solved, &mask, side, side);
        let warped = warp_rgb(&digits_canvas, &inverse, side, side);
        let overlay = composite(&warped, &base, &self.params.blend);
        timing.push("overlay", elapsed_ms(stage));

        timing.total_ms = elapsed_ms(run_start);
        debug!("pipeline done in {:.1}ms", timing.total_ms);

        Ok(SolveReport {
            recognized,
            solved,
            quad: located.quad,
            grid_area: located.area,
            timing,
            overlay,
        })
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1e3
}
