//! Result and per-stage timing types returned by the pipeline.

use crate::image::RgbImage;
use crate::solver::Board;
use crate::types::Quad;
use serde::Serialize;

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Aggregated timing trace of one run, in execution order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }
}

/// Everything one pipeline run produces.
///
/// The images are skipped during serialization; the CLI writes them as PNG
/// and the HTTP boundary base64-encodes them separately.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    /// Classifier output; 0 marks cells read as empty.
    pub recognized: Board,
    /// Completed board satisfying all constraints.
    pub solved: Board,
    /// Located grid corners in canonical order, canvas-input coordinates.
    pub quad: Quad,
    /// Enclosed area of the winning contour, px².
    pub grid_area: f32,
    pub timing: TimingBreakdown,
    /// Solution ghost-composited onto the (resized) input photo.
    #[serde(skip)]
    pub overlay: RgbImage,
}
