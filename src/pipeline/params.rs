//! Parameter types configuring the pipeline stages.
//!
//! Defaults are the production constants (450px canvas, 11/2 threshold,
//! 4px cell margin, 0.7 confidence gate). Everything is
//! serde-deserializable so a partial JSON config overlays the defaults.

use crate::classify::CellAdapter;
use crate::locator::LocatorParams;
use crate::overlay::BlendPolicy;
use crate::solver::SolverParams;
use serde::Deserialize;

/// Pipeline-wide parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Side length of the square working canvas. Must divide by 9.
    pub canvas_size: usize,
    /// Adaptive threshold neighborhood side (odd).
    pub threshold_block: usize,
    /// Adaptive threshold offset below the neighborhood mean.
    pub threshold_offset: i32,
    /// Contour-to-quad selection thresholds.
    pub locator: LocatorParams,
    /// Cell margin / classifier confidence policy.
    pub cell_adapter: CellAdapter,
    /// Backtracking limits.
    pub solver: SolverParams,
    /// Overlay composite weights.
    pub blend: BlendPolicy,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            canvas_size: 450,
            threshold_block: 11,
            threshold_offset: 2,
            locator: LocatorParams::default(),
            cell_adapter: CellAdapter::default(),
            solver: SolverParams::default(),
            blend: BlendPolicy::default(),
        }
    }
}

impl PipelineParams {
    /// Reject parameter combinations the stages cannot operate on.
    pub fn validate(&self) -> Result<(), String> {
        if self.canvas_size == 0 || self.canvas_size % 9 != 0 {
            return Err(format!(
                "canvas size {} is not divisible by 9",
                self.canvas_size
            ));
        }
        if self.threshold_block % 2 == 0 || self.threshold_block == 0 {
            return Err(format!(
                "threshold block {} must be odd",
                self.threshold_block
            ));
        }
        let cell = self.canvas_size / 9;
        if 2 * self.cell_adapter.margin >= cell {
            return Err(format!(
                "cell margin {} leaves no pixels in a {cell}px cell",
                self.cell_adapter.margin
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PipelineParams::default().validate().is_ok());
    }

    #[test]
    fn canvas_must_divide_by_nine() {
        let params = PipelineParams {
            canvas_size: 400,
            ..PipelineParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let mut params = PipelineParams::default();
        params.cell_adapter.margin = 25;
        assert!(params.validate().is_err());
    }
}
