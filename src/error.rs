//! Error taxonomy for the photo-to-solution pipeline.
//!
//! Every stage fails fast with one of these variants; the HTTP boundary maps
//! them to status codes and keeps diagnostic detail on the server side.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input bytes are not a decodable raster image.
    #[error("could not decode input image: {0}")]
    Decode(String),

    /// No 4-vertex contour above the configured area floor.
    #[error("no sudoku grid found in the image")]
    GridNotFound,

    /// Backtracking exhausted every candidate at the root.
    #[error("recognized puzzle has no solution")]
    Unsolvable,

    /// The solver hit its step budget before concluding either way.
    #[error("solver step budget exhausted before the search concluded")]
    BudgetExceeded,

    /// The digit classifier could not be initialized.
    #[error("digit model unavailable: {0}")]
    ModelUnavailable(String),

    /// Any other fault. The message is for server-side logs, not clients.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// True for faults caused by the submitted image rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::GridNotFound | Self::Unsolvable | Self::BudgetExceeded
        )
    }
}
