#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classify;
pub mod config;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod server;
pub mod solver;
pub mod types;

// Stage internals – public for tools and tests, unstable as an API.
pub mod cells;
pub mod homography;
pub mod locator;
pub mod overlay;
pub mod preprocess;

// --- High-level re-exports -------------------------------------------------

pub use crate::classify::{CellAdapter, DigitClassifier, MlpClassifier};
pub use crate::error::PipelineError;
pub use crate::pipeline::{PipelineParams, SolveReport, SudokuPipeline};
pub use crate::solver::{Board, SolveError, Solver, SolverParams};
pub use crate::types::Quad;

/// Small prelude for quick experiments.
///
/// ```
/// use sudoku_vision::prelude::*;
///
/// let solver = Solver::new(SolverParams::default());
/// let solved = solver.solve(&Board::empty()).unwrap();
/// assert!(solved.is_complete_solution());
/// ```
pub mod prelude {
    pub use crate::classify::DigitClassifier;
    pub use crate::{
        Board, PipelineError, PipelineParams, SolveReport, Solver, SolverParams, SudokuPipeline,
    };
}
