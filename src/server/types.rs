//! JSON bodies exchanged with the HTTP boundary.

use crate::solver::Board;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Success payload of `POST /solve_sudoku`.
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    /// Fully solved 9×9 board, row-major.
    pub solved_board: Board,
    /// Base64-encoded PNG of the solution overlaid onto the input photo.
    pub solved_image: String,
}

/// Failure payload; the message is always safe to show a client.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
