//! Digit recognition over segmented cells.
//!
//! The classifier itself is an injected dependency behind the
//! [`DigitClassifier`] trait; the pipeline owns only the *adapter* policy:
//! crop the grid-line margin, resample to the classifier's input square,
//! normalize to [0,1], and accept the argmax class only above a confidence
//! threshold — a low-confidence cell becomes "empty" so the solver fills it
//! rather than inheriting a wrong clue.

pub mod mlp;

pub use mlp::MlpClassifier;

use crate::image::GrayImage;
use crate::solver::Board;
use rayon::prelude::*;
use serde::Deserialize;

/// Number of output classes; class 0 is "blank / unrecognized".
pub const CLASS_COUNT: usize = 10;

/// A digit classifier: normalized `side × side` intensities in, one score
/// per class out. Scores are expected to sum to 1 (softmax output).
///
/// Implementations must be immutable during inference; the pipeline shares
/// one instance across cells and requests.
pub trait DigitClassifier: Send + Sync {
    /// Classifier input side length in pixels.
    fn input_side(&self) -> usize;

    /// Score the classes for one normalized cell.
    fn scores(&self, input: &[f32]) -> [f32; CLASS_COUNT];
}

/// Adapter policy between segmented cells and the classifier.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct CellAdapter {
    /// Border cropped from each cell edge to discard grid-line artifacts.
    pub margin: usize,
    /// Minimum winning-class probability; anything below reads as blank.
    pub confidence_thresh: f32,
}

impl Default for CellAdapter {
    fn default() -> Self {
        Self {
            margin: 4,
            confidence_thresh: 0.7,
        }
    }
}

impl CellAdapter {
    /// Classify one cell sub-image into a digit 0–9.
    pub fn digit(&self, cell: &GrayImage, model: &dyn DigitClassifier) -> u8 {
        let side = model.input_side();
        let input = self.prepare(cell, side);
        let scores = model.scores(&input);

        let (class, prob) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::MIN), |acc, (i, p)| {
                if p > acc.1 { (i, p) } else { acc }
            });
        if prob > self.confidence_thresh {
            class as u8
        } else {
            0
        }
    }

    /// Crop the margin, resample to `side × side` and normalize to [0,1].
    pub fn prepare(&self, cell: &GrayImage, side: usize) -> Vec<f32> {
        let cropped = if 2 * self.margin < cell.w && 2 * self.margin < cell.h {
            cell.crop(
                self.margin,
                self.margin,
                cell.w - 2 * self.margin,
                cell.h - 2 * self.margin,
            )
        } else {
            cell.clone()
        };
        let resized = cropped.resize_bilinear(side, side);
        resized.data.iter().map(|&v| v as f32 / 255.0).collect()
    }

    /// Classify all 81 cells into a recognized board, row-major.
    ///
    /// Cells are independent, so classification fans out over a parallel
    /// iterator; collect restores row-major order.
    pub fn recognize(&self, cells: &[GrayImage], model: &dyn DigitClassifier) -> Option<Board> {
        let digits: Vec<u8> = cells
            .par_iter()
            .map(|cell| self.digit(cell, model))
            .collect();
        Board::from_digits(&digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores the mean intensity bucket: bright cells → class 3, dark → 0.
    struct ThresholdStub {
        confidence: f32,
    }

    impl DigitClassifier for ThresholdStub {
        fn input_side(&self) -> usize {
            32
        }

        fn scores(&self, input: &[f32]) -> [f32; CLASS_COUNT] {
            let mean = input.iter().sum::<f32>() / input.len() as f32;
            let mut out = [0.0; CLASS_COUNT];
            let class = if mean > 0.5 { 3 } else { 0 };
            out[class] = self.confidence;
            out
        }
    }

    fn flat_cell(value: u8) -> GrayImage {
        GrayImage::from_raw(50, 50, vec![value; 2500]).unwrap()
    }

    #[test]
    fn confident_prediction_is_kept() {
        let adapter = CellAdapter::default();
        let model = ThresholdStub { confidence: 0.95 };
        assert_eq!(adapter.digit(&flat_cell(250), &model), 3);
        assert_eq!(adapter.digit(&flat_cell(10), &model), 0);
    }

    #[test]
    fn low_confidence_prediction_reads_as_blank() {
        let adapter = CellAdapter::default();
        let model = ThresholdStub { confidence: 0.5 };
        assert_eq!(adapter.digit(&flat_cell(250), &model), 0);
    }

    #[test]
    fn prepare_crops_and_normalizes() {
        let adapter = CellAdapter::default();
        let input = adapter.prepare(&flat_cell(255), 32);
        assert_eq!(input.len(), 32 * 32);
        assert!(input.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn recognize_builds_a_row_major_board() {
        let adapter = CellAdapter::default();
        let model = ThresholdStub { confidence: 0.9 };
        let mut cells = vec![flat_cell(0); 81];
        cells[10] = flat_cell(255); // row 1, col 1
        let board = adapter.recognize(&cells, &model).unwrap();
        assert_eq!(board.get(1, 1), 3);
        assert_eq!(board.get(0, 0), 0);
    }
}
