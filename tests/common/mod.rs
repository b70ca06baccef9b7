pub mod synthetic;

use sudoku_vision::classify::{CLASS_COUNT, DigitClassifier};

/// Classifier stub that reads every cell as blank with full confidence.
///
/// Lets end-to-end tests exercise the geometric stages and the solver
/// without a trained model: an all-blank recognized board is the blank
/// puzzle, which the solver completes deterministically.
pub struct BlankClassifier;

impl DigitClassifier for BlankClassifier {
    fn input_side(&self) -> usize {
        32
    }

    fn scores(&self, _input: &[f32]) -> [f32; CLASS_COUNT] {
        let mut scores = [0.0; CLASS_COUNT];
        scores[0] = 1.0;
        scores
    }
}
