mod common;

use common::BlankClassifier;
use common::synthetic::{flat_grid_photo, skewed_grid_photo};
use sudoku_vision::error::PipelineError;
use sudoku_vision::image::io::encode_png;
use sudoku_vision::pipeline::{PipelineParams, SudokuPipeline};
use sudoku_vision::solver::Board;

fn pipeline() -> SudokuPipeline {
    SudokuPipeline::new(PipelineParams::default()).expect("default params validate")
}

#[test]
fn flat_photo_runs_the_full_pipeline() {
    let photo = flat_grid_photo(450, 40);
    let report = pipeline()
        .process_image(&photo, &BlankClassifier)
        .expect("pipeline succeeds");

    // All cells blank ⇒ the recognized board is empty and the solver
    // produced some valid completion.
    assert_eq!(report.recognized, Board::empty());
    assert!(report.solved.is_complete_solution());

    // The located quad must hug the drawn frame (inset 40, 5px stroke).
    let [tl, tr, bl, br] = report.quad.corners;
    for (corner, expected) in [
        (tl, [40.0, 40.0]),
        (tr, [410.0, 40.0]),
        (bl, [40.0, 410.0]),
        (br, [410.0, 410.0]),
    ] {
        assert!(
            (corner[0] - expected[0]).abs() < 8.0 && (corner[1] - expected[1]).abs() < 8.0,
            "corner {corner:?} vs {expected:?}"
        );
    }

    // Overlay matches the working canvas and carries drawn digits.
    assert_eq!((report.overlay.w, report.overlay.h), (450, 450));
    assert!(report.timing.total_ms >= 0.0);
    assert_eq!(report.timing.stages.len(), 7);
}

#[test]
fn skewed_photo_is_rectified_before_solving() {
    let corners = [[62.0, 55.0], [398.0, 48.0], [55.0, 402.0], [405.0, 396.0]];
    let photo = skewed_grid_photo(450, corners);
    let report = pipeline()
        .process_image(&photo, &BlankClassifier)
        .expect("pipeline succeeds");

    assert!(report.solved.is_complete_solution());
    for (got, expected) in report.quad.corners.iter().zip(&corners) {
        assert!(
            (got[0] - expected[0]).abs() < 8.0 && (got[1] - expected[1]).abs() < 8.0,
            "corner {got:?} vs {expected:?}"
        );
    }
}

#[test]
fn encoded_bytes_round_trip_through_the_codec_boundary() {
    let photo = flat_grid_photo(450, 40);
    let bytes = encode_png(&photo).unwrap();
    let report = pipeline()
        .process_bytes(&bytes, &BlankClassifier)
        .expect("pipeline succeeds on encoded input");
    assert!(report.solved.is_complete_solution());
}

#[test]
fn garbage_bytes_report_a_decode_error() {
    let err = pipeline()
        .process_bytes(b"definitely not an image", &BlankClassifier)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
}

#[test]
fn gridless_photo_reports_grid_not_found() {
    let photo = sudoku_vision::image::RgbImage::new(450, 450);
    let err = pipeline()
        .process_image(&photo, &BlankClassifier)
        .unwrap_err();
    assert!(matches!(err, PipelineError::GridNotFound));
}

#[test]
fn identical_input_produces_identical_reports() {
    let photo = flat_grid_photo(450, 40);
    let p = pipeline();
    let a = p.process_image(&photo, &BlankClassifier).unwrap();
    let b = p.process_image(&photo, &BlankClassifier).unwrap();
    assert_eq!(a.solved, b.solved);
    assert_eq!(a.recognized, b.recognized);
    assert_eq!(a.overlay, b.overlay);
}
