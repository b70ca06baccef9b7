//! HTTP request handlers.

use super::AppState;
use super::types::{ErrorBody, HealthResponse, SolveResponse};
use crate::error::PipelineError;
use crate::image::io::encode_png;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /solve_sudoku` — multipart `image` field in, solved board plus
/// base64 PNG overlay out.
pub async fn solve_sudoku(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SolveResponse>, (StatusCode, Json<ErrorBody>)> {
    let Some(classifier) = state.classifier.clone() else {
        return Err(error_response(&PipelineError::ModelUnavailable(
            "not loaded at startup".into(),
        )));
    };

    let mut image_bytes = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        client_error(format!("malformed multipart body: {e}"))
    })? {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| client_error(format!("could not read image field: {e}")))?;
            image_bytes = Some(bytes);
            break;
        }
    }
    let Some(bytes) = image_bytes else {
        return Err(client_error("no image file provided in the 'image' field".into()));
    };
    debug!("solve request: {} bytes", bytes.len());

    // The pipeline is CPU-bound; keep it off the async workers.
    let pipeline = state.pipeline.clone();
    let report = tokio::task::spawn_blocking(move || {
        pipeline.process_bytes(&bytes, classifier.as_ref())
    })
    .await
    .map_err(|e| error_response(&PipelineError::Internal(format!("worker panicked: {e}"))))?
    .map_err(|e| error_response(&e))?;

    let png = encode_png(&report.overlay).map_err(|e| error_response(&e))?;
    Ok(Json(SolveResponse {
        solved_board: report.solved,
        solved_image: BASE64.encode(png),
    }))
}

/// Map the error taxonomy onto status codes. Client faults surface their
/// message; internal faults are logged in full and reported generically.
pub fn error_response(err: &PipelineError) -> (StatusCode, Json<ErrorBody>) {
    let (status, message) = match err {
        PipelineError::Decode(_)
        | PipelineError::GridNotFound
        | PipelineError::Unsolvable
        | PipelineError::BudgetExceeded => (StatusCode::BAD_REQUEST, err.to_string()),
        PipelineError::ModelUnavailable(detail) => {
            warn!("model unavailable: {detail}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "digit model unavailable".to_string(),
            )
        }
        PipelineError::Internal(detail) => {
            warn!("internal pipeline error: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "unexpected error during processing".to_string(),
            )
        }
    };
    if err.is_client_error() {
        debug!("request rejected: {err}");
    }
    (status, Json(ErrorBody { error: message }))
}

fn client_error(message: String) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_documented_status_codes() {
        let cases = [
            (PipelineError::Decode("x".into()), StatusCode::BAD_REQUEST),
            (PipelineError::GridNotFound, StatusCode::BAD_REQUEST),
            (PipelineError::Unsolvable, StatusCode::BAD_REQUEST),
            (PipelineError::BudgetExceeded, StatusCode::BAD_REQUEST),
            (
                PipelineError::ModelUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                PipelineError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(error_response(&err).0, expected, "{err}");
        }
    }

    #[test]
    fn internal_detail_never_reaches_the_client() {
        let (_, body) = error_response(&PipelineError::Internal("secret path /x".into()));
        assert!(!body.error.contains("secret"));
    }
}
