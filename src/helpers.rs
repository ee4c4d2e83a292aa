use axum::{http::StatusCode, response::Json};
use compute::ComputeError;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Error half of every handler result.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Maps a compute failure to a 500 response carrying its code.
pub fn compute_error_response(context: &str, err: ComputeError) -> HandlerError {
    error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
            success: false,
        }),
    )
}
