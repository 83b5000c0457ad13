use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::TripcastError;

impl IntoResponse for TripcastError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        }

        let body = match self {
            TripcastError::Upstream {
                body: Some(body), ..
            } => body,
            other => json!({ "error": other.user_message() }),
        };

        (status, Json(body)).into_response()
    }
}
