use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokio::task::JoinError;
use tracing::error;
use wayfinder_core::Error;

/// Failure carried to an HTTP response
#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    /// A blocking search task panicked or was cancelled
    Worker(JoinError),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Core(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::Worker(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Worker(err) => write!(f, "Search task failed: {err}"),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(Error::UnknownLocation(_)) => StatusCode::NOT_FOUND,
            Self::Core(
                Error::DegenerateQuery(_) | Error::InvalidWeight { .. } | Error::InvalidData(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Core(Error::IoError(_) | Error::CsvError(_) | Error::LockPoisoned)
            | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
