use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::person::PersonError;
use thiserror::Error;
use tracing::{debug, error};

/// Service failure on its way out of a handler.
///
/// Only the status code reaches the client; the message goes to the log.
#[derive(Debug)]
pub struct ApiError(pub PersonError);

impl From<PersonError> for ApiError {
    fn from(e: PersonError) -> Self { Self(e) }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PersonError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            PersonError::NotFound(_) => StatusCode::NOT_FOUND,
            PersonError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "person request failed");
        } else {
            debug!(code = self.0.code(), error = %self.0, "person request rejected");
        }
        status.into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
