//! HTTP-facing error type.
//!
//! Every error is answered with an HTML page, never a bare error string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::ValidationError;
use crate::web::ErrorPage;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request path could not be resolved.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// `400 Bad Request` for invalid segments, `500` for unparseable input.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(e) => {
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::BAD_REQUEST)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let page = match &self {
            AppError::Validation(e) => ErrorPage::from_validation(e),
        };

        (status, page).into_response()
    }
}
