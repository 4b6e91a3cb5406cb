use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::face::encoder::EncoderError;
use crate::face::image::ImageError;

/// Failures that abort a request. Recognition outcomes such as "no face" are
/// not errors; they travel in the normal response body.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    InvalidImage(ImageError),
    #[display(fmt = "{}", _0)]
    FaceService(EncoderError),
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidImage(_) => "invalid_image",
            AppError::FaceService(_) => "face_service_unavailable",
            AppError::Database(_) => "internal_error",
        }
    }
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        AppError::InvalidImage(e)
    }
}

impl From<EncoderError> for AppError {
    fn from(e: EncoderError) -> Self {
        AppError::FaceService(e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            AppError::FaceService(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::InvalidImage(e) => e.to_string(),
            AppError::FaceService(e) => {
                error!(error = %e, "Face service call failed");
                "Face recognition is temporarily unavailable".to_string()
            }
            AppError::Database(e) => {
                error!(error = %e, "Database error");
                "Internal Server Error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "message": message,
            "code": self.code(),
        }))
    }
}
