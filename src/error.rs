use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::dto::ErrorDto;
use crate::video::InvalidInput;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL or video_id is required")]
    MissingInput,

    #[error("Invalid YouTube URL or video ID")]
    InvalidInput(#[from] InvalidInput),

    /// Provider failures are passed through with their own message.
    #[error("{0}")]
    Provider(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingInput | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDto {
            error: self.to_string(),
        })
    }
}
