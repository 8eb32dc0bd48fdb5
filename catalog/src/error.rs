use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// Body of every error response: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new<S: Into<String>>(error: S) -> Self {
        ErrorBody { error: error.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input. Name, Price, and Quantity are required fields.")]
    InvalidInput,
    #[error("Price must be positive, and Quantity cannot be negative.")]
    InvalidValues,
    #[error("Product not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<mediator::Error> for ApiError {
    fn from(err: mediator::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::InvalidValues => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Internal(err) => {
                log::error!("Request failed: {:#}", err);
                ErrorBody::new("Internal server error")
            }
            other => ErrorBody::new(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
