use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::{data::validation::ValidationError, db::store::StoreError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(e) => json!({ "message": self.to_string(), "errors": e.issues }),
            ApiError::Store(e) => {
                log::error!("store failure: {}", e);
                json!({ "message": self.to_string() })
            }
            ApiError::NotFound(_) => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::NotFound("User").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound("User").to_string(), "User not found");

        let invalid = ApiError::from(ValidationError::single("email", "format", "bad email"));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "Validation failed: bad email");

        assert_eq!(ApiError::from(StoreError::Poisoned).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
