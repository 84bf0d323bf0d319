use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    InvalidId(String),
    MissingField(String),
    CodeAlreadyExists(String),
    ProductNotFound(String),
    CartNotFound(String),
    Internal(String),
}

impl HttpError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            HttpError::InvalidId(_) => (StatusCode::BAD_REQUEST, "INVALID_ID"),
            HttpError::MissingField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            HttpError::CodeAlreadyExists(_) => (StatusCode::BAD_REQUEST, "CODE_ALREADY_EXISTS"),
            HttpError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND"),
            HttpError::CartNotFound(_) => (StatusCode::NOT_FOUND, "CART_NOT_FOUND"),
            HttpError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::MissingField(errors.join("; ")),

            ServiceError::InvalidId(msg) => HttpError::InvalidId(msg),

            ServiceError::ProductNotFound => {
                HttpError::ProductNotFound("Product not found".to_string())
            }

            ServiceError::CartNotFound => HttpError::CartNotFound("Cart not found".to_string()),

            ServiceError::ProductNotInCart => {
                HttpError::ProductNotFound("Product not found in cart".to_string())
            }

            ServiceError::DuplicateCode(code) => {
                HttpError::CodeAlreadyExists(format!("Product code '{code}' already exists"))
            }

            ServiceError::Repo(RepositoryError::AlreadyExists(msg)) => {
                HttpError::CodeAlreadyExists(msg)
            }

            // Storage failures never leak detail to the client.
            ServiceError::Repo(repo_err) => {
                error!("❌ Repository error reached the boundary: {repo_err:?}");
                HttpError::Internal("Internal server error".to_string())
            }

            ServiceError::Internal(msg) => {
                error!("❌ Internal error reached the boundary: {msg}");
                HttpError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            HttpError::InvalidId(msg)
            | HttpError::MissingField(msg)
            | HttpError::CodeAlreadyExists(msg)
            | HttpError::ProductNotFound(msg)
            | HttpError::CartNotFound(msg)
            | HttpError::Internal(msg) => msg,
        };

        let body = Json(ErrorResponse::new(code, message));

        (status, body).into_response()
    }
}
