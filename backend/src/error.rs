use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::error::{ErrorResponse, STORAGE_ERROR, VOTE_NOT_FOUND};
use thiserror::Error;
use tracing::error;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Vote not found")]
    NotFound,
    #[error("Storage error")]
    Storage,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::NotFound => Status::NotFound,
            ApiError::Storage => Status::InternalServerError,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::BadRequest(message) => ErrorResponse::new(message.as_str()),
            ApiError::NotFound => ErrorResponse::new(VOTE_NOT_FOUND),
            ApiError::Storage => ErrorResponse::new(STORAGE_ERROR),
            ApiError::Internal(_) => ErrorResponse::new("Internal server error"),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => ApiError::BadRequest(e.to_string()),
            StoreError::NotFound(_) => ApiError::NotFound,
            e @ StoreError::IdsExhausted(_) => ApiError::Internal(e.to_string()),
            StoreError::Persistence(e) => {
                error!("Failed to persist vote store: {}", e);
                ApiError::Storage
            }
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        if let ApiError::Internal(detail) = &self {
            error!("Internal error while serving {}: {}", req.uri(), detail);
        }

        rocket::Response::build_from(Json(self.body()).respond_to(req)?)
            .status(self.status())
            .ok()
    }
}
