//! Handler errors and their HTTP rendering.
//!
//! # Design
//! Every failure a handler can hit maps to one `ApiError` variant. The
//! variant decides the status code, the stable machine-readable `code` and
//! the human-readable `message`; the underlying cause only ever reaches the
//! client as its `Display` text in the optional `error` field.
//!
//! Store failures carry the operation that failed because the status code
//! depends on it: a failed insert answers 406, every other store failure 400.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::{ErrorBody, ValidationError};
use tracing::{error, warn};

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body was not a decodable JSON payload.
    #[error("failed to decode user request")]
    Decode(String),

    #[error("failed to query through database")]
    List(#[source] StoreError),

    #[error("failed to insert new record to the database")]
    Insert(#[source] StoreError),

    #[error("failed to update your selected id")]
    Update(#[source] StoreError),

    #[error("failed to remove selected record")]
    Delete(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Insert(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Validation(_)
            | ApiError::Decode(_)
            | ApiError::List(_)
            | ApiError::Update(_)
            | ApiError::Delete(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(ValidationError::TitleRequired) => "title_required",
            ApiError::Validation(ValidationError::InvalidId) => "invalid_id",
            ApiError::Decode(_) => "invalid_body",
            ApiError::List(_) => "store_query_failed",
            ApiError::Insert(_) => "store_insert_failed",
            ApiError::Update(_) => "store_update_failed",
            ApiError::Delete(_) => "store_delete_failed",
        }
    }

    /// Text of the underlying cause, if there is one worth reporting.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Validation(_) => None,
            ApiError::Decode(reason) => Some(reason.clone()),
            ApiError::List(e) | ApiError::Insert(e) | ApiError::Update(e) | ApiError::Delete(e) => {
                Some(e.to_string())
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            code: self.code().to_string(),
            error: self.detail(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        match &self {
            ApiError::Validation(_) | ApiError::Decode(_) => {
                warn!(code = %body.code, detail = ?body.error, "{}", body.message);
            }
            _ => {
                error!(code = %body.code, detail = ?body.error, "{}", body.message);
            }
        }
        (self.status(), Json(body)).into_response()
    }
}
