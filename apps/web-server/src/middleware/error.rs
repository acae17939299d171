//! Request-scoped error handling.
//!
//! Nothing here is fatal to the process. A missing entity renders the 404
//! page; an unexpected storage failure is logged and the user lands back on
//! the front page with a flash. Conflicts and validation failures never
//! reach this type - handlers deal with those inline so they can re-render
//! the form the user was on.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use std::fmt;

use quill_core::error::RepoError;
use quill_shared::Flash;

use crate::session;
use crate::views;

#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound => write!(f, "Not found"),
            PageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::NotFound => StatusCode::NOT_FOUND,
            PageError::Internal(_) => StatusCode::SEE_OTHER,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            PageError::NotFound => HttpResponse::NotFound()
                .content_type(ContentType::html())
                .body(views::not_found_page()),
            PageError::Internal(msg) => {
                tracing::error!("Storage error: {}", msg);
                session::redirect_with_flash("/", Flash::StorageError)
            }
        }
    }
}

impl From<RepoError> for PageError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => PageError::NotFound,
            other => PageError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type PageResult<T> = Result<T, PageError>;
