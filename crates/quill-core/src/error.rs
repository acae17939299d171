//! Error types shared across the domain layer.

use thiserror::Error;

/// Repository-level errors.
///
/// `Conflict` is its own variant so callers can tell a uniqueness violation
/// (email or post title already taken) apart from a generic storage failure
/// and roll back to a flash message instead of failing the request outright.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Uniqueness conflict: {0}")]
    Conflict(String),
}
