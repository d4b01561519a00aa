//! Repository Module
//!
//! CRUD operations over the SQLite tables, one statement per call.

pub mod product;

pub use product::ProductRepository;

use shared::error::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Timed out waiting for the database: {0}")]
    Timeout(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut => RepoError::Timeout(err.to_string()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            // Only products live here; a row vanishing mid-request reads as not-found
            RepoError::NotFound(_) => AppError::product_not_found(),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Timeout(msg) => AppError::timeout(msg),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
