//! Database access layer

pub mod app;
pub mod definition;
pub mod directory;
pub mod member;
pub mod member_task;

use thiserror::Error;

/// Repository error
///
/// `Unavailable` marks failures of the store itself (connection lost, pool
/// exhausted, protocol breakage). Everything else is a problem with one
/// statement and leaves the store usable.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

impl RepoError {
    /// Whether the store as a whole is unusable
    pub fn is_systemic(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(db.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
