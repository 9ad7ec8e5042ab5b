//! Unified service-layer error type for member-hub
//!
//! `ServiceError` bridges DB-layer errors (`RepoError`) and
//! import failures to the API-layer error (`AppError`), so handlers can use
//! `?` throughout.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::RepoError;
use crate::import::ImportError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: Business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ImportError> for ServiceError {
    fn from(e: ImportError) -> Self {
        let message = e.to_string();
        let app_error = match e {
            ImportError::MissingHeader => {
                AppError::with_message(ErrorCode::ImportHeaderMissing, message)
            }
            ImportError::MissingIdColumn => {
                AppError::with_message(ErrorCode::ImportIdColumnMissing, message)
                    .with_detail("expected", "id")
            }
            ImportError::Store(err) => {
                tracing::error!(error = %err, "Member import aborted by storage failure");
                AppError::new(ErrorCode::ImportAborted)
            }
        };
        ServiceError::App(app_error)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn app_error(e: impl Into<ServiceError>) -> AppError {
        let err: ServiceError = e.into();
        err.into()
    }

    #[test]
    fn test_import_errors_map_to_import_codes() {
        assert_eq!(
            app_error(ImportError::MissingHeader).code,
            ErrorCode::ImportHeaderMissing
        );
        let err = app_error(ImportError::MissingIdColumn);
        assert_eq!(err.code, ErrorCode::ImportIdColumnMissing);
        assert_eq!(err.message, "header row has no column mapped to 'id'");

        let err = app_error(ImportError::Store(RepoError::Unavailable("down".into())));
        assert_eq!(err.code, ErrorCode::ImportAborted);
    }

    #[test]
    fn test_db_errors_are_hidden_behind_internal_error() {
        let err = app_error(RepoError::Database("syntax error at or near".into()));
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");
    }
}
