//! Member API handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{ImportResult, MemberTask};

use crate::auth::AppIdentity;
use crate::db::directory::MemberDirectory;
use crate::error::ServiceResult;
use crate::import::{self, RawRow};
use crate::state::AppState;

type ApiResult<T> = ServiceResult<Json<ApiResponse<T>>>;

/// Caller must hold a token for `app_id` and the application must exist
async fn verify_app<D: MemberDirectory>(
    directory: &D,
    identity: &AppIdentity,
    app_id: &str,
) -> Result<(), AppError> {
    identity.verify_app(app_id)?;
    let exists = directory.app_exists(app_id).await.map_err(|e| {
        tracing::error!("App verification error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    if !exists {
        return Err(AppError::new(ErrorCode::AppNotFound).with_detail("app_id", app_id));
    }
    Ok(())
}

async fn member_tasks<D: MemberDirectory>(
    directory: &D,
    identity: &AppIdentity,
    app_id: &str,
    member_id: &str,
) -> ServiceResult<Vec<MemberTask>> {
    verify_app(directory, identity, app_id).await?;
    Ok(directory.member_tasks(app_id, member_id).await?)
}

/// Bound on data rows, the header row excluded
fn check_row_limit(rows: &[RawRow], max_rows: usize) -> Result<(), AppError> {
    let data_rows = rows.len().saturating_sub(1);
    if data_rows > max_rows {
        return Err(AppError::with_message(
            ErrorCode::ImportTooManyRows,
            format!("Import has {data_rows} rows, the limit is {max_rows}"),
        )
        .with_detail("limit", max_rows));
    }
    Ok(())
}

/// POST /api/apps/{app_id}/members/import
pub async fn import_members(
    State(state): State<AppState>,
    Extension(identity): Extension<AppIdentity>,
    Path(app_id): Path<String>,
    Json(rows): Json<Vec<RawRow>>,
) -> ApiResult<ImportResult> {
    verify_app(&state.member_directory(), &identity, &app_id).await?;
    check_row_limit(&rows, state.import_max_rows)?;

    tracing::info!(
        app_id = %app_id,
        subject = %identity.subject,
        rows = rows.len().saturating_sub(1),
        "Member import requested"
    );

    let store = state.import_store();
    let result = import::process_import(&store, &app_id, &rows).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /api/apps/{app_id}/members/{member_id}/tasks
pub async fn list_member_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<AppIdentity>,
    Path((app_id, member_id)): Path<(String, String)>,
) -> ApiResult<Vec<MemberTask>> {
    let directory = state.member_directory();
    let tasks = member_tasks(&directory, &identity, &app_id, &member_id).await?;
    Ok(Json(ApiResponse::success(tasks)))
}
