//! Applications (member owners)

use sqlx::PgPool;

/// Whether an application with this id exists
pub async fn exists(pool: &PgPool, app_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT id FROM app WHERE id = $1")
        .bind(app_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}
