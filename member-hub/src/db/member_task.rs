//! Member tasks (read-only)

use shared::models::MemberTask;
use sqlx::PgPool;

/// Tasks of one member, oldest first; unknown members have none
pub async fn list_for_member(
    pool: &PgPool,
    app_id: &str,
    member_id: &str,
) -> Result<Vec<MemberTask>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, app_id, member_id, title, description, priority, status, due_at, created_at
         FROM member_task
         WHERE app_id = $1 AND member_id = $2
         ORDER BY created_at, id",
    )
    .bind(app_id)
    .bind(member_id)
    .fetch_all(pool)
    .await
}
