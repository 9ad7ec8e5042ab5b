//! Category / tag / property definitions of an application

use shared::models::{Category, Property, Tag};
use sqlx::PgPool;

pub async fn list_categories(pool: &PgPool, app_id: &str) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as("SELECT id, app_id, name FROM category WHERE app_id = $1 ORDER BY id")
        .bind(app_id)
        .fetch_all(pool)
        .await
}

pub async fn list_tags(pool: &PgPool, app_id: &str) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as("SELECT id, app_id, name FROM tag WHERE app_id = $1 ORDER BY id")
        .bind(app_id)
        .fetch_all(pool)
        .await
}

pub async fn list_properties(pool: &PgPool, app_id: &str) -> Result<Vec<Property>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, app_id, name, placeholder FROM property WHERE app_id = $1 ORDER BY id",
    )
    .bind(app_id)
    .fetch_all(pool)
    .await
}
