//! Application and member-task lookups behind the member API

use async_trait::async_trait;
use shared::models::MemberTask;
use sqlx::PgPool;

use super::{RepoResult, app, member_task};

/// Read access the member handlers need besides the import store
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn app_exists(&self, app_id: &str) -> RepoResult<bool>;

    /// Tasks of one member ordered by `created_at`; empty for an unknown member
    async fn member_tasks(&self, app_id: &str, member_id: &str) -> RepoResult<Vec<MemberTask>>;
}

#[derive(Clone)]
pub struct PgMemberDirectory {
    pool: PgPool,
}

impl PgMemberDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberDirectory for PgMemberDirectory {
    async fn app_exists(&self, app_id: &str) -> RepoResult<bool> {
        Ok(app::exists(&self.pool, app_id).await?)
    }

    async fn member_tasks(&self, app_id: &str, member_id: &str) -> RepoResult<Vec<MemberTask>> {
        Ok(member_task::list_for_member(&self.pool, app_id, member_id).await?)
    }
}
