//! Member persistence for imports
//!
//! [`PgImportStore`] hands out one [`PgImportTx`] per import row; dropping a
//! `PgImportTx` without `commit` rolls the row back.

use async_trait::async_trait;
use shared::models::{
    Category, Member, MemberCategory, MemberPhone, MemberProperty, MemberTag, Property, Tag,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::{PgPool, Postgres, Transaction};

use super::{RepoResult, definition};
use crate::import::{CategorySlot, ImportStore, ImportTx};

#[derive(Clone)]
pub struct PgImportStore {
    pool: PgPool,
}

impl PgImportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportStore for PgImportStore {
    type Tx = PgImportTx;

    async fn list_categories(&self, app_id: &str) -> RepoResult<Vec<Category>> {
        Ok(definition::list_categories(&self.pool, app_id).await?)
    }

    async fn list_tags(&self, app_id: &str) -> RepoResult<Vec<Tag>> {
        Ok(definition::list_tags(&self.pool, app_id).await?)
    }

    async fn list_properties(&self, app_id: &str) -> RepoResult<Vec<Property>> {
        Ok(definition::list_properties(&self.pool, app_id).await?)
    }

    async fn begin(&self) -> RepoResult<PgImportTx> {
        let tx = self.pool.begin().await?;
        Ok(PgImportTx { tx })
    }
}

pub struct PgImportTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ImportTx for PgImportTx {
    async fn find_member(&mut self, app_id: &str, member_id: &str) -> RepoResult<Option<Member>> {
        let member = sqlx::query_as(
            "SELECT app_id, id, name, username, email, role, star, created_at, logined_at, updated_at
             FROM member WHERE app_id = $1 AND id = $2",
        )
        .bind(app_id)
        .bind(member_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(member)
    }

    async fn save_member(&mut self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO member (app_id, id, name, username, email, role, star, created_at, logined_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (app_id, id) DO UPDATE SET
                name = EXCLUDED.name,
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                role = EXCLUDED.role,
                star = EXCLUDED.star,
                created_at = EXCLUDED.created_at,
                logined_at = EXCLUDED.logined_at,
                updated_at = EXCLUDED.updated_at",
        )
        .bind(&member.app_id)
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.username)
        .bind(&member.email)
        .bind(&member.role)
        .bind(member.star)
        .bind(member.created_at)
        .bind(member.logined_at)
        .bind(member.updated_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn list_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberPhone>> {
        let rows = sqlx::query_as(
            "SELECT id, app_id, member_id, phone FROM member_phone
             WHERE app_id = $1 AND member_id = $2 ORDER BY id",
        )
        .bind(app_id)
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn delete_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
        ids: &[i64],
    ) -> RepoResult<()> {
        sqlx::query("DELETE FROM member_phone WHERE app_id = $1 AND member_id = $2 AND id = ANY($3)")
            .bind(app_id)
            .bind(member_id)
            .bind(ids)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
        phones: &[String],
    ) -> RepoResult<()> {
        for phone in phones {
            sqlx::query(
                "INSERT INTO member_phone (id, app_id, member_id, phone) VALUES ($1, $2, $3, $4)",
            )
            .bind(snowflake_id())
            .bind(app_id)
            .bind(member_id)
            .bind(phone)
            .execute(&mut *self.tx)
            .await?;
        }
        Ok(())
    }

    async fn list_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberCategory>> {
        let rows = sqlx::query_as(
            "SELECT id, app_id, member_id, category_id, position FROM member_category
             WHERE app_id = $1 AND member_id = $2 ORDER BY position, id",
        )
        .bind(app_id)
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn delete_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
        ids: &[i64],
    ) -> RepoResult<()> {
        sqlx::query(
            "DELETE FROM member_category WHERE app_id = $1 AND member_id = $2 AND id = ANY($3)",
        )
        .bind(app_id)
        .bind(member_id)
        .bind(ids)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
        slots: &[CategorySlot],
    ) -> RepoResult<()> {
        for slot in slots {
            sqlx::query(
                "INSERT INTO member_category (id, app_id, member_id, category_id, position)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(snowflake_id())
            .bind(app_id)
            .bind(member_id)
            .bind(slot.category_id)
            .bind(slot.position)
            .execute(&mut *self.tx)
            .await?;
        }
        Ok(())
    }

    async fn list_tags(&mut self, app_id: &str, member_id: &str) -> RepoResult<Vec<MemberTag>> {
        let rows = sqlx::query_as(
            "SELECT id, app_id, member_id, tag_id FROM member_tag
             WHERE app_id = $1 AND member_id = $2 ORDER BY id",
        )
        .bind(app_id)
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn delete_tags(&mut self, app_id: &str, member_id: &str, ids: &[i64]) -> RepoResult<()> {
        sqlx::query("DELETE FROM member_tag WHERE app_id = $1 AND member_id = $2 AND id = ANY($3)")
            .bind(app_id)
            .bind(member_id)
            .bind(ids)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_tags(
        &mut self,
        app_id: &str,
        member_id: &str,
        tag_ids: &[i64],
    ) -> RepoResult<()> {
        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO member_tag (id, app_id, member_id, tag_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(snowflake_id())
            .bind(app_id)
            .bind(member_id)
            .bind(tag_id)
            .execute(&mut *self.tx)
            .await?;
        }
        Ok(())
    }

    async fn list_properties(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberProperty>> {
        let rows = sqlx::query_as(
            "SELECT id, app_id, member_id, property_id, value FROM member_property
             WHERE app_id = $1 AND member_id = $2",
        )
        .bind(app_id)
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn upsert_property(
        &mut self,
        app_id: &str,
        member_id: &str,
        property_id: i64,
        value: &str,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO member_property (id, app_id, member_id, property_id, value, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (app_id, member_id, property_id) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at",
        )
        .bind(snowflake_id())
        .bind(app_id)
        .bind(member_id)
        .bind(property_id)
        .bind(value)
        .bind(now_millis())
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self) -> RepoResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
