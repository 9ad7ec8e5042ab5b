//! Storage seam for the import engine
//!
//! The engine only talks to these traits; `db::member::PgImportStore` is the
//! production implementation. Every data row runs inside its own
//! [`ImportTx`]: dropping a transaction without calling `commit` discards
//! every write made through it.

use async_trait::async_trait;
use shared::models::{
    Category, Member, MemberCategory, MemberPhone, MemberProperty, MemberTag, Property, Tag,
};

use super::row::CategorySlot;
use crate::db::RepoResult;

#[async_trait]
pub trait ImportStore: Send + Sync {
    type Tx: ImportTx;

    async fn list_categories(&self, app_id: &str) -> RepoResult<Vec<Category>>;
    async fn list_tags(&self, app_id: &str) -> RepoResult<Vec<Tag>>;
    async fn list_properties(&self, app_id: &str) -> RepoResult<Vec<Property>>;

    /// Open the transaction one data row is written through
    async fn begin(&self) -> RepoResult<Self::Tx>;
}

#[async_trait]
pub trait ImportTx: Send {
    async fn find_member(&mut self, app_id: &str, member_id: &str) -> RepoResult<Option<Member>>;

    /// Insert or overwrite the member keyed by `(app_id, id)`
    async fn save_member(&mut self, member: &Member) -> RepoResult<()>;

    async fn list_phones(&mut self, app_id: &str, member_id: &str)
    -> RepoResult<Vec<MemberPhone>>;
    async fn delete_phones(&mut self, app_id: &str, member_id: &str, ids: &[i64])
    -> RepoResult<()>;
    async fn insert_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
        phones: &[String],
    ) -> RepoResult<()>;

    async fn list_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberCategory>>;
    async fn delete_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
        ids: &[i64],
    ) -> RepoResult<()>;
    async fn insert_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
        slots: &[CategorySlot],
    ) -> RepoResult<()>;

    async fn list_tags(&mut self, app_id: &str, member_id: &str) -> RepoResult<Vec<MemberTag>>;
    async fn delete_tags(&mut self, app_id: &str, member_id: &str, ids: &[i64])
    -> RepoResult<()>;
    async fn insert_tags(&mut self, app_id: &str, member_id: &str, tag_ids: &[i64])
    -> RepoResult<()>;

    async fn list_properties(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberProperty>>;

    /// Insert or overwrite the value of one property for one member
    async fn upsert_property(
        &mut self,
        app_id: &str,
        member_id: &str,
        property_id: i64,
        value: &str,
    ) -> RepoResult<()>;

    async fn commit(self) -> RepoResult<()>;
}
