//! In-memory import store for tests
//!
//! Each transaction works on a private copy of the data and writes it back
//! on commit, so a dropped transaction leaves nothing behind.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    Category, Member, MemberCategory, MemberPhone, MemberProperty, MemberTag, Property, Tag,
};

use super::row::CategorySlot;
use super::store::{ImportStore, ImportTx};
use crate::db::{RepoError, RepoResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub members: Vec<Member>,
    pub phones: Vec<MemberPhone>,
    pub categories: Vec<MemberCategory>,
    pub properties: Vec<MemberProperty>,
    pub tags: Vec<MemberTag>,
    pub category_defs: Vec<Category>,
    pub tag_defs: Vec<Tag>,
    pub property_defs: Vec<Property>,
    next_id: i64,
}

impl MemoryData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Injected failure for `save_member` of one member id
#[derive(Debug, Clone)]
struct SaveFailure {
    member_id: String,
    systemic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<MemoryData>>,
    save_failure: Arc<Mutex<Option<SaveFailure>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, app_id: &str, name: &str) -> i64 {
        let mut data = self.data.lock();
        let id = data.next_id();
        data.category_defs.push(Category {
            id,
            app_id: app_id.into(),
            name: name.into(),
        });
        id
    }

    pub fn add_tag(&self, app_id: &str, name: &str) -> i64 {
        let mut data = self.data.lock();
        let id = data.next_id();
        data.tag_defs.push(Tag {
            id,
            app_id: app_id.into(),
            name: name.into(),
        });
        id
    }

    pub fn add_property(&self, app_id: &str, name: &str) -> i64 {
        let mut data = self.data.lock();
        let id = data.next_id();
        data.property_defs.push(Property {
            id,
            app_id: app_id.into(),
            name: name.into(),
            placeholder: None,
        });
        id
    }

    /// Make every `save_member` for `member_id` fail
    pub fn fail_save(&self, member_id: &str, systemic: bool) {
        *self.save_failure.lock() = Some(SaveFailure {
            member_id: member_id.into(),
            systemic,
        });
    }

    pub fn snapshot(&self) -> MemoryData {
        self.data.lock().clone()
    }

    pub fn member(&self, app_id: &str, member_id: &str) -> Option<Member> {
        self.data
            .lock()
            .members
            .iter()
            .find(|m| m.app_id == app_id && m.id == member_id)
            .cloned()
    }

    /// Sorted phones of one member
    pub fn phones(&self, app_id: &str, member_id: &str) -> Vec<String> {
        let mut phones: Vec<String> = self
            .data
            .lock()
            .phones
            .iter()
            .filter(|p| p.app_id == app_id && p.member_id == member_id)
            .map(|p| p.phone.clone())
            .collect();
        phones.sort();
        phones
    }

    /// Sorted `(category_id, position)` of one member
    pub fn categories(&self, app_id: &str, member_id: &str) -> Vec<(i64, i32)> {
        let mut categories: Vec<_> = self
            .data
            .lock()
            .categories
            .iter()
            .filter(|c| c.app_id == app_id && c.member_id == member_id)
            .map(|c| (c.category_id, c.position))
            .collect();
        categories.sort();
        categories
    }

    /// Sorted tag ids of one member
    pub fn tags(&self, app_id: &str, member_id: &str) -> Vec<i64> {
        let mut tags: Vec<_> = self
            .data
            .lock()
            .tags
            .iter()
            .filter(|t| t.app_id == app_id && t.member_id == member_id)
            .map(|t| t.tag_id)
            .collect();
        tags.sort();
        tags
    }

    /// Sorted `(property_id, value)` of one member
    pub fn properties(&self, app_id: &str, member_id: &str) -> Vec<(i64, String)> {
        let mut properties: Vec<_> = self
            .data
            .lock()
            .properties
            .iter()
            .filter(|p| p.app_id == app_id && p.member_id == member_id)
            .map(|p| (p.property_id, p.value.clone()))
            .collect();
        properties.sort();
        properties
    }
}

#[async_trait]
impl ImportStore for MemoryStore {
    type Tx = MemoryTx;

    async fn list_categories(&self, app_id: &str) -> RepoResult<Vec<Category>> {
        let data = self.data.lock();
        Ok(data
            .category_defs
            .iter()
            .filter(|c| c.app_id == app_id)
            .cloned()
            .collect())
    }

    async fn list_tags(&self, app_id: &str) -> RepoResult<Vec<Tag>> {
        let data = self.data.lock();
        Ok(data
            .tag_defs
            .iter()
            .filter(|t| t.app_id == app_id)
            .cloned()
            .collect())
    }

    async fn list_properties(&self, app_id: &str) -> RepoResult<Vec<Property>> {
        let data = self.data.lock();
        Ok(data
            .property_defs
            .iter()
            .filter(|p| p.app_id == app_id)
            .cloned()
            .collect())
    }

    async fn begin(&self) -> RepoResult<MemoryTx> {
        Ok(MemoryTx {
            target: self.data.clone(),
            work: self.data.lock().clone(),
            save_failure: self.save_failure.lock().clone(),
        })
    }
}

pub struct MemoryTx {
    target: Arc<Mutex<MemoryData>>,
    work: MemoryData,
    save_failure: Option<SaveFailure>,
}

fn owned_by(app_id: &str, member_id: &str, row_app: &str, row_member: &str) -> bool {
    row_app == app_id && row_member == member_id
}

#[async_trait]
impl ImportTx for MemoryTx {
    async fn find_member(&mut self, app_id: &str, member_id: &str) -> RepoResult<Option<Member>> {
        Ok(self
            .work
            .members
            .iter()
            .find(|m| m.app_id == app_id && m.id == member_id)
            .cloned())
    }

    async fn save_member(&mut self, member: &Member) -> RepoResult<()> {
        if let Some(failure) = &self.save_failure
            && failure.member_id == member.id
        {
            return Err(if failure.systemic {
                RepoError::Unavailable("connection reset".into())
            } else {
                RepoError::Database("value too long for column".into())
            });
        }
        match self
            .work
            .members
            .iter_mut()
            .find(|m| m.app_id == member.app_id && m.id == member.id)
        {
            Some(stored) => *stored = member.clone(),
            None => self.work.members.push(member.clone()),
        }
        Ok(())
    }

    async fn list_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberPhone>> {
        Ok(self
            .work
            .phones
            .iter()
            .filter(|p| owned_by(app_id, member_id, &p.app_id, &p.member_id))
            .cloned()
            .collect())
    }

    async fn delete_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
        ids: &[i64],
    ) -> RepoResult<()> {
        self.work.phones.retain(|p| {
            !(owned_by(app_id, member_id, &p.app_id, &p.member_id) && ids.contains(&p.id))
        });
        Ok(())
    }

    async fn insert_phones(
        &mut self,
        app_id: &str,
        member_id: &str,
        phones: &[String],
    ) -> RepoResult<()> {
        for phone in phones {
            let id = self.work.next_id();
            self.work.phones.push(MemberPhone {
                id,
                app_id: app_id.into(),
                member_id: member_id.into(),
                phone: phone.clone(),
            });
        }
        Ok(())
    }

    async fn list_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberCategory>> {
        Ok(self
            .work
            .categories
            .iter()
            .filter(|c| owned_by(app_id, member_id, &c.app_id, &c.member_id))
            .cloned()
            .collect())
    }

    async fn delete_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
        ids: &[i64],
    ) -> RepoResult<()> {
        self.work.categories.retain(|c| {
            !(owned_by(app_id, member_id, &c.app_id, &c.member_id) && ids.contains(&c.id))
        });
        Ok(())
    }

    async fn insert_categories(
        &mut self,
        app_id: &str,
        member_id: &str,
        slots: &[CategorySlot],
    ) -> RepoResult<()> {
        for slot in slots {
            let id = self.work.next_id();
            self.work.categories.push(MemberCategory {
                id,
                app_id: app_id.into(),
                member_id: member_id.into(),
                category_id: slot.category_id,
                position: slot.position,
            });
        }
        Ok(())
    }

    async fn list_tags(&mut self, app_id: &str, member_id: &str) -> RepoResult<Vec<MemberTag>> {
        Ok(self
            .work
            .tags
            .iter()
            .filter(|t| owned_by(app_id, member_id, &t.app_id, &t.member_id))
            .cloned()
            .collect())
    }

    async fn delete_tags(&mut self, app_id: &str, member_id: &str, ids: &[i64]) -> RepoResult<()> {
        self.work.tags.retain(|t| {
            !(owned_by(app_id, member_id, &t.app_id, &t.member_id) && ids.contains(&t.id))
        });
        Ok(())
    }

    async fn insert_tags(
        &mut self,
        app_id: &str,
        member_id: &str,
        tag_ids: &[i64],
    ) -> RepoResult<()> {
        for tag_id in tag_ids {
            let id = self.work.next_id();
            self.work.tags.push(MemberTag {
                id,
                app_id: app_id.into(),
                member_id: member_id.into(),
                tag_id: *tag_id,
            });
        }
        Ok(())
    }

    async fn list_properties(
        &mut self,
        app_id: &str,
        member_id: &str,
    ) -> RepoResult<Vec<MemberProperty>> {
        Ok(self
            .work
            .properties
            .iter()
            .filter(|p| owned_by(app_id, member_id, &p.app_id, &p.member_id))
            .cloned()
            .collect())
    }

    async fn upsert_property(
        &mut self,
        app_id: &str,
        member_id: &str,
        property_id: i64,
        value: &str,
    ) -> RepoResult<()> {
        let existing = self.work.properties.iter_mut().find(|p| {
            owned_by(app_id, member_id, &p.app_id, &p.member_id) && p.property_id == property_id
        });
        match existing {
            Some(stored) => stored.value = value.to_string(),
            None => {
                let id = self.work.next_id();
                self.work.properties.push(MemberProperty {
                    id,
                    app_id: app_id.into(),
                    member_id: member_id.into(),
                    property_id,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    async fn commit(self) -> RepoResult<()> {
        *self.target.lock() = self.work;
        Ok(())
    }
}
