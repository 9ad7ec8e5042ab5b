//! Member Model

use serde::{Deserialize, Serialize};

/// Role assigned to members created by import when no role column is given
pub const DEFAULT_MEMBER_ROLE: &str = "general-member";

/// Member entity (scoped to an owning application)
///
/// `id` is the external/natural key and is only unique within `app_id`.
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub app_id: String,
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub star: i32,
    pub created_at: i64,
    pub logined_at: Option<i64>,
    pub updated_at: i64,
}

impl Member {
    /// Blank member with insert defaults
    pub fn new(app_id: impl Into<String>, id: impl Into<String>, now: i64) -> Self {
        Self {
            app_id: app_id.into(),
            id: id.into(),
            name: None,
            username: None,
            email: None,
            role: DEFAULT_MEMBER_ROLE.to_string(),
            star: 0,
            created_at: now,
            logined_at: None,
            updated_at: now,
        }
    }
}

/// Member phone (child of Member)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberPhone {
    pub id: i64,
    pub app_id: String,
    pub member_id: String,
    pub phone: String,
}

/// Member ↔ category association with its column position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberCategory {
    pub id: i64,
    pub app_id: String,
    pub member_id: String,
    pub category_id: i64,
    pub position: i32,
}

/// Member value for one property definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberProperty {
    pub id: i64,
    pub app_id: String,
    pub member_id: String,
    pub property_id: i64,
    pub value: String,
}

/// Member ↔ tag association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberTag {
    pub id: i64,
    pub app_id: String,
    pub member_id: String,
    pub tag_id: i64,
}
