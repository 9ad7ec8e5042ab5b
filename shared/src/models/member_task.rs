//! Member Task Model

use serde::{Deserialize, Serialize};

/// Follow-up task attached to a member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberTask {
    pub id: i64,
    pub app_id: String,
    pub member_id: String,
    pub title: String,
    pub description: Option<String>,
    /// "high" | "medium" | "low"
    pub priority: String,
    /// "pending" | "in-progress" | "completed"
    pub status: String,
    pub due_at: Option<i64>,
    pub created_at: i64,
}
