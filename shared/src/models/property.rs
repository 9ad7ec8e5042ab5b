//! Property Model

use serde::{Deserialize, Serialize};

/// Dynamic member property definition (per application)
///
/// Import columns are matched against `name`, so every application can add
/// its own free-text member fields without schema changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Property {
    pub id: i64,
    pub app_id: String,
    pub name: String,
    pub placeholder: Option<String>,
}
