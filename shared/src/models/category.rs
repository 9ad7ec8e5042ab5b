//! Category Model

use serde::{Deserialize, Serialize};

/// Member category definition (per application)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub app_id: String,
    pub name: String,
}
