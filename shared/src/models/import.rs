//! Member import result

use serde::{Deserialize, Serialize};

/// One rejected data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedRow {
    /// Position of the row in the submitted array (header row = 0)
    pub row_index: usize,
    /// Member id read from the row, when one was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    pub message: String,
}

/// Outcome of one import call
///
/// `inserted_count` only counts brand-new members; updates of existing
/// members are successful rows but are not counted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub to_insert_count: usize,
    pub inserted_count: usize,
    pub failed_count: usize,
    pub failed_errors: Vec<FailedRow>,
}
