//! Import bookkeeping

use shared::models::{FailedRow, ImportResult};

use super::RowError;

/// Accumulates counters and failures while rows are processed in order
#[derive(Debug, Default)]
pub struct ImportTally {
    result: ImportResult,
}

impl ImportTally {
    /// A row whose member id is not stored yet
    pub fn candidate_insert(&mut self) {
        self.result.to_insert_count += 1;
    }

    /// A new member was committed
    pub fn inserted(&mut self) {
        self.result.inserted_count += 1;
    }

    pub fn failed(&mut self, row_index: usize, member_id: Option<String>, error: &RowError) {
        tracing::warn!(
            row_index,
            member_id = member_id.as_deref().unwrap_or("-"),
            error = %error,
            "Import row failed"
        );
        self.result.failed_count += 1;
        self.result.failed_errors.push(FailedRow {
            row_index,
            member_id,
            message: error.to_string(),
        });
    }

    pub fn into_result(self) -> ImportResult {
        self.result
    }
}
