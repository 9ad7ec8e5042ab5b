//! Member import
//!
//! `process_import` reconciles a spreadsheet-shaped batch of rows with the
//! stored members of one application. `rows[0]` is the header row mapping
//! columns to field paths; every following row describes one member.
//!
//! Rows are processed sequentially, each in its own transaction. A row
//! either applies completely (member scalars plus phones, categories,
//! properties and tags) or not at all; its failure is recorded and the
//! batch continues. Only a failure of the store itself aborts the batch.

mod definitions;
mod header;
mod reconcile;
mod result;
mod row;
mod store;

#[cfg(test)]
mod memory;

use shared::models::{ImportResult, Member};
use shared::util::now_millis;
use thiserror::Error;

use crate::db::RepoError;

use definitions::Definitions;
use header::HeaderMap;
use result::ImportTally;

pub use row::{CategorySlot, RawRow};
pub use store::{ImportStore, ImportTx};

/// Errors that stop the whole import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import has no header row")]
    MissingHeader,

    #[error("header row has no column mapped to 'id'")]
    MissingIdColumn,

    #[error("import aborted: {0}")]
    Store(#[from] RepoError),
}

/// Errors that reject a single data row
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing member id")]
    MissingId,

    #[error("invalid star value '{0}'")]
    InvalidStar(String),

    #[error("invalid {field} value '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown tag '{0}'")]
    UnknownTag(String),

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Import `rows` into the members of `app_id`
pub async fn process_import<S: ImportStore>(
    store: &S,
    app_id: &str,
    rows: &[RawRow],
) -> Result<ImportResult, ImportError> {
    let (header_row, data_rows) = rows.split_first().ok_or(ImportError::MissingHeader)?;
    let header = HeaderMap::parse(header_row)?;

    let definitions = Definitions::new(
        store.list_categories(app_id).await?,
        store.list_tags(app_id).await?,
        store.list_properties(app_id).await?,
    );

    let mut tally = ImportTally::default();
    for (offset, row) in data_rows.iter().enumerate() {
        let row_index = offset + 1;
        let Some(member_id) = row::extract_id(row, &header) else {
            tally.failed(row_index, None, &RowError::MissingId);
            continue;
        };

        match import_row(store, app_id, &member_id, row, &header, &definitions, &mut tally).await {
            Ok(()) => {}
            Err(RowError::Store(err)) if err.is_systemic() => {
                tracing::error!(
                    app_id = %app_id,
                    row_index,
                    member_id = %member_id,
                    error = %err,
                    "Import aborted"
                );
                return Err(ImportError::Store(err));
            }
            Err(err) => tally.failed(row_index, Some(member_id), &err),
        }
    }

    let result = tally.into_result();
    tracing::info!(
        app_id = %app_id,
        rows = data_rows.len(),
        to_insert = result.to_insert_count,
        inserted = result.inserted_count,
        failed = result.failed_count,
        "Member import finished"
    );
    Ok(result)
}

/// Apply one data row inside its own transaction
///
/// Returning early drops the transaction uncommitted.
async fn import_row<S: ImportStore>(
    store: &S,
    app_id: &str,
    member_id: &str,
    row: &RawRow,
    header: &HeaderMap,
    definitions: &Definitions,
    tally: &mut ImportTally,
) -> Result<(), RowError> {
    let mut tx = store.begin().await?;

    let existing = tx.find_member(app_id, member_id).await?;
    let is_new = existing.is_none();
    if is_new {
        tally.candidate_insert();
    }

    let parsed = row::parse_row(row, header, definitions)?;

    let now = now_millis();
    let mut member = existing.unwrap_or_else(|| Member::new(app_id, member_id, now));
    parsed.apply_to(&mut member);
    member.updated_at = now;

    tx.save_member(&member).await?;
    reconcile::reconcile_children(&mut tx, app_id, member_id, &parsed).await?;
    tx.commit().await?;

    if is_new {
        tally.inserted();
    }
    Ok(())
}
