//! Child collection reconciliation
//!
//! Phones, categories and tags are replaced: stored rows that are not wanted
//! are deleted, wanted rows that are not stored are inserted, and matching
//! rows are left alone. Properties are merged: values are only ever written,
//! never removed.

use std::collections::HashSet;
use std::hash::Hash;

use shared::models::MemberProperty;

use super::row::{CategorySlot, MemberRow};
use super::store::ImportTx;
use crate::db::RepoResult;

/// Changes that turn the stored set into the desired one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDiff<K> {
    /// Row ids to delete
    pub stale: Vec<i64>,
    /// Keys to insert
    pub missing: Vec<K>,
}

/// Diff stored `(row_id, key)` pairs against the desired keys
///
/// A stored key that appears more than once keeps only its first row.
pub fn diff_set<K>(stored: impl IntoIterator<Item = (i64, K)>, desired: &[K]) -> SetDiff<K>
where
    K: Eq + Hash + Clone,
{
    let wanted: HashSet<&K> = desired.iter().collect();
    let mut kept: HashSet<K> = HashSet::new();
    let mut stale = Vec::new();

    for (row_id, key) in stored {
        if wanted.contains(&key) && !kept.contains(&key) {
            kept.insert(key);
        } else {
            stale.push(row_id);
        }
    }

    let mut missing = Vec::new();
    for key in desired {
        if kept.insert(key.clone()) {
            missing.push(key.clone());
        }
    }

    SetDiff { stale, missing }
}

/// Property values that differ from what is stored
pub fn property_writes<'a>(
    stored: &[MemberProperty],
    desired: &'a [(i64, String)],
) -> Vec<&'a (i64, String)> {
    desired
        .iter()
        .filter(|(property_id, value)| {
            !stored
                .iter()
                .any(|p| p.property_id == *property_id && p.value == *value)
        })
        .collect()
}

/// Bring every child collection of one member in line with the row
pub async fn reconcile_children<T: ImportTx>(
    tx: &mut T,
    app_id: &str,
    member_id: &str,
    row: &MemberRow,
) -> RepoResult<()> {
    replace_phones(tx, app_id, member_id, &row.phones).await?;
    replace_categories(tx, app_id, member_id, &row.categories).await?;
    merge_properties(tx, app_id, member_id, &row.properties).await?;
    replace_tags(tx, app_id, member_id, &row.tags).await?;
    Ok(())
}

async fn replace_phones<T: ImportTx>(
    tx: &mut T,
    app_id: &str,
    member_id: &str,
    phones: &[String],
) -> RepoResult<()> {
    let stored = tx.list_phones(app_id, member_id).await?;
    let diff = diff_set(stored.into_iter().map(|p| (p.id, p.phone)), phones);
    if !diff.stale.is_empty() {
        tx.delete_phones(app_id, member_id, &diff.stale).await?;
    }
    if !diff.missing.is_empty() {
        tx.insert_phones(app_id, member_id, &diff.missing).await?;
    }
    Ok(())
}

async fn replace_categories<T: ImportTx>(
    tx: &mut T,
    app_id: &str,
    member_id: &str,
    slots: &[CategorySlot],
) -> RepoResult<()> {
    let stored = tx.list_categories(app_id, member_id).await?;
    let diff = diff_set(
        stored.into_iter().map(|c| {
            (
                c.id,
                CategorySlot {
                    category_id: c.category_id,
                    position: c.position,
                },
            )
        }),
        slots,
    );
    if !diff.stale.is_empty() {
        tx.delete_categories(app_id, member_id, &diff.stale).await?;
    }
    if !diff.missing.is_empty() {
        tx.insert_categories(app_id, member_id, &diff.missing).await?;
    }
    Ok(())
}

async fn replace_tags<T: ImportTx>(
    tx: &mut T,
    app_id: &str,
    member_id: &str,
    tag_ids: &[i64],
) -> RepoResult<()> {
    let stored = tx.list_tags(app_id, member_id).await?;
    let diff = diff_set(stored.into_iter().map(|t| (t.id, t.tag_id)), tag_ids);
    if !diff.stale.is_empty() {
        tx.delete_tags(app_id, member_id, &diff.stale).await?;
    }
    if !diff.missing.is_empty() {
        tx.insert_tags(app_id, member_id, &diff.missing).await?;
    }
    Ok(())
}

async fn merge_properties<T: ImportTx>(
    tx: &mut T,
    app_id: &str,
    member_id: &str,
    values: &[(i64, String)],
) -> RepoResult<()> {
    if values.is_empty() {
        return Ok(());
    }
    let stored = tx.list_properties(app_id, member_id).await?;
    for (property_id, value) in property_writes(&stored, values) {
        tx.upsert_property(app_id, member_id, *property_id, value)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_diff_replaces_changed_phones() {
        let stored = vec![(1, "A".to_string()), (2, "B".to_string())];
        let diff = diff_set(stored, &phones(&["B", "C"]));
        assert_eq!(diff.stale, [1]);
        assert_eq!(diff.missing, ["C"]);
    }

    #[test]
    fn test_diff_unchanged_set_is_empty() {
        let stored = vec![(1, 7_i64), (2, 8)];
        let diff = diff_set(stored, &[8, 7]);
        assert!(diff.stale.is_empty());
        assert!(diff.missing.is_empty());
    }

    #[test]
    fn test_diff_removes_duplicate_stored_rows() {
        let stored = vec![(1, 7_i64), (2, 7), (3, 9)];
        let diff = diff_set(stored, &[7]);
        assert_eq!(diff.stale, [2, 3]);
        assert!(diff.missing.is_empty());
    }

    #[test]
    fn test_diff_empty_desired_clears_everything() {
        let stored = vec![(1, 7_i64), (2, 8)];
        let diff = diff_set(stored, &[]);
        assert_eq!(diff.stale, [1, 2]);
        assert!(diff.missing.is_empty());
    }

    #[test]
    fn test_category_position_change_is_a_replacement() {
        let stored = vec![(
            1,
            CategorySlot {
                category_id: 10,
                position: 0,
            },
        )];
        let desired = [CategorySlot {
            category_id: 10,
            position: 1,
        }];
        let diff = diff_set(stored, &desired);
        assert_eq!(diff.stale, [1]);
        assert_eq!(diff.missing, desired);
    }

    #[test]
    fn test_property_writes_skip_unchanged_values() {
        let stored = vec![MemberProperty {
            id: 1,
            app_id: "app".into(),
            member_id: "m1".into(),
            property_id: 30,
            value: "chess".into(),
        }];
        let desired = vec![(30, "chess".to_string()), (31, "cat".to_string())];
        let writes = property_writes(&stored, &desired);
        assert_eq!(writes, [&(31, "cat".to_string())]);

        let desired = vec![(30, "go".to_string())];
        assert_eq!(property_writes(&stored, &desired).len(), 1);
    }
}
