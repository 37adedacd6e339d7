//! Per-group summary counts printed after an export.
//!
//! Groups the parsed records by their foreign-key column, skipping
//! soft-deleted rows. Only stdout reporting; the JSON output is unaffected.

use crate::model::TableRecord;
use ahash::AHashMap;

/// How many groups the summary prints.
pub const MAX_GROUPS: usize = 10;

/// Counts for one foreign-key group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: i64,
    pub records: u64,
    /// Records with `status = 'PUBLISHED'`; absent when the schema has no
    /// status column.
    pub published: Option<u64>,
}

/// Aggregated summary for one export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Records whose `deleted_at` is absent
    pub live_records: u64,
    /// Distinct foreign-key groups among live records
    pub group_total: usize,
    /// First `MAX_GROUPS` groups in ascending key order
    pub groups: Vec<GroupCount>,
}

/// Group live records by foreign key, ascending, bounded to `max_groups`.
pub fn summarize<T: TableRecord>(records: &[T], max_groups: usize) -> Summary {
    let mut by_key: AHashMap<i64, (u64, u64)> = AHashMap::new();
    let mut live_records = 0u64;
    let mut has_status = false;

    for record in records {
        if record.is_deleted() {
            continue;
        }
        live_records += 1;

        let entry = by_key.entry(record.group_key()).or_default();
        entry.0 += 1;
        if let Some(published) = record.is_published() {
            has_status = true;
            if published {
                entry.1 += 1;
            }
        }
    }

    let mut keys: Vec<i64> = by_key.keys().copied().collect();
    keys.sort_unstable();
    let group_total = keys.len();

    let groups = keys
        .into_iter()
        .take(max_groups)
        .map(|key| {
            let (records, published) = by_key[&key];
            GroupCount {
                key,
                records,
                published: has_status.then_some(published),
            }
        })
        .collect();

    Summary {
        live_records,
        group_total,
        groups,
    }
}
