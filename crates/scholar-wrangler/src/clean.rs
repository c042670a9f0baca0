//! Deterministic table cleaning
//!
//! Removes duplicate rows and incomplete rows (wrong field count or any
//! missing cell), preserving first occurrence and row order. Same input
//! always yields byte-identical output.

use std::collections::HashSet;

use crate::table::{is_missing, Table};

/// What the cleaning pass did to a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOutcome {
    pub duplicates_removed: usize,
    pub incomplete_removed: usize,
}

/// Clean a table in place
pub fn clean(table: &mut Table) -> CleanOutcome {
    let width = table.headers.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut outcome = CleanOutcome::default();

    let rows = std::mem::take(&mut table.rows);
    table.rows = rows
        .into_iter()
        .filter(|row| {
            if row.len() != width || row.iter().any(|cell| is_missing(cell)) {
                outcome.incomplete_removed += 1;
                return false;
            }
            if !seen.insert(row.join(",")) {
                outcome.duplicates_removed += 1;
                return false;
            }
            true
        })
        .collect();

    outcome
}
