//! Index reconstruction from per-column index rows.
//!
//! The server reports one row per (index, column) pair. Rows are folded back
//! into [`Index`] values in the order each index first appears.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::schema::Index;
use crate::core::traits::IndexRow;
use crate::error::{DumpError, Result};

/// How index rows are grouped into indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexGrouping {
    /// Rows of one index must be contiguous with increasing sequence numbers.
    /// Anything else is rejected.
    #[default]
    Strict,
    /// Rows are grouped by index name regardless of arrival order. Each index
    /// must still have sequence numbers exactly `1..=n`.
    Grouped,
}

/// Assemble indexes from raw rows.
pub fn assemble_indexes(rows: Vec<IndexRow>, grouping: IndexGrouping) -> Result<Vec<Index>> {
    match grouping {
        IndexGrouping::Strict => assemble_contiguous(rows),
        IndexGrouping::Grouped => assemble_grouped(rows),
    }
}

fn assemble_contiguous(rows: Vec<IndexRow>) -> Result<Vec<Index>> {
    let mut indexes: Vec<Index> = Vec::new();
    let mut last_seq = 0u32;

    for row in rows {
        if row.seq_in_index == 1 {
            if indexes.iter().any(|i| i.name == row.index_name) {
                return Err(DumpError::malformed_index(
                    row.index_name,
                    "index rows are not contiguous: index started a second time",
                ));
            }
            indexes.push(Index::new(row.index_name.clone(), row.unique));
            last_seq = 0;
        }

        let current = match indexes.last_mut() {
            Some(index) => index,
            None => {
                return Err(DumpError::malformed_index(
                    row.index_name,
                    format!(
                        "column '{}' at position {} arrived before any index started",
                        row.column_name, row.seq_in_index
                    ),
                ))
            }
        };

        if current.name != row.index_name {
            return Err(DumpError::malformed_index(
                row.index_name,
                format!(
                    "index rows are not contiguous: column '{}' arrived while '{}' was open",
                    row.column_name, current.name
                ),
            ));
        }

        if row.seq_in_index <= last_seq {
            return Err(DumpError::malformed_index(
                row.index_name,
                format!(
                    "sequence {} for column '{}' does not follow {}",
                    row.seq_in_index, row.column_name, last_seq
                ),
            ));
        }

        last_seq = row.seq_in_index;
        current.columns.push(row.column_name);
    }

    Ok(indexes)
}

fn assemble_grouped(rows: Vec<IndexRow>) -> Result<Vec<Index>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Index, Vec<(u32, String)>)> = Vec::new();

    for row in rows {
        let pos = *positions.entry(row.index_name.clone()).or_insert_with(|| {
            groups.push((Index::new(row.index_name.clone(), row.unique), Vec::new()));
            groups.len() - 1
        });

        let (index, members) = &mut groups[pos];
        if row.seq_in_index == 1 {
            index.unique = row.unique;
        }
        members.push((row.seq_in_index, row.column_name));
    }

    groups
        .into_iter()
        .map(|(mut index, mut members)| {
            members.sort_by_key(|(seq, _)| *seq);

            for (expected, (seq, column)) in (1u32..).zip(&members) {
                if *seq != expected {
                    return Err(DumpError::malformed_index(
                        index.name.clone(),
                        format!(
                            "expected sequence {} but found {} for column '{}'",
                            expected, seq, column
                        ),
                    ));
                }
            }

            index.columns = members.into_iter().map(|(_, column)| column).collect();
            Ok(index)
        })
        .collect()
}
