//! Schema file bootstrap.
//!
//! Loads a DDL file into the database before inspection. The file is split
//! on `;` and each non-empty statement is executed in order. A failing
//! statement is logged and skipped so that a partially applicable file still
//! loads as much as it can.
//!
//! Splitting is naive: a `;` inside a string literal or a comment also ends
//! a statement.

use std::path::Path;

use tracing::{info, warn};

use crate::core::traits::SchemaLoader;
use crate::error::Result;

/// Outcome of loading a schema file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Statements that executed successfully.
    pub executed: usize,
    /// Statements that failed and were skipped.
    pub failed: usize,
}

/// Split DDL text into trimmed, non-empty statements.
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Execute every statement of a schema file.
///
/// Reading the file is fatal; individual statement failures are not.
pub async fn load_schema_file<L, P>(loader: &L, path: P) -> Result<LoadSummary>
where
    L: SchemaLoader + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Loading schema {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let summary = load_statements(loader, &split_statements(&content)).await;

    info!(
        "Schema loaded: {} statements executed, {} failed",
        summary.executed, summary.failed
    );
    Ok(summary)
}

/// Execute statements in order, continuing past failures.
pub async fn load_statements<L>(loader: &L, statements: &[String]) -> LoadSummary
where
    L: SchemaLoader + ?Sized,
{
    let mut summary = LoadSummary::default();

    for statement in statements {
        match loader.execute(statement).await {
            Ok(()) => summary.executed += 1,
            Err(e) => {
                warn!("Schema statement failed: {}", e);
                summary.failed += 1;
            }
        }
    }

    summary
}
