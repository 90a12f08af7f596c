//! In-memory metadata source.
//!
//! Serves pre-recorded column and index rows. Useful for exercising the
//! inspector without a server, and for feeding metadata captured elsewhere.

use async_trait::async_trait;

use crate::core::traits::{ColumnRow, IndexRow, MetadataSource};
use crate::error::{DumpError, Result};

#[derive(Debug, Clone)]
struct MemoryTable {
    name: String,
    columns: Vec<ColumnRow>,
    indexes: Vec<IndexRow>,
}

/// Metadata source backed by rows held in memory.
///
/// Tables are enumerated in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: Vec<MemoryTable>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with its column and index rows.
    pub fn with_table(
        mut self,
        name: impl Into<String>,
        columns: Vec<ColumnRow>,
        indexes: Vec<IndexRow>,
    ) -> Self {
        self.tables.push(MemoryTable {
            name: name.into(),
            columns,
            indexes,
        });
        self
    }

    fn find(&self, table: &str) -> Result<&MemoryTable> {
        self.tables.iter().find(|t| t.name == table).ok_or_else(|| {
            DumpError::database(
                format!("Table '{}' doesn't exist", table),
                "describing in-memory table",
            )
        })
    }
}

#[async_trait]
impl MetadataSource for MemorySource {
    async fn list_tables(&self) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnRow>> {
        Ok(self.find(table)?.columns.clone())
    }

    async fn describe_indexes(&self, table: &str) -> Result<Vec<IndexRow>> {
        Ok(self.find(table)?.indexes.clone())
    }

    fn db_type(&self) -> &str {
        "memory"
    }
}
