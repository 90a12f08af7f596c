//! Core traits at the database boundary.
//!
//! - [`MetadataSource`]: the three metadata queries introspection needs
//! - [`SchemaLoader`]: executes DDL statements when bootstrapping a schema
//!
//! Implementations return raw, loosely-typed rows; turning them into
//! [`Table`](super::schema::Table) values is the job of the `inspect` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One row of column metadata, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// Column name.
    pub name: String,
    /// Full column type (e.g. "decimal(10,2)", "int(10) unsigned").
    pub column_type: String,
    /// Whether the column allows NULL.
    pub nullable: bool,
    /// Default value, `None` when the server reports NULL.
    pub default: Option<String>,
    /// Extra attribute (e.g. "auto_increment").
    pub extra: String,
}

/// One row of index metadata: a single column of a single index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    /// Index name ("PRIMARY" for the primary key).
    pub index_name: String,
    /// Column covered at this position.
    pub column_name: String,
    /// Whether the index is unique.
    pub unique: bool,
    /// 1-based position of the column within the index.
    pub seq_in_index: u32,
}

/// Read schema metadata from a live database.
///
/// Every method issues at most one query and fully consumes its result
/// before returning; callers drive the methods strictly one after another.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// List table names visible to the connection, in enumeration order.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Check whether a table exists.
    ///
    /// The default implementation scans [`list_tables`](Self::list_tables);
    /// drivers should override it with a targeted query.
    async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.list_tables().await?.iter().any(|t| t == table))
    }

    /// Describe the columns of a table in declaration order.
    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnRow>>;

    /// Describe the indexes of a table, one row per index column.
    ///
    /// Rows of the same index are expected to be contiguous and ordered by
    /// `seq_in_index`.
    async fn describe_indexes(&self, table: &str) -> Result<Vec<IndexRow>>;

    /// Get the database type identifier (e.g., "mysql").
    fn db_type(&self) -> &str;
}

/// Execute DDL statements against the database.
#[async_trait]
pub trait SchemaLoader: Send + Sync {
    /// Execute a single statement.
    async fn execute(&self, statement: &str) -> Result<()>;
}
