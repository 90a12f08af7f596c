//! Schema inspection.
//!
//! The [`Inspector`] owns a [`MetadataSource`] and turns its raw rows into a
//! [`Schema`]:
//!
//! - [`column`]: one column row into a typed [`Column`](crate::core::Column)
//! - [`index`]: index rows into ordered [`Index`](crate::core::Index) values
//! - [`table`]: columns, indexes, primary key and derived fields of a table
//!
//! Inspection is sequential. Tables are assembled one after another and the
//! first failure aborts the whole pass; no partial schema is returned.

pub mod column;
pub mod index;
pub mod table;

pub use column::build_column;
pub use index::{assemble_indexes, IndexGrouping};
pub use table::assemble_table;

use tracing::{debug, info};

use crate::core::schema::{Schema, Table};
use crate::core::traits::MetadataSource;
use crate::error::Result;
use crate::typemap::TypeResolver;

/// Drives table assembly against a metadata source.
pub struct Inspector<S> {
    source: S,
    resolver: TypeResolver,
    grouping: IndexGrouping,
}

impl<S: MetadataSource> Inspector<S> {
    /// Create an inspector with the default type map and strict index grouping.
    pub fn new(source: S) -> Self {
        Self {
            source,
            resolver: TypeResolver::default(),
            grouping: IndexGrouping::default(),
        }
    }

    /// Use a custom type resolver.
    pub fn with_resolver(mut self, resolver: TypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set how index rows are grouped.
    pub fn with_index_grouping(mut self, grouping: IndexGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Give the metadata source back.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Inspect every table the source can see, in enumeration order.
    pub async fn inspect_all(&self) -> Result<Schema> {
        let names = self.source.list_tables().await?;
        debug!("Found {} tables in {} source", names.len(), self.source.db_type());

        let mut tables = Vec::with_capacity(names.len());
        for name in &names {
            tables.push(self.inspect_table(name).await?);
        }

        info!("Inspected {} tables", tables.len());
        Ok(Schema { tables })
    }

    /// Inspect the named tables that exist, in the order given.
    ///
    /// Names the source does not know are skipped, so the schema may hold
    /// fewer tables than were requested.
    pub async fn inspect_tables<T: AsRef<str>>(&self, names: &[T]) -> Result<Schema> {
        let mut tables = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            if !self.source.table_exists(name).await? {
                debug!("Skipping unknown table '{}'", name);
                continue;
            }
            tables.push(self.inspect_table(name).await?);
        }

        info!(
            "Inspected {} of {} requested tables",
            tables.len(),
            names.len()
        );
        Ok(Schema { tables })
    }

    /// Inspect a single table.
    ///
    /// Any failure is wrapped with the table name.
    pub async fn inspect_table(&self, name: &str) -> Result<Table> {
        self.load_table(name).await.map_err(|e| e.in_table(name))
    }

    async fn load_table(&self, name: &str) -> Result<Table> {
        let column_rows = self.source.describe_columns(name).await?;
        let index_rows = self.source.describe_indexes(name).await?;

        let table = assemble_table(name, column_rows, index_rows, &self.resolver, self.grouping)?;

        debug!(
            "Assembled table {}: {} columns, {} indexes",
            table.db_name,
            table.columns.len(),
            table.indexes.len()
        );
        Ok(table)
    }
}
