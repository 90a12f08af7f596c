//! Schema metadata types produced by introspection.
//!
//! These are the generator-facing values handed to the renderer: every
//! table carries its typed columns, its indexes in first-appearance order,
//! the distinguished primary key and a few pre-rendered field lists.

use serde::{Deserialize, Serialize};

use crate::typemap::TargetType;

/// Name the database assigns to the primary key index.
pub const PRIMARY_INDEX_NAME: &str = "PRIMARY";

/// Default value reported for columns without one.
pub const NULL_DEFAULT: &str = "NULL";

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Generator-facing name (UpperCamel).
    pub name: String,

    /// Original column name.
    pub db_name: String,

    /// Original type string (e.g. "bigint(20) unsigned").
    pub db_type: String,

    /// Resolved target type.
    pub target_type: TargetType,

    /// Declared length or numeric precision (0 if absent).
    pub size: u32,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Literal default, or "NULL" when the column has none.
    pub default: String,

    /// Extra attribute reported by the server (e.g. "auto_increment").
    pub extra: String,

    /// Whether the column is auto-incremented.
    pub auto_increment: bool,
}

impl Column {
    /// Check if the column has a default other than NULL.
    pub fn has_default(&self) -> bool {
        self.default != NULL_DEFAULT
    }
}

/// Index metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,

    /// Indexed column names in key order.
    pub columns: Vec<String>,

    /// Whether the index is unique.
    pub unique: bool,

    /// Whether this is the primary key.
    pub primary: bool,
}

impl Index {
    /// Start a new index with no columns yet.
    pub fn new(name: impl Into<String>, unique: bool) -> Self {
        let name = name.into();
        let primary = name == PRIMARY_INDEX_NAME;
        Self {
            name,
            columns: Vec::new(),
            unique,
            primary,
        }
    }

    /// Check if this is the empty placeholder index.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.columns.is_empty()
    }
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Generator-facing name (UpperCamel).
    pub name: String,

    /// Original table name.
    pub db_name: String,

    /// Columns in declaration order.
    pub columns: Vec<Column>,

    /// All indexes in first-appearance order.
    pub indexes: Vec<Index>,

    /// Primary key, or the empty index when the table has none.
    pub primary_key: Index,

    /// Every index except the primary key.
    pub non_primary_indexes: Vec<Index>,

    /// Original column names in declaration order.
    pub column_db_names: Vec<String>,

    /// Backtick-quoted column list for SELECT statements.
    pub select_fields: String,

    /// Scan targets aligned with `select_fields`.
    pub scan_fields: String,
}

impl Table {
    /// Check if the table has a primary key.
    pub fn has_pk(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Find a column by its original name.
    pub fn column(&self, db_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.db_name == db_name)
    }
}

/// Result of one introspection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Tables in enumeration order.
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }

    /// Find a table by its original name.
    pub fn table(&self, db_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.db_name == db_name)
    }

    /// Serialize the schema as pretty-printed JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
