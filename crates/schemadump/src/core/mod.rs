//! Core abstractions shared by the driver, inspector and renderer.
//!
//! - [`schema`]: Table, column and index metadata types
//! - [`traits`]: The metadata-query boundary and raw row types
//! - [`naming`]: Generator-facing names derived from database identifiers
//! - [`identifier`]: Identifier validation and quoting

pub mod identifier;
pub mod naming;
pub mod schema;
pub mod traits;

pub use naming::snake_to_camel;
pub use schema::{Column, Index, Schema, Table, NULL_DEFAULT, PRIMARY_INDEX_NAME};
pub use traits::{ColumnRow, IndexRow, MetadataSource, SchemaLoader};
