//! # schemadump
//!
//! MySQL/MariaDB schema introspection and type mapping for code generators.
//!
//! This library reads table, column and index metadata from a live database
//! and turns it into a typed model ready for rendering:
//!
//! - **Type resolution** of raw column types (`bigint(20) unsigned` → `uint64`)
//! - **Index reconstruction** with a distinguished primary key
//! - **Derived fields** for generators (`SELECT` lists, scan targets, names)
//! - **Schema bootstrap** from a DDL file before inspection
//! - **Rendering** to Rust structs, JSON or a per-table template, to stdout or files
//!
//! ## Example
//!
//! ```rust,no_run
//! use schemadump::{Config, Inspector, MysqlReader, OutputTarget};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("schemadump.yaml")?;
//!     let reader = MysqlReader::connect(&config.source).await?;
//!     let inspector = Inspector::new(reader);
//!     let schema = inspector.inspect_all().await?;
//!     let renderer = config.output.renderer()?;
//!     let target = OutputTarget::parse(&config.output.path);
//!     schemadump::write_schema(&schema, &renderer, &target)?;
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod inspect;
pub mod render;
pub mod typemap;

// Re-exports for convenient access
pub use config::{Config, InspectConfig, OutputConfig, SourceConfig};
pub use core::{Column, Index, MetadataSource, Schema, SchemaLoader, Table};
pub use drivers::{MemorySource, MysqlReader};
pub use error::{DumpError, Result};
pub use inspect::{IndexGrouping, Inspector};
pub use render::{render_schema, write_schema, OutputFormat, OutputTarget, Renderer, TableTemplate};
pub use typemap::{BaseKind, TargetType, TypeMap, TypeResolver};
