//! Metadata source implementations.
//!
//! - [`mysql`]: MySQL/MariaDB driver over SQLx
//! - [`memory`]: pre-recorded rows held in memory
//!
//! Both implement [`MetadataSource`](crate::core::traits::MetadataSource);
//! the MySQL driver also implements
//! [`SchemaLoader`](crate::core::traits::SchemaLoader).

pub mod memory;
pub mod mysql;

pub use memory::MemorySource;
pub use mysql::MysqlReader;
