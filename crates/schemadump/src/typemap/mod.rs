//! Type mapping between MySQL column types and generator target types.
//!
//! A raw column type such as `bigint(20) unsigned` is reduced to a
//! [`BaseKind`] token, which the [`TypeMap`] maps to a [`TargetType`]. The
//! map is an ordinary value handed to the [`TypeResolver`], so callers (and
//! tests) can supply their own mapping.

mod resolver;

pub use resolver::{ColumnTypeDescriptor, TypeResolver};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base column kinds the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseKind {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Char,
    Varchar,
    Text,
    Blob,
    Date,
    Datetime,
    Timestamp,
}

impl BaseKind {
    pub const ALL: [BaseKind; 15] = [
        BaseKind::TinyInt,
        BaseKind::SmallInt,
        BaseKind::MediumInt,
        BaseKind::Int,
        BaseKind::BigInt,
        BaseKind::Decimal,
        BaseKind::Float,
        BaseKind::Double,
        BaseKind::Char,
        BaseKind::Varchar,
        BaseKind::Text,
        BaseKind::Blob,
        BaseKind::Date,
        BaseKind::Datetime,
        BaseKind::Timestamp,
    ];

    /// The lowercase token MySQL uses for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseKind::TinyInt => "tinyint",
            BaseKind::SmallInt => "smallint",
            BaseKind::MediumInt => "mediumint",
            BaseKind::Int => "int",
            BaseKind::BigInt => "bigint",
            BaseKind::Decimal => "decimal",
            BaseKind::Float => "float",
            BaseKind::Double => "double",
            BaseKind::Char => "char",
            BaseKind::Varchar => "varchar",
            BaseKind::Text => "text",
            BaseKind::Blob => "blob",
            BaseKind::Date => "date",
            BaseKind::Datetime => "datetime",
            BaseKind::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseKind {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        BaseKind::ALL
            .iter()
            .find(|k| k.as_str() == token)
            .copied()
            .ok_or(())
    }
}

/// Generator-facing type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    NullableString,
    Time,
    Bytes,
}

impl TargetType {
    /// The tag string (e.g. "uint64", "nullable-string").
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Int8 => "int8",
            TargetType::Int16 => "int16",
            TargetType::Int32 => "int32",
            TargetType::Int64 => "int64",
            TargetType::Uint8 => "uint8",
            TargetType::Uint16 => "uint16",
            TargetType::Uint32 => "uint32",
            TargetType::Uint64 => "uint64",
            TargetType::Float32 => "float32",
            TargetType::Float64 => "float64",
            TargetType::String => "string",
            TargetType::NullableString => "nullable-string",
            TargetType::Time => "time",
            TargetType::Bytes => "bytes",
        }
    }

    /// Unsigned variant of a signed integer type.
    ///
    /// Returns `None` for every other type, including already-unsigned ones.
    pub fn to_unsigned(self) -> Option<TargetType> {
        match self {
            TargetType::Int8 => Some(TargetType::Uint8),
            TargetType::Int16 => Some(TargetType::Uint16),
            TargetType::Int32 => Some(TargetType::Uint32),
            TargetType::Int64 => Some(TargetType::Uint64),
            _ => None,
        }
    }

    /// Whether values of this type are text.
    pub fn is_textual(&self) -> bool {
        matches!(self, TargetType::String | TargetType::NullableString)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable mapping from base kind to target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    entries: HashMap<BaseKind, TargetType>,
}

impl TypeMap {
    /// An empty map; every lookup fails.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Map `kind` to `target` and return the map.
    pub fn with(mut self, kind: BaseKind, target: TargetType) -> Self {
        self.entries.insert(kind, target);
        self
    }

    /// Apply every override and return the map.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (BaseKind, TargetType)>,
    {
        self.entries.extend(overrides);
        self
    }

    /// Look up the target type for a base kind.
    pub fn get(&self, kind: BaseKind) -> Option<TargetType> {
        self.entries.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        use BaseKind::*;

        let entries = [
            (TinyInt, TargetType::Int8),
            (SmallInt, TargetType::Int16),
            (MediumInt, TargetType::Int32),
            (Int, TargetType::Int32),
            (BigInt, TargetType::Int64),
            (Decimal, TargetType::Float64),
            (Float, TargetType::Float32),
            (Double, TargetType::Float64),
            (Char, TargetType::String),
            (Varchar, TargetType::String),
            (Text, TargetType::String),
            (Blob, TargetType::Bytes),
            (Date, TargetType::Time),
            (Datetime, TargetType::Time),
            (Timestamp, TargetType::Time),
        ];

        Self {
            entries: entries.into_iter().collect(),
        }
    }
}
