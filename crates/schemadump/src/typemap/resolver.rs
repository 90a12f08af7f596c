//! Raw column type parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{BaseKind, TargetType, TypeMap};
use crate::error::{DumpError, Result};

/// Base token, optional `(precision[,scale])`, optional `unsigned`.
static TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([a-z]+)(?:\s*\(\s*(\d+)\s*(?:,\s*\d+\s*)?\))?(?:\s+(unsigned))?")
        .expect("column type pattern is valid")
});

/// Semantic description of a raw column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeDescriptor {
    pub base_kind: BaseKind,
    /// Target type after applying the unsigned qualifier.
    pub target_type: TargetType,
    /// Declared length or numeric precision. Scale is not kept.
    pub precision: Option<u32>,
    pub unsigned: bool,
}

impl ColumnTypeDescriptor {
    /// Declared size, 0 when the type has none.
    pub fn size(&self) -> u32 {
        self.precision.unwrap_or(0)
    }
}

/// Resolves raw MySQL column types against a [`TypeMap`].
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    map: TypeMap,
}

impl TypeResolver {
    pub fn new(map: TypeMap) -> Self {
        Self { map }
    }

    pub fn type_map(&self) -> &TypeMap {
        &self.map
    }

    /// Resolve a raw column type such as `decimal(10,2)` or
    /// `bigint(20) unsigned`.
    ///
    /// # Errors
    ///
    /// Returns `DumpError::UnsupportedType` when the base token is not a
    /// known kind, the map has no entry for it, or the declared size does not
    /// fit in a `u32`. The error's column name is left empty for the caller
    /// to fill in.
    pub fn resolve(&self, raw_type: &str) -> Result<ColumnTypeDescriptor> {
        let lowered = raw_type.to_ascii_lowercase();
        let unsupported = || DumpError::unsupported_type("", raw_type);

        let caps = TYPE_RE.captures(&lowered).ok_or_else(unsupported)?;

        let base_kind: BaseKind = caps[1].parse().map_err(|_| unsupported())?;
        let mapped = self.map.get(base_kind).ok_or_else(unsupported)?;

        let precision = match caps.get(2) {
            Some(m) => Some(m.as_str().parse::<u32>().map_err(|_| unsupported())?),
            None => None,
        };

        let unsigned = caps.get(3).is_some();
        let target_type = if unsigned {
            mapped.to_unsigned().unwrap_or(mapped)
        } else {
            mapped
        };

        Ok(ColumnTypeDescriptor {
            base_kind,
            target_type,
            precision,
            unsigned,
        })
    }
}
