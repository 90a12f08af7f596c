//! Column construction from raw metadata rows.

use crate::core::naming::snake_to_camel;
use crate::core::schema::{Column, NULL_DEFAULT};
use crate::core::traits::ColumnRow;
use crate::error::{DumpError, Result};
use crate::typemap::{TargetType, TypeResolver};

/// Build a [`Column`] from one row of column metadata.
///
/// A nullable column whose type resolves to `string` gets the
/// `nullable-string` tag; for every other type nullability is only carried
/// by the `nullable` flag. A missing default becomes the literal `"NULL"`,
/// anything else is kept exactly as the server reported it.
pub fn build_column(resolver: &TypeResolver, row: ColumnRow) -> Result<Column> {
    let descriptor = resolver.resolve(&row.column_type).map_err(|e| match e {
        DumpError::UnsupportedType { raw_type, .. } => {
            DumpError::unsupported_type(row.name.clone(), raw_type)
        }
        other => other,
    })?;

    let target_type = if row.nullable && descriptor.target_type == TargetType::String {
        TargetType::NullableString
    } else {
        descriptor.target_type
    };

    let auto_increment = row.extra.contains("auto_increment");

    Ok(Column {
        name: snake_to_camel(&row.name),
        db_name: row.name,
        db_type: row.column_type,
        target_type,
        size: descriptor.size(),
        nullable: row.nullable,
        default: row.default.unwrap_or_else(|| NULL_DEFAULT.to_string()),
        extra: row.extra,
        auto_increment,
    })
}
