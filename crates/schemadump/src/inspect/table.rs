//! Table assembly: columns, indexes and derived generator fields.

use crate::core::naming::snake_to_camel;
use crate::core::schema::{Column, Index, Table};
use crate::core::traits::{ColumnRow, IndexRow};
use crate::error::{DumpError, Result};
use crate::typemap::TypeResolver;

use super::column::build_column;
use super::index::{assemble_indexes, IndexGrouping};

/// Assemble a [`Table`] from its raw column and index rows.
///
/// Columns keep declaration order and indexes keep first-appearance order.
/// A table without a primary key gets the empty [`Index`] as `primary_key`.
pub fn assemble_table(
    db_name: &str,
    column_rows: Vec<ColumnRow>,
    index_rows: Vec<IndexRow>,
    resolver: &TypeResolver,
    grouping: IndexGrouping,
) -> Result<Table> {
    let columns = column_rows
        .into_iter()
        .map(|row| build_column(resolver, row))
        .collect::<Result<Vec<Column>>>()?;

    let indexes = assemble_indexes(index_rows, grouping)?;

    let mut primary_key: Option<Index> = None;
    let mut non_primary_indexes = Vec::new();
    for index in &indexes {
        if index.primary {
            if primary_key.is_some() {
                return Err(DumpError::malformed_index(
                    index.name.clone(),
                    "table declares more than one primary key",
                ));
            }
            primary_key = Some(index.clone());
        } else {
            non_primary_indexes.push(index.clone());
        }
    }

    let column_db_names: Vec<String> = columns.iter().map(|c| c.db_name.clone()).collect();
    let select_fields = columns
        .iter()
        .map(|c| format!("`{}`", c.db_name))
        .collect::<Vec<_>>()
        .join(",");
    let scan_fields = columns
        .iter()
        .map(|c| format!("&r.{}", c.name))
        .collect::<Vec<_>>()
        .join(",");

    Ok(Table {
        name: snake_to_camel(db_name),
        db_name: db_name.to_string(),
        columns,
        indexes,
        primary_key: primary_key.unwrap_or_default(),
        non_primary_indexes,
        column_db_names,
        select_fields,
        scan_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typemap::TargetType;

    fn col(name: &str, column_type: &str, nullable: bool, default: Option<&str>) -> ColumnRow {
        ColumnRow {
            name: name.to_string(),
            column_type: column_type.to_string(),
            nullable,
            default: default.map(str::to_string),
            extra: String::new(),
        }
    }

    fn idx(index: &str, column: &str, unique: bool, seq: u32) -> IndexRow {
        IndexRow {
            index_name: index.to_string(),
            column_name: column.to_string(),
            unique,
            seq_in_index: seq,
        }
    }

    fn assemble(name: &str, columns: Vec<ColumnRow>, indexes: Vec<IndexRow>) -> Result<Table> {
        assemble_table(
            name,
            columns,
            indexes,
            &TypeResolver::default(),
            IndexGrouping::Strict,
        )
    }

    #[test]
    fn test_user_item_table() {
        let table = assemble(
            "user_item",
            vec![
                col("user_id", "bigint(20) unsigned", false, None),
                col("item_id", "bigint(20) unsigned", false, None),
                col("sort", "float", false, Some("0")),
                col("power", "double", false, Some("0")),
                col("created_at", "datetime", false, None),
            ],
            vec![
                idx("PRIMARY", "user_id", true, 1),
                idx("PRIMARY", "item_id", true, 2),
                idx("item_id", "item_id", false, 1),
            ],
        )
        .unwrap();

        assert_eq!(table.name, "UserItem");
        assert_eq!(table.db_name, "user_item");

        let types: Vec<TargetType> = table.columns.iter().map(|c| c.target_type).collect();
        assert_eq!(
            types,
            vec![
                TargetType::Uint64,
                TargetType::Uint64,
                TargetType::Float32,
                TargetType::Float64,
                TargetType::Time,
            ]
        );

        assert_eq!(table.primary_key.name, "PRIMARY");
        assert_eq!(table.primary_key.columns, vec!["user_id", "item_id"]);
        assert_eq!(table.non_primary_indexes.len(), 1);
        assert_eq!(table.non_primary_indexes[0].name, "item_id");

        assert_eq!(
            table.column_db_names,
            vec!["user_id", "item_id", "sort", "power", "created_at"]
        );
        assert_eq!(
            table.select_fields,
            "`user_id`,`item_id`,`sort`,`power`,`created_at`"
        );
        assert_eq!(
            table.scan_fields,
            "&r.UserID,&r.ItemID,&r.Sort,&r.Power,&r.CreatedAt"
        );
    }

    #[test]
    fn test_table_without_indexes() {
        let table = assemble(
            "no_index",
            vec![
                col("foo", "varchar(10)", false, None),
                col("val", "varchar(255)", true, None),
                col("created_at", "datetime", false, None),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(table.name, "NoIndex");
        assert!(table.indexes.is_empty());
        assert!(table.non_primary_indexes.is_empty());
        assert_eq!(table.primary_key, Index::default());
        assert!(!table.has_pk());
        assert_eq!(table.columns[1].target_type, TargetType::NullableString);
        assert_eq!(table.select_fields, "`foo`,`val`,`created_at`");
        assert_eq!(table.scan_fields, "&r.Foo,&r.Val,&r.CreatedAt");
    }

    #[test]
    fn test_table_without_primary_key_keeps_other_indexes() {
        let table = assemble(
            "log",
            vec![col("at", "datetime", false, None)],
            vec![idx("at_idx", "at", false, 1)],
        )
        .unwrap();

        assert!(table.primary_key.is_empty());
        assert_eq!(table.indexes.len(), 1);
        assert_eq!(table.non_primary_indexes, table.indexes);
    }

    #[test]
    fn test_duplicate_primary_key_is_rejected() {
        let result = assemble_table(
            "broken",
            vec![col("id", "int(11)", false, None)],
            vec![idx("PRIMARY", "id", true, 1), idx("PRIMARY", "id", true, 1)],
            &TypeResolver::default(),
            IndexGrouping::Grouped,
        );
        // Grouped mode merges the rows, then the sequence check rejects them.
        assert!(matches!(result, Err(DumpError::MalformedIndex { .. })));

        let result = assemble(
            "broken",
            vec![col("id", "int(11)", false, None)],
            vec![idx("PRIMARY", "id", true, 1), idx("PRIMARY", "id", true, 1)],
        );
        assert!(matches!(result, Err(DumpError::MalformedIndex { .. })));
    }

    #[test]
    fn test_unsupported_column_aborts_table() {
        let result = assemble(
            "event",
            vec![
                col("id", "int(11)", false, None),
                col("payload", "json", true, None),
            ],
            vec![],
        );
        assert!(matches!(result, Err(DumpError::UnsupportedType { .. })));
    }
}
