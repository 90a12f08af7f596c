//! Rust struct generator.
//!
//! Each table becomes a plain struct with one public field per column and an
//! inherent impl carrying the table name, column list, `SELECT` field list
//! and primary key columns as associated constants.

use std::collections::HashSet;
use std::fmt::Write;

use crate::core::schema::{Column, Table};
use crate::error::{DumpError, Result};
use crate::typemap::TargetType;

/// Banner written at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by schemadump. DO NOT EDIT.\n";

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be written as raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Whether the column's raw type is a plain `date` (no time part).
fn is_date_only(column: &Column) -> bool {
    let raw = column.db_type.trim_start();
    let token: String = raw
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    token.eq_ignore_ascii_case("date")
}

/// Rust type for a column.
///
/// Nullable columns are wrapped in `Option`; `nullable-string` already
/// carries its nullability. `date` columns become `chrono::NaiveDate`, the
/// other time kinds `chrono::NaiveDateTime`.
pub fn rust_type(column: &Column) -> String {
    let base = match column.target_type {
        TargetType::Int8 => "i8",
        TargetType::Int16 => "i16",
        TargetType::Int32 => "i32",
        TargetType::Int64 => "i64",
        TargetType::Uint8 => "u8",
        TargetType::Uint16 => "u16",
        TargetType::Uint32 => "u32",
        TargetType::Uint64 => "u64",
        TargetType::Float32 => "f32",
        TargetType::Float64 => "f64",
        TargetType::String => "String",
        TargetType::NullableString => return "Option<String>".to_string(),
        TargetType::Time if is_date_only(column) => "chrono::NaiveDate",
        TargetType::Time => "chrono::NaiveDateTime",
        TargetType::Bytes => "Vec<u8>",
    };

    if column.nullable {
        format!("Option<{}>", base)
    } else {
        base.to_string()
    }
}

/// Turn a database identifier into a valid Rust identifier.
fn sanitize(name: &str) -> Option<String> {
    let mut ident: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.chars().all(|c| c == '_') {
        return None;
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    } else if KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    Some(ident)
}

/// Field name for a column.
pub fn field_name(column: &Column) -> Result<String> {
    let lowered = column.db_name.to_ascii_lowercase();
    sanitize(&lowered).ok_or_else(|| {
        DumpError::Render(format!(
            "column '{}' cannot be expressed as a Rust field name",
            column.db_name
        ))
    })
}

/// Struct name for a table.
pub fn struct_name(table: &Table) -> Result<String> {
    sanitize(&table.name).ok_or_else(|| {
        DumpError::Render(format!(
            "table '{}' cannot be expressed as a Rust type name",
            table.db_name
        ))
    })
}

fn string_slice(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("{:?}", s)).collect();
    format!("&[{}]", quoted.join(", "))
}

/// Render one table as a struct definition.
pub fn render_table(table: &Table) -> Result<String> {
    let name = struct_name(table)?;

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        let field = field_name(column)?;
        if !seen.insert(field.clone()) {
            return Err(DumpError::Render(format!(
                "table '{}': column '{}' collides with another column as field '{}'",
                table.db_name, column.db_name, field
            )));
        }
        fields.push((field, column));
    }

    let mut out = String::new();
    write_struct(&mut out, table, &name, &fields)
        .map_err(|e| DumpError::Render(format!("table '{}': {}", table.db_name, e)))?;
    Ok(out)
}

fn write_struct(
    out: &mut String,
    table: &Table,
    name: &str,
    fields: &[(String, &Column)],
) -> std::fmt::Result {
    writeln!(out, "/// Row of table `{}`.", table.db_name)?;
    writeln!(out, "#[derive(Debug, Clone, PartialEq)]")?;
    writeln!(out, "pub struct {} {{", name)?;
    for (field, column) in fields {
        writeln!(out, "    /// `{}`", column.db_type)?;
        writeln!(out, "    pub {}: {},", field, rust_type(column))?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl {} {{", name)?;
    writeln!(out, "    pub const TABLE: &'static str = {:?};", table.db_name)?;
    writeln!(
        out,
        "    pub const COLUMNS: &'static [&'static str] = {};",
        string_slice(&table.column_db_names)
    )?;
    writeln!(
        out,
        "    pub const SELECT_FIELDS: &'static str = {:?};",
        table.select_fields
    )?;
    writeln!(
        out,
        "    pub const PRIMARY_KEY: &'static [&'static str] = {};",
        string_slice(&table.primary_key.columns)
    )?;
    writeln!(out, "}}")
}

/// Render several tables into one file.
pub fn render_tables<'a, I>(tables: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Table>,
{
    let mut out = String::from(GENERATED_HEADER);
    for table in tables {
        out.push('\n');
        out.push_str(&render_table(table)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{ColumnRow, IndexRow};
    use crate::inspect::{assemble_table, IndexGrouping};
    use crate::typemap::TypeResolver;

    fn col(name: &str, column_type: &str, nullable: bool) -> ColumnRow {
        ColumnRow {
            name: name.to_string(),
            column_type: column_type.to_string(),
            nullable,
            default: None,
            extra: String::new(),
        }
    }

    fn table(name: &str, columns: Vec<ColumnRow>, indexes: Vec<IndexRow>) -> Table {
        assemble_table(
            name,
            columns,
            indexes,
            &TypeResolver::default(),
            IndexGrouping::Strict,
        )
        .unwrap()
    }

    fn item() -> Table {
        table(
            "item",
            vec![
                col("id", "bigint(20) unsigned", false),
                col("name", "varchar(100)", false),
                col("description", "text", true),
                col("valid", "tinyint(1)", true),
                col("created_at", "datetime", false),
            ],
            vec![IndexRow {
                index_name: "PRIMARY".to_string(),
                column_name: "id".to_string(),
                unique: true,
                seq_in_index: 1,
            }],
        )
    }

    #[test]
    fn test_render_item_struct() {
        let out = render_table(&item()).unwrap();

        assert!(out.contains("pub struct Item {"));
        assert!(out.contains("    pub id: u64,"));
        assert!(out.contains("    pub name: String,"));
        assert!(out.contains("    pub description: Option<String>,"));
        assert!(out.contains("    pub valid: Option<i8>,"));
        assert!(out.contains("    pub created_at: chrono::NaiveDateTime,"));
        assert!(out.contains("    /// `bigint(20) unsigned`"));
        assert!(out.contains("pub const TABLE: &'static str = \"item\";"));
        assert!(out.contains(
            "pub const COLUMNS: &'static [&'static str] = &[\"id\", \"name\", \"description\", \"valid\", \"created_at\"];"
        ));
        assert!(out.contains(
            "pub const SELECT_FIELDS: &'static str = \"`id`,`name`,`description`,`valid`,`created_at`\";"
        ));
        assert!(out.contains("pub const PRIMARY_KEY: &'static [&'static str] = &[\"id\"];"));
    }

    #[test]
    fn test_table_without_primary_key() {
        let t = table("no_index", vec![col("foo", "varchar(10)", false)], vec![]);
        let out = render_table(&t).unwrap();
        assert!(out.contains("pub struct NoIndex {"));
        assert!(out.contains("pub const PRIMARY_KEY: &'static [&'static str] = &[];"));
    }

    #[test]
    fn test_keyword_and_odd_column_names() {
        let t = table(
            "event",
            vec![
                col("type", "varchar(10)", false),
                col("self", "int(11)", false),
                col("2fa", "tinyint(1)", false),
                col("Display Name", "varchar(10)", false),
            ],
            vec![],
        );
        let out = render_table(&t).unwrap();
        assert!(out.contains("pub r#type: String,"));
        assert!(out.contains("pub self_: i32,"));
        assert!(out.contains("pub _2fa: i8,"));
        assert!(out.contains("pub display_name: String,"));
    }

    #[test]
    fn test_colliding_field_names_fail() {
        let t = table(
            "event",
            vec![col("a-b", "int(11)", false), col("a_b", "int(11)", false)],
            vec![],
        );
        assert!(matches!(render_table(&t), Err(DumpError::Render(_))));
    }

    #[test]
    fn test_render_tables_has_single_header() {
        let item = item();
        let other = table("no_index", vec![col("foo", "varchar(10)", false)], vec![]);
        let out = render_tables([&item, &other]).unwrap();

        assert!(out.starts_with(GENERATED_HEADER));
        assert_eq!(out.matches("DO NOT EDIT").count(), 1);
        assert!(out.find("pub struct Item").unwrap() < out.find("pub struct NoIndex").unwrap());
    }

    #[test]
    fn test_nullable_types() {
        let t = table(
            "blobs",
            vec![
                col("raw", "blob", true),
                col("score", "decimal(10,2)", true),
                col("at", "timestamp", true),
            ],
            vec![],
        );
        let out = render_table(&t).unwrap();
        assert!(out.contains("pub raw: Option<Vec<u8>>,"));
        assert!(out.contains("pub score: Option<f64>,"));
        assert!(out.contains("pub at: Option<chrono::NaiveDateTime>,"));
    }

    #[test]
    fn test_date_columns_have_no_time_part() {
        let t = table(
            "event",
            vec![
                col("day", "date", false),
                col("until", "DATE", true),
                col("at", "datetime", false),
                col("seen", "timestamp", false),
            ],
            vec![],
        );
        let out = render_table(&t).unwrap();
        assert!(out.contains("pub day: chrono::NaiveDate,"));
        assert!(out.contains("pub until: Option<chrono::NaiveDate>,"));
        assert!(out.contains("pub at: chrono::NaiveDateTime,"));
        assert!(out.contains("pub seen: chrono::NaiveDateTime,"));
    }
}
