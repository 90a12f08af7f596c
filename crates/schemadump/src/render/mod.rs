//! Rendering of inspected schemas.
//!
//! - [`rust`]: struct definitions, one per table
//! - JSON: the [`Schema`] model itself, pretty-printed
//! - [`template`]: a user-supplied template rendered once per table
//! - [`output`]: where rendered text goes (stdout, one file, one file per table)

pub mod output;
pub mod rust;
pub mod template;

pub use output::{write_schema, OutputTarget};
pub use template::TableTemplate;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::schema::{Schema, Table};
use crate::error::Result;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rust struct definitions.
    #[default]
    Rust,
    /// JSON dump of the schema model.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Rust => "rust",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => Ok(OutputFormat::Rust),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}', expected 'rust' or 'json'",
                other
            )),
        }
    }
}

/// Render a whole schema as one document.
pub fn render_schema(schema: &Schema, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Rust => rust::render_tables(schema),
        OutputFormat::Json => {
            let mut json = schema.to_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render a single table as a standalone document.
pub fn render_table(table: &Table, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Rust => rust::render_tables([table]),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(table)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// How tables are turned into text.
#[derive(Debug, Clone)]
pub enum Renderer {
    /// One of the built-in formats.
    Builtin(OutputFormat),
    /// A user template applied to each table.
    Template(TableTemplate),
}

impl Renderer {
    /// Render a whole schema as one document.
    ///
    /// Template output is the concatenation of every table's rendering.
    pub fn render_schema(&self, schema: &Schema) -> Result<String> {
        match self {
            Renderer::Builtin(format) => render_schema(schema, *format),
            Renderer::Template(template) => {
                let mut out = String::new();
                for table in schema {
                    out.push_str(&template.render(table)?);
                }
                Ok(out)
            }
        }
    }

    /// Render a single table as a standalone document.
    pub fn render_table(&self, table: &Table) -> Result<String> {
        match self {
            Renderer::Builtin(format) => render_table(table, *format),
            Renderer::Template(template) => template.render(table),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::Builtin(OutputFormat::default())
    }
}

impl From<OutputFormat> for Renderer {
    fn from(format: OutputFormat) -> Self {
        Renderer::Builtin(format)
    }
}

impl From<TableTemplate> for Renderer {
    fn from(template: TableTemplate) -> Self {
        Renderer::Template(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::ColumnRow;
    use crate::inspect::{assemble_table, IndexGrouping};
    use crate::typemap::TypeResolver;

    fn schema() -> Schema {
        let table = assemble_table(
            "user",
            vec![ColumnRow {
                name: "uid".to_string(),
                column_type: "char(10)".to_string(),
                nullable: false,
                default: None,
                extra: String::new(),
            }],
            vec![],
            &TypeResolver::default(),
            IndexGrouping::Strict,
        )
        .unwrap();
        Schema {
            tables: vec![table],
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("rust".parse::<OutputFormat>(), Ok(OutputFormat::Rust));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_schema_json_round_trips() {
        let schema = schema();
        let json = render_schema(&schema, OutputFormat::Json).unwrap();
        let parsed: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schema);
        assert!(json.contains("\"target_type\": \"string\""));
    }

    #[test]
    fn test_render_table_rust() {
        let schema = schema();
        let out = render_table(&schema.tables[0], OutputFormat::Rust).unwrap();
        assert!(out.starts_with(rust::GENERATED_HEADER));
        assert!(out.contains("pub struct User {"));
        assert!(out.contains("pub uid: String,"));
    }

    #[test]
    fn test_template_renderer_concatenates_tables() {
        let mut schema = schema();
        let mut other = schema.tables[0].clone();
        other.db_name = "item".to_string();
        other.name = "Item".to_string();
        schema.tables.push(other);

        let renderer = Renderer::from(
            TableTemplate::from_source("names", "{{ db_name }}={{ scan_fields }}\n").unwrap(),
        );
        let out = renderer.render_schema(&schema).unwrap();
        assert_eq!(out, "user=&r.UID\nitem=&r.UID\n");

        let one = renderer.render_table(&schema.tables[1]).unwrap();
        assert_eq!(one, "item=&r.UID\n");
    }

    #[test]
    fn test_builtin_renderer_matches_format() {
        let schema = schema();
        let renderer = Renderer::from(OutputFormat::Json);
        assert_eq!(
            renderer.render_schema(&schema).unwrap(),
            render_schema(&schema, OutputFormat::Json).unwrap()
        );
        assert!(matches!(
            Renderer::default(),
            Renderer::Builtin(OutputFormat::Rust)
        ));
    }
}
