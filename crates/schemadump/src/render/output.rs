//! Output destinations for rendered schemas.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{STDOUT_PATH, TABLE_PLACEHOLDER};
use crate::core::schema::Schema;
use crate::error::Result;

use super::Renderer;

/// Where rendered output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    Stdout,
    /// A single file holding every table.
    File(PathBuf),
    /// One file per table; `%t` in the pattern is replaced by the table name.
    PerTable(String),
}

impl OutputTarget {
    /// Interpret an output path setting.
    ///
    /// `STDOUT` (or an empty string) selects standard output and a path
    /// containing `%t` selects per-table files.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        if path.is_empty() || path == STDOUT_PATH {
            OutputTarget::Stdout
        } else if path.contains(TABLE_PLACEHOLDER) {
            OutputTarget::PerTable(path.to_string())
        } else {
            OutputTarget::File(PathBuf::from(path))
        }
    }

    /// Path of the file that receives `table`, if output goes to files.
    pub fn path_for(&self, table: &str) -> Option<PathBuf> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.clone()),
            OutputTarget::PerTable(pattern) => {
                Some(PathBuf::from(pattern.replace(TABLE_PLACEHOLDER, table)))
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Render and write a schema.
///
/// Every table is rendered before anything is written, so a render failure
/// leaves no partial output behind. Returns the files written.
pub fn write_schema(
    schema: &Schema,
    renderer: &Renderer,
    target: &OutputTarget,
) -> Result<Vec<PathBuf>> {
    match target {
        OutputTarget::Stdout => {
            let content = renderer.render_schema(schema)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(Vec::new())
        }
        OutputTarget::File(path) => {
            let content = renderer.render_schema(schema)?;
            write_file(path, &content)?;
            info!("Wrote {} tables to {}", schema.len(), path.display());
            Ok(vec![path.clone()])
        }
        OutputTarget::PerTable(_) => {
            let mut rendered = Vec::with_capacity(schema.len());
            for table in schema {
                let path = target.path_for(&table.db_name).unwrap_or_default();
                rendered.push((path, renderer.render_table(table)?));
            }

            let mut written = Vec::with_capacity(rendered.len());
            for (path, content) in rendered {
                write_file(&path, &content)?;
                written.push(path);
            }
            info!("Wrote {} table files", written.len());
            Ok(written)
        }
    }
}
