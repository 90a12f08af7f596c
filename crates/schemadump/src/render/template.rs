//! User-supplied per-table templates.
//!
//! A template is rendered once per table with the [`Table`] fields as its
//! context, so `{{ name }}`, `{{ select_fields }}`, `{{ scan_fields }}` and
//! `{% for column in columns %}` are all available. Undefined variables are
//! errors.

use std::fmt;
use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::core::schema::Table;
use crate::error::{DumpError, Result};

/// A compiled per-table template.
#[derive(Clone)]
pub struct TableTemplate {
    env: Environment<'static>,
    name: String,
}

impl fmt::Debug for TableTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableTemplate")
            .field("name", &self.name)
            .finish()
    }
}

impl TableTemplate {
    /// Compile a template from source text.
    ///
    /// # Errors
    ///
    /// Returns `DumpError::Render` when the source does not parse.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        // Output is source code, never HTML, whatever the file extension
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(name.clone(), source.into())
            .map_err(|e| DumpError::Render(format!("template '{}': {}", name, e)))?;

        Ok(Self { env, name })
    }

    /// Read and compile a template file.
    ///
    /// # Errors
    ///
    /// Returns `DumpError::Io` when the file cannot be read and
    /// `DumpError::Render` when it does not parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::from_source(path.display().to_string(), source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render one table.
    pub fn render(&self, table: &Table) -> Result<String> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| DumpError::Render(format!("template '{}': {}", self.name, e)))?;

        template.render(table).map_err(|e| {
            DumpError::Render(format!(
                "template '{}' failed for table '{}': {}",
                self.name, table.db_name, e
            ))
        })
    }
}
