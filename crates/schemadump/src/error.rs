//! Error types for the schema introspection library.

use thiserror::Error;

/// Exit code for configuration errors (bad YAML, missing fields, bad flags).
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for a column type the type map does not know.
pub const EXIT_UNSUPPORTED_TYPE: u8 = 2;
/// Exit code for index rows that violate the grouping invariant.
pub const EXIT_MALFORMED_INDEX: u8 = 3;
/// Exit code for connection and metadata query failures.
pub const EXIT_DATABASE_ERROR: u8 = 4;
/// Exit code for rendering failures.
pub const EXIT_RENDER_ERROR: u8 = 5;
/// Exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for introspection and generation.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Raw column type whose base token has no entry in the type map.
    #[error("Unsupported column type '{raw_type}' for column '{column}'")]
    UnsupportedType { column: String, raw_type: String },

    /// Index rows that cannot be grouped into indexes.
    #[error("Malformed index sequence for index '{index}': {message}")]
    MalformedIndex { index: String, message: String },

    /// Metadata query or connection failure with context
    #[error("Database error: {message}\n  Context: {context}")]
    Database { message: String, context: String },

    /// Failure while assembling a specific table
    #[error("Inspection failed for table {table}")]
    Table {
        table: String,
        #[source]
        source: Box<DumpError>,
    },

    /// Rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumpError {
    /// Create a Database error with context about where it occurred
    pub fn database(message: impl ToString, context: impl Into<String>) -> Self {
        DumpError::Database {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create an UnsupportedType error.
    pub fn unsupported_type(column: impl Into<String>, raw_type: impl Into<String>) -> Self {
        DumpError::UnsupportedType {
            column: column.into(),
            raw_type: raw_type.into(),
        }
    }

    /// Create a MalformedIndex error.
    pub fn malformed_index(index: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::MalformedIndex {
            index: index.into(),
            message: message.into(),
        }
    }

    /// Attach the name of the table being assembled.
    pub fn in_table(self, table: impl Into<String>) -> Self {
        DumpError::Table {
            table: table.into(),
            source: Box::new(self),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::Config(_) | DumpError::Yaml(_) => EXIT_CONFIG_ERROR,
            DumpError::UnsupportedType { .. } => EXIT_UNSUPPORTED_TYPE,
            DumpError::MalformedIndex { .. } => EXIT_MALFORMED_INDEX,
            DumpError::Database { .. } => EXIT_DATABASE_ERROR,
            DumpError::Table { source, .. } => source.exit_code(),
            DumpError::Render(_) | DumpError::Json(_) => EXIT_RENDER_ERROR,
            DumpError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for introspection operations.
pub type Result<T> = std::result::Result<T, DumpError>;
