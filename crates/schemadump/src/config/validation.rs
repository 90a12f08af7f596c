//! Configuration validation.

use super::Config;
use crate::core::identifier::validate_identifier;
use crate::error::{DumpError, Result};
use crate::typemap::TargetType;

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Source validation
    match &config.source.url {
        Some(url) => {
            if !(url.starts_with("mysql://") || url.starts_with("mariadb://")) {
                return Err(DumpError::Config(
                    "source.url must start with 'mysql://' or 'mariadb://'".into(),
                ));
            }
        }
        None => {
            if config.source.host.is_empty() {
                return Err(DumpError::Config(
                    "source.url or source.host is required".into(),
                ));
            }
            if config.source.database.is_empty() {
                return Err(DumpError::Config("source.database is required".into()));
            }
            if config.source.user.is_empty() {
                return Err(DumpError::Config("source.user is required".into()));
            }
        }
    }
    if config.source.port == 0 {
        return Err(DumpError::Config("source.port must be at least 1".into()));
    }

    // Inspect validation
    for table in &config.inspect.tables {
        validate_identifier(table)
            .map_err(|e| DumpError::Config(format!("inspect.tables: {}", e)))?;
    }
    for (kind, target) in &config.inspect.type_overrides {
        if *target == TargetType::NullableString {
            return Err(DumpError::Config(format!(
                "inspect.type_overrides.{}: 'nullable-string' is derived from column nullability and cannot be mapped directly",
                kind
            )));
        }
    }

    // Output validation
    if config.output.path.trim().is_empty() {
        return Err(DumpError::Config("output.path cannot be empty".into()));
    }
    if let Some(path) = &config.output.template {
        if path.as_os_str().is_empty() {
            return Err(DumpError::Config("output.template cannot be empty".into()));
        }
    }

    if let Some(path) = &config.schema_file {
        if path.as_os_str().is_empty() {
            return Err(DumpError::Config("schema_file cannot be empty".into()));
        }
    }

    Ok(())
}
