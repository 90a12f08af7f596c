//! Identifier validation and quoting for the statements we build by hand.
//!
//! Table names cannot be bound as parameters, so `SHOW INDEX FROM` needs a
//! quoted identifier. Names are validated first and backticks are doubled.

use crate::error::{DumpError, Result};

/// Maximum identifier length accepted by MySQL.
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate an identifier for security issues.
///
/// Rejects empty identifiers, identifiers containing null bytes and
/// identifiers longer than MySQL allows.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DumpError::Config("Identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(DumpError::Config(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(DumpError::Config(format!(
            "Identifier exceeds maximum length of {} characters: {:?}",
            MAX_IDENTIFIER_LENGTH, name
        )));
    }

    Ok(())
}

/// Quote a MySQL identifier using backticks.
///
/// ```ignore
/// assert_eq!(quote_mysql("users")?, "`users`");
/// assert_eq!(quote_mysql("table`name")?, "`table``name`");
/// ```
pub fn quote_mysql(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("`{}`", name.replace('`', "``")))
}
