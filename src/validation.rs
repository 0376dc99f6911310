//! Field validation helpers shared by the tool handlers.

use crate::types::{Error, Result};

/// Validate that a string is not empty.
pub fn validate_non_empty(s: &str, field: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Validate that a file name stays directly inside the store's base directory.
pub fn validate_file_name(name: &str, field: &str) -> Result<()> {
    validate_non_empty(name, field)?;
    if name == "." || name == ".." {
        return Err(Error::validation(format!(
            "{}: '{}' is not a valid file name",
            field, name
        )));
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(Error::validation(format!(
            "{}: '{}' must not contain path separators",
            field, name
        )));
    }
    Ok(())
}
