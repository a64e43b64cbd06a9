use crate::utils::error::{EditorError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let text = path.to_string_lossy();

    if text.trim().is_empty() {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if text.contains('\0') {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: text.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &Path, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<String> = allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_lowercase())
        .collect();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(extension) if allowed_set.contains(&extension.to_ascii_lowercase()) => Ok(()),
        Some(extension) => Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EditorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("editor.source", Path::new("final_exam.txt")).is_ok());
        assert!(validate_path("editor.source", Path::new("")).is_err());
        assert!(validate_path("editor.source", Path::new("  ")).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("editor.export", Path::new("out.csv"), &["csv"]).is_ok());
        assert!(validate_file_extension("editor.export", Path::new("OUT.CSV"), &["csv"]).is_ok());
        assert!(validate_file_extension("editor.export", Path::new("out.txt"), &["csv"]).is_err());
        assert!(validate_file_extension("editor.export", Path::new("out"), &["csv"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("logging.level", "debug").is_ok());
        assert!(validate_non_empty_string("logging.level", " ").is_err());
    }
}
