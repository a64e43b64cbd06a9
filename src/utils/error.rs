use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Selection {position} is out of range (1-{len})")]
    IndexOutOfRange { position: usize, len: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EditorError {
    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EditorError::CsvError(e) => format!("Could not read the CSV data: {}", e),
            EditorError::IoError(e) => format!("A file operation failed: {}", e),
            EditorError::FileNotFound { path } => {
                format!("The file '{}' does not exist. Please check the path.", path)
            }
            EditorError::IndexOutOfRange { len, .. } if *len == 0 => {
                "There are no entries to select.".to_string()
            }
            EditorError::IndexOutOfRange { len, .. } => {
                format!("Invalid selection number. Choose between 1 and {}.", len)
            }
            EditorError::ConfigError { message } => format!("Configuration problem: {}", message),
            EditorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    /// 錯誤復原建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EditorError::CsvError(_) => "Check that the file is valid UTF-8 CSV",
            EditorError::IoError(_) => "Check file permissions and available disk space",
            EditorError::FileNotFound { .. } => "Enter the full path, e.g. C:\\Data\\new.csv",
            EditorError::IndexOutOfRange { .. } => "Enter one of the numbers shown in the list",
            EditorError::ConfigError { .. } | EditorError::InvalidConfigValueError { .. } => {
                "Fix the profile file or command-line flags and start again"
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            EditorError::FileNotFound { .. } => true,
            EditorError::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let io = EditorError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.is_not_found());
        assert!(EditorError::FileNotFound {
            path: "x.txt".to_string()
        }
        .is_not_found());

        let denied =
            EditorError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no"));
        assert!(!denied.is_not_found());
    }

    #[test]
    fn test_index_message_mentions_range() {
        let err = EditorError::IndexOutOfRange {
            position: 9,
            len: 3,
        };
        assert_eq!(err.to_string(), "Selection 9 is out of range (1-3)");
        assert!(err.user_friendly_message().contains("between 1 and 3"));
    }
}
