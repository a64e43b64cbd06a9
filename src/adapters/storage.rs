use crate::domain::ports::Storage;
use crate::utils::error::{EditorError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 本機檔案系統，相對路徑以 `base_path` 為根
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EditorError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                EditorError::IoError(e)
            }
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }
}

/// In-memory storage for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails with `PermissionDenied`.
    pub fn read_only() -> Self {
        Self {
            files: RefCell::default(),
            read_only: true,
        }
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.into(), content.as_bytes().to_vec());
        self
    }

    pub fn get_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .borrow()
            .get(path.as_ref())
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

impl Storage for MemoryStorage {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.borrow();
        let data = files.get(path).ok_or_else(|| EditorError::FileNotFound {
            path: path.display().to_string(),
        })?;
        String::from_utf8(data.clone()).map_err(|e| {
            EditorError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if self.read_only {
            return Err(EditorError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            )));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}
