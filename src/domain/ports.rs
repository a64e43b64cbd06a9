use crate::utils::error::Result;
use std::path::Path;

/// 檔案存取介面，編輯器的載入、匯入、匯出都經由這裡
pub trait Storage {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        (**self).write_file(path, data)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
