use crate::core::codec::{self, Arity};
use crate::core::record_list::{MergeSummary, RecordList};
use crate::domain::model::{Record, SourceFormat};
use crate::domain::ports::Storage;
use crate::utils::error::{EditorError, Result};
use std::path::Path;

/// 載入來源檔的結果狀態
#[derive(Debug)]
pub enum LoadStatus {
    Loaded,
    /// 來源檔不存在，已建立預設內容後再讀入
    CreatedPlaceholder,
    /// 來源檔不存在且未建立
    Missing,
    Failed(EditorError),
}

#[derive(Debug)]
pub struct Loaded<R: Record> {
    pub records: RecordList<R>,
    pub status: LoadStatus,
}

/// 副檔名為 `.csv` (不分大小寫)
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// 記錄檔的讀寫，所有檔案存取都經過 `Storage`
pub struct RecordStore<S: Storage> {
    storage: S,
}

impl<S: Storage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.storage.exists(path)
    }

    /// 讀入來源檔；只保留欄位數剛好符合且通過驗證的行
    pub fn try_load<R: Record>(&self, path: &Path, format: SourceFormat) -> Result<RecordList<R>> {
        let content = self.storage.read_to_string(path)?;
        let records = codec::parse::<R>(&content, format, Arity::Exact)?;
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(RecordList::from(records))
    }

    /// 不會失敗的載入：檔案不存在時依 `placeholder` 建立檔案，其他錯誤回傳空清單
    pub fn load<R: Record>(
        &self,
        path: &Path,
        format: SourceFormat,
        placeholder: Option<&str>,
    ) -> Loaded<R> {
        match self.try_load(path, format) {
            Ok(records) => Loaded {
                records,
                status: LoadStatus::Loaded,
            },
            Err(e) if e.is_not_found() => {
                let Some(content) = placeholder else {
                    tracing::warn!("⚠️ Source file {} not found", path.display());
                    return Loaded {
                        records: RecordList::new(),
                        status: LoadStatus::Missing,
                    };
                };

                tracing::info!("📝 Creating placeholder source file {}", path.display());
                if let Err(e) = self.storage.write_file(path, content.as_bytes()) {
                    tracing::error!("❌ Could not create {}: {}", path.display(), e);
                    return Loaded {
                        records: RecordList::new(),
                        status: LoadStatus::Failed(e),
                    };
                }

                match self.try_load(path, format) {
                    Ok(records) => Loaded {
                        records,
                        status: LoadStatus::CreatedPlaceholder,
                    },
                    Err(e) => Loaded {
                        records: RecordList::new(),
                        status: LoadStatus::Failed(e),
                    },
                }
            }
            Err(e) => {
                tracing::error!("❌ Failed to read {}: {}", path.display(), e);
                Loaded {
                    records: RecordList::new(),
                    status: LoadStatus::Failed(e),
                }
            }
        }
    }

    /// 解析匯入檔為候選記錄；`.csv` 以 CSV 解析，其他檔案使用 `text_format`
    pub fn read_import<R: Record>(&self, path: &Path, text_format: SourceFormat) -> Result<Vec<R>> {
        if !self.storage.exists(path) {
            return Err(EditorError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = self.storage.read_to_string(path)?;
        let format = if is_csv_path(path) {
            SourceFormat::Csv
        } else {
            text_format
        };

        tracing::debug!("Importing {} as {}", path.display(), format);
        codec::parse(&content, format, Arity::AtLeast)
    }

    /// 匯入並合併；檔案讀取失敗時清單保持不變
    pub fn import_merge<R: Record>(
        &self,
        records: &mut RecordList<R>,
        path: &Path,
        text_format: SourceFormat,
    ) -> Result<MergeSummary> {
        let candidates = self.read_import::<R>(path, text_format)?;
        let summary = records.merge(candidates);

        tracing::info!(
            "📥 Imported {}: {} inserted, {} updated",
            path.display(),
            summary.inserted,
            summary.updated
        );
        Ok(summary)
    }

    /// 匯出為 CSV，回傳寫入的資料列數 (不含標題列)
    pub fn export<R: Record>(&self, records: &RecordList<R>, dest: &Path) -> Result<usize> {
        let data = codec::write_csv(records)?;
        self.storage.write_file(dest, &data)?;

        tracing::info!("💾 Exported {} records to {}", records.len(), dest.display());
        Ok(records.len())
    }
}
