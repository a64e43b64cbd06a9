use crate::domain::model::{RecordKind, SourceFormat};
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// TOML profile，所有欄位皆可省略，由命令列或預設值補齊
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorProfile {
    #[serde(default)]
    pub editor: EditorSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSection {
    pub kind: Option<RecordKind>,
    pub source: Option<PathBuf>,
    pub format: Option<SourceFormat>,
    pub export: Option<PathBuf>,
    pub create_missing: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl EditorProfile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EditorError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                EditorError::IoError(e)
            }
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EditorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BUDGET_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for EditorProfile {
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.editor.source {
            validation::validate_path("editor.source", source)?;
        }

        if let Some(export) = &self.editor.export {
            validation::validate_path("editor.export", export)?;
            validation::validate_file_extension("editor.export", export, &["csv"])?;
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = logging.level.as_deref() {
                validation::validate_non_empty_string("logging.level", level)?;
            }
        }

        Ok(())
    }
}
