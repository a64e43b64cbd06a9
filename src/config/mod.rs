#[cfg(feature = "cli")]
pub mod cli;
pub mod profile;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use profile::EditorProfile;

use crate::domain::model::{RecordKind, SourceFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;

/// 編輯器執行期設定：來源檔、格式、預設匯出檔
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub kind: RecordKind,
    pub source: PathBuf,
    pub format: SourceFormat,
    pub export: Option<PathBuf>,
    pub create_missing: bool,
}

impl EditorConfig {
    pub fn for_kind(kind: RecordKind) -> Self {
        Self {
            kind,
            source: PathBuf::from(kind.default_source()),
            format: kind.default_format(),
            export: None,
            create_missing: true,
        }
    }

    /// Layers a profile over the per-kind defaults. `kind` falls back to the profile's own.
    pub fn from_profile(kind: Option<RecordKind>, profile: &EditorProfile) -> Self {
        let section = &profile.editor;
        let kind = kind.or(section.kind).unwrap_or_default();
        let mut config = Self::for_kind(kind);

        if let Some(source) = &section.source {
            config.source = source.clone();
        }
        if let Some(format) = section.format {
            config.format = format;
        }
        if section.export.is_some() {
            config.export = section.export.clone();
        }
        if let Some(create_missing) = section.create_missing {
            config.create_missing = create_missing;
        }

        config
    }

    /// 來源檔不存在時要寫入的內容
    pub fn placeholder(&self) -> Option<&'static str> {
        self.create_missing.then(|| self.kind.placeholder())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::for_kind(RecordKind::default())
    }
}

impl Validate for EditorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source", &self.source)?;

        if let Some(export) = &self.export {
            validation::validate_path("export", export)?;
            validation::validate_file_extension("export", export, &["csv"])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EditorError;

    #[test]
    fn test_defaults_per_kind() {
        let config = EditorConfig::for_kind(RecordKind::Employees);
        assert_eq!(config.source, PathBuf::from("employee_contact_info.txt"));
        assert_eq!(config.format, SourceFormat::Whitespace);
        assert!(config.create_missing);
        assert_eq!(config.placeholder().map(|p| p.lines().count()), Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_layering() {
        let profile = EditorProfile::from_toml_str(
            "[editor]\nkind = \"contacts\"\nsource = \"people.csv\"\ncreate_missing = false\n",
        )
        .unwrap();

        let config = EditorConfig::from_profile(None, &profile);
        assert_eq!(config.kind, RecordKind::Contacts);
        assert_eq!(config.source, PathBuf::from("people.csv"));
        assert_eq!(config.format, SourceFormat::Csv);
        assert_eq!(config.placeholder(), None);

        let overridden = EditorConfig::from_profile(Some(RecordKind::Budget), &profile);
        assert_eq!(overridden.kind, RecordKind::Budget);
        assert_eq!(overridden.format, SourceFormat::Pipe);
        assert_eq!(overridden.source, PathBuf::from("people.csv"));
    }

    #[test]
    fn test_export_requires_csv_extension() {
        let mut config = EditorConfig::default();

        config.export = Some(PathBuf::from("out.CSV"));
        assert!(config.validate().is_ok());

        config.export = Some(PathBuf::from("out.txt"));
        assert!(matches!(
            config.validate(),
            Err(EditorError::InvalidConfigValueError { .. })
        ));

        config.export = Some(PathBuf::from("out"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_source_invalid() {
        let mut config = EditorConfig::default();
        config.source = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
