use crate::config::{EditorConfig, EditorProfile};
use crate::domain::model::{RecordKind, SourceFormat};
use crate::utils::logger::LogOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "record-editor")]
#[command(about = "Edit budget, employee and contact lists stored in flat files")]
pub struct CliConfig {
    /// Kind of records to edit
    #[arg(value_enum)]
    pub kind: Option<RecordKind>,

    /// Path to a TOML profile
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source file to load (overrides the profile)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Source file format (overrides the profile)
    #[arg(long, value_enum)]
    pub format: Option<SourceFormat>,

    /// Default CSV export destination offered at the save prompt
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Do not create the source file when it is missing
    #[arg(long)]
    pub no_create: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 命令列 > profile > 預設值
    pub fn resolve(&self, profile: &EditorProfile) -> EditorConfig {
        let mut config = EditorConfig::from_profile(self.kind, profile);

        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.export.is_some() {
            config.export = self.export.clone();
        }
        if self.no_create {
            config.create_missing = false;
        }

        config
    }

    pub fn log_options(&self, profile: &EditorProfile) -> LogOptions {
        LogOptions {
            verbose: self.verbose,
            json: self.json_logs || profile.json_logs(),
            level: if self.verbose {
                None
            } else {
                profile.log_level().map(str::to_string)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_parse_defaults() {
        let cli = CliConfig::parse_from(["record-editor"]);
        let config = cli.resolve(&EditorProfile::default());

        assert_eq!(config, EditorConfig::for_kind(RecordKind::Budget));
        assert!(!cli.log_options(&EditorProfile::default()).json);
    }

    #[test]
    fn test_flags_override_profile() {
        let profile = EditorProfile::from_toml_str(
            "[editor]\nkind = \"employees\"\nsource = \"staff.txt\"\n\n[logging]\nlevel = \"info\"\n",
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "record-editor",
            "--source",
            "other.txt",
            "--format",
            "pipe",
            "--export",
            "out.csv",
            "--no-create",
        ]);
        let config = cli.resolve(&profile);

        assert_eq!(config.kind, RecordKind::Employees);
        assert_eq!(config.source, PathBuf::from("other.txt"));
        assert_eq!(config.format, SourceFormat::Pipe);
        assert_eq!(config.export, Some(PathBuf::from("out.csv")));
        assert!(!config.create_missing);
        assert_eq!(cli.log_options(&profile).level.as_deref(), Some("info"));
    }

    #[test]
    fn test_positional_kind() {
        let cli = CliConfig::parse_from(["record-editor", "contacts", "-v"]);
        assert_eq!(cli.kind, Some(RecordKind::Contacts));
        assert!(cli.verbose);
        assert_eq!(cli.log_options(&EditorProfile::default()).level, None);
    }

    #[test]
    fn test_non_csv_export_flag_rejected() {
        let cli = CliConfig::parse_from(["record-editor", "--export", "out.txt"]);
        assert!(cli.resolve(&EditorProfile::default()).validate().is_err());

        let cli = CliConfig::parse_from(["record-editor", "--export", "out.csv"]);
        assert!(cli.resolve(&EditorProfile::default()).validate().is_ok());
    }
}
