use anyhow::Context;
use clap::Parser;
use record_editor::utils::{logger, validation::Validate};
use record_editor::{run_editor, CliConfig, EditorError, EditorProfile, LocalStorage, SessionOutcome};

fn load_profile(cli: &CliConfig) -> anyhow::Result<EditorProfile> {
    let Some(path) = &cli.config else {
        return Ok(EditorProfile::default());
    };

    let profile = EditorProfile::from_file(path)
        .with_context(|| format!("Failed to load profile '{}'", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Profile '{}' is invalid", path.display()))?;
    Ok(profile)
}

fn report_startup_error(e: &anyhow::Error) -> ! {
    tracing::error!("❌ Configuration failed: {:#}", e);
    eprintln!("❌ {:#}", e);
    if let Some(editor_error) = e.downcast_ref::<EditorError>() {
        eprintln!("💡 {}", editor_error.recovery_suggestion());
    }
    std::process::exit(1);
}

fn main() {
    let cli = CliConfig::parse();

    let profile = match load_profile(&cli) {
        Ok(profile) => profile,
        Err(e) => {
            logger::init_cli_logger(&cli.log_options(&EditorProfile::default()));
            report_startup_error(&e);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(&cli.log_options(&profile));
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.resolve(&profile);
    if let Err(e) = config.validate() {
        report_startup_error(&anyhow::Error::new(e));
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    match run_editor(config, LocalStorage::default(), stdin.lock(), stdout.lock()) {
        Ok(SessionOutcome::Saved { path, rows }) => {
            tracing::info!("✅ Saved {} records to {}", rows, path.display());
        }
        Ok(SessionOutcome::Discarded) => {
            tracing::info!("Session ended without saving");
        }
        Err(e) => {
            // 只有 stdin/stdout 本身壞掉才會走到這裡
            tracing::error!("❌ Session aborted: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
        }
    }
}
