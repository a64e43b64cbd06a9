use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌設定；輸出一律寫到 stderr，避免和互動選單混在一起
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub json: bool,
    /// 覆寫預設過濾條件 (例如 profile 的 `logging.level`)
    pub level: Option<String>,
}

fn build_filter(options: &LogOptions) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match (&options.level, options.verbose) {
            (Some(level), _) => format!("record_editor={}", level),
            (None, true) => "record_editor=debug,info".to_string(),
            (None, false) => "record_editor=warn".to_string(),
        };
        EnvFilter::new(directive)
    })
}

pub fn init_cli_logger(options: &LogOptions) {
    let filter = build_filter(options);

    if options.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
