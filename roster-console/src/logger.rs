//! Logging setup for the terminal client
//!
//! Events render inside the TUI through `tui-logger`; an optional
//! daily-rolling file keeps a copy when a log directory is configured.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with the in-app log widget and optional file output
pub fn init(log_dir: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = log_dir.and_then(|dir| {
        let path = std::path::Path::new(dir);
        if !path.exists() {
            std::fs::create_dir_all(path).ok()?;
        }
        let appender = tracing_appender::rolling::daily(dir, "roster");
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(false),
        )
    });

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .with(env_filter)
        .init();

    // Also init the log crate adapter for dependencies that use `log`
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);
}
