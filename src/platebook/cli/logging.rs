use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_ENV: &str = "PLATEBOOK_LOG";
const DEFAULT_LEVEL: &str = "info";
const MAX_LOG_FILES: usize = 5;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Daily log files under `<data dir>/logs`, plus debug output on stderr
/// when `verbose`. A log directory that cannot be created only loses the
/// file layer.
pub(super) fn init_logging(data_dir: &Path, verbose: bool) {
    let file_layer = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("platebook")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(data_dir.join("logs"))
        .ok()
        .map(|appender| {
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_filter(env_filter())
        });

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new("debug"))
    });

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
