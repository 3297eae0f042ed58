//! Logging setup.
//!
//! Two sinks:
//! - one-line JSON records in a daily-rolling file under the log directory
//! - human-readable lines on stderr (debug builds, or when `verbose` is set)
//!
//! Records emitted through the `log` facade are forwarded into `tracing`,
//! so library code can use either.

use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub const LOG_FILE_PREFIX: &str = "streakboard.log";

/// Initialize the global subscriber. Calling it again is a no-op.
///
/// `level` is the default directive (e.g. `"info"`); `RUST_LOG` overrides it.
pub fn init_logger(log_dir: &Path, level: &str, verbose: bool) -> anyhow::Result<()> {
    if LOG_DIR.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%dT%H:%M:%S%.3f%:z".to_string(),
        ))
        .with_filter(build_filter(level));

    let stderr_layer = if verbose || cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                ))
                .with_filter(build_filter(if verbose { "debug" } else { level })),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = FILE_GUARD.set(guard);
    let _ = LOG_DIR.set(log_dir.to_path_buf());

    tracing::info!(
        target: "streakboard::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level applies, with sqlx kept quiet.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{level},sqlx=warn")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
