use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber: stderr always, plus a daily-rolling file
/// under `log_dir` when given. `RUST_LOG` overrides `default_level`.
///
/// Keep the returned guard alive for the life of the process so buffered
/// file output is flushed.
pub fn init_logging(
    component: &str,
    default_level: &str,
    log_dir: Option<&Path>,
) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer);

    match log_dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            // Files like pkgscan.log.2026-01-21
            let file_appender = tracing_appender::rolling::daily(dir, component);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true);
            registry.with(file_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}
