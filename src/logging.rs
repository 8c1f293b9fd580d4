// ABOUTME: Logging sink setup — tracing to stderr plus a rolling file, suppressible under --fast

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Initializes the process-wide logging sink: an `fmt` layer on
/// stderr plus a daily-rolling file `interpreter.log`. Under `fast`,
/// the filter is raised to `error` only, suppressing per-line info
/// logging for speed.
///
/// Returns the file-appender guard; it must be kept alive for the
/// duration of the process or buffered writes are lost on drop.
pub fn init(fast: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(".", "interpreter.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let level = if fast {
        LevelFilter::ERROR
    } else {
        LevelFilter::INFO
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_ansi(true);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(level)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
