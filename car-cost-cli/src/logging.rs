//! Log output for the `car-cost` binary.
//!
//! Everything goes to stderr so that stdout only carries the report. With
//! `--log-file` the same events are also appended, without colors, to a file.

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber, error};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when neither `RUST_LOG` nor `--log-level` is given.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

const RESET: &str = "\x1b[0m";

/// `12:04:31.208  WARN car_cost_core::calculations::projector: message k=v`
struct CliFormat;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CliFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            let color = level_color(*meta.level());
            write!(
                writer,
                "\x1b[2m{time}{RESET} {color}{:>5}{RESET} \x1b[36m{}:{RESET} ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Resolves the active filter: `--log-level` wins over `RUST_LOG`, which wins
/// over [`DEFAULT_FILTER`].
///
/// `level` may be a bare level (`debug`) or a full directive
/// (`info,car_cost_core=trace`).
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid log level '{directive}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = build_filter(level)?;
    let file = log_file.map(open_log_file).transpose()?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CliFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .event_format(CliFormat)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("logging already initialized: {e}"))
}

/// Logs the failure of a step that must not abort the run.
pub fn log_task_error(
    task_name: &'static str,
    result: Result<()>,
) {
    if let Err(error) = result {
        error!(task = task_name, ?error, "task failed");
    }
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn explicit_level_overrides_the_environment() {
        let filter = build_filter(Some("debug")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn full_directives_are_accepted() {
        let filter = build_filter(Some("warn,car_cost_core=trace")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn malformed_level_is_rejected() {
        let message = build_filter(Some("car_cost_core=loud")).unwrap_err().to_string();
        assert!(message.starts_with("invalid log level 'car_cost_core=loud'"), "{message}");
    }

    #[test]
    fn log_file_in_missing_directory_is_an_error() {
        let result = open_log_file(Path::new("/nonexistent-dir/car-cost.log"));

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("cannot open log file"), "{message}");
    }

    #[test]
    fn successful_task_logs_nothing() {
        log_task_error("noop", Ok(()));
    }
}
