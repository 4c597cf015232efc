//! Subscriber setup for the `triage` binary.
//!
//! Library crates only emit `tracing` events; this module decides where they
//! go and how they look.
//!
//! # Log Levels
//!
//! - `error`: Run aborted (retries exhausted, rejected API key)
//! - `warn`: Failed page requests that will be retried
//! - `info`: Pages retrieved, cohort counts, submission
//! - `debug`: Request URLs, waits, response shapes
//! - `trace`: Per-record scores (patient identifiers require `--log-data`)

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when patient-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates that follow the configured level; everything else stays at warn.
const WORKSPACE_CRATES: [&str; 4] = ["triage_cli", "triage_client", "triage_core", "triage_model"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Returns true if patient-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when PHI logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Logging settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for workspace crates.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may replace `level_filter`.
    pub use_env_filter: bool,
    /// Prefix pretty and compact lines with a timestamp (JSON always has one).
    pub with_timestamps: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
    /// Whether patient identifiers may appear in logs and tables.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human format.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_timestamps: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Install the global subscriber over an arbitrary writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    build_subscriber(config, writer).init();
}

fn build_subscriber<W>(config: &LogConfig, writer: W) -> impl Subscriber + Send + Sync + use<W>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer(config, writer))
        .with(build_env_filter(config.level_filter, config.use_env_filter))
}

fn fmt_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// `RUST_LOG` wins when allowed and set.
fn build_env_filter(level_filter: LevelFilter, use_env_filter: bool) -> EnvFilter {
    if use_env_filter {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(default_directives(level_filter))
}

/// External crates stay at warn so HTTP internals stay out of the log.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let mut directives = vec![LevelFilter::WARN.min(level_filter).to_string().to_lowercase()];
    directives.extend(
        WORKSPACE_CRATES
            .iter()
            .map(|krate| format!("{krate}={level}")),
    );
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf-8 log")
        }
    }

    fn capture(config: &LogConfig) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = build_subscriber(config, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "triage_core", records = 3, "analysis complete");
            tracing::debug!(target: "triage_core", "hidden at info");
        });
        buffer.contents()
    }

    fn config(format: LogFormat, with_timestamps: bool) -> LogConfig {
        LogConfig {
            use_env_filter: false,
            with_ansi: false,
            with_timestamps,
            format,
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,triage_cli=debug,triage_client=debug,triage_core=debug,triage_model=debug"
        );
        assert!(default_directives(LevelFilter::ERROR).starts_with("error,"));
    }

    #[test]
    fn test_compact_without_timestamps() {
        let output = capture(&config(LogFormat::Compact, false));
        assert!(output.trim_start().starts_with("INFO"), "{output}");
        assert!(output.contains("analysis complete records=3"), "{output}");
        assert!(!output.contains("hidden at info"), "{output}");
    }

    #[test]
    fn test_compact_with_timestamps() {
        let output = capture(&config(LogFormat::Compact, true));
        let first = output.chars().next().expect("log line");
        assert!(first.is_ascii_digit(), "{output}");
    }

    #[test]
    fn test_json_lines() {
        let output = capture(&config(LogFormat::Json, false));
        let line = output.lines().next().expect("log line");
        let event: serde_json::Value = serde_json::from_str(line).expect("json event");
        assert_eq!(event["fields"]["message"], "analysis complete");
        assert_eq!(event["fields"]["records"], 3);
        assert_eq!(event["level"], "INFO");
    }

    #[test]
    fn test_redaction_is_default() {
        assert!(!LogConfig::default().log_data);
        assert_eq!(redact_value("P-001"), REDACTED_VALUE);
    }
}
