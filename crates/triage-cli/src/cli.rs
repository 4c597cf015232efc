//! CLI argument definitions for the triage tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Patient risk triage - score patient records and report cohorts",
    long_about = "Fetch paginated patient records, score blood pressure, temperature and age,\n\
                  and report the high-risk, fever and data-quality cohorts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include patient identifiers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch every patient record, score it, and submit the cohorts.
    Run(RunArgs),

    /// Score patient records from a local JSON file.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// API key sent in the x-api-key header.
    #[arg(long = "api-key", env = "TRIAGE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Patient listing endpoint.
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = triage_client::DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Cohort submission endpoint.
    #[arg(
        long = "submit-url",
        value_name = "URL",
        default_value = triage_client::DEFAULT_SUBMIT_URL
    )]
    pub submit_url: String,

    /// Records requested per page.
    #[arg(
        long = "page-size",
        value_name = "N",
        default_value_t = triage_client::DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page_size: u32,

    /// Pause after every page, in milliseconds.
    #[arg(long = "page-delay-ms", value_name = "MS", default_value_t = 1000)]
    pub page_delay_ms: u64,

    /// Give up when the server still declares more pages after this many.
    #[arg(
        long = "max-pages",
        value_name = "N",
        default_value_t = triage_client::DEFAULT_MAX_PAGES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_pages: u32,

    /// Attempts per page, including the first.
    #[arg(
        long = "max-attempts",
        value_name = "N",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Per-request timeout, in seconds.
    #[arg(long = "timeout-secs", value_name = "S", default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Score and print the payload without submitting it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// JSON file holding a page body or a bare array of records.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args)]
pub struct ScoringArgs {
    /// JSON file overriding scoring thresholds (missing fields keep defaults).
    #[arg(long = "thresholds", value_name = "PATH")]
    pub thresholds: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["triage", "run", "--api-key", "k"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.page_size, 5);
        assert_eq!(args.page_delay_ms, 1000);
        assert_eq!(args.max_attempts, 5);
        assert!(!args.dry_run);
        assert!(args.scoring.thresholds.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let parsed = Cli::try_parse_from(["triage", "run", "--api-key", "k", "--page-size", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_analyze_takes_file() {
        let cli = Cli::parse_from([
            "triage",
            "--log-data",
            "analyze",
            "records.json",
            "--log-timestamps",
        ]);
        assert!(cli.log_data);
        assert!(cli.log_timestamps);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze command");
        };
        assert_eq!(args.input, PathBuf::from("records.json"));
    }
}
