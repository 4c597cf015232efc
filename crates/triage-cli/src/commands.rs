use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use triage_client::{
    ClientConfig, ClientError, HttpPageSource, RetrievalOptions, Retriever, RetryPolicy,
    SubmissionClient,
};

use crate::cli::{AnalyzeArgs, RunArgs};
use triage_cli::pipeline::{analyze, load_thresholds, read_records};
use crate::types::{RunResult, RunSource};

pub fn run_triage(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", base_url = %args.base_url, dry_run = args.dry_run);
    let _guard = span.enter();
    let start = Instant::now();

    let thresholds = load_thresholds(args.scoring.thresholds.as_deref())?;
    let config = ClientConfig::new(args.api_key.clone())
        .with_base_url(args.base_url.clone())
        .with_submit_url(args.submit_url.clone())
        .with_request_timeout(Duration::from_secs(args.timeout_secs));
    let options = RetrievalOptions::default()
        .with_page_size(args.page_size)
        .with_page_delay(Duration::from_millis(args.page_delay_ms))
        .with_max_pages(args.max_pages)
        .with_retry(RetryPolicy::default().with_max_attempts(args.max_attempts));

    // =========================================================================
    // Stage 1: Retrieve every page
    // =========================================================================
    let source = HttpPageSource::new(&config).map_err(explain)?;
    let mut retriever = Retriever::new(source, options);
    let retrieval = retriever
        .fetch_all()
        .map_err(explain)
        .context("retrieve patient records")?;

    // =========================================================================
    // Stage 2: Score and classify
    // =========================================================================
    let analysis = analyze(&retrieval.records, &thresholds);

    // =========================================================================
    // Stage 3: Submit
    // =========================================================================
    let acknowledgment = if args.dry_run {
        info!("dry run, skipping submission");
        None
    } else {
        let client = SubmissionClient::new(&config).map_err(explain)?;
        let ack = client
            .submit(&analysis.cohorts)
            .map_err(explain)
            .context("submit cohorts")?;
        Some(ack)
    };

    info!(
        duration_ms = start.elapsed().as_millis(),
        submitted = acknowledgment.is_some(),
        "run complete"
    );
    Ok(RunResult {
        analysis,
        source: RunSource::Service {
            pages: retrieval.pages,
            requests: retrieval.requests,
        },
        acknowledgment,
    })
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<RunResult> {
    let span = info_span!("analyze", input = %args.input.display());
    let _guard = span.enter();

    let thresholds = load_thresholds(args.scoring.thresholds.as_deref())?;
    let records = read_records(&args.input)?;
    let analysis = analyze(&records, &thresholds);
    Ok(RunResult {
        analysis,
        source: RunSource::File(args.input.display().to_string()),
        acknowledgment: None,
    })
}

/// Attach the short user-facing explanation to a client failure.
fn explain(error: ClientError) -> anyhow::Error {
    let message = error.user_message().to_string();
    error!(error = %error, "{message}");
    anyhow::Error::new(error).context(message)
}
