//! `run` command implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use contracts::{ImageFilter, ImageSource, Presenter, RunState, WorkRequest};
use executors::{ExecutorConfig, Executors};
use pipeline::{PipelineCoordinator, RunHandle};
use stages::{FilePresenter, HttpImageSource, MockImageSource, SnowFilter};

use crate::cli::RunArgs;
use crate::config::load_requests;

/// Per-run result for the summary
#[derive(Serialize)]
struct RunSummary {
    run_id: u64,
    name: String,
    url: String,
    state: RunState,
}

/// Overall run report
#[derive(Serialize)]
struct RunReport {
    runs: Vec<RunSummary>,
    duration_secs: f64,
    timed_out: bool,
}

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let requests = gather_requests(args)?;
    info!(count = requests.len(), "Requests loaded");

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!(port = args.metrics_port, "Metrics endpoint available");
    }

    let executors = Executors::start(ExecutorConfig {
        io_workers: args.io_workers,
        ..Default::default()
    });

    let source = build_source(args)?;
    let filter = build_filter(args);
    let presenter: Arc<dyn Presenter> = Arc::new(
        FilePresenter::new("file", &args.output)
            .with_context(|| format!("Failed to create output dir {}", args.output.display()))?,
    );

    let coordinator =
        PipelineCoordinator::new(executors.handles(), source, filter, presenter);

    let started = Instant::now();
    let mut handles: Vec<(WorkRequest, RunHandle)> = Vec::with_capacity(requests.len());
    for request in requests {
        let handle = coordinator
            .start(request.clone())
            .with_context(|| format!("Failed to start run for '{}'", request.name))?;
        handles.push((request, handle));
    }

    info!(runs = handles.len(), "Pipeline running");

    // Wait for all runs, racing shutdown signal and optional timeout
    let wait_all = async {
        let mut summaries = Vec::with_capacity(handles.len());
        for (request, mut handle) in handles {
            let state = handle.finished().await;
            summaries.push(RunSummary {
                run_id: handle.run_id(),
                name: request.name,
                url: request.url,
                state,
            });
        }
        summaries
    };

    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let mut timed_out = false;

    let summaries = tokio::select! {
        summaries = maybe_timeout(wait_all, timeout, &mut timed_out) => summaries,
        _ = shutdown_signal() => {
            warn!("Received shutdown signal, cancelling scope...");
            coordinator.cancel();
            Vec::new()
        }
    };

    let report = RunReport {
        runs: summaries,
        duration_secs: started.elapsed().as_secs_f64(),
        timed_out,
    };

    // Drain the UI lane before reporting so every display has landed
    drop(coordinator);
    executors.shutdown().await;

    print_report(&report, args.json)?;

    let failed = report
        .runs
        .iter()
        .filter(|r| r.state == RunState::Failed)
        .count();
    if failed > 0 {
        anyhow::bail!("{failed} run(s) failed");
    }
    Ok(())
}

/// Build the request list from a file or ad-hoc flags
fn gather_requests(args: &RunArgs) -> Result<Vec<WorkRequest>> {
    if let Some(path) = &args.requests {
        return Ok(load_requests(path)?);
    }
    let url = args
        .url
        .clone()
        .context("Either --requests or --url is required")?;
    let request = WorkRequest::new(url, args.name.clone(), args.description.clone());
    request.check()?;
    Ok(vec![request])
}

fn build_source(args: &RunArgs) -> Result<Arc<dyn ImageSource>> {
    if args.mock {
        info!("Running in MOCK mode (no network required)");
        return Ok(Arc::new(MockImageSource::ok(256, 256)));
    }
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.http_timeout))
        .build()
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(HttpImageSource::with_client(client)))
}

fn build_filter(args: &RunArgs) -> Arc<dyn ImageFilter> {
    let filter = SnowFilter::new(args.density);
    match args.seed {
        Some(seed) => Arc::new(filter.with_seed(seed)),
        None => Arc::new(filter),
    }
}

/// Run the future, with an optional overall timeout
async fn maybe_timeout<F>(
    fut: F,
    timeout: Option<Duration>,
    timed_out: &mut bool,
) -> Vec<RunSummary>
where
    F: std::future::Future<Output = Vec<RunSummary>>,
{
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(summaries) => summaries,
            Err(_) => {
                warn!(timeout_secs = limit.as_secs(), "Pipeline timed out");
                *timed_out = true;
                Vec::new()
            }
        },
        None => fut.await,
    }
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let out =
            serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
        println!("{out}");
        return Ok(());
    }

    println!("Pipeline finished in {:.2}s", report.duration_secs);
    if report.timed_out {
        println!("  TIMED OUT before all runs completed");
    }
    for run in &report.runs {
        println!(
            "  run {:>3}  {:<24} {:?}  ({})",
            run.run_id, run.name, run.state, run.url
        );
    }
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
