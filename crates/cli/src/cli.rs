//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Snowpipe - two-stage image fetch-and-filter pipeline
#[derive(Parser, Debug)]
#[command(
    name = "snowpipe",
    author,
    version,
    about = "Asynchronous image fetch-and-filter pipeline",
    long_about = "Fetches remote images on an I/O lane, applies a snow filter on a \n\
                  CPU lane, and delivers results through an ordered UI lane, with \n\
                  lifecycle-scoped cancellation and centralized error handling."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SNOWPIPE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SNOWPIPE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline for one or more work requests
    Run(RunArgs),

    /// Validate a request file without running
    Validate(ValidateArgs),

    /// Display pipeline and lane information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to a TOML request file (mutually exclusive with --url)
    #[arg(short, long, env = "SNOWPIPE_REQUESTS", conflicts_with = "url")]
    pub requests: Option<PathBuf>,

    /// Image URL for a single ad-hoc request
    #[arg(long)]
    pub url: Option<String>,

    /// Display name for the ad-hoc request
    #[arg(long, default_value = "snowy")]
    pub name: String,

    /// Display description for the ad-hoc request
    #[arg(long, default_value = "")]
    pub description: String,

    /// Output directory for filtered images
    #[arg(short, long, default_value = "./output", env = "SNOWPIPE_OUTPUT")]
    pub output: PathBuf,

    /// Use the mock source instead of HTTP (no network required)
    #[arg(long)]
    pub mock: bool,

    /// Snow flake density (flakes per pixel)
    #[arg(long, default_value = "0.02")]
    pub density: f64,

    /// Fixed RNG seed for deterministic snow placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Overall timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "SNOWPIPE_TIMEOUT")]
    pub timeout: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub http_timeout: u64,

    /// I/O lane worker count
    #[arg(long, default_value = "4", env = "SNOWPIPE_IO_WORKERS")]
    pub io_workers: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "SNOWPIPE_METRICS_PORT")]
    pub metrics_port: u16,

    /// Output run summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the request file to validate
    #[arg(short, long, default_value = "requests.toml")]
    pub requests: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
