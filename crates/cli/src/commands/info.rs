//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::InfoArgs;

/// Pipeline info for JSON output
#[derive(Serialize)]
struct PipelineInfo {
    version: String,
    lanes: LaneInfo,
    stages: Vec<StageInfo>,
}

#[derive(Serialize)]
struct LaneInfo {
    ui_workers: usize,
    io_workers_default: usize,
    cpu_workers_default: usize,
}

#[derive(Serialize)]
struct StageInfo {
    stage: &'static str,
    lane: &'static str,
    implementations: Vec<&'static str>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let info = build_info();

    if args.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
        println!("{json}");
    } else {
        print_info(&info);
    }

    Ok(())
}

fn build_info() -> PipelineInfo {
    let cpu_default = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);

    PipelineInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        lanes: LaneInfo {
            ui_workers: 1,
            io_workers_default: 4,
            cpu_workers_default: cpu_default,
        },
        stages: vec![
            StageInfo {
                stage: "fetch",
                lane: "io",
                implementations: vec!["http", "mock"],
            },
            StageInfo {
                stage: "transform",
                lane: "cpu",
                implementations: vec!["snow"],
            },
        ],
    }
}

fn print_info(info: &PipelineInfo) {
    println!("snowpipe {}", info.version);
    println!(
        "lanes: ui={} io={} cpu={}",
        info.lanes.ui_workers, info.lanes.io_workers_default, info.lanes.cpu_workers_default
    );
    for stage in &info.stages {
        println!(
            "stage {:<10} lane={:<4} implementations: {}",
            stage.stage,
            stage.lane,
            stage.implementations.join(", ")
        );
    }
}
