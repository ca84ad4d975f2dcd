//! Pipeline metric recording helpers
//!
//! Thin wrappers over the `metrics` facade so callers never build metric
//! names by hand.

use contracts::{RunOutcome, StageKind};
use metrics::{counter, gauge, histogram};

/// Record that a pipeline run was started
pub fn record_run_started() {
    counter!("snowpipe_runs_started_total").increment(1);
}

/// Record a stage completing successfully, with its wall-clock latency
pub fn record_stage_latency(stage: StageKind, seconds: f64) {
    histogram!(
        "snowpipe_stage_latency_ms",
        "stage" => stage.as_str()
    )
    .record(seconds * 1000.0);
}

/// Record the terminal outcome of a run
pub fn record_run_outcome(outcome: RunOutcome) {
    counter!(
        "snowpipe_runs_finished_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record a stage failure routed to the scope handler
pub fn record_failure(stage: Option<StageKind>) {
    let stage_label = stage.map(|s| s.as_str()).unwrap_or("other");
    counter!(
        "snowpipe_failures_total",
        "stage" => stage_label
    )
    .increment(1);
}

/// Record current lane queue depth
pub fn record_lane_queue_depth(lane: &str, depth: usize) {
    gauge!(
        "snowpipe_lane_queue_depth",
        "lane" => lane.to_string()
    )
    .set(depth as f64);
}
