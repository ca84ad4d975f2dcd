//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::config::load_requests;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    requests_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RequestsSummary>,
}

#[derive(Serialize)]
struct RequestsSummary {
    request_count: usize,
    names: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(requests = %args.requests.display(), "Validating request file");

    let requests_path = args.requests.display().to_string();
    let result = match load_requests(&args.requests) {
        Ok(requests) => ValidationResult {
            valid: true,
            requests_path,
            error: None,
            summary: Some(RequestsSummary {
                request_count: requests.len(),
                names: requests.into_iter().map(|r| r.name).collect(),
            }),
        },
        Err(e) => ValidationResult {
            valid: false,
            requests_path,
            error: Some(e.to_string()),
            summary: None,
        },
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{json}");
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Request file validation failed")
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("OK: {}", result.requests_path);
        if let Some(summary) = &result.summary {
            println!("  {} request(s): {}", summary.request_count, summary.names.join(", "));
        }
    } else {
        println!("INVALID: {}", result.requests_path);
        if let Some(error) = &result.error {
            println!("  {error}");
        }
    }
}
