//! Request file loading (TOML)

use std::path::Path;

use serde::Deserialize;

use contracts::WorkRequest;

use crate::error::{CliError, Result};

/// On-disk request file: a list of work requests
#[derive(Debug, Deserialize)]
pub struct RequestFile {
    /// Requests to run (independent, may interleave)
    #[serde(default)]
    pub requests: Vec<WorkRequest>,
}

/// Load and validate a request file
pub fn load_requests(path: &Path) -> Result<Vec<WorkRequest>> {
    if !path.exists() {
        return Err(CliError::requests_not_found(path.display().to_string()));
    }

    let text = std::fs::read_to_string(path)?;
    let file: RequestFile =
        toml::from_str(&text).map_err(|e| CliError::requests_parse(e.to_string()))?;

    if file.requests.is_empty() {
        return Err(CliError::requests_validation(
            "request file contains no requests",
        ));
    }
    for request in &file.requests {
        request
            .check()
            .map_err(|e| CliError::requests_validation(e.to_string()))?;
    }

    Ok(file.requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_request_file() {
        let file = write_file(
            r#"
            [[requests]]
            url = "http://x/img.png"
            name = "snowy"
            description = "a snowy scene"

            [[requests]]
            url = "http://x/other.png"
            name = "other"
            "#,
        );

        let requests = load_requests(file.path()).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name, "snowy");
        assert_eq!(requests[1].description, "");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = load_requests(Path::new("/nonexistent/requests.toml"));
        assert!(matches!(result, Err(CliError::RequestsNotFound { .. })));
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = write_file("");
        let result = load_requests(file.path());
        assert!(matches!(result, Err(CliError::RequestsValidation { .. })));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let file = write_file(
            r#"
            [[requests]]
            url = "not a url"
            name = "bad"
            "#,
        );
        let result = load_requests(file.path());
        assert!(matches!(result, Err(CliError::RequestsValidation { .. })));
    }
}
