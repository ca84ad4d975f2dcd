//! Work request - pipeline input

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::PipelineError;

/// Input describing what to fetch and display.
///
/// Immutable once created; supplied by the host when a pipeline run starts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct WorkRequest {
    /// Remote image location
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,

    /// Display name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    /// Display description
    #[serde(default)]
    pub description: String,
}

impl WorkRequest {
    /// Create a new request
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Validate the request, mapping validator output to a contract error
    pub fn check(&self) -> Result<(), PipelineError> {
        self.validate()
            .map_err(|e| PipelineError::invalid_request("request", e.to_string()))?;
        let scheme_ok = ["http://", "https://", "mock://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        if !scheme_ok {
            return Err(PipelineError::invalid_request(
                "url",
                "url must use the http, https, or mock scheme",
            ));
        }
        Ok(())
    }
}
