//! Layered error definitions
//!
//! Categorized by source: fetch / transform / scope / lane / presentation

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum PipelineError {
    // ===== Stage 1 Errors =====
    /// Network, stream, or decode failure while producing the artifact
    #[error("fetch error for '{url}': {message}")]
    Fetch { url: String, message: String },

    // ===== Stage 2 Errors =====
    /// Filter failure
    #[error("transform error in filter '{filter}': {message}")]
    Transform { filter: String, message: String },

    // ===== Scope Errors =====
    /// Operation attempted after the owning scope was cancelled
    #[error("scope is no longer active")]
    ScopeInactive,

    // ===== Lane Errors =====
    /// Execution lane has shut down and rejects new work
    #[error("execution lane '{lane}' is closed")]
    LaneClosed { lane: String },

    // ===== Presentation Errors =====
    /// Presenter-side failure (logged, never unwound across lanes)
    #[error("presentation error: {message}")]
    Present { message: String },

    // ===== Request Errors =====
    /// Work request failed validation
    #[error("invalid request field '{field}': {message}")]
    InvalidRequest { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a transform error
    pub fn transform(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            filter: filter.into(),
            message: message.into(),
        }
    }

    /// Create a lane-closed error
    pub fn lane_closed(lane: impl Into<String>) -> Self {
        Self::LaneClosed { lane: lane.into() }
    }

    /// Create a presentation error
    pub fn present(message: impl Into<String>) -> Self {
        Self::Present {
            message: message.into(),
        }
    }

    /// Create an invalid-request error
    pub fn invalid_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Which stage this error belongs to, if any
    pub fn stage(&self) -> Option<crate::StageKind> {
        match self {
            Self::Fetch { .. } => Some(crate::StageKind::Fetch),
            Self::Transform { .. } => Some(crate::StageKind::Transform),
            _ => None,
        }
    }
}
