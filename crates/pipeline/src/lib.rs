//! # Pipeline
//!
//! The pipeline coordinator: a cancellable scope owning two-stage runs
//! (fetch+decode on the I/O lane, filter on the CPU lane) with terminal
//! notifications on the ordered UI lane and a single scope-level failure
//! handler attached at creation.
//!
//! Per-run state machine:
//! `Idle → Fetching → Transforming → Displaying` (success), `Failed` from
//! either stage, `Cancelled` from any non-terminal state.

mod coordinator;
mod scope;
mod token;

pub use coordinator::{PipelineCoordinator, RunHandle};
pub use scope::PipelineScope;
pub use token::CancelToken;
