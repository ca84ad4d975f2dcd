//! # Stages
//!
//! Concrete implementations of the pipeline's collaborator contracts:
//!
//! - `HttpImageSource` / `MockImageSource` - fetch+decode stage (I/O lane)
//! - `SnowFilter` - transform stage (CPU lane)
//! - `FilePresenter` / `LogPresenter` - UI-lane terminal callbacks
//!
//! Real and mock sources share the `ImageSource` contract so the coordinator
//! never knows which one it is driving.

mod http_source;
mod mock_source;
mod presenters;
mod snow_filter;

pub use http_source::HttpImageSource;
pub use mock_source::MockImageSource;
pub use presenters::{FilePresenter, LogPresenter};
pub use snow_filter::SnowFilter;
