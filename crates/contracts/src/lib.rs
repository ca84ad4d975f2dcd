//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Pipeline Model
//! - A `WorkRequest` names a remote image plus display metadata
//! - Two sequential stages per run: fetch+decode (I/O lane), filter (CPU lane)
//! - Terminal notification is exactly one of: display, failure handler, discard

mod artifact;
mod error;
mod filter;
mod presenter;
mod request;
mod run;
mod source;

pub use artifact::*;
pub use error::*;
pub use filter::ImageFilter;
pub use presenter::Presenter;
pub use request::*;
pub use run::*;
pub use source::ImageSource;
