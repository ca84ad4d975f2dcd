//! Presenter implementations (UI-lane terminal callbacks)

mod file;
mod log;

pub use file::FilePresenter;
pub use log::LogPresenter;
