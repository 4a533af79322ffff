//! `cargo tidy fmt`: clippy auto-fix, compiler auto-fix and rustfmt, in that
//! order, stopping at the first tool that fails.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod snapshot;
pub mod steps;

pub use config::FmtConfig;
pub use error::TidyError;
pub use steps::Step;
