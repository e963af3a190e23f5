//! Command line surface

pub mod commands;
pub mod pipeline;

pub use commands::Cli;
pub use pipeline::{Outcome, run, run_rotation};
