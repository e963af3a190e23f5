//! Common infrastructure shared by the credsync crates
//!
//! Currently this is the process-wide logging bootstrap and a handful of
//! helpers that keep credential material out of log output.

pub mod logging;

pub use logging::LoggingTransformer;
