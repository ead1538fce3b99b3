//! Command line interface

pub mod args;
pub mod output;

pub use args::{Args, VerbosityLevel};
pub use output::{OutputFormatter, ProgressLogWriter};
