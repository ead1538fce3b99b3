//! Utility functions for dmax-links

pub mod filename;

pub use filename::*;
