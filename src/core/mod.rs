//! Core functionality for dmax-links

pub mod models;
pub mod pipeline;
pub mod selector;

pub use models::*;
pub use pipeline::*;
pub use selector::*;
