//! Single-run building blocks for the ramp-merge traffic study: scenario
//! document emission, engine invocation and output analysis.

pub mod analysis;
pub mod engine;
pub mod format;
pub mod scenario;
