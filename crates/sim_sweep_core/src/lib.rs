//! Shared sweep domain primitives.
//!
//! This crate owns axis parsing and expansion, the axis configuration
//! contract and the naming of per-iteration result directories. It performs
//! no IO and knows nothing about the traffic engine.

pub mod axis;
pub mod contract;
pub mod workspace_keys;

pub use axis::{expand_range, parse_axis, to_integral, AxisSpec, ParseError};
pub use contract::{axes_fingerprint, normalize_axes, AxesConfig, NormalizedAxes, ValidationError};
pub use workspace_keys::WorkspaceLayout;
