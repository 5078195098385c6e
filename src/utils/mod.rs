//! Utility modules shared by scoring and guidance
//!
//! - Stops: log2 push/pull arithmetic with zero guards

pub mod stops;

pub use stops::{apply_stops, stops_between, whole_stops_up};
