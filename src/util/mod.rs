//! Utility modules for charming.

mod duration;

pub use duration::{DurationParseError, parse_duration};
