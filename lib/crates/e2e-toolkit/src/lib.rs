//! Helpers used by the node e2e harness: token/int parsing, duration
//! reporting, and normalization of loosely-typed values.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod duration;
pub mod error;
pub mod strings;
pub mod value;

pub use duration::{DurationLine, WARNING_PREFIX, duration_log_line, format_duration, log_duration};
pub use error::ToolkitError;
pub use strings::{parse_i32, parse_token_set};
pub use value::LooseValue;
