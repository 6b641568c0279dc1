//! Parsing of comma-separated option strings and integer arguments.

use std::collections::HashSet;

use crate::error::ToolkitError;

/// Parse a comma-separated list into its distinct tokens.
///
/// All whitespace is removed before splitting, so `"a, b"` and `"a,b"` are
/// equivalent. Empty segments are dropped. Returns `None` when nothing is left.
#[must_use]
pub fn parse_token_set(input: &str) -> Option<HashSet<String>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let tokens: HashSet<String> = compact
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();
    if tokens.is_empty() { None } else { Some(tokens) }
}

/// Parse a base-10 string into an `i32`.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidInt32`] for anything that is not a decimal
/// integer in range. There is no fallback value.
pub fn parse_i32(input: &str) -> Result<i32, ToolkitError> {
    input
        .parse::<i32>()
        .map_err(|e| ToolkitError::InvalidInt32 {
            input: input.to_owned(),
            reason: e.to_string(),
        })
}
