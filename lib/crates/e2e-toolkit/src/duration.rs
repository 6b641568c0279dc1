//! Duration reporting for harness steps.
//!
//! Slow steps are surfaced as pipeline warnings using the Azure DevOps
//! logging-command syntax so they show up in the task summary.

use std::time::Duration;

/// Prefix that turns a log line into an Azure DevOps task warning.
pub const WARNING_PREFIX: &str = "##vso[task.logissue type=warning;]";

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY;

/// A log line chosen for an elapsed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationLine {
    /// Elapsed time exceeded the threshold.
    Warning(String),
    /// Elapsed time was within the threshold.
    Plain(String),
}

impl DurationLine {
    /// The rendered line as it is written to the log.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Warning(line) | Self::Plain(line) => line,
        }
    }
}

/// Pick the log line for `elapsed` against `warn_after`.
///
/// Only a strictly longer duration produces a warning.
#[must_use]
pub fn duration_log_line(elapsed: Duration, warn_after: Duration, message: &str) -> DurationLine {
    if elapsed > warn_after {
        DurationLine::Warning(format!("{WARNING_PREFIX} {message}"))
    } else {
        DurationLine::Plain(message.to_owned())
    }
}

/// Log `message`, tagged as a pipeline warning when `elapsed > warn_after`.
pub fn log_duration(elapsed: Duration, warn_after: Duration, message: &str) {
    match duration_log_line(elapsed, warn_after, message) {
        DurationLine::Warning(line) => {
            tracing::warn!(elapsed_secs = elapsed.as_secs(), "{line}");
        }
        DurationLine::Plain(line) => {
            tracing::info!(elapsed_secs = elapsed.as_secs(), "{line}");
        }
    }
}

/// Render a duration in its coarsest whole unit, e.g. `45s`, `3m`, `2h`, `5d`, `1y`.
#[must_use]
pub fn format_duration(length: Duration) -> String {
    let secs = length.as_secs();
    if secs < MINUTE {
        format!("{secs}s")
    } else if secs < HOUR {
        format!("{}m", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h", secs / HOUR)
    } else if secs < YEAR {
        format!("{}d", secs / DAY)
    } else {
        format!("{}y", secs / YEAR)
    }
}
