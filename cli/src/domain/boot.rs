//! Host boot time, parsed from `/proc/stat`.

use chrono::{DateTime, Utc};

/// Extract the `btime` (boot time, seconds since the epoch) line of `/proc/stat`.
#[must_use]
pub fn parse_boot_time(proc_stat: &str) -> Option<DateTime<Utc>> {
    proc_stat
        .lines()
        .find_map(|line| line.strip_prefix("btime "))
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
