//! Wall-clock timestamps for log entries and token ids.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix-millisecond timestamps.
///
/// Sessions take a plain function pointer so tests can pin time.
pub type Clock = fn() -> u64;

/// Current Unix time in milliseconds (0 if the system clock is before 1970).
#[must_use]
pub fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
