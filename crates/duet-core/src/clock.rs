//! Wall-clock reads and skew detection for lock timestamps.
//!
//! `lockedAt` is a local wall-clock reading taken when a player commits an
//! answer. Two devices' clocks are never synchronized, so the reading is a
//! best-effort Lamport-style ordering hint. Merge warns when an adopted
//! timestamp is far from the local clock; it never rejects one.

use chrono::Utc;

/// Skew beyond this many milliseconds triggers a warning (1 hour).
pub const DEFAULT_SKEW_THRESHOLD_MS: i64 = 3_600_000;

/// Current wall-clock time as Unix epoch milliseconds.
#[must_use]
pub fn wall_clock_now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Warning produced when a lock timestamp is suspiciously far from the
/// local clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSkewWarning {
    /// The lock timestamp that triggered the warning.
    pub lock_ts: i64,
    /// The local wall-clock time at the comparison.
    pub wall_ts: i64,
    /// Detected skew in milliseconds (positive = lock is in the future).
    pub skew_ms: i64,
}

/// Check a lock timestamp against the local wall clock.
///
/// Returns `Some` when the absolute difference exceeds `threshold_ms`.
/// Lock timestamps are NEVER rejected for skew; the merge tie-break still
/// uses them as given.
#[must_use]
pub fn check_clock_skew(lock_ts: i64, wall_ts: i64, threshold_ms: i64) -> Option<ClockSkewWarning> {
    let skew_ms = lock_ts - wall_ts;
    if skew_ms.abs() > threshold_ms {
        Some(ClockSkewWarning {
            lock_ts,
            wall_ts,
            skew_ms,
        })
    } else {
        None
    }
}
