use std::time::Duration;

/// Input poll timeout in milliseconds. Elapsed time is derived from
/// wall-clock timestamps, so this cadence only affects display latency,
/// never the counted duration.
pub const POLL_INTERVAL_MS: u64 = 250;

/// Get the poll timeout for the event loop
pub fn poll_timeout() -> Duration {
    Duration::from_millis(POLL_INTERVAL_MS)
}
