/// Format a second count as a zero-padded clock string (HH:MM:SS).
/// The hours field is unbounded, so durations past 24h stay readable.
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Compact duration for task rows: "45s", "12m 30s", "2h 5m".
/// Seconds are dropped once the duration reaches an hour.
pub fn format_human(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }

    let minutes = seconds / 60;
    let secs = seconds % 60;

    if minutes < 60 {
        return format!("{}m {}s", minutes, secs);
    }

    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;
    format!("{}h {}m", hours, remaining_minutes)
}

/// Parse an edited time string into seconds.
///
/// Accepts a bare integer (seconds), MM:SS, and HH:MM:SS. A two-part
/// value is read as MM:SS when the first component is below 60 and as
/// HH:MM otherwise; that cutoff is a deliberate policy, kept as-is.
/// Anything malformed (including empty input) parses to 0.
pub fn parse_clock(text: &str) -> u64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().unwrap_or(0);
    }

    let parts: Vec<u64> = trimmed
        .split(':')
        .map(|p| p.trim().parse().unwrap_or(0))
        .collect();

    match parts[..] {
        [hours, minutes, seconds] => hours * 3600 + minutes * 60 + seconds,
        [first, second] => {
            if first < 60 {
                first * 60 + second
            } else {
                first * 3600 + second * 60
            }
        }
        [value] => value,
        _ => 0,
    }
}
