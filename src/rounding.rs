use serde::{Deserialize, Serialize};

/// How a completed task's duration is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    Up,
    Down,
    None,
}

/// Round a duration to the configured step.
///
/// Applied exactly once, at completion, and skipped entirely for tasks
/// whose counter was edited by hand. Idempotent: rounding an already
/// rounded value returns it unchanged.
pub fn round_seconds(seconds: u64, mode: RoundingMode, step_minutes: u32) -> u64 {
    let step_seconds = u64::from(step_minutes.max(1)) * 60;

    match mode {
        RoundingMode::None => seconds,
        RoundingMode::Up => seconds.div_ceil(step_seconds) * step_seconds,
        RoundingMode::Down => (seconds / step_seconds) * step_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_none_is_identity() {
        for seconds in [0, 1, 599, 600, 601, 12_345] {
            assert_eq!(round_seconds(seconds, RoundingMode::None, 10), seconds);
        }
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_seconds(0, RoundingMode::Up, 10), 0);
        assert_eq!(round_seconds(1, RoundingMode::Up, 10), 600);
        assert_eq!(round_seconds(599, RoundingMode::Up, 10), 600);
        assert_eq!(round_seconds(600, RoundingMode::Up, 10), 600);
        assert_eq!(round_seconds(601, RoundingMode::Up, 10), 1200);
    }

    #[test]
    fn test_round_down() {
        assert_eq!(round_seconds(0, RoundingMode::Down, 10), 0);
        assert_eq!(round_seconds(599, RoundingMode::Down, 10), 0);
        assert_eq!(round_seconds(600, RoundingMode::Down, 10), 600);
        assert_eq!(round_seconds(1199, RoundingMode::Down, 10), 600);
    }

    #[test]
    fn test_round_is_idempotent() {
        for step in [1, 5, 10, 15, 60] {
            for seconds in 0..2000 {
                for mode in [RoundingMode::Up, RoundingMode::Down] {
                    let once = round_seconds(seconds, mode, step);
                    assert_eq!(round_seconds(once, mode, step), once);
                }
            }
        }
    }

    #[test]
    fn test_round_bounds() {
        for step in [1, 5, 10, 30] {
            let step_seconds = u64::from(step) * 60;
            for seconds in 0..5000 {
                let up = round_seconds(seconds, RoundingMode::Up, step);
                let down = round_seconds(seconds, RoundingMode::Down, step);
                assert!(down <= seconds && seconds <= up);
                assert!(up - seconds < step_seconds);
                assert!(seconds - down < step_seconds);
            }
        }
    }

    #[test]
    fn test_zero_step_treated_as_one_minute() {
        assert_eq!(round_seconds(30, RoundingMode::Up, 0), 60);
        assert_eq!(round_seconds(30, RoundingMode::Down, 0), 0);
    }
}
