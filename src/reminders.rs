use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Timelike};
use std::collections::HashMap;
use uuid::Uuid;

/// Minutes of warning before a configured work-hours moment.
const WORK_HOURS_LEAD_MIN: i64 = 5;

/// Per-task cursor over duration interval boundaries.
///
/// Each entry is the next boundary strictly after the duration at which
/// the task was first observed, so resuming a long-paused task never
/// fires for boundaries already behind it. The cursor advances by
/// exactly one interval per firing; when a single observation jumps
/// past several boundaries, later observations catch up one at a time
/// rather than emitting a burst.
#[derive(Debug, Default)]
pub struct ThresholdTracker {
    next_threshold: HashMap<Uuid, u64>,
}

impl ThresholdTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the running task's current duration. Returns true when a
    /// boundary has been crossed since the last observation.
    pub fn observe(&mut self, task_id: Uuid, duration_seconds: u64, interval_seconds: u64) -> bool {
        if interval_seconds == 0 {
            return false;
        }

        let next = self
            .next_threshold
            .entry(task_id)
            .or_insert_with(|| (duration_seconds / interval_seconds + 1) * interval_seconds);

        if duration_seconds >= *next {
            *next += interval_seconds;
            true
        } else {
            false
        }
    }

    /// Drop the cursor so the next running interval re-seeds from the
    /// then-current duration. Called on pause, complete, and delete.
    pub fn clear(&mut self, task_id: Uuid) {
        self.next_threshold.remove(&task_id);
    }

    pub fn clear_all(&mut self) {
        self.next_threshold.clear();
    }

    #[cfg(test)]
    fn cursor(&self, task_id: Uuid) -> Option<u64> {
        self.next_threshold.get(&task_id).copied()
    }
}

/// The two clock-of-day reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMoment {
    Lunch,
    Exit,
}

impl WorkMoment {
    pub fn message(self) -> &'static str {
        match self {
            WorkMoment::Lunch => "Lunch break in five minutes. Wrap up or pause your tasks.",
            WorkMoment::Exit => "End of the workday in five minutes. Wrap up or pause your tasks.",
        }
    }
}

/// Fires each moment at most once per calendar day, five minutes before
/// the configured HH:MM. The notified markers reset on date change.
#[derive(Debug, Default)]
pub struct WorkHoursTracker {
    lunch_notified: Option<NaiveDate>,
    exit_notified: Option<NaiveDate>,
}

impl WorkHoursTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, now: DateTime<Local>, lunch_time: &str, exit_time: &str) -> Vec<WorkMoment> {
        let today = now.date_naive();
        if self.lunch_notified.is_some_and(|d| d != today) {
            self.lunch_notified = None;
        }
        if self.exit_notified.is_some_and(|d| d != today) {
            self.exit_notified = None;
        }

        let mut due = Vec::new();
        if self.lunch_notified.is_none() && almost_time(now, lunch_time) {
            self.lunch_notified = Some(today);
            due.push(WorkMoment::Lunch);
        }
        if self.exit_notified.is_none() && almost_time(now, exit_time) {
            self.exit_notified = Some(today);
            due.push(WorkMoment::Exit);
        }
        due
    }
}

/// True when the current minute is exactly five minutes before `target`
/// (an HH:MM string). Malformed targets never match.
fn almost_time(now: DateTime<Local>, target: &str) -> bool {
    let Ok(target) = NaiveTime::parse_from_str(target, "%H:%M") else {
        return false;
    };
    let (lead, _) = target.overflowing_sub_signed(Duration::minutes(WORK_HOURS_LEAD_MIN));
    now.hour() == lead.hour() && now.minute() == lead.minute()
}
