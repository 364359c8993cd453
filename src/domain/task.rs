use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Appended to `details` the first time a human overwrites the counter.
/// Checked by substring so repeated edits never duplicate it.
pub const MANUAL_EDIT_MARKER: &str = "*Timer adjusted manually";

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Paused,
    Completed,
}

/// A unit of timed work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Short subject line, set once at creation.
    pub description: String,
    /// Free-form notes; also carries the manual-edit marker.
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub requester: String,
    pub created_at: DateTime<Local>,
    /// Refreshed every time the task enters `Running`.
    pub started_at: DateTime<Local>,
    #[serde(default)]
    pub total_duration_seconds: u64,
    pub status: TaskStatus,
    #[serde(default)]
    pub is_urgent: bool,
    /// Once true, completion rounding is permanently skipped.
    #[serde(default)]
    pub manually_edited: bool,
    /// Bookkeeping for manual ordering; correctness never depends on it.
    #[serde(default)]
    pub custom_order_date: Option<NaiveDate>,
}

impl Task {
    /// New tasks start running with an empty counter.
    pub fn new(
        description: String,
        details: String,
        requester: String,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            details,
            requester,
            created_at: now,
            started_at: now,
            total_duration_seconds: 0,
            status: TaskStatus::Running,
            is_urgent: false,
            manually_edited: false,
            custom_order_date: None,
        }
    }

    /// Resume a paused task. Completed tasks must be reopened first;
    /// starting one directly is rejected.
    pub fn start(&mut self, now: DateTime<Local>) -> bool {
        if self.status != TaskStatus::Paused {
            return false;
        }
        self.status = TaskStatus::Running;
        self.started_at = now;
        true
    }

    /// Freeze the task. The stored duration is left untouched; the
    /// caller writes the final live value before calling this.
    pub fn pause(&mut self) {
        if self.status == TaskStatus::Running {
            self.status = TaskStatus::Paused;
        }
    }

    /// Close out the task from running or paused.
    pub fn complete(&mut self) {
        if self.status != TaskStatus::Completed {
            self.status = TaskStatus::Completed;
        }
    }

    /// Bring a completed task back as paused, duration unchanged.
    pub fn reopen(&mut self) {
        if self.status == TaskStatus::Completed {
            self.status = TaskStatus::Paused;
        }
    }

    pub fn toggle_urgent(&mut self) {
        self.is_urgent = !self.is_urgent;
    }

    /// Overwrite the counter by hand. Marks the task so completion
    /// rounding is skipped and records the marker in `details` once.
    pub fn edit_time(&mut self, seconds: u64) {
        self.total_duration_seconds = seconds;
        self.manually_edited = true;

        if !self.details.contains(MANUAL_EDIT_MARKER) {
            if self.details.trim().is_empty() {
                self.details = MANUAL_EDIT_MARKER.to_string();
            } else {
                self.details = format!("{} {}", self.details.trim(), MANUAL_EDIT_MARKER);
            }
        }
    }
}

/// Coerce any task stored as running back to paused. A process restart
/// ends the timing session; resuming re-captures the base duration from
/// the stored value.
pub fn coerce_running_to_paused(tasks: &mut [Task]) {
    for task in tasks {
        if task.status == TaskStatus::Running {
            task.status = TaskStatus::Paused;
        }
    }
}
