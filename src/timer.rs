use chrono::{DateTime, Local};
use uuid::Uuid;

/// Wall-clock elapsed-time tracker for the single running task.
///
/// The live duration is derived from timestamps, never from tick
/// counts, so a stalled or coalesced tick schedule cannot lose time:
/// one recomputation after a 60 s gap reports the full 60 s.
#[derive(Debug, Default)]
pub struct ElapsedTimer {
    session: Option<Session>,
}

#[derive(Debug)]
struct Session {
    task_id: Uuid,
    started_at: DateTime<Local>,
    base_seconds: u64,
    /// Floor for reported values within this running interval.
    last_reported: u64,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin timing. Captures the start timestamp and the task's stored
    /// duration as the base for this running interval. Starting always
    /// replaces any previous session, so switching tasks can never
    /// leave two sessions writing in the same tick.
    pub fn start(&mut self, task_id: Uuid, base_seconds: u64, now: DateTime<Local>) {
        self.session = Some(Session {
            task_id,
            started_at: now,
            base_seconds,
            last_reported: base_seconds,
        });
    }

    /// Stop timing. The last value written back stays as the frozen
    /// duration; this tracker holds no state afterwards.
    pub fn stop(&mut self) {
        self.session = None;
    }

    pub fn running_task(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.task_id)
    }

    /// Re-capture the base mid-run, after a manual duration edit.
    pub fn rebase(&mut self, task_id: Uuid, base_seconds: u64, now: DateTime<Local>) {
        if let Some(session) = self.session.as_mut() {
            if session.task_id == task_id {
                session.started_at = now;
                session.base_seconds = base_seconds;
                session.last_reported = base_seconds;
            }
        }
    }

    /// Live duration for the running task, or None when nothing runs.
    ///
    /// `base + floor(elapsed_ms / 1000)`, with a backwards clock step
    /// clamped to zero and reported values monotone within one running
    /// interval.
    pub fn live_seconds(&mut self, now: DateTime<Local>) -> Option<(Uuid, u64)> {
        let session = self.session.as_mut()?;
        let elapsed_ms = (now - session.started_at).num_milliseconds().max(0);
        let live = session.base_seconds + (elapsed_ms / 1000) as u64;
        session.last_reported = session.last_reported.max(live);
        Some((session.task_id, session.last_reported))
    }
}
