use crate::clock::Clock;
use crate::domain::{self, Task, TaskStatus};
use crate::notifications::Notifier;
use crate::persistence::TaskStore;
use crate::reminders::{ThresholdTracker, WorkHoursTracker};
use crate::rounding::round_seconds;
use crate::settings::Settings;
use crate::timefmt::{format_clock, parse_clock};
use crate::timer::ElapsedTimer;
use chrono::{DateTime, Local};
use std::rc::Rc;
use uuid::Uuid;

/// UI interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Creating,
    EditingTime,
}

/// Steps of the creation flow. Details and requester only appear when
/// the settings require them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    Description,
    Details,
    Requester,
}

/// State of the multi-step creation form
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub step: CreateStep,
    pub input: String,
    pub description: String,
    pub details: String,
}

impl InputFormState {
    fn new() -> Self {
        Self {
            step: CreateStep::Description,
            input: String::new(),
            description: String::new(),
            details: String::new(),
        }
    }
}

/// State of the duration edit modal
#[derive(Debug, Clone)]
pub struct EditTimeState {
    pub task_id: Uuid,
    pub input: String,
}

/// Main application state: the task collection plus the trackers that
/// drive timing and reminders. All mutating operations enforce the
/// one-running-task invariant within a single pass over the collection
/// and hand the resulting snapshot to the store.
pub struct AppState {
    pub tasks: Vec<Task>,
    pub settings: Settings,
    pub selected: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub edit_form: Option<EditTimeState>,
    pub needs_save: bool,

    timer: ElapsedTimer,
    thresholds: ThresholdTracker,
    work_hours: WorkHoursTracker,
    clock: Rc<dyn Clock>,
    store: Rc<dyn TaskStore>,
    notifier: Rc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        mut tasks: Vec<Task>,
        settings: Settings,
        clock: Rc<dyn Clock>,
        store: Rc<dyn TaskStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        // A restart ends any timing session recorded in the snapshot
        domain::coerce_running_to_paused(&mut tasks);

        Self {
            tasks,
            settings,
            selected: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            edit_form: None,
            needs_save: false,
            timer: ElapsedTimer::new(),
            thresholds: ThresholdTracker::new(),
            work_hours: WorkHoursTracker::new(),
            clock,
            store,
            notifier,
        }
    }

    // ---- lifecycle operations ----

    /// Create a task and make it the sole running one, pausing whatever
    /// was running in the same pass.
    pub fn create_task(&mut self, description: String, details: String, requester: String) {
        let now = self.clock.now();
        self.pause_current(now);

        let task = Task::new(description, details, requester, now);
        self.timer.start(task.id, 0, now);
        self.tasks.insert(0, task);
        self.selected = 0;
        self.persist();
    }

    /// Resume a paused task, pausing whatever was running first.
    pub fn start_task(&mut self, task_id: Uuid) {
        let now = self.clock.now();
        let Some(index) = self.tasks.iter().position(|t| t.id == task_id) else {
            return;
        };
        if self.tasks[index].status != TaskStatus::Paused {
            return;
        }

        self.pause_current(now);

        let task = &mut self.tasks[index];
        if task.start(now) {
            // Base duration picks up from the stored value; only a
            // brand-new task ever starts from zero.
            self.timer.start(task.id, task.total_duration_seconds, now);
            self.persist();
        }
    }

    /// Pause the running task, freezing its duration at the live value.
    pub fn pause_task(&mut self, task_id: Uuid) {
        let is_running = self
            .tasks
            .iter()
            .any(|t| t.id == task_id && t.status == TaskStatus::Running);
        if !is_running {
            return;
        }

        let now = self.clock.now();
        self.pause_current(now);
        self.persist();
    }

    /// Complete a running or paused task, applying the configured
    /// rounding unless the counter was edited by hand.
    pub fn complete_task(&mut self, task_id: Uuid) {
        let now = self.clock.now();
        let Some(index) = self.tasks.iter().position(|t| t.id == task_id) else {
            return;
        };
        if self.tasks[index].status == TaskStatus::Completed {
            return;
        }

        if self.tasks[index].status == TaskStatus::Running {
            self.pause_current(now);
        }

        let task = &mut self.tasks[index];
        if !task.manually_edited {
            task.total_duration_seconds = round_seconds(
                task.total_duration_seconds,
                self.settings.rounding_mode,
                self.settings.rounding_step,
            );
        }
        task.complete();
        self.thresholds.clear(task_id);
        self.persist();
    }

    /// Bring a completed task back as paused, duration untouched.
    pub fn reopen_task(&mut self, task_id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            if task.status == TaskStatus::Completed {
                task.reopen();
                self.persist();
            }
        }
    }

    pub fn toggle_urgent(&mut self, task_id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.toggle_urgent();
            self.persist();
        }
    }

    pub fn delete_task(&mut self, task_id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        if self.tasks.len() == before {
            return;
        }

        if self.timer.running_task() == Some(task_id) {
            self.timer.stop();
        }
        self.thresholds.clear(task_id);
        self.clamp_selection();
        self.persist();
    }

    /// Overwrite a task's counter from an edited time string. Malformed
    /// input parses to zero by policy, never to an error.
    pub fn edit_time(&mut self, task_id: Uuid, text: &str) {
        let seconds = parse_clock(text);
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return;
        };
        task.edit_time(seconds);

        // Keep the live computation in agreement when the edited task
        // is the one being timed.
        let now = self.clock.now();
        self.timer.rebase(task_id, seconds, now);
        self.persist();
    }

    /// Replace the collection wholesale (remote snapshot or import;
    /// last-writer-wins). The running task and all tracker state are
    /// re-derived from the incoming data, not assumed from ours.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        let now = self.clock.now();
        self.timer.stop();
        self.thresholds.clear_all();
        self.tasks = tasks;

        let mut running: Option<(Uuid, u64)> = None;
        for task in self.tasks.iter_mut() {
            if task.status == TaskStatus::Running {
                if running.is_none() {
                    running = Some((task.id, task.total_duration_seconds));
                } else {
                    // The invariant holds whatever the snapshot claims
                    task.status = TaskStatus::Paused;
                }
            }
        }
        if let Some((id, base)) = running {
            self.timer.start(id, base, now);
        }

        self.clamp_selection();
        self.persist();
    }

    /// Freeze the running task and write a final snapshot (app exit).
    pub fn shutdown(&mut self) {
        let now = self.clock.now();
        self.pause_current(now);
        self.persist();
    }

    /// Freeze and pause whatever is running: final live value written,
    /// status flipped, reminder cursor dropped, timer stopped. This is
    /// the single place the running -> paused edge happens, so starting
    /// a new task can never leave two tasks running, even transiently.
    fn pause_current(&mut self, now: DateTime<Local>) {
        if let Some((id, live)) = self.timer.live_seconds(now) {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                task.total_duration_seconds = live;
            }
        }
        self.timer.stop();

        for task in self.tasks.iter_mut() {
            if task.status == TaskStatus::Running {
                task.pause();
                self.thresholds.clear(task.id);
            }
        }
    }

    // ---- periodic work ----

    /// One pass of the periodic work: elapsed write-back, duration
    /// reminders, work-hours reminders. The cadence is untrusted;
    /// everything here derives from the clock.
    pub fn tick(&mut self) {
        let now = self.clock.now();

        if let Some((id, live)) = self.timer.live_seconds(now) {
            if let Some(task) = self
                .tasks
                .iter_mut()
                .find(|t| t.id == id && t.status == TaskStatus::Running)
            {
                if task.total_duration_seconds != live {
                    task.total_duration_seconds = live;
                    self.needs_save = true;
                }
            }
            self.check_duration_reminder(id);
        }

        if self.settings.work_hours_notification && self.timer.running_task().is_some() {
            let due = self
                .work_hours
                .check(now, &self.settings.lunch_time, &self.settings.exit_time);
            for moment in due {
                self.notifier.notify(moment.message(), true, true);
            }
        }
    }

    fn check_duration_reminder(&mut self, task_id: Uuid) {
        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
            return;
        };
        // Gates are read fresh on every check, so flipping a setting
        // mid-run applies immediately.
        if !self.settings.should_notify(task.is_urgent) {
            return;
        }

        let fired = self.thresholds.observe(
            task.id,
            task.total_duration_seconds,
            self.settings.interval_seconds(),
        );
        if fired {
            let message = format!("Task in progress: {}", task.description);
            self.notifier.notify(
                &message,
                self.settings.should_play_sound(task.is_urgent),
                task.is_urgent,
            );
        }
    }

    /// Write the snapshot if a tick changed anything since the last
    /// lifecycle operation.
    pub fn flush(&mut self) {
        if self.needs_save {
            self.persist();
        }
    }

    fn persist(&mut self) {
        self.needs_save = false;
        if let Err(err) = self.store.persist(&self.tasks) {
            // Local state is the source of truth; a failed write only
            // degrades durability.
            tracing::warn!("failed to persist tasks: {err}");
        }
    }

    // ---- selection and display ----

    /// Flattened display order (what the list pane shows).
    pub fn display_ids(&self) -> Vec<Uuid> {
        domain::display_ids(&self.tasks)
    }

    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.display_ids().get(self.selected).copied()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected_task_id()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected + 1 < self.display_ids().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.display_ids().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Swap the selected task with its display neighbor above. Rejected
    /// unless both sit in the same urgency class, neither running nor
    /// completed.
    pub fn move_task_up(&mut self) {
        let ids = self.display_ids();
        if self.selected == 0 || self.selected >= ids.len() {
            return;
        }
        let moving = ids[self.selected];
        let target = ids[self.selected - 1];
        let today = self.clock.now().date_naive();
        if domain::reorder(&mut self.tasks, moving, target, today) {
            self.selected -= 1;
            self.persist();
        }
    }

    /// Swap the selected task with its display neighbor below.
    pub fn move_task_down(&mut self) {
        let ids = self.display_ids();
        if self.selected + 1 >= ids.len() {
            return;
        }
        let moving = ids[self.selected];
        let target = ids[self.selected + 1];
        let today = self.clock.now().date_naive();
        if domain::reorder(&mut self.tasks, moving, target, today) {
            self.selected += 1;
            self.persist();
        }
    }

    /// Enter toggles the selected task between running and paused.
    pub fn toggle_run_pause(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let Some(status) = self.tasks.iter().find(|t| t.id == id).map(|t| t.status) else {
            return;
        };
        match status {
            TaskStatus::Running => self.pause_task(id),
            TaskStatus::Paused => self.start_task(id),
            TaskStatus::Completed => {}
        }
    }

    pub fn complete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.complete_task(id);
        }
    }

    pub fn reopen_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.reopen_task(id);
        }
    }

    pub fn toggle_urgent_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.toggle_urgent(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.delete_task(id);
        }
    }

    /// Total tracked today, for the header.
    pub fn today_total_seconds(&self) -> u64 {
        let today = self.clock.now().date_naive();
        self.tasks
            .iter()
            .filter(|t| t.created_at.date_naive() == today)
            .map(|t| t.total_duration_seconds)
            .sum()
    }

    // ---- creation form ----

    pub fn start_create(&mut self) {
        self.input_form = Some(InputFormState::new());
        self.ui_mode = UiMode::Creating;
    }

    pub fn cancel_create(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.input.push(c);
        } else if let Some(form) = &mut self.edit_form {
            form.input.push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.input.pop();
        } else if let Some(form) = &mut self.edit_form {
            form.input.pop();
        }
    }

    /// Advance the creation flow one step; creates the task once every
    /// required step has been filled in.
    pub fn submit_create_step(&mut self) {
        let Some(mut form) = self.input_form.take() else {
            return;
        };
        let text = form.input.trim().to_string();

        match form.step {
            CreateStep::Description => {
                if text.is_empty() {
                    self.input_form = Some(form);
                    return;
                }
                form.description = text;
                form.input.clear();
                if self.settings.require_details {
                    form.step = CreateStep::Details;
                    self.input_form = Some(form);
                } else if self.settings.require_requester {
                    form.step = CreateStep::Requester;
                    self.input_form = Some(form);
                } else {
                    self.create_task(form.description, String::new(), String::new());
                    self.ui_mode = UiMode::Normal;
                }
            }
            CreateStep::Details => {
                if text.is_empty() {
                    self.input_form = Some(form);
                    return;
                }
                form.details = text;
                form.input.clear();
                if self.settings.require_requester {
                    form.step = CreateStep::Requester;
                    self.input_form = Some(form);
                } else {
                    self.create_task(form.description, form.details, String::new());
                    self.ui_mode = UiMode::Normal;
                }
            }
            CreateStep::Requester => {
                if text.is_empty() {
                    self.input_form = Some(form);
                    return;
                }
                self.create_task(form.description, form.details, text);
                self.ui_mode = UiMode::Normal;
            }
        }
    }

    // ---- duration edit modal ----

    pub fn start_edit_time(&mut self) {
        let Some((task_id, seconds)) = self
            .selected_task()
            .map(|t| (t.id, t.total_duration_seconds))
        else {
            return;
        };
        self.edit_form = Some(EditTimeState {
            task_id,
            input: format_clock(seconds),
        });
        self.ui_mode = UiMode::EditingTime;
    }

    pub fn cancel_edit_time(&mut self) {
        self.edit_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn submit_edit_time(&mut self) {
        if let Some(form) = self.edit_form.take() {
            self.edit_time(form.task_id, &form.input);
        }
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::notifications::testing::RecordingNotifier;
    use crate::persistence::store::testing::{FailingStore, MemoryStore};
    use crate::rounding::RoundingMode;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    struct Fixture {
        app: AppState,
        clock: Rc<ManualClock>,
        store: Rc<MemoryStore>,
        notifier: Rc<RecordingNotifier>,
    }

    fn fixture_with(settings: Settings) -> Fixture {
        let start = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let clock = Rc::new(ManualClock::new(start));
        let store = Rc::new(MemoryStore::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let app = AppState::new(
            Vec::new(),
            settings,
            clock.clone(),
            store.clone(),
            notifier.clone(),
        );
        Fixture {
            app,
            clock,
            store,
            notifier,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Settings::default())
    }

    fn running_count(app: &AppState) -> usize {
        app.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Running)
            .count()
    }

    #[test]
    fn test_create_makes_sole_running_task() {
        let mut f = fixture();
        f.app
            .create_task("First".to_string(), String::new(), String::new());
        assert_eq!(running_count(&f.app), 1);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 0);

        f.clock.advance(Duration::seconds(30));
        f.app
            .create_task("Second".to_string(), String::new(), String::new());

        assert_eq!(running_count(&f.app), 1);
        assert_eq!(f.app.tasks[0].description, "Second");
        assert_eq!(f.app.tasks[0].status, TaskStatus::Running);
        // The first task was paused in the same pass, frozen at 30 s
        assert_eq!(f.app.tasks[1].status, TaskStatus::Paused);
        assert_eq!(f.app.tasks[1].total_duration_seconds, 30);
    }

    #[test]
    fn test_single_running_invariant_through_sequence() {
        let mut f = fixture();
        f.app
            .create_task("A".to_string(), String::new(), String::new());
        f.app
            .create_task("B".to_string(), String::new(), String::new());
        f.app
            .create_task("C".to_string(), String::new(), String::new());

        let a = f.app.tasks[2].id;
        let b = f.app.tasks[1].id;

        f.app.start_task(a);
        assert!(running_count(&f.app) <= 1);
        f.app.start_task(b);
        assert!(running_count(&f.app) <= 1);
        f.app.pause_task(b);
        assert_eq!(running_count(&f.app), 0);
        f.app.start_task(a);
        assert_eq!(running_count(&f.app), 1);
    }

    #[test]
    fn test_scenario_create_pause_complete_with_rounding() {
        let mut settings = Settings::default();
        settings.rounding_mode = RoundingMode::Up;
        settings.rounding_step = 10;
        let mut f = fixture_with(settings);

        f.app
            .create_task("Fix bug".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;
        assert_eq!(f.app.tasks[0].total_duration_seconds, 0);

        f.clock.advance(Duration::seconds(125));
        f.app.pause_task(id);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 125);
        assert_eq!(f.app.tasks[0].status, TaskStatus::Paused);

        f.app.complete_task(id);
        assert_eq!(f.app.tasks[0].status, TaskStatus::Completed);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 600);
    }

    #[test]
    fn test_rounding_applied_once_even_when_completed_running() {
        let mut settings = Settings::default();
        settings.rounding_mode = RoundingMode::Down;
        settings.rounding_step = 10;
        let mut f = fixture_with(settings);

        f.app
            .create_task("Quick".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;
        f.clock.advance(Duration::seconds(725));
        f.app.complete_task(id);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 600);

        // Completing again is a no-op, not a second rounding
        f.app.complete_task(id);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 600);
    }

    #[test]
    fn test_manual_edit_suppresses_rounding_and_marks_once() {
        let mut settings = Settings::default();
        settings.rounding_mode = RoundingMode::Up;
        settings.rounding_step = 10;
        let mut f = fixture_with(settings);

        f.app
            .create_task("Tuned".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;
        f.clock.advance(Duration::seconds(437));
        f.app.pause_task(id);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 437);

        f.app.edit_time(id, "500");
        f.app.edit_time(id, "00:08:20");
        assert!(f.app.tasks[0].manually_edited);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 500);
        assert_eq!(
            f.app.tasks[0]
                .details
                .matches(domain::MANUAL_EDIT_MARKER)
                .count(),
            1
        );

        f.app.complete_task(id);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 500);
    }

    #[test]
    fn test_elapsed_correct_under_suspension() {
        let mut f = fixture();
        f.app
            .create_task("Long".to_string(), String::new(), String::new());

        // One tick after a 60 s gap: wall-clock math, not tick counting
        f.clock.advance(Duration::seconds(60));
        f.app.tick();
        assert_eq!(f.app.tasks[0].total_duration_seconds, 60);
    }

    #[test]
    fn test_resume_continues_from_stored_duration() {
        let mut f = fixture();
        f.app
            .create_task("Resumable".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;

        f.clock.advance(Duration::seconds(100));
        f.app.pause_task(id);

        // A long pause contributes nothing
        f.clock.advance(Duration::seconds(3600));
        f.app.start_task(id);
        f.clock.advance(Duration::seconds(25));
        f.app.tick();
        assert_eq!(f.app.tasks[0].total_duration_seconds, 125);
    }

    #[test]
    fn test_edit_time_while_running_rebases_timer() {
        let mut f = fixture();
        f.app
            .create_task("Live".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;

        f.clock.advance(Duration::seconds(100));
        f.app.tick();
        assert_eq!(f.app.tasks[0].total_duration_seconds, 100);

        f.app.edit_time(id, "500");
        f.clock.advance(Duration::seconds(10));
        f.app.tick();
        assert_eq!(f.app.tasks[0].total_duration_seconds, 510);
    }

    #[test]
    fn test_reminders_fire_once_per_boundary() {
        let mut settings = Settings::default();
        settings.notification_enabled = true;
        settings.notification_interval = 1;
        let mut f = fixture_with(settings);

        f.app
            .create_task("Noisy".to_string(), String::new(), String::new());

        for _ in 0..185 {
            f.clock.advance(Duration::seconds(1));
            f.app.tick();
        }

        let sent = f.notifier.sent.borrow();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].0.contains("Noisy"));
        assert!(!sent[0].2, "common task must not be flagged urgent");
    }

    #[test]
    fn test_reminder_gates_respected_per_class() {
        let mut settings = Settings::default();
        settings.notification_enabled = true;
        settings.notification_interval = 1;
        settings.notify_common_tasks = false;
        settings.sound_urgent_tasks = false;
        let mut f = fixture_with(settings);

        f.app
            .create_task("Quiet".to_string(), String::new(), String::new());
        for _ in 0..70 {
            f.clock.advance(Duration::seconds(1));
            f.app.tick();
        }
        assert!(f.notifier.sent.borrow().is_empty());

        // The urgent class is still eligible, without sound
        f.app.toggle_urgent(f.app.tasks[0].id);
        for _ in 0..70 {
            f.clock.advance(Duration::seconds(1));
            f.app.tick();
        }
        let sent = f.notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(!sent[0].1, "urgent sound disabled");
        assert!(sent[0].2);
    }

    #[test]
    fn test_pause_clears_cursor_and_resume_does_not_refire() {
        let mut settings = Settings::default();
        settings.notification_enabled = true;
        settings.notification_interval = 1;
        let mut f = fixture_with(settings);

        f.app
            .create_task("Stops".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;

        for _ in 0..61 {
            f.clock.advance(Duration::seconds(1));
            f.app.tick();
        }
        assert_eq!(f.notifier.sent.borrow().len(), 1);

        f.app.pause_task(id);
        f.app.start_task(id);

        // Just past the old boundary: the cursor re-seeded above the
        // current duration, so nothing fires until the next one.
        f.clock.advance(Duration::seconds(5));
        f.app.tick();
        assert_eq!(f.notifier.sent.borrow().len(), 1);

        for _ in 0..60 {
            f.clock.advance(Duration::seconds(1));
            f.app.tick();
        }
        assert_eq!(f.notifier.sent.borrow().len(), 2);
    }

    #[test]
    fn test_work_hours_reminder_five_minutes_before_lunch() {
        let mut settings = Settings::default();
        settings.work_hours_notification = true;
        settings.lunch_time = "12:00".to_string();
        let mut f = fixture_with(settings);

        f.app
            .create_task("Morning work".to_string(), String::new(), String::new());

        f.clock
            .set(Local.with_ymd_and_hms(2025, 3, 10, 11, 55, 2).unwrap());
        f.app.tick();
        f.app.tick();

        let sent = f.notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].0.contains("Lunch"));
        assert!(sent[0].1 && sent[0].2, "work-hours reminders are loud");
    }

    #[test]
    fn test_work_hours_silent_without_running_task() {
        let mut settings = Settings::default();
        settings.work_hours_notification = true;
        let mut f = fixture_with(settings);

        f.clock
            .set(Local.with_ymd_and_hms(2025, 3, 10, 11, 55, 0).unwrap());
        f.app.tick();
        assert!(f.notifier.sent.borrow().is_empty());
    }

    #[test]
    fn test_completed_requires_reopen_before_start() {
        let mut f = fixture();
        f.app
            .create_task("Done soon".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;
        f.app.complete_task(id);

        f.app.start_task(id);
        assert_eq!(f.app.tasks[0].status, TaskStatus::Completed);

        f.app.reopen_task(id);
        assert_eq!(f.app.tasks[0].status, TaskStatus::Paused);
        f.app.start_task(id);
        assert_eq!(f.app.tasks[0].status, TaskStatus::Running);
    }

    #[test]
    fn test_delete_running_task_leaves_nothing_running() {
        let mut f = fixture();
        f.app
            .create_task("Doomed".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;

        f.app.delete_task(id);
        assert!(f.app.tasks.is_empty());
        assert_eq!(running_count(&f.app), 0);

        // A stray tick after deletion is harmless
        f.clock.advance(Duration::seconds(5));
        f.app.tick();
    }

    #[test]
    fn test_reorder_selected_constrained_to_class() {
        let mut f = fixture();
        f.app
            .create_task("C".to_string(), String::new(), String::new());
        f.app
            .create_task("B".to_string(), String::new(), String::new());
        f.app
            .create_task("A".to_string(), String::new(), String::new());
        // Everything paused; A and B urgent
        let a = f.app.tasks[0].id;
        let b = f.app.tasks[1].id;
        f.app.pause_task(a);
        f.app.toggle_urgent(a);
        f.app.toggle_urgent(b);

        // Display: A, B (urgent) then C (normal)
        assert_eq!(f.app.display_ids(), vec![a, b, f.app.tasks[2].id]);

        // B up across A works (same class)
        f.app.selected = 1;
        f.app.move_task_up();
        assert_eq!(f.app.display_ids()[0], b);
        assert_eq!(f.app.selected, 0);

        // C up against an urgent task is rejected
        f.app.selected = 2;
        f.app.move_task_up();
        assert_eq!(f.app.display_ids()[2], f.app.tasks[2].id);
        assert_eq!(f.app.selected, 2);
    }

    #[test]
    fn test_replace_tasks_rederives_single_running() {
        let mut f = fixture();
        let now = f.clock.now();

        let mut first = Task::new("one".to_string(), String::new(), String::new(), now);
        let mut second = Task::new("two".to_string(), String::new(), String::new(), now);
        first.total_duration_seconds = 40;
        second.total_duration_seconds = 70;
        // Both claim to be running; the snapshot wins on content but
        // not on invariants.
        assert_eq!(first.status, TaskStatus::Running);
        assert_eq!(second.status, TaskStatus::Running);

        f.app.replace_tasks(vec![first.clone(), second]);
        assert_eq!(running_count(&f.app), 1);
        assert_eq!(f.app.tasks[0].status, TaskStatus::Running);
        assert_eq!(f.app.tasks[1].status, TaskStatus::Paused);

        // The re-derived timer continues from the stored duration
        f.clock.advance(Duration::seconds(10));
        f.app.tick();
        assert_eq!(f.app.tasks[0].total_duration_seconds, 50);
    }

    #[test]
    fn test_persist_failure_never_fails_the_operation() {
        let start = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let clock = Rc::new(ManualClock::new(start));
        let store = Rc::new(FailingStore::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let mut app = AppState::new(
            Vec::new(),
            Settings::default(),
            clock,
            store.clone(),
            notifier,
        );

        app.create_task("Sturdy".to_string(), String::new(), String::new());
        assert_eq!(app.tasks.len(), 1);
        assert!(store.attempts.get() > 0);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut f = fixture();
        f.app
            .create_task("Tracked".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;
        f.app.pause_task(id);
        f.app.toggle_urgent(id);
        f.app.complete_task(id);
        f.app.reopen_task(id);
        f.app.delete_task(id);

        assert_eq!(f.store.snapshots.borrow().len(), 6);
        assert!(f.store.snapshots.borrow().last().unwrap().is_empty());
    }

    #[test]
    fn test_startup_coerces_running_to_paused() {
        let start = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let clock = Rc::new(ManualClock::new(start));
        let task = Task::new("Stale".to_string(), String::new(), String::new(), start);
        assert_eq!(task.status, TaskStatus::Running);

        let app = AppState::new(
            vec![task],
            Settings::default(),
            clock,
            Rc::new(MemoryStore::default()),
            Rc::new(RecordingNotifier::default()),
        );
        assert_eq!(app.tasks[0].status, TaskStatus::Paused);
    }

    #[test]
    fn test_creation_flow_collects_required_steps() {
        let mut settings = Settings::default();
        settings.require_details = true;
        settings.require_requester = true;
        let mut f = fixture_with(settings);

        f.app.start_create();
        assert_eq!(f.app.ui_mode, UiMode::Creating);

        for c in "Fix bug".chars() {
            f.app.form_input_char(c);
        }
        f.app.submit_create_step();
        assert_eq!(
            f.app.input_form.as_ref().unwrap().step,
            CreateStep::Details
        );

        for c in "login flow".chars() {
            f.app.form_input_char(c);
        }
        f.app.submit_create_step();
        assert_eq!(
            f.app.input_form.as_ref().unwrap().step,
            CreateStep::Requester
        );

        for c in "Maria".chars() {
            f.app.form_input_char(c);
        }
        f.app.submit_create_step();

        assert_eq!(f.app.ui_mode, UiMode::Normal);
        assert!(f.app.input_form.is_none());
        let task = &f.app.tasks[0];
        assert_eq!(task.description, "Fix bug");
        assert_eq!(task.details, "login flow");
        assert_eq!(task.requester, "Maria");
        assert_eq!(task.status, TaskStatus::Running);
    }

    #[test]
    fn test_creation_flow_skips_optional_steps() {
        let mut f = fixture();
        f.app.start_create();
        for c in "Quick note".chars() {
            f.app.form_input_char(c);
        }
        f.app.submit_create_step();

        assert_eq!(f.app.ui_mode, UiMode::Normal);
        assert_eq!(f.app.tasks[0].description, "Quick note");
        assert!(f.app.tasks[0].requester.is_empty());
    }

    #[test]
    fn test_empty_description_does_not_create() {
        let mut f = fixture();
        f.app.start_create();
        f.app.form_input_char(' ');
        f.app.submit_create_step();
        assert!(f.app.tasks.is_empty());
        assert_eq!(f.app.ui_mode, UiMode::Creating);
    }

    #[test]
    fn test_edit_modal_round_trip() {
        let mut f = fixture();
        f.app
            .create_task("Edit me".to_string(), String::new(), String::new());
        let id = f.app.tasks[0].id;
        f.app.pause_task(id);

        f.app.start_edit_time();
        assert_eq!(f.app.ui_mode, UiMode::EditingTime);
        let form = f.app.edit_form.as_mut().unwrap();
        form.input = "02:05".to_string();
        f.app.submit_edit_time();

        assert_eq!(f.app.tasks[0].total_duration_seconds, 125);
        assert!(f.app.tasks[0].manually_edited);
        assert_eq!(f.app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_today_total_ignores_other_days() {
        let mut f = fixture();
        f.app
            .create_task("Today".to_string(), String::new(), String::new());
        f.clock.advance(Duration::seconds(50));
        f.app.tick();

        let mut old = Task::new(
            "Yesterday".to_string(),
            String::new(),
            String::new(),
            f.clock.now() - Duration::days(1),
        );
        old.total_duration_seconds = 999;
        old.pause();
        f.app.tasks.push(old);

        assert_eq!(f.app.today_total_seconds(), 50);
    }

    #[test]
    fn test_shutdown_freezes_running_task() {
        let mut f = fixture();
        f.app
            .create_task("Open".to_string(), String::new(), String::new());
        f.clock.advance(Duration::seconds(42));
        f.app.shutdown();

        assert_eq!(f.app.tasks[0].status, TaskStatus::Paused);
        assert_eq!(f.app.tasks[0].total_duration_seconds, 42);
        let last = f.store.snapshots.borrow().last().cloned().unwrap();
        assert_eq!(last[0].total_duration_seconds, 42);
    }
}
