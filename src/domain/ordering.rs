use super::task::{Task, TaskStatus};
use chrono::NaiveDate;
use uuid::Uuid;

/// Display class of a task, highest priority first. Running beats
/// everything, urgency only matters for tasks that are still open, and
/// completed tasks always sink to the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderClass {
    Running,
    Urgent,
    Normal,
    Completed,
}

impl OrderClass {
    const ALL: [OrderClass; 4] = [
        OrderClass::Running,
        OrderClass::Urgent,
        OrderClass::Normal,
        OrderClass::Completed,
    ];
}

pub fn order_class(task: &Task) -> OrderClass {
    match task.status {
        TaskStatus::Running => OrderClass::Running,
        TaskStatus::Completed => OrderClass::Completed,
        TaskStatus::Paused if task.is_urgent => OrderClass::Urgent,
        TaskStatus::Paused => OrderClass::Normal,
    }
}

/// Deterministic display order over a task collection.
///
/// A stable four-way partition: the relative order inside each class is
/// the stored (manual) arrangement, untouched. Reapplying to the output
/// is a fixed point.
pub fn order_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut ordered = Vec::with_capacity(tasks.len());
    for class in OrderClass::ALL {
        ordered.extend(
            tasks
                .iter()
                .filter(|task| order_class(task) == class)
                .cloned(),
        );
    }
    ordered
}

/// One calendar day of tasks, ordered for display.
#[derive(Debug, Clone)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    pub total_seconds: u64,
}

/// Group tasks by the local calendar date of `created_at`, newest day
/// first, with the class ordering applied independently inside each
/// bucket.
pub fn day_buckets(tasks: &[Task]) -> Vec<DayBucket> {
    let mut grouped: Vec<(NaiveDate, Vec<Task>)> = Vec::new();

    for task in tasks {
        let date = task.created_at.date_naive();
        match grouped.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(task.clone()),
            None => grouped.push((date, vec![task.clone()])),
        }
    }

    grouped.sort_by(|a, b| b.0.cmp(&a.0));

    grouped
        .into_iter()
        .map(|(date, bucket)| {
            let total_seconds = bucket.iter().map(|t| t.total_duration_seconds).sum();
            DayBucket {
                date,
                tasks: order_tasks(&bucket),
                total_seconds,
            }
        })
        .collect()
}

/// Flattened display order across day buckets, which is what the list
/// pane and selection logic walk over.
pub fn display_ids(tasks: &[Task]) -> Vec<Uuid> {
    day_buckets(tasks)
        .iter()
        .flat_map(|bucket| bucket.tasks.iter().map(|t| t.id))
        .collect()
}

/// Whether two tasks may trade places: same urgency, neither running
/// nor completed. Anything else would break the absolute class order.
fn can_reorder(a: &Task, b: &Task) -> bool {
    let movable =
        |t: &Task| t.status != TaskStatus::Running && t.status != TaskStatus::Completed;
    movable(a) && movable(b) && a.is_urgent == b.is_urgent
}

/// Move `moving` to `target`'s position in the stored collection.
/// Invalid attempts (cross-class, running or completed endpoints,
/// unknown ids) leave the collection untouched and return false.
pub fn reorder(tasks: &mut Vec<Task>, moving: Uuid, target: Uuid, today: NaiveDate) -> bool {
    if moving == target {
        return false;
    }
    let Some(from) = tasks.iter().position(|t| t.id == moving) else {
        return false;
    };
    let Some(to) = tasks.iter().position(|t| t.id == target) else {
        return false;
    };
    if !can_reorder(&tasks[from], &tasks[to]) {
        return false;
    }

    // Remove then insert at the target's pre-removal index: dragging up
    // lands before the target, dragging down lands after it.
    let mut task = tasks.remove(from);
    task.custom_order_date = Some(today);
    tasks.insert(to.min(tasks.len()), task);
    true
}
