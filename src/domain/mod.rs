pub mod ordering;
pub mod task;

pub use ordering::{day_buckets, display_ids, order_class, order_tasks, reorder, DayBucket, OrderClass};
pub use task::{coerce_running_to_paused, Task, TaskStatus, MANUAL_EDIT_MARKER};
