use crate::app::AppState;
use crate::domain::{day_buckets, Task, TaskStatus};
use crate::timefmt::format_clock;
use crate::ui::styles::{
    border_style, completed_style, day_header_style, default_style, dim_style, paused_style,
    running_style, selected_style, title_style, urgent_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Status badge text
fn status_badge(task: &Task) -> &'static str {
    match task.status {
        TaskStatus::Running => "⏱ RUNNING",
        TaskStatus::Paused => "⏸ PAUSED",
        TaskStatus::Completed => "✓ DONE",
    }
}

/// Render the day-grouped task list pane
pub fn render_task_list(f: &mut Frame, app: &AppState, area: Rect) {
    let buckets = day_buckets(&app.tasks);
    let today = chrono::Local::now().date_naive();

    let mut items: Vec<ListItem> = Vec::new();
    let mut row_index = 0;

    for bucket in &buckets {
        let today_label = if bucket.date == today { " (Today)" } else { "" };
        let header = Line::from(vec![Span::styled(
            format!(
                "─ {}{} — {}",
                bucket.date.format("%A, %b %d"),
                today_label,
                format_clock(bucket.total_seconds)
            ),
            day_header_style(),
        )]);
        items.push(ListItem::new(header));

        for task in &bucket.tasks {
            let line = create_task_line(task);
            let style = if row_index == app.selected {
                selected_style()
            } else {
                default_style()
            };
            items.push(ListItem::new(line).style(style));
            row_index += 1;
        }
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Rupt ⏱ ", title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format:   ⏱ RUNNING  Fix login bug  00:02:05  · Maria
fn create_task_line(task: &Task) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw("  "));

    let badge_style = match task.status {
        TaskStatus::Running => running_style(),
        TaskStatus::Paused => paused_style(),
        TaskStatus::Completed => completed_style(),
    };
    spans.push(Span::styled(format!("{:<9}", status_badge(task)), badge_style));
    spans.push(Span::raw("  "));

    if task.is_urgent {
        spans.push(Span::styled("! ".to_string(), urgent_style()));
    }

    spans.push(Span::raw(task.description.clone()));
    spans.push(Span::raw("  "));
    spans.push(Span::raw(format_clock(task.total_duration_seconds)));

    if !task.requester.is_empty() {
        spans.push(Span::styled(
            format!("  · {}", task.requester),
            dim_style(),
        ));
    }

    Line::from(spans)
}
