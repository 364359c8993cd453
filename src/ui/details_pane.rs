use crate::app::AppState;
use crate::domain::TaskStatus;
use crate::timefmt::{format_clock, format_human};
use crate::ui::styles::{border_style, dim_style, title_style, urgent_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    if let Some(task) = app.selected_task() {
        lines.push(Line::from(Span::styled(
            task.description.clone(),
            title_style(),
        )));
        lines.push(Line::raw(""));

        let status = match task.status {
            TaskStatus::Running => "Running",
            TaskStatus::Paused => "Paused",
            TaskStatus::Completed => "Completed",
        };
        lines.push(Line::raw(format!("Status: {}", status)));
        if task.is_urgent {
            lines.push(Line::from(Span::styled("URGENT", urgent_style())));
        }

        lines.push(Line::raw(format!(
            "Time: {} ({})",
            format_clock(task.total_duration_seconds),
            format_human(task.total_duration_seconds)
        )));
        lines.push(Line::raw(""));

        if !task.requester.is_empty() {
            lines.push(Line::raw(format!("Requested by: {}", task.requester)));
        }
        lines.push(Line::from(Span::styled(
            format!("Created: {}", task.created_at.format("%Y-%m-%d %H:%M")),
            dim_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("Started: {}", task.started_at.format("%Y-%m-%d %H:%M")),
            dim_style(),
        )));

        if !task.details.is_empty() {
            lines.push(Line::raw(""));
            for detail_line in task.details.lines() {
                lines.push(Line::raw(detail_line.to_string()));
            }
        }
    } else {
        lines.push(Line::raw("No task selected."));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Press 'a' to add a task.",
            dim_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Details ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
