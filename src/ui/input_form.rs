use crate::app::{AppState, CreateStep};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the multi-step creation form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));

        // Preview of the steps already captured
        if !form.description.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("Subject: "),
                Span::styled(form.description.clone(), modal_title_style()),
            ]));
        }
        if !form.details.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("Details: "),
                Span::styled(form.details.clone(), modal_title_style()),
            ]));
        }
        if !form.description.is_empty() || !form.details.is_empty() {
            lines.push(Line::raw(""));
        }

        let prompt = match form.step {
            CreateStep::Description => "Subject:",
            CreateStep::Details => "Details:",
            CreateStep::Requester => "Requested by:",
        };
        lines.push(Line::raw(prompt));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.input.clone(), modal_title_style()),
            Span::styled("█", modal_title_style()),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::raw("Enter to continue  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" New Task ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
