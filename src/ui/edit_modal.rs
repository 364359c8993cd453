use crate::app::AppState;
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

/// Render the duration edit modal
pub fn render_edit_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.edit_form {
        let modal_area = create_modal_area(area);
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw("New time (HH:MM:SS, MM:SS, or seconds):"),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(form.input.clone(), modal_title_style()),
                Span::styled("█", modal_title_style()),
            ]),
            Line::raw(""),
            Line::raw("The task is marked as manually adjusted and"),
            Line::raw("skips rounding on completion."),
            Line::raw(""),
            Line::raw("Enter to save  ·  Esc to cancel"),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Edit Time ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
