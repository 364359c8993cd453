pub mod details_pane;
pub mod edit_modal;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod styles;
pub mod task_list;

use crate::app::AppState;
use crate::timefmt::format_clock;
use details_pane::render_details_pane;
use edit_modal::render_edit_modal;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{dim_style, title_style};
use task_list::render_task_list;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);

    // Header: today's tracked total
    let header = Line::from(vec![
        Span::styled(" Today: ", dim_style()),
        Span::styled(format_clock(app.today_total_seconds()), title_style()),
    ]);
    f.render_widget(Paragraph::new(header), layout.header_area);

    render_task_list(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);

    // Modals
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
    if app.edit_form.is_some() {
        render_edit_modal(f, app, size);
    }
}
