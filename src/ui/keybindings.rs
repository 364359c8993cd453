use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Shift+↑/↓ reorder   "),
        Span::raw("Enter start/pause   "),
        Span::raw("c complete   "),
        Span::raw("o reopen   "),
        Span::raw("u urgent   "),
        Span::raw("e edit time   "),
        Span::raw("d delete   "),
        Span::raw("a add   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
